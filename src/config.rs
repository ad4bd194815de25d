//! Client configuration
//!
//! Settings are read from an optional YAML file; every field has a default
//! so an empty file (or no file at all) yields a working configuration.
//!
//! ```yaml
//! base_url: http://localhost:8080/douyin
//! community_base_url: http://localhost:8080/api
//! timeout_seconds: 30
//! user_agent: book-community/0.1.0
//! token_file: /home/alice/.local/share/book-community/storage.json
//! headers:
//!   X-Client: cli
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use crate::storage::FileStore;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the community API (absent = origin of `base_url` + `/api`)
    #[serde(default)]
    pub community_base_url: Option<String>,

    /// Request timeout in seconds (absent = no timeout)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Where the token store lives (absent = platform data dir)
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            community_base_url: None,
            timeout_seconds: None,
            user_agent: None,
            token_file: None,
            headers: StringMap::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        if self
            .community_base_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(Error::config("community_base_url must not be empty"));
        }
        if self.timeout_seconds == Some(0) {
            return Err(Error::config("timeout_seconds must be greater than zero"));
        }
        Ok(())
    }

    /// HTTP client settings derived from this configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().base_url(&self.base_url);
        if let Some(secs) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// Location of the token store
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => FileStore::default_path()
                .ok_or_else(|| Error::config("No token_file set and no user data directory")),
        }
    }
}
