//! HTTP request primitive
//!
//! Every BookCommunity call goes through [`HttpClient::request`], which:
//! - Appends the path and an encoded query string to the base URL
//! - Merges caller headers over the JSON content type, then adds the bearer token
//! - Clears the stored token and fails on HTTP 401
//! - Parses the body as JSON whatever the status, passing other failures through

use crate::auth::TokenManager;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, StringMap};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Default base URL of the BookCommunity API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/douyin";

/// Content type sent with every request
const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL every path is appended to
    pub base_url: String,
    /// Request timeout (`None` waits indefinitely)
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request, before caller headers are merged
    pub default_headers: StringMap,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("book-community/{}", env!("CARGO_PKG_VERSION")),
            default_headers: StringMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// HTTP method
    pub method: Method,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers, merged over the defaults
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl RequestConfig {
    /// Create a new GET request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new POST request config
    pub fn post() -> Self {
        Self::new().method(Method::POST)
    }

    /// Set the method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client bound to a base URL and a token manager
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    tokens: TokenManager,
}

impl HttpClient {
    /// Create a client with the given configuration and token manager
    pub fn new(config: HttpClientConfig, tokens: TokenManager) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Token manager used for the `Authorization` header
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Send a request and parse the JSON body
    ///
    /// Returns the parsed body for every status except 401. A 401 clears the
    /// stored token and yields [`Error::Unauthorized`] without reading the
    /// body. Transport and JSON failures are logged and returned as-is.
    ///
    /// If the store cannot remove the token on a 401, the in-memory token is
    /// kept as well so the two copies stay equal. The failure is logged at
    /// error level and [`Error::Unauthorized`] is still returned; callers
    /// can retry with [`TokenManager::clear`].
    pub async fn request(&self, path: &str, config: RequestConfig) -> Result<JsonValue> {
        let url = self.build_url(path, &config.query)?;
        let headers = self.build_headers(&config.headers)?;
        let method: reqwest::Method = config.method.into();

        // Path only: login and register carry credentials in the query
        debug!("{} {}", method, url.path());

        let mut req = self.client.request(method, url).headers(headers);
        if let Some(ref body) = config.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let response = req.send().await.map_err(|e| {
            error!("API request failed: {}", e);
            Error::Http(e)
        })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            warn!("Received 401 for {}, clearing stored token", path);
            if let Err(e) = self.tokens.clear() {
                error!("Failed to clear token after 401, it is still held: {}", e);
            }
            return Err(Error::Unauthorized);
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!("API request failed: {}", e);
            Error::Http(e)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("API request failed: invalid JSON body: {}", e);
            Error::JsonParse(e)
        })
    }

    /// Build the full URL from the base URL, a path and query parameters
    ///
    /// The path is always joined under the base URL, even when it looks like
    /// an absolute URL, so the bearer token never leaves the configured host.
    ///
    /// Query values are percent-encoded like `encodeURIComponent`, so a
    /// space becomes `%20` rather than `+`.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut full = if path.is_empty() || path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            full.push(if full.contains('?') { '&' } else { '?' });
            full.push_str(&encoded);
        }

        Ok(Url::parse(&full)?)
    }

    /// Merge default, caller and auth headers, in that order
    fn build_headers(&self, extra: &StringMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        for (key, value) in self.config.default_headers.iter().chain(extra) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_header(key, e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_header(key, e.to_string()))?;
            headers.insert(name, value);
        }

        if let Some(token) = self.tokens.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::invalid_header(AUTHORIZATION.as_str(), e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
