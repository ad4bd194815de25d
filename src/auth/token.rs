//! Token manager implementation
//!
//! Holds the bearer token and keeps it in sync with persistent storage.

use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::OptionStringExt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Storage key the token is persisted under
pub const TOKEN_KEY: &str = "token";

/// Bearer token held in memory and mirrored into a `KeyValueStore`
///
/// Cloning shares the same token and store. Every mutation writes the store
/// first and only then updates memory, both under one lock, so the two copies
/// never diverge: a failed store write leaves memory untouched.
#[derive(Clone)]
pub struct TokenManager {
    /// Persistent storage
    store: Arc<dyn KeyValueStore>,
    /// Key used in the store
    key: String,
    /// Current token
    token: Arc<RwLock<Option<String>>>,
}

impl TokenManager {
    /// Load the token persisted under [`TOKEN_KEY`], if any
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::load_with_key(store, TOKEN_KEY)
    }

    /// Load the token persisted under a custom key
    pub fn load_with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let token = store.get(&key)?.none_if_empty();

        if token.is_some() {
            debug!(key = %key, "Restored persisted token");
        }

        Ok(Self {
            store,
            key,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// Create a manager backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            key: TOKEN_KEY.to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is held
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Adopt `token` and persist it. No format validation.
    ///
    /// An empty token is not a credential: it clears instead, matching how
    /// [`TokenManager::load`] reads an empty persisted value.
    pub fn set(&self, token: impl Into<String>) -> Result<()> {
        let Some(token) = token.into().none_if_empty() else {
            return self.clear();
        };
        let mut current = self.token.write().unwrap_or_else(PoisonError::into_inner);

        self.store.set(&self.key, &token)?;
        *current = Some(token);

        info!("Stored new API token");
        Ok(())
    }

    /// Drop the token from memory and storage
    pub fn clear(&self) -> Result<()> {
        let mut current = self.token.write().unwrap_or_else(PoisonError::into_inner);

        self.store.remove(&self.key)?;
        if current.take().is_some() {
            info!("Cleared API token");
        }

        Ok(())
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("key", &self.key)
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}
