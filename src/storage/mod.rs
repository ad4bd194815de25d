//! Persistent key-value storage
//!
//! The client keeps its bearer token in a small string-keyed store that
//! survives process restarts, the way a browser keeps it in local storage.
//!
//! # Overview
//!
//! - `KeyValueStore` - Synchronous get/set/remove by string key
//! - `MemoryStore` - In-process store, shareable through `Arc`
//! - `FileStore` - JSON file on disk with atomic writes

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// A synchronous string key-value store
///
/// Implementations must be safe to share between tasks. No transactional
/// guarantee is made across processes: concurrent writers race and the last
/// write wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
