//! Tests for the auth module

use super::*;
use crate::error::{Error, Result};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

/// Store whose writes always fail
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::storage("read-only"))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::storage("read-only"))
    }
}

#[test]
fn test_load_without_persisted_token() {
    let manager = TokenManager::load(Arc::new(MemoryStore::new())).unwrap();
    assert!(!manager.has_token());
    assert_eq!(manager.token(), None);
    assert_eq!(manager.key(), TOKEN_KEY);
}

#[test]
fn test_load_adopts_persisted_token() {
    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, "persisted").unwrap();

    let manager = TokenManager::load(store).unwrap();
    assert_eq!(manager.token(), Some("persisted".to_string()));
}

#[test]
fn test_load_treats_empty_token_as_absent() {
    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, "").unwrap();

    let manager = TokenManager::load(store).unwrap();
    assert!(!manager.has_token());
}

#[test]
fn test_set_persists_and_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let manager = TokenManager::load(store.clone()).unwrap();

    manager.set("abc").unwrap();
    manager.set("abc").unwrap();

    assert_eq!(manager.token(), Some("abc".to_string()));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), Some("abc".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clear_removes_persisted_entry_and_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let manager = TokenManager::load(store.clone()).unwrap();
    manager.set("abc").unwrap();

    manager.clear().unwrap();
    manager.clear().unwrap();

    assert_eq!(manager.token(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_custom_key() {
    let store = Arc::new(MemoryStore::new());
    let manager = TokenManager::load_with_key(store.clone(), "bc_token").unwrap();
    manager.set("xyz").unwrap();

    assert_eq!(store.get("bc_token").unwrap(), Some("xyz".to_string()));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_clones_share_state() {
    let manager = TokenManager::in_memory();
    let other = manager.clone();

    manager.set("shared").unwrap();
    assert_eq!(other.token(), Some("shared".to_string()));

    other.clear().unwrap();
    assert!(!manager.has_token());
}

#[test]
fn test_empty_token_clears_instead_of_storing() {
    let store = Arc::new(MemoryStore::new());
    let manager = TokenManager::load(store.clone()).unwrap();
    manager.set("real").unwrap();

    manager.set("").unwrap();
    assert!(!manager.has_token());
    assert_eq!(manager.token(), None);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

    let reloaded = TokenManager::load(store).unwrap();
    assert_eq!(reloaded.token(), manager.token());
}

#[test]
fn test_token_survives_reload_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let first = TokenManager::load(Arc::new(FileStore::open(&path).unwrap())).unwrap();
    first.set("from-disk").unwrap();

    let second = TokenManager::load(Arc::new(FileStore::open(&path).unwrap())).unwrap();
    assert_eq!(second.token(), Some("from-disk".to_string()));
}

#[test]
fn test_failed_store_write_leaves_memory_unchanged() {
    let inner = MemoryStore::new();
    inner.set(TOKEN_KEY, "original").unwrap();
    let manager = TokenManager::load(Arc::new(ReadOnlyStore { inner })).unwrap();

    assert!(manager.set("new").is_err());
    assert_eq!(manager.token(), Some("original".to_string()));

    assert!(manager.clear().is_err());
    assert_eq!(manager.token(), Some("original".to_string()));
}

#[test]
fn test_concurrent_set_and_clear_stay_in_sync() {
    let store = Arc::new(MemoryStore::new());
    let manager = TokenManager::load(store.clone()).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = manager.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    if (i + round) % 2 == 0 {
                        manager.set(format!("token-{i}-{round}")).unwrap();
                    } else {
                        manager.clear().unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.token(), store.get(TOKEN_KEY).unwrap());
}

#[test]
fn test_debug_hides_token() {
    let manager = TokenManager::in_memory();
    manager.set("super-secret").unwrap();

    let debug = format!("{manager:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("has_token: true"));
}
