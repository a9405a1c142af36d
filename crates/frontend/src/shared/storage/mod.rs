//! Key-value persistence adapter.
//!
//! `KeyValueStore` wraps a raw string backend (browser `localStorage` or an
//! in-memory map) with JSON encoding. It never fails from the caller's point of
//! view: quota errors, disabled storage, a non-browser context and corrupt JSON
//! are logged and turned into "absent" / no-op.

mod browser;
mod memory;

pub use browser::BrowserStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available in this context")]
    Unavailable,
    #[error("storage quota exceeded: {0}")]
    Quota(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Сырое строковое хранилище. Реализации: `BrowserStorage`, `MemoryStorage`.
pub trait StorageBackend: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_raw(&self, key: &str) -> Result<(), StorageError>;
    /// Все ключи хранилища (порядок не гарантируется)
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// JSON поверх `StorageBackend`. Клонируется дёшево (Arc).
#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
}

impl fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueStore").finish_non_exhaustive()
    }
}

impl KeyValueStore {
    pub fn from_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// `window.localStorage` (no-op outside the browser)
    pub fn browser() -> Self {
        Self::from_backend(Arc::new(BrowserStorage))
    }

    pub fn memory() -> Self {
        Self::from_backend(Arc::new(MemoryStorage::new()))
    }

    /// Reads and decodes a value. Missing key, storage failure and parse
    /// failure all yield `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Error reading storage key \"{}\": {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unparseable value under \"{}\": {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to encode value for \"{}\": {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.set_raw(key, &raw) {
            log::warn!("Error setting storage key \"{}\": {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_raw(key) {
            log::warn!("Error removing storage key \"{}\": {}", key, e);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.get_raw(key), Ok(Some(_)))
    }

    /// Sorted keys that start with `prefix`.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.backend.keys() {
            Ok(keys) => {
                let mut matching: Vec<String> =
                    keys.into_iter().filter(|k| k.starts_with(prefix)).collect();
                matching.sort();
                matching
            }
            Err(e) => {
                log::warn!("Error listing storage keys: {}", e);
                Vec::new()
            }
        }
    }

    /// Removes every key under `prefix`, returns how many were removed.
    pub fn remove_with_prefix(&self, prefix: &str) -> usize {
        let keys = self.keys_with_prefix(prefix);
        let mut removed = 0;
        for key in keys {
            match self.backend.remove_raw(&key) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("Error removing storage key \"{}\": {}", key, e),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        page: usize,
        search: String,
    }

    #[test]
    fn test_set_then_get() {
        let store = KeyValueStore::memory();
        let prefs = Prefs { page: 3, search: "jane".into() };
        store.set("prefs", &prefs);
        assert_eq!(store.get::<Prefs>("prefs"), Some(prefs));
        assert_eq!(store.get::<Prefs>("missing"), None);
    }

    #[test]
    fn test_corrupt_json_is_absent() {
        let mem = Arc::new(MemoryStorage::new());
        let store = KeyValueStore::from_backend(mem.clone());
        mem.set_raw("prefs", "{not json").unwrap();
        assert_eq!(store.get::<Prefs>("prefs"), None);
        // ключ не удаляется, просто игнорируется
        assert!(store.contains("prefs"));
    }

    #[test]
    fn test_type_mismatch_is_absent() {
        let store = KeyValueStore::memory();
        store.set("prefs", "just a string");
        assert_eq!(store.get::<Prefs>("prefs"), None);
        assert_eq!(store.get::<String>("prefs"), Some("just a string".to_string()));
    }

    #[test]
    fn test_unavailable_storage_degrades_to_noop() {
        let store = KeyValueStore::from_backend(Arc::new(MemoryStorage::unavailable()));
        store.set("k", &1);
        store.remove("k");
        assert_eq!(store.get::<i32>("k"), None);
        assert!(store.keys_with_prefix("").is_empty());
        assert_eq!(store.remove_with_prefix(""), 0);
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let store = KeyValueStore::from_backend(Arc::new(MemoryStorage::with_capacity(16)));
        store.set("k", "short");
        store.set("k", "this value is far too long for the quota");
        assert_eq!(store.get::<String>("k"), Some("short".to_string()));
    }

    #[test]
    fn test_prefix_operations() {
        let store = KeyValueStore::memory();
        store.set("app:overlay:orders:1", "a");
        store.set("app:overlay:orders:2", "b");
        store.set("app:auth_user", "c");
        assert_eq!(
            store.keys_with_prefix("app:overlay:"),
            vec!["app:overlay:orders:1".to_string(), "app:overlay:orders:2".to_string()]
        );
        assert_eq!(store.remove_with_prefix("app:overlay:"), 2);
        assert!(store.keys_with_prefix("app:overlay:").is_empty());
        assert!(store.contains("app:auth_user"));
    }
}
