use super::{StorageBackend, StorageError};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-process storage: tests and environments without `localStorage`.
///
/// `with_capacity` limits the total size (key + value bytes) to emulate the
/// browser quota; `unavailable` emulates disabled storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    capacity: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            capacity: Some(bytes),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("memory storage lock poisoned".to_string()))?;
        f(&mut entries)
    }
}

impl StorageBackend for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_entries(|entries| Ok(entries.get(key).cloned()))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let capacity = self.capacity;
        self.with_entries(|entries| {
            if let Some(limit) = capacity {
                let used: usize = entries
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum();
                if used + key.len() + value.len() > limit {
                    return Err(StorageError::Quota(format!(
                        "{} bytes requested, {} of {} in use",
                        key.len() + value.len(),
                        used,
                        limit
                    )));
                }
            }
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove_raw(&self, key: &str) -> Result<(), StorageError> {
        self.with_entries(|entries| {
            entries.remove(key);
            Ok(())
        })
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.with_entries(|entries| Ok(entries.keys().cloned().collect()))
    }
}
