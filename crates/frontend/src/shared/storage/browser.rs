use super::{StorageBackend, StorageError};

/// `window.localStorage`.
///
/// Outside wasm32 (unit tests, prerender) every call reports `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|e| StorageError::Backend(format!("{:?}", e)))?
        .ok_or(StorageError::Unavailable)
}

#[cfg(not(target_arch = "wasm32"))]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    Err(StorageError::Unavailable)
}

fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    let text = format!("{:?}", err);
    // Chrome/Firefox: QuotaExceededError, старый Firefox: NS_ERROR_DOM_QUOTA_REACHED
    if text.contains("QuotaExceeded") || text.contains("QUOTA_REACHED") {
        StorageError::Quota(text)
    } else {
        StorageError::Backend(text)
    }
}

impl StorageBackend for BrowserStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_raw(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let storage = local_storage()?;
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = storage.key(i).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_outside_browser() {
        let storage = BrowserStorage;
        assert_eq!(storage.get_raw("k"), Err(StorageError::Unavailable));
        assert_eq!(storage.set_raw("k", "v"), Err(StorageError::Unavailable));
        assert_eq!(storage.keys(), Err(StorageError::Unavailable));
    }
}
