//! `localStorage` adapter.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::storage::{KeyValueStore, StorageError};

/// `window.localStorage`, or nothing when the browser denies access
/// (private mode, disabled storage, sandboxed frames).
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("storage: localStorage unavailable, theme choice will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read { key: key.to_owned(), reason: reason(&err) })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write { key: key.to_owned(), reason: reason(&err) })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Write { key: key.to_owned(), reason: reason(&err) })
    }
}
