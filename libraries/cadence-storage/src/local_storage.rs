//! Browser local storage
//!
//! Raw string access to `window.localStorage`. Values are stored exactly as
//! given (the playback layer already serializes to JSON), so they stay
//! readable from the browser's developer tools.

use crate::error::StorageError;
use cadence_core::{KeyValueStore, Result};
use gloo_storage::{LocalStorage, Storage};

/// Key-value store backed by `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// Create a handle to the browser's local storage
    pub fn new() -> Self {
        Self
    }
}

fn unavailable(err: impl std::fmt::Debug) -> StorageError {
    StorageError::Unavailable(format!("{err:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = LocalStorage::raw().get_item(key).map_err(unavailable)?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(unavailable)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}
