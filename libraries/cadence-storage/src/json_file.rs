//! Directory-backed store
//!
//! One file per key under a directory: `<key>.json`. Writes go to a sibling
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use crate::error::StorageError;
use cadence_core::{KeyValueStore, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of stored values
const VALUE_EXTENSION: &str = "json";

/// Key-value store keeping each key in its own file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn open(root: impl Into<PathBuf>) -> std::result::Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StorageError::open(root.display().to_string(), e))?;

        info!("Opened file store at {}", root.display());
        Ok(Self { root })
    }

    /// Directory holding the value files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key onto a file path
    ///
    /// Keys may only use ASCII letters, digits, `.`, `-` and `_`, and may not
    /// start with a dot, so a key can never escape the store directory.
    fn path_for(&self, key: &str) -> std::result::Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let staging = path.with_extension(format!("{VALUE_EXTENSION}.tmp"));

        fs::write(&staging, value).map_err(StorageError::from)?;
        fs::rename(&staging, &path).map_err(StorageError::from)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }
}
