//! Cadence Storage
//!
//! Key-value persistence backends for Cadence.
//!
//! Every backend implements [`cadence_core::KeyValueStore`], so the playback
//! layer never knows where its progress and queue records end up.
//!
//! # Backends
//!
//! - `MemoryStore`: process-local map, for tests and throwaway sessions
//! - `JsonFileStore`: one JSON file per key in a directory
//! - `RedbStore`: single embedded database file (native targets)
//! - `LocalStorageStore`: `window.localStorage` (wasm32 targets)
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::KeyValueStore;
//! use cadence_storage::{open_store, StoreBackend, StoreConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig {
//!     backend: StoreBackend::Json,
//!     path: ".cadence".into(),
//! };
//! let mut store = open_store(&config)?;
//! store.set("greeting", "\"hello\"")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod json_file;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod redb_store;

#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use error::{Result, StorageError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use redb_store::RedbStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use cadence_core::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the embedded database inside the storage directory
pub const DATABASE_FILE_NAME: &str = "cadence.redb";

/// Which backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Nothing persists past the process
    Memory,
    /// Directory of JSON files
    #[default]
    Json,
    /// Embedded database file
    Redb,
    /// Browser local storage
    Browser,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to use
    #[serde(default)]
    pub backend: StoreBackend,

    /// Storage directory (ignored by the memory and browser backends)
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from(".cadence")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
        }
    }
}

/// Open the configured backend
///
/// # Errors
/// Returns an error if the backend cannot be opened or is not available on
/// this target
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::Json => Ok(Box::new(JsonFileStore::open(&config.path)?)),
        #[cfg(not(target_arch = "wasm32"))]
        StoreBackend::Redb => Ok(Box::new(RedbStore::open(
            config.path.join(DATABASE_FILE_NAME),
        )?)),
        #[cfg(target_arch = "wasm32")]
        StoreBackend::Redb => Err(StorageError::Unavailable(
            "embedded database is not supported in the browser".to_string(),
        )),
        #[cfg(target_arch = "wasm32")]
        StoreBackend::Browser => Ok(Box::new(LocalStorageStore::new())),
        #[cfg(not(target_arch = "wasm32"))]
        StoreBackend::Browser => Err(StorageError::Unavailable(
            "browser local storage requires a wasm32 target".to_string(),
        )),
    }
}
