/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store could not be opened
    #[error("Failed to open store at {path}: {reason}")]
    Open {
        /// Location that was opened
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Key cannot be mapped onto the backend
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend is not usable in this environment (e.g. no browser storage)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Embedded database error
    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Database(#[from] redb::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create an open error
    pub fn open(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<StorageError> for cadence_core::CadenceError {
    fn from(err: StorageError) -> Self {
        cadence_core::CadenceError::storage(err.to_string())
    }
}
