/// Core traits for Cadence
use crate::error::Result;

/// Durable key-value storage
///
/// Values are opaque strings (the playback layer stores JSON documents).
/// Implementations decide where the data lives: memory, a directory of
/// files, an embedded database or browser local storage.
///
/// Callers in the playback layer treat every failure as best-effort:
/// a failed read becomes "no value", a failed write is logged and dropped.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`
    ///
    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
