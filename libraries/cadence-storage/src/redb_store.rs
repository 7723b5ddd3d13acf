//! Embedded database store
//!
//! All keys live in a single `redb` table. Every `set` and `remove` commits
//! its own write transaction, which makes each write durable before the
//! call returns.

use crate::error::StorageError;
use cadence_core::{KeyValueStore, Result};
use redb::{Database, ReadableTable, TableDefinition, TableError};
use std::path::Path;
use tracing::info;

/// Table holding every key-value pair
const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries");

/// Key-value store backed by a `redb` database file
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a database file
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or is not a redb database
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::open(path.display().to_string(), e))?;
            }
        }

        let db = Database::create(path)
            .map_err(|e| StorageError::open(path.display().to_string(), e))?;

        info!("Opened database store at {}", path.display());
        Ok(Self { db })
    }

    fn read(&self, key: &str) -> std::result::Result<Option<String>, redb::Error> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(ENTRIES) {
            Ok(table) => table,
            // Nothing has been written yet
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write(&self, key: &str, value: Option<&str>) -> std::result::Result<(), redb::Error> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ENTRIES)?;
            match value {
                Some(value) => {
                    table.insert(key, value)?;
                }
                None => {
                    table.remove(key)?;
                }
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Every stored key, in key order
    ///
    /// # Errors
    /// Returns an error if the database cannot be read
    pub fn keys(&self) -> std::result::Result<Vec<String>, StorageError> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match txn.open_table(ENTRIES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(redb::Error::from(e).into()),
        };

        let mut keys = Vec::new();
        for entry in table.iter().map_err(redb::Error::from)? {
            let (key, _) = entry.map_err(redb::Error::from)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read(key).map_err(StorageError::from)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.write(key, Some(value)).map_err(StorageError::from)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.write(key, None).map_err(StorageError::from)?;
        Ok(())
    }
}
