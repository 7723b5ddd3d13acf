//! Best-effort persistence of session records
//!
//! Wraps a [`KeyValueStore`] with the two records the session keeps: the
//! progress map and the queue. Nothing here returns an error: a failed or
//! garbled read yields an empty record, a failed write is logged and dropped.

use crate::progress::ProgressStore;
use crate::queue::Queue;
use cadence_core::{KeyValueStore, MediaItem};
use tracing::{debug, warn};

/// Storage handle plus record keys
pub(crate) struct SessionStorage {
    store: Box<dyn KeyValueStore>,
    progress_key: String,
    queue_key: String,
}

impl SessionStorage {
    pub(crate) fn new(
        store: Box<dyn KeyValueStore>,
        progress_key: impl Into<String>,
        queue_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            progress_key: progress_key.into(),
            queue_key: queue_key.into(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Failed to write {}: {}", key, e);
        }
    }

    /// Load the progress record, empty when missing or unreadable
    pub(crate) fn load_progress(&self) -> ProgressStore {
        let Some(raw) = self.read(&self.progress_key) else {
            return ProgressStore::new();
        };

        ProgressStore::from_json(&raw).unwrap_or_else(|e| {
            warn!("Failed to parse progress record: {}", e);
            ProgressStore::new()
        })
    }

    /// Load the queue record, empty when missing or unreadable
    pub(crate) fn load_queue(&self) -> Queue {
        let Some(raw) = self.read(&self.queue_key) else {
            return Queue::new();
        };

        match serde_json::from_str::<Vec<MediaItem>>(&raw) {
            Ok(items) => Queue::from_items(items),
            Err(e) => {
                warn!("Failed to parse queue record: {}", e);
                Queue::new()
            }
        }
    }

    pub(crate) fn save_progress(&mut self, progress: &ProgressStore) {
        match progress.to_json() {
            Ok(json) => {
                let key = self.progress_key.clone();
                self.write(&key, &json);
            }
            Err(e) => warn!("Failed to serialize progress record: {}", e),
        }
    }

    pub(crate) fn save_queue(&mut self, queue: &Queue) {
        match serde_json::to_string(queue) {
            Ok(json) => {
                let key = self.queue_key.clone();
                self.write(&key, &json);
                debug!("Persisted queue ({} items)", queue.len());
            }
            Err(e) => warn!("Failed to serialize queue record: {}", e),
        }
    }
}
