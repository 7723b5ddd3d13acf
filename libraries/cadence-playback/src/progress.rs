//! Resume points
//!
//! Map of media id to the last recorded position in seconds. Stored as a
//! JSON object (`{"<id>": <seconds>, ...}`). Entries keep the order in which
//! each id was first recorded, including across a save and reload.

use cadence_core::MediaId;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Last known playback position per media item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProgressStore {
    positions: IndexMap<MediaId, f64>,
}

impl ProgressStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted progress record
    ///
    /// Entries whose value is not a finite number are skipped; a record that
    /// is not a JSON object at all is an error (the caller falls back to an
    /// empty store).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: IndexMap<MediaId, serde_json::Value> = serde_json::from_str(json)?;

        let mut positions = IndexMap::with_capacity(raw.len());
        for (id, value) in raw {
            match value.as_f64().filter(|v| v.is_finite()) {
                Some(seconds) => {
                    positions.insert(id, seconds);
                }
                None => debug!("Skipping unreadable resume point for {}: {}", id, value),
            }
        }

        Ok(Self { positions })
    }

    /// Serialize for persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Resume point for an item, `None` if it was never recorded
    pub fn resume_point(&self, id: &str) -> Option<f64> {
        self.positions.get(id).copied()
    }

    /// Record a position
    ///
    /// A new id goes to the end; an already recorded id keeps its place.
    pub fn record(&mut self, id: MediaId, seconds: f64) {
        self.positions.insert(id, seconds);
    }

    /// Iterate over `(id, seconds)` in first-recorded order
    pub fn iter(&self) -> impl Iterator<Item = (&MediaId, f64)> {
        self.positions.iter().map(|(id, seconds)| (id, *seconds))
    }

    /// Number of recorded items
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
