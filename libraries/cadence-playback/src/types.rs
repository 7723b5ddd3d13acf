//! Core types for session management

use cadence_core::MediaItem;
use serde::{Deserialize, Serialize};

/// Transport state
///
/// Derived from the current item and the playing flag; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// No item loaded, or the queue ran out
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-item
    Paused,
}

impl TransportState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for TransportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the session manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial volume (0.0-1.0, default: 0.9)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,

    /// Storage key of the progress record (default: `cadence.progress`)
    #[serde(default = "default_progress_key")]
    pub progress_key: String,

    /// Storage key of the queue record (default: `cadence.queue`)
    #[serde(default = "default_queue_key")]
    pub queue_key: String,

    /// Minimum stored position for "continue listening" (default: 10s)
    #[serde(default = "default_continue_threshold_secs")]
    pub continue_threshold_secs: f64,

    /// Maximum "continue listening" entries (default: 6)
    #[serde(default = "default_continue_limit")]
    pub continue_limit: usize,

    /// Events kept for `drain_events` before the oldest are dropped (default: 256)
    #[serde(default = "default_max_pending_events")]
    pub max_pending_events: usize,
}

fn default_initial_volume() -> f64 {
    0.9
}

fn default_progress_key() -> String {
    "cadence.progress".to_string()
}

fn default_queue_key() -> String {
    "cadence.queue".to_string()
}

fn default_continue_threshold_secs() -> f64 {
    10.0
}

fn default_continue_limit() -> usize {
    6
}

fn default_max_pending_events() -> usize {
    256
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            progress_key: default_progress_key(),
            queue_key: default_queue_key(),
            continue_threshold_secs: default_continue_threshold_secs(),
            continue_limit: default_continue_limit(),
            max_pending_events: default_max_pending_events(),
        }
    }
}

/// Read-only view of the session, as handed to views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Active item
    pub current: Option<MediaItem>,

    /// Queue in playback order
    pub queue: Vec<MediaItem>,

    /// Transport flag
    pub is_playing: bool,

    /// Derived transport state
    pub transport: TransportState,

    /// Elapsed seconds into the current item
    pub progress: f64,

    /// Known total seconds (0 until resolved)
    pub duration: f64,

    /// Reported duration, falling back to the item's declared duration
    pub display_duration: f64,

    /// Elapsed share of `display_duration`, 0-100
    pub progress_percent: f64,

    /// Volume (0.0-1.0 by convention)
    pub volume: f64,

    /// Restart from the first queue item when the queue ends
    pub repeat: bool,
}
