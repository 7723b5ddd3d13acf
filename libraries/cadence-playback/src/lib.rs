//! Cadence - Playback Session
//!
//! Platform-agnostic playback session for Cadence.
//!
//! This crate provides:
//! - Current item, queue and transport state (playing, paused, stopped)
//! - Queue navigation with optional wrap-around (repeat)
//! - Per-item resume points, written through to a key-value store
//! - Queue persistence across sessions
//! - Change notification (subscribers and a polling queue)
//!
//! # Architecture
//!
//! `cadence-playback` does not render media. The surface that does (an HTML
//! media element, a terminal, a test) forwards its time, metadata and ended
//! notifications to the manager through `on_time_update`,
//! `on_loaded_metadata` and `on_ended`, and reads everything back from
//! `snapshot`.
//!
//! Storage is injected as a [`KeyValueStore`](cadence_core::KeyValueStore).
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{KeyValueStore, MediaItem, MediaKind, Result};
//! use cadence_playback::{SessionConfig, SessionManager, TransportState};
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct Scratch(HashMap<String, String>);
//!
//! impl KeyValueStore for Scratch {
//!     fn get(&self, key: &str) -> Result<Option<String>> {
//!         Ok(self.0.get(key).cloned())
//!     }
//!     fn set(&mut self, key: &str, value: &str) -> Result<()> {
//!         self.0.insert(key.into(), value.into());
//!         Ok(())
//!     }
//!     fn remove(&mut self, key: &str) -> Result<()> {
//!         self.0.remove(key);
//!         Ok(())
//!     }
//! }
//!
//! let mut session = SessionManager::new(Scratch::default(), SessionConfig::default());
//!
//! let a = MediaItem::new("a", "Episode A", MediaKind::Podcast, "Host", 1800);
//! let b = MediaItem::new("b", "Episode B", MediaKind::Podcast, "Host", 2400);
//! session.play_with_queue(a.clone(), vec![a, b]);
//!
//! session.on_time_update(95.0);
//! session.on_ended();
//!
//! assert_eq!(session.current().unwrap().id.as_str(), "b");
//! assert_eq!(session.resume_point("a"), Some(95.0));
//! assert_eq!(session.transport(), TransportState::Playing);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
mod format;
mod manager;
mod persistence;
mod progress;
mod queue;
pub mod types;

// WASM bindings (the "wasm" feature on wasm32 targets)
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

// Public exports
pub use events::{SessionEvent, SubscriptionId};
pub use format::{format_clock, progress_percent};
pub use manager::SessionManager;
pub use progress::ProgressStore;
pub use queue::Queue;
pub use types::{SessionConfig, SessionSnapshot, TransportState};
