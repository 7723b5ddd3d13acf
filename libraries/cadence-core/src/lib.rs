//! Cadence Core
//!
//! Platform-agnostic core types, traits, and error handling for Cadence.
//!
//! This crate provides the foundational building blocks shared by the
//! storage backends, the playback session and the front-ends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaItem`, `Playlist`, `MediaId`, etc.
//! - **Catalog**: read-only item and playlist lookup
//! - **Search**: filters and relevance scoring over the catalog
//! - **Core Traits**: `KeyValueStore`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{search, Catalog, MediaItem, MediaKind, Playlist, SearchFilters};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         MediaItem::new("m1", "Terminal Dreams", MediaKind::Music, "Loop Hacker", 198)
//!             .with_tags(["lofi", "coding"]),
//!     ],
//!     vec![Playlist::new("focus", "Focus", ["m1"])],
//! );
//!
//! let hits = search(&catalog, "lofi", &SearchFilters::default());
//! assert_eq!(hits[0].item.id.as_str(), "m1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod search;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogDocument};
pub use error::{CadenceError, Result};
pub use search::{search, LengthFilter, SearchFilters, SearchResult};
pub use traits::KeyValueStore;
pub use types::{MediaId, MediaItem, MediaKind, Playlist, PlaylistId};
