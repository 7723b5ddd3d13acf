//! Domain types for Cadence

mod ids;
mod media;
mod playlist;

pub use ids::{MediaId, PlaylistId};
pub use media::{MediaItem, MediaKind};
pub use playlist::Playlist;
