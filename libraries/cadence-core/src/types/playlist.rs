/// Playlist types
use super::ids::{MediaId, PlaylistId};
use serde::{Deserialize, Serialize};

/// Named, ordered list of media ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Media ids in playback order
    #[serde(default)]
    pub items: Vec<MediaId>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new<I, T>(id: impl Into<PlaylistId>, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MediaId>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of entries (including ids the catalog may not know)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
