/// Media item types
use super::ids::MediaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media an item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Songs and other short-form audio
    Music,
    /// Long-form spoken audio
    Podcast,
    /// Anything rendered on a video surface
    Video,
}

impl MediaKind {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Podcast => "podcast",
            Self::Video => "video",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "music" => Some(Self::Music),
            "podcast" => Some(Self::Podcast),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A playable catalog entry
///
/// Media items are supplied by the catalog and never mutated by the
/// playback layer. The queue persists full copies of them, so a stored
/// queue can outlive changes to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique identifier
    pub id: MediaId,

    /// Display title
    pub title: String,

    /// Music, podcast or video
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Creator (artist, host, channel)
    pub artist: String,

    /// Show name for podcast episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,

    /// Declared duration in whole seconds
    pub duration: u32,

    /// Media locator handed to the playback surface
    pub source: String,

    /// Artwork locator
    pub cover: String,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Language code, or e.g. `instrumental`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Catalog category (e.g. `Tech`, `Music`)
    pub category: String,
}

impl MediaItem {
    /// Create an item with the required fields; optional fields start empty
    pub fn new(
        id: impl Into<MediaId>,
        title: impl Into<String>,
        kind: MediaKind,
        artist: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            artist: artist.into(),
            show: None,
            duration,
            source: String::new(),
            cover: String::new(),
            tags: Vec::new(),
            description: None,
            language: None,
            category: String::new(),
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the tags
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the show name
    #[must_use]
    pub fn with_show(mut self, show: impl Into<String>) -> Self {
        self.show = Some(show.into());
        self
    }

    /// Declared duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        f64::from(self.duration) / 60.0
    }
}
