//! Read-only media catalog
//!
//! The catalog is the single source of media items and playlists. It is
//! loaded once (usually from a JSON document) and only queried afterwards:
//! lookups by id, playlist resolution and linear filters.

use crate::error::{CadenceError, Result};
use crate::types::{MediaId, MediaItem, MediaKind, Playlist, PlaylistId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Media items in catalog order
    #[serde(default)]
    pub items: Vec<MediaItem>,

    /// Named playlists
    #[serde(default)]
    pub playlists: Vec<Playlist>,

    /// Category display order (derived from items when omitted)
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Ordered, immutable collection of media items and playlists
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MediaItem>,
    playlists: Vec<Playlist>,
    categories: Vec<String>,
    index: HashMap<MediaId, usize>,
}

impl Catalog {
    /// Build a catalog from items and playlists
    ///
    /// Categories are taken in order of first appearance among the items.
    /// If two items share an id, the first one wins lookups.
    pub fn new(items: Vec<MediaItem>, playlists: Vec<Playlist>) -> Self {
        Self::from_document(CatalogDocument {
            items,
            playlists,
            categories: Vec::new(),
        })
    }

    /// Build a catalog from a parsed document
    pub fn from_document(document: CatalogDocument) -> Self {
        let CatalogDocument {
            items,
            playlists,
            mut categories,
        } = document;

        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.contains_key(&item.id) {
                warn!("Duplicate media id in catalog: {}", item.id);
                continue;
            }
            index.insert(item.id.clone(), position);
        }

        if categories.is_empty() {
            for item in &items {
                if !categories.contains(&item.category) {
                    categories.push(item.category.clone());
                }
            }
        }

        Self {
            items,
            playlists,
            categories,
            index,
        }
    }

    /// Parse a catalog from a JSON string
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the catalog layout
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CadenceError::catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&json)?;

        info!(
            "Loaded catalog from {}: {} items, {} playlists",
            path.display(),
            catalog.items.len(),
            catalog.playlists.len()
        );

        Ok(catalog)
    }

    /// All items in catalog order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// All playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Category display order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&MediaItem> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Look up an item by id, failing when it is unknown
    ///
    /// # Errors
    /// Returns `NotFound` if no item has this id
    pub fn require(&self, id: &str) -> Result<&MediaItem> {
        self.get(id)
            .ok_or_else(|| CadenceError::not_found("Media item", id))
    }

    /// Look up a playlist by id
    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id.as_str() == id)
    }

    /// Resolve a playlist into items
    ///
    /// Order follows the playlist; ids the catalog does not know are skipped.
    pub fn resolve_playlist(&self, playlist: &Playlist) -> Vec<MediaItem> {
        let resolved: Vec<MediaItem> = playlist
            .items
            .iter()
            .filter_map(|id| self.get(id.as_str()).cloned())
            .collect();

        if resolved.len() != playlist.items.len() {
            debug!(
                "Playlist {} references {} unknown items",
                playlist.id,
                playlist.items.len() - resolved.len()
            );
        }

        resolved
    }

    /// Resolve a playlist by id
    ///
    /// # Errors
    /// Returns `NotFound` if no playlist has this id
    pub fn playlist_items(&self, id: &PlaylistId) -> Result<Vec<MediaItem>> {
        let playlist = self
            .playlist(id.as_str())
            .ok_or_else(|| CadenceError::not_found("Playlist", id.as_str()))?;
        Ok(self.resolve_playlist(playlist))
    }

    /// Items in a category, in catalog order
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MediaItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Items of one kind, in catalog order
    pub fn by_kind(&self, kind: MediaKind) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}
