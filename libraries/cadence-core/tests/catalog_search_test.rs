//! Catalog loading and search integration tests
//!
//! Loads a catalog document from disk and runs realistic searches over it.

use cadence_core::{
    search, CadenceError, Catalog, LengthFilter, MediaKind, PlaylistId, SearchFilters,
};
use std::io::Write;

// ===== Test Helpers =====

const CATALOG_JSON: &str = r#"{
    "items": [
        {
            "id": "music-01", "title": "Night Coding Flow", "type": "music",
            "artist": "Collective", "duration": 242,
            "source": "https://example.invalid/night.mp3", "cover": "/covers/night.svg",
            "tags": ["focus", "instrumental", "synthwave"],
            "description": "Laid-back synth pads with a steady beat.",
            "category": "Music", "language": "instrumental"
        },
        {
            "id": "music-02", "title": "Terminal Dreams", "type": "music",
            "artist": "Loop Hacker", "duration": 198,
            "source": "https://example.invalid/terminal.mp3", "cover": "/covers/terminal.svg",
            "tags": ["lofi", "coding", "chill"],
            "category": "Music", "language": "instrumental"
        },
        {
            "id": "podcast-01", "title": "Security Foundations", "type": "podcast",
            "artist": "Talks", "show": "Security Talk", "duration": 1800,
            "source": "https://example.invalid/sec.mp3", "cover": "/covers/sec.svg",
            "tags": ["security", "learning"],
            "category": "Tech", "language": "de"
        },
        {
            "id": "podcast-02", "title": "Async for Breakfast", "type": "podcast",
            "artist": "Labs", "show": "Async Chronicles", "duration": 2100,
            "source": "https://example.invalid/async.mp3", "cover": "/covers/async.svg",
            "tags": ["javascript", "async", "tech"],
            "description": "Promises, streams and workers in depth.",
            "category": "Tech", "language": "en"
        },
        {
            "id": "video-01", "title": "Devlog Live", "type": "video",
            "artist": "Studio", "duration": 3600,
            "source": "https://example.invalid/devlog.mp4", "cover": "/covers/devlog.svg",
            "tags": ["video", "devlog", "coding"],
            "category": "Tech", "language": "en"
        }
    ],
    "playlists": [
        { "id": "night", "name": "Night Coding", "items": ["music-01", "music-02", "podcast-02"] },
        { "id": "broken", "name": "Broken", "items": ["missing", "video-01"] }
    ],
    "categories": ["Tech", "Music", "News"]
}"#;

fn load_catalog() -> Catalog {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    Catalog::from_path(file.path()).unwrap()
}

// ===== Loading =====

#[test]
fn test_load_catalog_from_file() {
    let catalog = load_catalog();

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.playlists().len(), 2);
    // Explicit category order wins over item order
    assert_eq!(catalog.categories()[0], "Tech");
    assert_eq!(catalog.categories().len(), 3);
}

#[test]
fn test_missing_catalog_file_is_catalog_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::from_path(dir.path().join("nope.json"));
    assert!(matches!(result, Err(CadenceError::Catalog(_))));
}

#[test]
fn test_malformed_catalog_is_serialization_error() {
    let result = Catalog::from_json_str("{ \"items\": 42 }");
    assert!(matches!(result, Err(CadenceError::Serialization(_))));
}

#[test]
fn test_playlist_resolution_in_playlist_order() {
    let catalog = load_catalog();

    let night = catalog.playlist_items(&PlaylistId::new("night")).unwrap();
    let ids: Vec<&str> = night.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["music-01", "music-02", "podcast-02"]);

    let broken = catalog.playlist_items(&PlaylistId::new("broken")).unwrap();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].id.as_str(), "video-01");
}

// ===== Search =====

#[test]
fn test_empty_query_returns_all_filtered_items_in_catalog_order() {
    let catalog = load_catalog();

    let results = search(&catalog, "   ", &SearchFilters::default());
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.score == 1.0));
    assert_eq!(results[0].item.id.as_str(), "music-01");
    assert_eq!(results[4].item.id.as_str(), "video-01");
}

#[test]
fn test_query_ranks_tag_and_title_matches_first() {
    let catalog = load_catalog();

    // "coding" is a tag of music-02 and video-01, and appears in the title of music-01
    let results = search(&catalog, "coding", &SearchFilters::default());
    let ids: Vec<&str> = results.iter().map(|r| r.item.id.as_str()).collect();

    assert_eq!(ids, vec!["music-02", "video-01", "music-01"]);
    assert_eq!(results[0].score, 2.5);
    assert_eq!(results[2].score, 1.0);
}

#[test]
fn test_query_is_case_insensitive() {
    let catalog = load_catalog();

    let results = search(&catalog, "  ASYNC  ", &SearchFilters::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.id.as_str(), "podcast-02");
    assert_eq!(results[0].score, 3.5);
}

#[test]
fn test_non_matching_query_returns_nothing() {
    let catalog = load_catalog();
    assert!(search(&catalog, "kubernetes", &SearchFilters::default()).is_empty());
}

#[test]
fn test_filters_combine_with_query() {
    let catalog = load_catalog();

    let podcasts = SearchFilters {
        kind: Some(MediaKind::Podcast),
        ..Default::default()
    };
    assert_eq!(search(&catalog, "", &podcasts).len(), 2);

    let english_medium = SearchFilters {
        kind: Some(MediaKind::Podcast),
        length: LengthFilter::Medium,
        language: Some("en".to_string()),
        category: Some("Tech".to_string()),
    };
    let results = search(&catalog, "streams", &english_medium);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.id.as_str(), "podcast-02");

    let long_only = SearchFilters {
        length: LengthFilter::Long,
        ..Default::default()
    };
    let results = search(&catalog, "", &long_only);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.id.as_str(), "video-01");
}
