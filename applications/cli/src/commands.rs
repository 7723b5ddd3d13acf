//! One-shot subcommands
//!
//! Each command renders into a writer so tests can capture the output.

use anyhow::Result;
use cadence_core::{search, Catalog, LengthFilter, MediaItem, MediaKind, SearchFilters};
use cadence_playback::{format_clock, SessionManager};
use std::io::Write;

/// One line per item: kind, id, title, artist and length
pub fn write_item(out: &mut impl Write, item: &MediaItem) -> Result<()> {
    writeln!(
        out,
        "[{:<7}] {:<24} {} - {} ({})",
        item.kind.as_str(),
        item.id.as_str(),
        item.title,
        item.artist,
        format_clock(f64::from(item.duration))
    )?;
    Ok(())
}

/// `--kind` argument parser
pub fn parse_kind(s: &str) -> Result<MediaKind, String> {
    MediaKind::from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown kind '{s}' (music, podcast, video)"))
}

/// `--length` argument parser
pub fn parse_length(s: &str) -> Result<LengthFilter, String> {
    LengthFilter::from_str(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown length '{s}' (any, short, medium, long)"))
}

pub fn search_catalog(
    out: &mut impl Write,
    catalog: &Catalog,
    query: &str,
    filters: &SearchFilters,
) -> Result<()> {
    let results = search(catalog, query, filters);
    if results.is_empty() {
        writeln!(out, "No matches for \"{}\"", query)?;
        return Ok(());
    }

    for result in results {
        write!(out, "{:>4.1}  ", result.score)?;
        write_item(out, result.item)?;
    }
    Ok(())
}

pub fn list_playlists(out: &mut impl Write, catalog: &Catalog) -> Result<()> {
    if catalog.playlists().is_empty() {
        writeln!(out, "No playlists")?;
        return Ok(());
    }

    for playlist in catalog.playlists() {
        let resolved = catalog.resolve_playlist(playlist);
        writeln!(
            out,
            "{:<24} {} ({} items)",
            playlist.id.as_str(),
            playlist.name,
            resolved.len()
        )?;
        if let Some(description) = &playlist.description {
            writeln!(out, "    {}", description)?;
        }
    }
    Ok(())
}

/// Catalog grouped by category, optionally narrowed to one kind or category
pub fn list_library(
    out: &mut impl Write,
    catalog: &Catalog,
    kind: Option<MediaKind>,
    category: Option<&str>,
) -> Result<()> {
    let categories: Vec<&str> = match category {
        Some(category) => vec![category],
        None => catalog.categories().iter().map(String::as_str).collect(),
    };

    let mut printed = 0;
    for category in categories {
        let items: Vec<&MediaItem> = match kind {
            Some(kind) => catalog
                .by_kind(kind)
                .filter(|item| item.category == category)
                .collect(),
            None => catalog.by_category(category).collect(),
        };
        if items.is_empty() {
            continue;
        }

        writeln!(out, "{category}")?;
        for item in items {
            write!(out, "  ")?;
            write_item(out, item)?;
            printed += 1;
        }
    }

    if printed == 0 {
        writeln!(out, "Library is empty")?;
    }
    Ok(())
}

pub fn continue_listening(
    out: &mut impl Write,
    session: &SessionManager,
    catalog: &Catalog,
) -> Result<()> {
    let items = session.continue_listening(catalog);
    if items.is_empty() {
        writeln!(out, "Nothing to continue")?;
        return Ok(());
    }

    for item in items {
        let position = session.resume_point(item.id.as_str()).unwrap_or_default();
        write!(out, "{:>6}  ", format_clock(position))?;
        write_item(out, item)?;
    }
    Ok(())
}

pub fn print_queue(out: &mut impl Write, session: &SessionManager) -> Result<()> {
    let queue = session.queue();
    if queue.is_empty() {
        writeln!(out, "Queue is empty")?;
        return Ok(());
    }

    let current = session.current().map(|item| item.id.as_str());
    for (index, item) in queue.iter().enumerate() {
        let marker = if Some(item.id.as_str()) == current {
            '>'
        } else {
            ' '
        };
        write!(out, "{} {:>2}. ", marker, index + 1)?;
        write_item(out, item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{MediaKind, Playlist};
    use cadence_playback::SessionConfig;
    use cadence_storage::MemoryStore;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                MediaItem::new("m1", "Night Drive", MediaKind::Music, "Signal Garden", 242)
                    .with_tags(["synthwave"]),
                MediaItem::new("p1", "Threat Models", MediaKind::Podcast, "Open Ports", 1800),
            ],
            vec![Playlist::new("mix", "Mix", ["m1", "missing", "p1"])],
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn search_prints_score_and_item() {
        let catalog = catalog();
        let text = render(|out| {
            search_catalog(out, &catalog, "synthwave", &SearchFilters::default())
        });

        assert!(text.contains("Night Drive"));
        assert!(text.contains("4:02"));
        assert!(!text.contains("Threat Models"));
    }

    #[test]
    fn search_reports_no_matches() {
        let catalog = catalog();
        let text = render(|out| search_catalog(out, &catalog, "zzz", &SearchFilters::default()));
        assert_eq!(text, "No matches for \"zzz\"\n");
    }

    #[test]
    fn playlists_count_resolved_items() {
        let catalog = catalog();
        let text = render(|out| list_playlists(out, &catalog));
        assert!(text.contains("Mix (2 items)"));
    }

    #[test]
    fn queue_marks_current_item() {
        let catalog = catalog();
        let mut session = SessionManager::new(MemoryStore::new(), SessionConfig::default());
        session.play_collection(catalog.items().to_vec());
        session.play_next();

        let text = render(|out| print_queue(out, &session));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("   1."));
        assert!(lines[1].starts_with(">  2."));
    }

    fn library_catalog() -> Catalog {
        Catalog::new(
            vec![
                MediaItem::new("m1", "Night Drive", MediaKind::Music, "Signal Garden", 242)
                    .with_category("Ambient"),
                MediaItem::new("p1", "Threat Models", MediaKind::Podcast, "Open Ports", 1800)
                    .with_category("Tech"),
                MediaItem::new("v1", "Roundtable", MediaKind::Video, "Panel", 3600)
                    .with_category("Tech"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn library_groups_by_category() {
        let catalog = library_catalog();
        let text = render(|out| list_library(out, &catalog, None, None));
        let lines: Vec<&str> = text.lines().collect();

        let tech = lines.iter().position(|line| *line == "Tech").unwrap();
        let ambient = lines.iter().position(|line| *line == "Ambient").unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[tech + 1].contains("Threat Models"));
        assert!(lines[tech + 2].contains("Roundtable"));
        assert!(lines[ambient + 1].contains("Night Drive"));
    }

    #[test]
    fn library_narrows_by_kind_and_category() {
        let catalog = library_catalog();

        let videos = render(|out| list_library(out, &catalog, Some(MediaKind::Video), None));
        assert!(videos.contains("Roundtable"));
        assert!(!videos.contains("Threat Models"));
        assert!(!videos.contains("Ambient"));

        let ambient = render(|out| list_library(out, &catalog, None, Some("Ambient")));
        assert!(ambient.starts_with("Ambient\n"));
        assert!(!ambient.contains("Tech"));

        let none = render(|out| {
            list_library(out, &catalog, Some(MediaKind::Music), Some("Tech"))
        });
        assert_eq!(none, "Library is empty\n");
    }

    #[test]
    fn kind_and_length_arguments_parse() {
        assert_eq!(parse_kind("Video"), Ok(MediaKind::Video));
        assert_eq!(parse_length("short"), Ok(LengthFilter::Short));
        assert!(parse_kind("audiobook").unwrap_err().contains("music, podcast, video"));
        assert!(parse_length("epic").is_err());
    }

    #[test]
    fn continue_shows_resume_position() {
        let catalog = catalog();
        let mut session = SessionManager::new(MemoryStore::new(), SessionConfig::default());
        session.remember_progress("p1", 125.0);

        let text = render(|out| continue_listening(out, &session, &catalog));
        assert!(text.contains("2:05"));
        assert!(text.contains("Threat Models"));
    }
}
