//! Catalog search
//!
//! Linear filter over the catalog followed by a token-based relevance score.
//!
//! Scoring, per lowercased whitespace token of the query:
//! - +1 when the haystack (title, artist, show, description, tags) contains it
//! - +1 more when the title starts with it
//! - +1.5 more when a tag equals it
//!
//! An empty query keeps every item that passes the filters with score 1.

use crate::catalog::Catalog;
use crate::types::{MediaItem, MediaKind};
use serde::{Deserialize, Serialize};

/// Bonus for a token that starts the title
const TITLE_PREFIX_BONUS: f64 = 1.0;

/// Bonus for a token that matches a tag exactly
const TAG_MATCH_BONUS: f64 = 1.5;

/// Duration bucket filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthFilter {
    /// No duration constraint
    #[default]
    Any,
    /// Under 15 minutes
    Short,
    /// 15 to 45 minutes inclusive
    Medium,
    /// Over 45 minutes
    Long,
}

impl LengthFilter {
    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "any" => Some(Self::Any),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    /// Whether an item falls into this bucket
    pub fn matches(&self, item: &MediaItem) -> bool {
        let minutes = item.duration_minutes();
        match self {
            Self::Any => true,
            Self::Short => minutes < 15.0,
            Self::Medium => (15.0..=45.0).contains(&minutes),
            Self::Long => minutes > 45.0,
        }
    }
}

/// Structured filters applied before scoring
///
/// `None` means "all" for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict to one media kind
    pub kind: Option<MediaKind>,

    /// Duration bucket
    pub length: LengthFilter,

    /// Exact language match
    pub language: Option<String>,

    /// Exact category match
    pub category: Option<String>,
}

impl SearchFilters {
    /// Whether an item passes every filter
    pub fn accepts(&self, item: &MediaItem) -> bool {
        if self.kind.is_some_and(|kind| item.kind != kind) {
            return false;
        }
        if let Some(language) = &self.language {
            if item.language.as_deref() != Some(language.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        self.length.matches(item)
    }
}

/// A scored search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    /// Matching catalog item
    pub item: &'a MediaItem,
    /// Relevance, higher is better
    pub score: f64,
}

/// Relevance of an item for an already lowercased query
pub fn score(item: &MediaItem, query: &str) -> f64 {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let tags = item.tags.join(" ");
    let haystack = [
        item.title.as_str(),
        item.artist.as_str(),
        item.show.as_deref().unwrap_or_default(),
        item.description.as_deref().unwrap_or_default(),
        tags.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    let title = item.title.to_lowercase();

    let mut total = 0.0;
    for token in tokens {
        if !haystack.contains(token) {
            continue;
        }
        total += 1.0;
        if title.starts_with(token) {
            total += TITLE_PREFIX_BONUS;
        }
        if item.tags.iter().any(|tag| tag.to_lowercase() == token) {
            total += TAG_MATCH_BONUS;
        }
    }
    total
}

/// Search the catalog
///
/// Results are sorted by score, highest first; ties keep catalog order.
pub fn search<'a>(catalog: &'a Catalog, query: &str, filters: &SearchFilters) -> Vec<SearchResult<'a>> {
    let query = query.trim().to_lowercase();

    let mut results: Vec<SearchResult<'a>> = catalog
        .items()
        .iter()
        .filter(|item| filters.accepts(item))
        .filter_map(|item| {
            if query.is_empty() {
                return Some(SearchResult { item, score: 1.0 });
            }
            let score = score(item, &query);
            (score > 0.0).then_some(SearchResult { item, score })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, duration: u32) -> MediaItem {
        MediaItem::new(id, title, MediaKind::Podcast, "Host", duration)
    }

    #[test]
    fn length_buckets_use_minutes() {
        assert!(LengthFilter::Short.matches(&item("a", "A", 14 * 60 + 59)));
        assert!(!LengthFilter::Short.matches(&item("a", "A", 15 * 60)));
        assert!(LengthFilter::Medium.matches(&item("a", "A", 15 * 60)));
        assert!(LengthFilter::Medium.matches(&item("a", "A", 45 * 60)));
        assert!(LengthFilter::Long.matches(&item("a", "A", 45 * 60 + 1)));
        assert!(LengthFilter::Any.matches(&item("a", "A", 0)));
    }

    #[test]
    fn score_adds_title_prefix_and_tag_bonuses() {
        let podcast = item("p", "Async for Breakfast", 2100).with_tags(["javascript", "async"]);

        // contains + title prefix + exact tag
        assert_eq!(score(&podcast, "async"), 3.5);
        // contains only
        assert_eq!(score(&podcast, "breakfast"), 1.0);
        // tag match without title prefix
        assert_eq!(score(&podcast, "javascript"), 2.5);
        assert_eq!(score(&podcast, "rust"), 0.0);
        assert_eq!(score(&podcast, "   "), 0.0);
    }

    #[test]
    fn score_sums_over_tokens() {
        let podcast = item("p", "Async for Breakfast", 2100).with_tags(["async"]);
        assert_eq!(score(&podcast, "async breakfast"), 4.5);
    }

    #[test]
    fn filters_match_language_and_category_exactly() {
        let german = item("p", "Sicherheit", 1800)
            .with_language("de")
            .with_category("Tech");

        let mut filters = SearchFilters {
            language: Some("de".to_string()),
            ..Default::default()
        };
        assert!(filters.accepts(&german));

        filters.category = Some("Music".to_string());
        assert!(!filters.accepts(&german));

        let english_only = SearchFilters {
            language: Some("en".to_string()),
            ..Default::default()
        };
        assert!(!english_only.accepts(&item("x", "No language", 60)));
    }
}
