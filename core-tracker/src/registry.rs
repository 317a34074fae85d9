//! Tracker registry.
//!
//! Static metadata for every supported tracking service, fixed at startup.
//! The registration order is the display order and is stable across calls.

use tracker_traits::{TrackScoreFormat, TrackerKind};

/// Immutable metadata for one tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerMetadata {
    pub kind: TrackerKind,
    /// Display name
    pub name: &'static str,
    /// Base URL of the service's website
    pub base_url: &'static str,
    /// The scoring scale the service reports by default
    pub score_format: TrackScoreFormat,
}

impl TrackerMetadata {
    /// Web page for a series on this tracker.
    pub fn series_url(&self, series_key: &str) -> String {
        format!("{}/manga/{}", self.base_url, series_key)
    }
}

/// The set of supported trackers, in display order.
#[derive(Debug, Clone)]
pub struct TrackerRegistry {
    metadatas: Vec<TrackerMetadata>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self {
            metadatas: vec![
                TrackerMetadata {
                    kind: TrackerKind::AniList,
                    name: "AniList",
                    base_url: "https://anilist.co",
                    score_format: TrackScoreFormat::Point10,
                },
                TrackerMetadata {
                    kind: TrackerKind::MyAnimeList,
                    name: "MyAnimeList",
                    base_url: "https://myanimelist.net",
                    score_format: TrackScoreFormat::Point10,
                },
            ],
        }
    }

    /// All supported trackers in display order.
    pub fn list(&self) -> &[TrackerMetadata] {
        &self.metadatas
    }

    /// Metadata for a single tracker.
    pub fn get(&self, kind: TrackerKind) -> Option<&TrackerMetadata> {
        self.metadatas.iter().find(|m| m.kind == kind)
    }
}

impl Default for TrackerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_stable() {
        let registry = TrackerRegistry::new();
        let first: Vec<TrackerKind> = registry.list().iter().map(|m| m.kind).collect();
        let second: Vec<TrackerKind> = registry.list().iter().map(|m| m.kind).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![TrackerKind::AniList, TrackerKind::MyAnimeList]);
    }

    #[test]
    fn test_get_returns_matching_metadata() {
        let registry = TrackerRegistry::new();
        let meta = registry.get(TrackerKind::MyAnimeList).unwrap();
        assert_eq!(meta.name, "MyAnimeList");
        assert_eq!(meta.base_url, "https://myanimelist.net");
    }

    #[test]
    fn test_series_url_composition() {
        let registry = TrackerRegistry::new();
        let meta = registry.get(TrackerKind::AniList).unwrap();
        assert_eq!(meta.series_url("30013"), "https://anilist.co/manga/30013");
    }
}
