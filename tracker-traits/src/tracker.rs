//! Tracker Provider Abstractions
//!
//! Defines the contract between the synchronization core and the adapters
//! that talk to external progress-tracking services, along with the data
//! model shared across that boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Supported external tracking services.
///
/// Each tracker has its own account, series catalog and scoring scale.
///
/// # Examples
///
/// ```
/// use tracker_traits::TrackerKind;
///
/// let tracker = TrackerKind::AniList;
/// assert_eq!(tracker.display_name(), "AniList");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerKind {
    /// AniList tracking service
    AniList,
    /// MyAnimeList tracking service
    MyAnimeList,
}

impl TrackerKind {
    /// Get the human-readable display name for this tracker
    pub fn display_name(&self) -> &'static str {
        match self {
            TrackerKind::AniList => "AniList",
            TrackerKind::MyAnimeList => "MyAnimeList",
        }
    }

    /// Get the tracker identifier string
    ///
    /// Used for logging, event payloads and the persisted link table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerKind::AniList => "anilist",
            TrackerKind::MyAnimeList => "myanimelist",
        }
    }

    /// Parse a tracker kind from a string identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use tracker_traits::TrackerKind;
    ///
    /// assert_eq!(TrackerKind::parse("anilist"), Some(TrackerKind::AniList));
    /// assert_eq!(TrackerKind::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anilist" => Some(TrackerKind::AniList),
            "myanimelist" | "mal" => Some(TrackerKind::MyAnimeList),
            _ => None,
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Reading status of a tracked series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackStatus {
    /// Currently reading
    Reading,
    /// Finished reading
    Completed,
    /// On hold
    Paused,
    /// Abandoned
    Dropped,
    /// Planned but not started
    Planning,
}

impl TrackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackStatus::Reading => "Reading",
            TrackStatus::Completed => "Completed",
            TrackStatus::Paused => "Paused",
            TrackStatus::Dropped => "Dropped",
            TrackStatus::Planning => "Planning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reading" => Some(TrackStatus::Reading),
            "completed" => Some(TrackStatus::Completed),
            "paused" => Some(TrackStatus::Paused),
            "dropped" => Some(TrackStatus::Dropped),
            "planning" => Some(TrackStatus::Planning),
            _ => None,
        }
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric scale a tracker uses for ratings.
///
/// `Point10Decimal` represents a 10-point scale with one decimal of
/// precision; scores on it are stored as integers 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackScoreFormat {
    /// 0-10 integer scale
    Point10,
    /// 0-100 integer scale
    Point100,
    /// 0.0-10.0 scale, stored as 0..=100
    Point10Decimal,
    /// 0-5 integer scale
    Point5,
    /// 0-3 integer scale
    Point3,
}

impl TrackScoreFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackScoreFormat::Point10 => "POINT_10",
            TrackScoreFormat::Point100 => "POINT_100",
            TrackScoreFormat::Point10Decimal => "POINT_10_DECIMAL",
            TrackScoreFormat::Point5 => "POINT_5",
            TrackScoreFormat::Point3 => "POINT_3",
        }
    }

    /// Parse a score format from its wire identifier.
    ///
    /// Returns `None` for unrecognized identifiers; callers decide whether
    /// to refuse the value or fall back to a defined format.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "POINT_10" => Some(TrackScoreFormat::Point10),
            "POINT_100" => Some(TrackScoreFormat::Point100),
            "POINT_10_DECIMAL" => Some(TrackScoreFormat::Point10Decimal),
            "POINT_5" => Some(TrackScoreFormat::Point5),
            "POINT_3" => Some(TrackScoreFormat::Point3),
            _ => None,
        }
    }
}

impl fmt::Display for TrackScoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronized state for one (series, tracker) pair.
///
/// Created from the tracker's own record on first fetch, or synthesized
/// with [`TrackEntry::synthesized`] when the tracker has no entry for a
/// linked series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    /// The tracker's identifier for the series
    pub series_key: String,
    /// Chapters read
    pub progress: u32,
    /// Reading status
    pub status: TrackStatus,
    /// Score on the tracker's scale, if rated
    pub score: Option<u32>,
    /// The scale `score` is expressed in; trackers may omit it
    pub score_format: Option<TrackScoreFormat>,
}

impl TrackEntry {
    /// Default entry for a linked series the tracker has no record of.
    pub fn synthesized(series_key: impl Into<String>) -> Self {
        Self {
            series_key: series_key.into(),
            progress: 0,
            status: TrackStatus::Reading,
            score: None,
            score_format: None,
        }
    }
}

/// A tracker search result offered to the user to establish a link.
///
/// Produced fresh on every search; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesCandidate {
    /// The tracker's identifier for the series
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_url: String,
}

/// Adapter for one external tracking service.
///
/// One implementation exists per supported tracker. Authentication and
/// session management are the adapter's concern; the core only observes
/// whether an account is available via [`get_username`](Self::get_username).
///
/// # Example
///
/// ```ignore
/// use tracker_traits::{TrackerProvider, TrackEntry, SeriesCandidate};
/// use tracker_traits::error::Result;
/// use async_trait::async_trait;
///
/// pub struct AniListClient {
///     http: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl TrackerProvider for AniListClient {
///     async fn get_username(&self) -> Result<Option<String>> {
///         // Query the viewer endpoint
///         todo!()
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait TrackerProvider: Send + Sync {
    /// Get the authenticated account's username.
    ///
    /// Returns `None` when no account is linked to this tracker.
    async fn get_username(&self) -> Result<Option<String>>;

    /// Search the tracker's catalog by free-text title.
    ///
    /// Results are in the tracker's relevance order.
    async fn search(&self, title: &str) -> Result<Vec<SeriesCandidate>>;

    /// Fetch the account's entry for a series.
    ///
    /// Returns `None` when the account has no entry for the key, e.g. the
    /// series was removed from the remote list.
    async fn get_entry(&self, key: &str) -> Result<Option<TrackEntry>>;

    /// Write the full entry for a series back to the tracker.
    async fn update_entry(&self, key: &str, entry: &TrackEntry) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_kind_round_trip() {
        for kind in [TrackerKind::AniList, TrackerKind::MyAnimeList] {
            assert_eq!(TrackerKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TrackerKind::parse("mal"), Some(TrackerKind::MyAnimeList));
        assert_eq!(TrackerKind::parse(""), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TrackStatus::Reading,
            TrackStatus::Completed,
            TrackStatus::Paused,
            TrackStatus::Dropped,
            TrackStatus::Planning,
        ] {
            assert_eq!(TrackStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TrackStatus::parse("rereading"), None);
    }

    #[test]
    fn test_score_format_parse() {
        assert_eq!(
            TrackScoreFormat::parse("POINT_10_DECIMAL"),
            Some(TrackScoreFormat::Point10Decimal)
        );
        assert_eq!(
            TrackScoreFormat::parse("point_5"),
            Some(TrackScoreFormat::Point5)
        );
        assert_eq!(TrackScoreFormat::parse("POINT_7"), None);
    }

    #[test]
    fn test_synthesized_entry_defaults() {
        let entry = TrackEntry::synthesized("123");
        assert_eq!(entry.series_key, "123");
        assert_eq!(entry.progress, 0);
        assert_eq!(entry.status, TrackStatus::Reading);
        assert_eq!(entry.score, None);
        assert_eq!(entry.score_format, None);
    }

    #[test]
    fn test_track_entry_serialization() {
        let entry = TrackEntry {
            series_key: "123".to_string(),
            progress: 12,
            status: TrackStatus::Reading,
            score: Some(7),
            score_format: Some(TrackScoreFormat::Point10),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: TrackEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
