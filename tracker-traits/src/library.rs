//! Local Library Abstractions
//!
//! The library store owns the persisted series and its per-tracker link
//! table; the synchronization core only reads links and requests updates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::error::Result;
use crate::tracker::TrackerKind;

/// Unique identifier for a series in the local library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesId(Uuid);

impl SeriesId {
    /// Create a new random series ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a series ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library series with its tracker link table.
///
/// `tracker_links` has three states per tracker:
/// - key absent: no link decision has been made (a refresh searches)
/// - empty string: explicitly unlinked by the user
/// - non-empty: linked; the value is the tracker's series key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    pub tracker_links: HashMap<TrackerKind, String>,
}

impl Series {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SeriesId::new(),
            title: title.into(),
            tracker_links: HashMap::new(),
        }
    }
}

/// Persistence seam for the series link table.
///
/// Implemented by the host's library database. Writes are treated as a
/// single atomic command; interested views learn of the change through
/// the event bus rather than a return value.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Persist the full replacement link table for a series.
    async fn update_tracker_links(
        &self,
        series_id: SeriesId,
        links: HashMap<TrackerKind, String>,
    ) -> Result<()>;
}
