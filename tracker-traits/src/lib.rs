//! # Tracker Contract Traits
//!
//! Contracts between the synchronization core and its two external
//! collaborators, plus the data model shared across those seams.
//!
//! ## Overview
//!
//! The core never talks to a tracking service or the library database
//! directly. It consumes two traits:
//!
//! - [`TrackerProvider`](tracker::TrackerProvider) - one per tracking
//!   service; identity lookup, title search, entry fetch and entry update
//!   over whatever transport the adapter uses
//! - [`LibraryStore`](library::LibraryStore) - persistence for the
//!   series' tracker link table
//!
//! Adapters own their authentication and sessions; the core treats an
//! absent username as "no account linked" and degrades accordingly.
//!
//! ## Error Handling
//!
//! All trait methods use [`AdapterError`](error::AdapterError). Adapter
//! implementations should convert service-specific failures into it with
//! actionable messages; the core contains every adapter failure at the
//! per-tracker boundary.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so implementations can be shared
//! across async tasks behind `Arc`.

pub mod error;
pub mod library;
pub mod tracker;

pub use error::AdapterError;

// Re-export commonly used types
pub use library::{LibraryStore, Series, SeriesId};
pub use tracker::{
    SeriesCandidate, TrackEntry, TrackScoreFormat, TrackStatus, TrackerKind, TrackerProvider,
};
