//! Score format table.
//!
//! Maps each tracker scoring scale to its legal score domain. The table is
//! total over [`TrackScoreFormat`]; unknown formats can only arise while
//! decoding provider data, which is where [`parse_score_format`] refuses
//! them.

use std::ops::RangeInclusive;

use tracker_traits::TrackScoreFormat;

use crate::error::{Result, TrackerError};

/// Scale assumed for entries that carry no score format.
pub const DEFAULT_SCORE_FORMAT: TrackScoreFormat = TrackScoreFormat::Point10;

/// The legal score domain for a scale, inclusive on both ends.
///
/// A 10-point-decimal scale stores one decimal of precision as an integer,
/// so its domain is 0..=100.
///
/// # Examples
///
/// ```
/// use core_tracker::score_format::score_domain;
/// use tracker_traits::TrackScoreFormat;
///
/// assert!(score_domain(TrackScoreFormat::Point10).contains(&10));
/// assert!(!score_domain(TrackScoreFormat::Point5).contains(&6));
/// ```
pub fn score_domain(format: TrackScoreFormat) -> RangeInclusive<u32> {
    match format {
        TrackScoreFormat::Point10 => 0..=10,
        TrackScoreFormat::Point100 => 0..=100,
        TrackScoreFormat::Point10Decimal => 0..=100,
        TrackScoreFormat::Point5 => 0..=5,
        TrackScoreFormat::Point3 => 0..=3,
    }
}

/// The ordered sequence of legal scores for a scale.
///
/// Useful for building score pickers.
pub fn score_values(format: TrackScoreFormat) -> impl Iterator<Item = u32> {
    score_domain(format)
}

/// Decode a score format from its wire identifier.
///
/// Unrecognized identifiers are refused rather than silently defaulted;
/// callers that want the default fall back to [`DEFAULT_SCORE_FORMAT`]
/// explicitly.
pub fn parse_score_format(s: &str) -> Result<TrackScoreFormat> {
    TrackScoreFormat::parse(s).ok_or_else(|| TrackerError::UnknownScoreFormat(s.to_string()))
}
