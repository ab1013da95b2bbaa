//! Task model and calendar-day intervals.
//!
//! A task is a time-bound unit of work placed on a track. Its position
//! on screen (lane index, pixel x/width) is always derived from its
//! date range plus the grid configuration — derived values are never
//! stored here, so they cannot drift from the dates.
//!
//! # Time Representation
//! Whole calendar days, inclusive on both ends: a task spanning
//! `[2025-01-01, 2025-01-01]` occupies exactly one day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for malformed model input (programmer error, not user action).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A date range was constructed with `start > end`.
    #[error("invalid date range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// An inclusive calendar-day interval `[start, end]`.
///
/// Both endpoints are occupied days: two ranges that merely touch
/// (`a.end == b.start`) DO overlap, unlike a half-open interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First occupied day (inclusive).
    pub start: NaiveDate,
    /// Last occupied day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, panicking if `start > end`.
    ///
    /// Use [`DateRange::try_new`] when the endpoints come from
    /// unvalidated input.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        assert!(start <= end, "invalid date range: {start} > {end}");
        Self { start, end }
    }

    /// Creates a range, rejecting `start > end`.
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a single-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Number of occupied days (inclusive count, always ≥ 1).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a day falls within this range.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Whether two inclusive ranges share at least one day.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// The same duration re-anchored at a new start day.
    pub fn anchored_at(&self, new_start: NaiveDate) -> Self {
        Self {
            start: new_start,
            end: new_start + (self.end - self.start),
        }
    }
}

/// A task snapshot as read from the external store.
///
/// `track_ref` normally holds a track id; legacy records hold the track
/// display name instead. Resolution (id first, name fallback) lives in
/// one place, [`TrackIndex::resolve`](super::TrackIndex::resolve), so
/// packing and validation never branch on the legacy shim directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Track reference: id, or display name for legacy records.
    pub track_ref: String,
    /// Occupied days, inclusive.
    pub range: DateRange,
}

impl Task {
    /// Creates a new task.
    pub fn new(id: impl Into<String>, track_ref: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: id.into(),
            track_ref: track_ref.into(),
            range,
        }
    }

    /// Whether this task's dates overlap another task's.
    ///
    /// A task never overlaps itself: identical ids short-circuit to
    /// `false` so occupancy scans can pass the full task list.
    pub fn overlaps(&self, other: &Task) -> bool {
        if self.id == other.id {
            return false;
        }
        self.range.overlaps(&other.range)
    }
}
