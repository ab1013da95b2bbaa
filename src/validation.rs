//! Drop validation: compatibility and availability checks.
//!
//! Both checks return a [`Verdict`] — an ordinary value, not an error.
//! A rejected drop is normal user interaction and feeds the live drag
//! preview; the reason string is UI feedback, not a diagnostic.
//!
//! - **Compatibility**: the task's source track kind must equal the
//!   candidate track kind. Missing track metadata fails *open* (allowed,
//!   with a log warning) so a gap in reference data never silently
//!   blocks a user action.
//! - **Availability**: the candidate date range must not overlap any
//!   other task already on the candidate track.
//!
//! [`find_free_slot`] is the one search in the crate: a bounded,
//! forward-only scan for the nearest legal start date, for callers that
//! want a placement suggestion rather than a yes/no.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{DateRange, Task, TrackIndex};

/// Iteration bound for [`find_free_slot`]. One iteration per conflict
/// cluster jumped over; 365 covers a year of daily conflicts.
pub const MAX_SLOT_ITERATIONS: usize = 365;

/// Outcome of a single validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the candidate move/resize is legal.
    pub allowed: bool,
    /// UI feedback when rejected (e.g. "type mismatch ...").
    pub reason: Option<String>,
}

impl Verdict {
    /// An allowing verdict.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A rejecting verdict with a feedback reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    /// Whether the check passed.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// Free-slot search failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotSearchError {
    /// No free slot found within the iteration bound.
    #[error("no free {duration_days}-day slot on track '{track_id}' within {iterations} iterations from {from}")]
    Exhausted {
        track_id: String,
        from: NaiveDate,
        duration_days: i64,
        iterations: usize,
    },
}

/// Checks kind compatibility between a task's track and a candidate track.
///
/// Both references go through [`TrackIndex::resolve`] (id first, name
/// fallback). If either side cannot be resolved the check fails open:
/// missing metadata is logged, never used to block the user.
pub fn check_compatibility(task: &Task, candidate_track_ref: &str, index: &TrackIndex) -> Verdict {
    let source = index.resolve(&task.track_ref);
    let candidate = index.resolve(candidate_track_ref);

    let (source, candidate) = match (source, candidate) {
        (Some(s), Some(c)) => (s, c),
        _ => {
            warn!(
                task_id = %task.id,
                source_ref = %task.track_ref,
                candidate_ref = %candidate_track_ref,
                "track metadata missing during compatibility check, failing open"
            );
            return Verdict::allow();
        }
    };

    if source.kind == candidate.kind {
        Verdict::allow()
    } else {
        Verdict::deny(format!(
            "type mismatch: {} task cannot move to {} track '{}'",
            source.kind.label(),
            candidate.kind.label(),
            candidate.name,
        ))
    }
}

/// Checks that `candidate` overlaps no *other* task on the given track.
///
/// The task being moved is excluded by id so a task can always be
/// dropped back onto (or shifted within) its own footprint.
pub fn check_availability(
    task_id: &str,
    candidate: &DateRange,
    track_id: &str,
    tasks: &[Task],
    index: &TrackIndex,
) -> Verdict {
    for occupant in index.tasks_on(track_id, tasks) {
        if occupant.id == task_id {
            continue;
        }
        if occupant.range.overlaps(candidate) {
            return Verdict::deny(format!(
                "slot occupied by '{}' ({} to {})",
                occupant.id, occupant.range.start, occupant.range.end,
            ));
        }
    }
    Verdict::allow()
}

/// Finds the nearest legal slot of `duration_days` at or after
/// `desired_start` on a track.
///
/// Forward-only: on conflict the window jumps to the latest conflicting
/// end plus one day and retests. Earlier gaps before `desired_start`
/// are never considered. The scan is bounded by
/// [`MAX_SLOT_ITERATIONS`] and returns an explicit error on
/// exhaustion — it never loops unbounded.
pub fn find_free_slot(
    desired_start: NaiveDate,
    duration_days: i64,
    track_id: &str,
    tasks: &[Task],
    index: &TrackIndex,
) -> Result<DateRange, SlotSearchError> {
    let duration_days = duration_days.max(1);
    let occupants = index.tasks_on(track_id, tasks);
    let mut start = desired_start;

    for _ in 0..MAX_SLOT_ITERATIONS {
        let candidate = DateRange::new(start, start + chrono::Duration::days(duration_days - 1));
        let latest_conflict_end = occupants
            .iter()
            .filter(|t| t.range.overlaps(&candidate))
            .map(|t| t.range.end)
            .max();

        match latest_conflict_end {
            None => return Ok(candidate),
            Some(end) => start = end + chrono::Duration::days(1),
        }
    }

    Err(SlotSearchError::Exhausted {
        track_id: track_id.to_string(),
        from: desired_start,
        duration_days,
        iterations: MAX_SLOT_ITERATIONS,
    })
}
