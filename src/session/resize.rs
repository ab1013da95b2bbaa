//! Resize session controller.
//!
//! Sibling state machine to the drag controller, triggered by grabbing
//! a task's left or right edge. Exactly one boundary date changes per
//! session; the other is pinned. The edited boundary is clamped so it
//! never crosses the pinned one — minimum duration is one day — and
//! only the availability check runs, since the track never changes.
//!
//! An invalid release silently reverts to the original boundary; no
//! intent is emitted.

use chrono::NaiveDate;

use crate::models::{DateRange, Task};
use crate::validation::{check_availability, Verdict};

use super::drag::DRAG_THRESHOLD_PX;
use super::{PointerPoint, Preview, ResizeIntent, Snapshot};

/// Which boundary of the task is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Left edge: the start date moves, the end is pinned.
    Start,
    /// Right edge: the end date moves, the start is pinned.
    End,
}

/// Terminal result of a resize session.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOutcome {
    /// Released with a valid boundary; the intent carries only the
    /// changed date.
    Committed(ResizeIntent),
    /// Released in an invalid state; the original boundary stands.
    Reverted,
    /// Never left `Armed`, or explicitly cancelled.
    Cancelled,
}

#[derive(Debug, Clone)]
struct ResizeSession {
    task: Task,
    edge: ResizeEdge,
    grab: PointerPoint,
    dragging: bool,
    current: Option<DateRange>,
    current_verdict: Verdict,
    last_valid: Option<DateRange>,
}

/// The resize state machine.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
    threshold: f32,
}

impl ResizeController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self {
            session: None,
            threshold: DRAG_THRESHOLD_PX,
        }
    }

    /// Whether the controller is fully idle.
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Whether a session is in flight (armed or dragging).
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the session has passed the threshold.
    pub fn is_resizing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.dragging)
    }

    /// Pointer-down on a task edge: arm a session.
    ///
    /// Any in-flight session is forced out first.
    pub fn pointer_down(&mut self, task: &Task, edge: ResizeEdge, at: PointerPoint) {
        self.session = Some(ResizeSession {
            task: task.clone(),
            edge,
            grab: at,
            dragging: false,
            current: None,
            current_verdict: Verdict::allow(),
            last_valid: None,
        });
    }

    /// Pointer-move: evaluates the dragged boundary once past the
    /// threshold and yields a preview record.
    pub fn pointer_move(&mut self, at: PointerPoint, snapshot: &Snapshot<'_>) -> Option<Preview> {
        let threshold = self.threshold;
        let session = self.session.as_mut()?;

        if !session.dragging {
            let travel = (at.x - session.grab.x).abs().max((at.y - session.grab.y).abs());
            if travel <= threshold {
                return None;
            }
            session.dragging = true;
        }

        Some(Self::evaluate(session, at, snapshot))
    }

    /// Pointer-up: commit a valid boundary, silently revert otherwise.
    /// Returns `None` when no session was active. The controller is
    /// idle before the outcome is returned.
    pub fn pointer_up(&mut self, at: PointerPoint, snapshot: &Snapshot<'_>) -> Option<ResizeOutcome> {
        let mut session = self.session.take()?;
        if !session.dragging {
            return Some(ResizeOutcome::Cancelled);
        }

        Self::evaluate(&mut session, at, snapshot);
        if session.current_verdict.is_allowed() {
            if let Some(range) = session.current {
                let intent = match session.edge {
                    ResizeEdge::Start => ResizeIntent::Start {
                        task_id: session.task.id,
                        new_start: range.start,
                    },
                    ResizeEdge::End => ResizeIntent::End {
                        task_id: session.task.id,
                        new_end: range.end,
                    },
                };
                return Some(ResizeOutcome::Committed(intent));
            }
        }
        Some(ResizeOutcome::Reverted)
    }

    /// Explicit cancellation. Always idles.
    pub fn cancel(&mut self) -> Option<ResizeOutcome> {
        self.session.take().map(|_| ResizeOutcome::Cancelled)
    }

    fn evaluate(session: &mut ResizeSession, at: PointerPoint, snapshot: &Snapshot<'_>) -> Preview {
        let track_id = snapshot
            .tracks
            .resolve_task(&session.task)
            .map(|t| t.id.clone())
            .unwrap_or_else(|| session.task.track_ref.clone());

        let verdict = match Self::candidate_range(session, at, snapshot) {
            Some(candidate) => {
                let verdict = check_availability(
                    &session.task.id,
                    &candidate,
                    &track_id,
                    snapshot.tasks,
                    snapshot.tracks,
                );
                if verdict.is_allowed() {
                    session.last_valid = Some(candidate);
                }
                session.current = Some(candidate);
                verdict
            }
            None => {
                session.current = None;
                Verdict::deny("grid has no days")
            }
        };
        session.current_verdict = verdict.clone();

        // Invalid frames keep the last valid boundary on screen.
        let shown = if verdict.is_allowed() {
            session.current
        } else {
            session.last_valid.or(session.current)
        }
        .unwrap_or(session.task.range);

        let span = snapshot.grid.task_span(&shown);
        Preview {
            ghost_x: span.x,
            ghost_y: snapshot.layout.task_y(&track_id, &session.task.id),
            candidate_track_id: track_id,
            candidate: shown,
            is_valid: verdict.is_allowed(),
            reason: verdict.reason,
        }
    }

    /// New range with the dragged boundary at the day under the
    /// pointer, clamped so it never crosses the pinned boundary.
    fn candidate_range(
        session: &ResizeSession,
        at: PointerPoint,
        snapshot: &Snapshot<'_>,
    ) -> Option<DateRange> {
        let day = snapshot.grid.pixel_to_date(at.x, true)?;
        let original = session.task.range;
        Some(match session.edge {
            ResizeEdge::Start => DateRange::new(clamp_max(day, original.end), original.end),
            ResizeEdge::End => DateRange::new(original.start, clamp_min(day, original.start)),
        })
    }
}

fn clamp_max(day: NaiveDate, max: NaiveDate) -> NaiveDate {
    day.min(max)
}

fn clamp_min(day: NaiveDate, min: NaiveDate) -> NaiveDate {
    day.max(min)
}
