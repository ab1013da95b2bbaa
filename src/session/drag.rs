//! Drag session controller.
//!
//! An explicit finite-state machine driving the move interaction:
//!
//! ```text
//! Idle → Armed → Dragging → {commit | revert | cancel} → Idle
//! ```
//!
//! `Armed` captures the pointer-to-task pixel offset on pointer-down
//! with no visual change; `Dragging` begins once pointer movement
//! exceeds a small threshold. Every move computes the ghost position,
//! resolves the hovered track, converts the position to a candidate
//! date range (same duration, anchored at the new start) and validates
//! it. Invalid frames keep the last known valid candidate on screen so
//! the preview never flickers while the pointer crosses illegal cells.
//!
//! The controller is back in `Idle` before a commit intent is handed
//! to the caller; whether the store accepts it is not this machine's
//! concern.

use crate::models::{DateRange, Task};
use crate::validation::{check_availability, check_compatibility, Verdict};

use super::autoscroll::EdgeScroller;
use super::{MoveIntent, PointerPoint, Preview, Snapshot};

/// Pointer travel in pixels before an armed session starts dragging.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Terminal result of a drag session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Released over a valid candidate; the move intent is the
    /// caller's to forward to the task store.
    Committed(MoveIntent),
    /// Released over an invalid candidate; nothing is emitted.
    Reverted,
    /// Released outside the grid, never left `Armed`, or explicitly
    /// cancelled.
    Cancelled,
}

/// A fully evaluated drop candidate.
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    track_id: String,
    range: DateRange,
    ghost_x: f32,
    ghost_y: f32,
}

#[derive(Debug, Clone)]
struct ArmedSession {
    task: Task,
    grab: PointerPoint,
    /// Pointer-to-task-left offset in grid content pixels.
    offset_x: f32,
}

#[derive(Debug, Clone)]
struct DraggingSession {
    task: Task,
    offset_x: f32,
    current: Option<Candidate>,
    current_verdict: Verdict,
    last_valid: Option<Candidate>,
}

#[derive(Debug, Clone)]
enum DragPhase {
    Idle,
    Armed(ArmedSession),
    Dragging(DraggingSession),
}

/// The drag state machine. One per board; at most one session active.
#[derive(Debug, Clone)]
pub struct DragController {
    phase: DragPhase,
    threshold: f32,
    scroller: EdgeScroller,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold: DRAG_THRESHOLD_PX,
            scroller: EdgeScroller::new(),
        }
    }

    /// Sets the arming threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    /// Replaces the edge scroller configuration.
    pub fn with_scroller(mut self, scroller: EdgeScroller) -> Self {
        self.scroller = scroller;
        self
    }

    /// Whether the controller is fully idle.
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// Whether a session is in flight (armed or dragging).
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    /// Whether the session has passed the threshold and is dragging.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Auto-scroll velocity sample for the host timer. Nonzero only
    /// while dragging near a viewport edge.
    pub fn scroll_velocity(&self, pointer_x: f32, viewport_width: f32) -> f32 {
        self.scroller.velocity(pointer_x, viewport_width)
    }

    /// Pointer-down on a task: arm a session.
    ///
    /// Any in-flight session is forced to its terminal state first,
    /// keeping sessions exclusive.
    pub fn pointer_down(&mut self, task: &Task, at: PointerPoint, snapshot: &Snapshot<'_>) {
        self.reset();
        let span = snapshot.grid.task_span(&task.range);
        let content_x = at.x + snapshot.grid.scroll_x();
        self.phase = DragPhase::Armed(ArmedSession {
            task: task.clone(),
            grab: at,
            offset_x: content_x - span.x,
        });
    }

    /// Pointer-move: arms become drags past the threshold, and each
    /// dragging move yields a fresh preview record.
    pub fn pointer_move(&mut self, at: PointerPoint, snapshot: &Snapshot<'_>) -> Option<Preview> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => None,
            DragPhase::Armed(armed) => {
                let travel = ((at.x - armed.grab.x).powi(2) + (at.y - armed.grab.y).powi(2)).sqrt();
                if travel <= self.threshold {
                    self.phase = DragPhase::Armed(armed);
                    return None;
                }
                self.scroller.arm();
                let mut session = DraggingSession {
                    task: armed.task,
                    offset_x: armed.offset_x,
                    current: None,
                    current_verdict: Verdict::allow(),
                    last_valid: None,
                };
                let preview = Self::evaluate(&mut session, at, snapshot);
                self.phase = DragPhase::Dragging(session);
                Some(preview)
            }
            DragPhase::Dragging(mut session) => {
                let preview = Self::evaluate(&mut session, at, snapshot);
                self.phase = DragPhase::Dragging(session);
                Some(preview)
            }
        }
    }

    /// Pointer-up: commit over a valid candidate, revert over an
    /// invalid one, cancel outside the grid. Returns `None` when no
    /// session was active.
    ///
    /// The controller is idle again before the outcome (and any intent
    /// inside it) is returned.
    pub fn pointer_up(&mut self, at: PointerPoint, snapshot: &Snapshot<'_>) -> Option<DragOutcome> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => None,
            DragPhase::Armed(_) => {
                // Never exceeded the threshold: a click, not a drag.
                self.scroller.disarm();
                Some(DragOutcome::Cancelled)
            }
            DragPhase::Dragging(mut session) => {
                self.scroller.disarm();
                let content_x = at.x + snapshot.grid.scroll_x();
                let outside = !snapshot.grid.contains_x(content_x)
                    || at.y < 0.0
                    || at.y >= snapshot.layout.total_height();
                if outside {
                    return Some(DragOutcome::Cancelled);
                }

                // Final evaluation at the release position.
                Self::evaluate(&mut session, at, snapshot);
                if session.current_verdict.is_allowed() {
                    if let Some(candidate) = session.current {
                        return Some(DragOutcome::Committed(MoveIntent {
                            task_id: session.task.id,
                            track_id: candidate.track_id,
                            start: candidate.range.start,
                            end: candidate.range.end,
                        }));
                    }
                }
                Some(DragOutcome::Reverted)
            }
        }
    }

    /// Explicit cancellation (escape key, focus loss). Always idles.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        let was_active = self.is_active();
        self.reset();
        was_active.then_some(DragOutcome::Cancelled)
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.scroller.disarm();
    }

    /// Computes and validates the candidate for one pointer position,
    /// updating the session's current/last-valid state.
    fn evaluate(
        session: &mut DraggingSession,
        at: PointerPoint,
        snapshot: &Snapshot<'_>,
    ) -> Preview {
        let content_x = at.x + snapshot.grid.scroll_x();
        let ghost_x = content_x - session.offset_x;

        let verdict = match Self::build_candidate(session, ghost_x, at.y, snapshot) {
            Ok(candidate) => {
                let compat =
                    check_compatibility(&session.task, &candidate.track_id, snapshot.tracks);
                let verdict = if compat.is_allowed() {
                    check_availability(
                        &session.task.id,
                        &candidate.range,
                        &candidate.track_id,
                        snapshot.tasks,
                        snapshot.tracks,
                    )
                } else {
                    compat
                };
                if verdict.is_allowed() {
                    session.last_valid = Some(candidate.clone());
                }
                session.current = Some(candidate);
                verdict
            }
            Err(reason) => {
                session.current = None;
                Verdict::deny(reason)
            }
        };

        session.current_verdict = verdict.clone();
        Self::preview(session, ghost_x, at.y, verdict)
    }

    fn build_candidate(
        session: &DraggingSession,
        ghost_x: f32,
        pointer_y: f32,
        snapshot: &Snapshot<'_>,
    ) -> Result<Candidate, String> {
        let row = snapshot
            .layout
            .track_at_y(pointer_y)
            .ok_or_else(|| "no track under pointer".to_string())?;
        let new_start = snapshot
            .grid
            .pixel_to_date(ghost_x, false)
            .ok_or_else(|| "grid has no days".to_string())?;
        Ok(Candidate {
            track_id: row.track_id.clone(),
            range: session.task.range.anchored_at(new_start),
            ghost_x: snapshot.grid.date_to_pixel(new_start),
            ghost_y: row.y,
        })
    }

    /// Builds the per-frame preview. Invalid frames show the last
    /// known valid candidate's placement so the preview stays stable.
    fn preview(session: &DraggingSession, ghost_x: f32, ghost_y: f32, verdict: Verdict) -> Preview {
        let shown = if verdict.is_allowed() {
            session.current.as_ref()
        } else {
            session.last_valid.as_ref().or(session.current.as_ref())
        };

        match shown {
            Some(candidate) => Preview {
                ghost_x: candidate.ghost_x,
                ghost_y: candidate.ghost_y,
                candidate_track_id: candidate.track_id.clone(),
                candidate: candidate.range,
                is_valid: verdict.is_allowed(),
                reason: verdict.reason,
            },
            None => Preview {
                ghost_x,
                ghost_y,
                candidate_track_id: session.task.track_ref.clone(),
                candidate: session.task.range,
                is_valid: false,
                reason: verdict.reason,
            },
        }
    }
}
