//! Interaction sessions: pointer events in, intents out.
//!
//! The two controllers ([`DragController`], [`ResizeController`]) are
//! finite-state machines over an abstract pointer-event stream — no UI
//! toolkit involved, so the whole interaction can be driven headlessly
//! in tests. Each pointer-move yields a [`Preview`] record for
//! rendering; a committed release yields an intent the caller forwards
//! to its task store. The store's reaction (success, failure, retry)
//! is outside this crate: controllers are already idle when the intent
//! is returned.
//!
//! [`SessionCoordinator`] enforces one-session-at-a-time across both
//! controllers.

pub mod autoscroll;
pub mod drag;
pub mod resize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::layout::RowLayout;
use crate::models::{DateRange, Task, TrackIndex};

pub use autoscroll::EdgeScroller;
pub use drag::{DragController, DragOutcome};
pub use resize::{ResizeController, ResizeEdge, ResizeOutcome};

/// A container-local pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

/// Borrowed read-only world state for one interaction frame.
///
/// The caller refreshes `grid` (scroll offset) and rebuilds `layout`
/// after committed structural changes; controllers never mutate any of
/// it.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Date-pixel axis, including the current scroll offset.
    pub grid: &'a GridConfig,
    /// All tasks, across every track.
    pub tasks: &'a [Task],
    /// Track lookup table.
    pub tracks: &'a TrackIndex,
    /// Vertical geometry built from the current lane packing.
    pub layout: &'a RowLayout,
}

/// Per-frame preview of the in-flight session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// Ghost left edge in grid content pixels.
    pub ghost_x: f32,
    /// Ghost top edge in pixels.
    pub ghost_y: f32,
    /// Track the ghost is shown on.
    pub candidate_track_id: String,
    /// Candidate date range shown by the ghost.
    pub candidate: DateRange,
    /// Whether releasing now would commit.
    pub is_valid: bool,
    /// UI feedback when invalid.
    pub reason: Option<String>,
}

/// Commit intent for a completed drag: move a task to a track and
/// date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub task_id: String,
    pub track_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Commit intent for a completed resize: exactly one boundary changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResizeIntent {
    /// The start date moved; the end is unchanged.
    Start { task_id: String, new_start: NaiveDate },
    /// The end date moved; the start is unchanged.
    End { task_id: String, new_end: NaiveDate },
}

/// Either commit intent, as emitted by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Move(MoveIntent),
    Resize(ResizeIntent),
}

/// Terminal result of whichever session was active.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Committed(Intent),
    Reverted,
    Cancelled,
}

/// Multiplexes the drag and resize controllers and keeps sessions
/// exclusive: arming either side force-cancels anything in flight.
#[derive(Debug, Clone, Default)]
pub struct SessionCoordinator {
    drag: DragController,
    resize: ResizeController,
}

impl SessionCoordinator {
    /// Creates an idle coordinator.
    pub fn new() -> Self {
        Self {
            drag: DragController::new(),
            resize: ResizeController::new(),
        }
    }

    /// Whether neither controller has a session.
    pub fn is_idle(&self) -> bool {
        self.drag.is_idle() && self.resize.is_idle()
    }

    /// Arms a move session on a task body.
    pub fn begin_move(&mut self, task: &Task, at: PointerPoint, snapshot: &Snapshot<'_>) {
        self.drag.cancel();
        self.resize.cancel();
        self.drag.pointer_down(task, at, snapshot);
    }

    /// Arms a resize session on a task edge.
    pub fn begin_resize(&mut self, task: &Task, edge: ResizeEdge, at: PointerPoint) {
        self.drag.cancel();
        self.resize.cancel();
        self.resize.pointer_down(task, edge, at);
    }

    /// Routes a pointer-move to the active controller.
    pub fn pointer_move(&mut self, at: PointerPoint, snapshot: &Snapshot<'_>) -> Option<Preview> {
        if self.drag.is_active() {
            self.drag.pointer_move(at, snapshot)
        } else if self.resize.is_active() {
            self.resize.pointer_move(at, snapshot)
        } else {
            None
        }
    }

    /// Routes a pointer-up to the active controller.
    pub fn pointer_up(
        &mut self,
        at: PointerPoint,
        snapshot: &Snapshot<'_>,
    ) -> Option<SessionOutcome> {
        if self.drag.is_active() {
            self.drag.pointer_up(at, snapshot).map(|o| match o {
                DragOutcome::Committed(intent) => SessionOutcome::Committed(Intent::Move(intent)),
                DragOutcome::Reverted => SessionOutcome::Reverted,
                DragOutcome::Cancelled => SessionOutcome::Cancelled,
            })
        } else if self.resize.is_active() {
            self.resize.pointer_up(at, snapshot).map(|o| match o {
                ResizeOutcome::Committed(intent) => {
                    SessionOutcome::Committed(Intent::Resize(intent))
                }
                ResizeOutcome::Reverted => SessionOutcome::Reverted,
                ResizeOutcome::Cancelled => SessionOutcome::Cancelled,
            })
        } else {
            None
        }
    }

    /// Cancels whatever is in flight.
    pub fn cancel(&mut self) -> Option<SessionOutcome> {
        let drag = self.drag.cancel();
        let resize = self.resize.cancel();
        (drag.is_some() || resize.is_some()).then_some(SessionOutcome::Cancelled)
    }

    /// Auto-scroll velocity sample from the drag side; resizing never
    /// auto-scrolls.
    pub fn scroll_velocity(&self, pointer_x: f32, viewport_width: f32) -> f32 {
        self.drag.scroll_velocity(pointer_x, viewport_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn p(x: f32, y: f32) -> PointerPoint {
        PointerPoint { x, y }
    }

    struct World {
        grid: GridConfig,
        tasks: Vec<Task>,
        tracks: TrackIndex,
        layout: RowLayout,
    }

    impl World {
        fn snapshot(&self) -> Snapshot<'_> {
            Snapshot {
                grid: &self.grid,
                tasks: &self.tasks,
                tracks: &self.tracks,
                layout: &self.layout,
            }
        }
    }

    fn world() -> World {
        let grid = GridConfig::new(d(1), 30, 40.0);
        let tracks = TrackIndex::new(vec![
            Track::manufacturing("A", "Line A"),
            Track::manufacturing("C", "Line C"),
        ]);
        let tasks = vec![Task::new("T1", "A", DateRange::new(d(1), d(5)))];
        let layout = RowLayout::build(&tasks, &tracks, 36.0);
        World {
            grid,
            tasks,
            tracks,
            layout,
        }
    }

    #[test]
    fn test_move_flow_through_coordinator() {
        let w = world();
        let snap = w.snapshot();
        let mut coord = SessionCoordinator::new();

        coord.begin_move(&w.tasks[0], p(10.0, 10.0), &snap);
        let preview = coord.pointer_move(p(370.0, 50.0), &snap).unwrap();
        assert!(preview.is_valid);

        let outcome = coord.pointer_up(p(370.0, 50.0), &snap).unwrap();
        match outcome {
            SessionOutcome::Committed(Intent::Move(intent)) => {
                assert_eq!(intent.task_id, "T1");
                assert_eq!(intent.track_id, "C");
                assert_eq!(intent.start, d(10));
            }
            other => panic!("expected move commit, got {other:?}"),
        }
        assert!(coord.is_idle());
    }

    #[test]
    fn test_resize_flow_through_coordinator() {
        let w = world();
        let snap = w.snapshot();
        let mut coord = SessionCoordinator::new();

        coord.begin_resize(&w.tasks[0], ResizeEdge::End, p(200.0, 10.0));
        coord.pointer_move(p(300.0, 10.0), &snap);
        let outcome = coord.pointer_up(p(300.0, 10.0), &snap).unwrap();
        assert_eq!(
            outcome,
            SessionOutcome::Committed(Intent::Resize(ResizeIntent::End {
                task_id: "T1".into(),
                new_end: d(8),
            }))
        );
    }

    #[test]
    fn test_sessions_are_exclusive() {
        let w = world();
        let snap = w.snapshot();
        let mut coord = SessionCoordinator::new();

        coord.begin_move(&w.tasks[0], p(10.0, 10.0), &snap);
        coord.pointer_move(p(370.0, 50.0), &snap);

        // Arming a resize forces the drag out of flight.
        coord.begin_resize(&w.tasks[0], ResizeEdge::End, p(200.0, 10.0));
        assert!(!coord.is_idle());
        coord.pointer_move(p(300.0, 10.0), &snap);
        let outcome = coord.pointer_up(p(300.0, 10.0), &snap).unwrap();
        assert!(matches!(
            outcome,
            SessionOutcome::Committed(Intent::Resize(_))
        ));
        assert!(coord.is_idle());
    }

    #[test]
    fn test_cancel_covers_both_sides() {
        let w = world();
        let snap = w.snapshot();
        let mut coord = SessionCoordinator::new();

        assert_eq!(coord.cancel(), None);

        coord.begin_move(&w.tasks[0], p(10.0, 10.0), &snap);
        assert_eq!(coord.cancel(), Some(SessionOutcome::Cancelled));
        assert!(coord.is_idle());

        coord.begin_resize(&w.tasks[0], ResizeEdge::Start, p(10.0, 10.0));
        assert_eq!(coord.cancel(), Some(SessionOutcome::Cancelled));
        assert!(coord.is_idle());
    }

    #[test]
    fn test_intent_wire_shape() {
        // Intents are what the external store consumes; pin the JSON
        // field names it relies on.
        let intent = Intent::Move(MoveIntent {
            task_id: "T1".into(),
            track_id: "C".into(),
            start: d(10),
            end: d(14),
        });
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["Move"]["task_id"], "T1");
        assert_eq!(json["Move"]["start"], "2025-01-10");

        let resize = Intent::Resize(ResizeIntent::End {
            task_id: "T2".into(),
            new_end: d(3),
        });
        let json = serde_json::to_value(&resize).unwrap();
        assert_eq!(json["Resize"]["End"]["new_end"], "2025-01-03");
    }

    #[test]
    fn test_idle_pointer_events_are_ignored() {
        let w = world();
        let snap = w.snapshot();
        let mut coord = SessionCoordinator::new();

        assert!(coord.pointer_move(p(100.0, 10.0), &snap).is_none());
        assert!(coord.pointer_up(p(100.0, 10.0), &snap).is_none());
    }
}
