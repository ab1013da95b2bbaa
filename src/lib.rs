//! Headless Gantt interaction engine.
//!
//! The algorithmic core of a manufacturing timeline board: packing
//! overlapping tasks into non-overlapping visual lanes, mapping between
//! calendar dates and pixel coordinates, validating drop candidates,
//! and driving pointer-based drag/resize interactions as explicit
//! state machines. Rendering, persistence, and the task store are
//! external collaborators — this crate only computes decisions and
//! emits intents.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `DateRange`, `Track`,
//!   `TrackIndex` (legacy name-fallback resolution)
//! - **`grid`**: Pure date↔pixel mapping and snapping
//! - **`lanes`**: First-fit interval lane packing
//! - **`layout`**: Vertical row geometry derived from lane counts
//! - **`validation`**: Compatibility/availability checks and the
//!   bounded free-slot search
//! - **`session`**: Drag and resize state machines, edge auto-scroll,
//!   the session coordinator
//!
//! # Concurrency Model
//!
//! Single-threaded and event-driven. All computation outside the two
//! controllers is pure and allocation-light, safe to re-run on every
//! pointer move; lane re-packing is the one heavier pass and runs only
//! after a committed structural change. At most one drag-or-resize
//! session is active at a time.
//!
//! # Reference
//!
//! - Kleinberg & Tardos (2006), "Algorithm Design", Ch. 4.1
//!   (Interval Partitioning)

pub mod grid;
pub mod lanes;
pub mod layout;
pub mod models;
pub mod session;
pub mod validation;

pub use grid::{GridConfig, SnapMode, Span};
pub use lanes::{pack_lanes, pack_track, LanePacking, MAX_LANES};
pub use layout::{RowLayout, TrackRow, DEFAULT_LANE_HEIGHT};
pub use models::{DateRange, ModelError, Task, Track, TrackIndex, TrackKind};
pub use session::{
    DragController, DragOutcome, EdgeScroller, Intent, MoveIntent, PointerPoint, Preview,
    ResizeController, ResizeEdge, ResizeIntent, ResizeOutcome, SessionCoordinator, SessionOutcome,
    Snapshot,
};
pub use validation::{
    check_availability, check_compatibility, find_free_slot, SlotSearchError, Verdict,
    MAX_SLOT_ITERATIONS,
};
