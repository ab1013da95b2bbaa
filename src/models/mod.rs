//! Gantt domain models.
//!
//! Core data types for the interaction engine: tasks with inclusive
//! calendar-day ranges, tracks with compatibility kinds, and the track
//! reference resolution shim for legacy name-based records.
//!
//! # Domain Mappings
//!
//! | gantt-core | Manufacturing | Logistics |
//! |------------|---------------|-----------|
//! | Track | Factory/Line | Dock |
//! | Task | Production Order | Shipment Window |
//! | Lane | Parallel Order Slot | Berth Slot |

mod task;
mod track;

pub use task::{DateRange, ModelError, Task};
pub use track::{Track, TrackIndex, TrackKind};
