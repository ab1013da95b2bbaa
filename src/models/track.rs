//! Track model and reference resolution.
//!
//! A track is a horizontal grouping onto which tasks are placed — one
//! factory, one production line. Each track carries a categorical kind
//! used for drop compatibility: a task may only move between tracks of
//! the same kind.
//!
//! # Legacy References
//! Older records reference tracks by display name instead of id. All
//! "id first, name fallback" resolution goes through
//! [`TrackIndex::resolve`] so the rest of the crate never sees the shim.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Task;

/// Categorical track kind; drop compatibility requires equal kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Manufacturing line.
    Manufacturing,
    /// Container assembly line.
    Container,
    /// Packaging line.
    Packaging,
    /// Domain-specific kind.
    Custom(String),
}

impl TrackKind {
    /// Short label for UI feedback strings.
    pub fn label(&self) -> &str {
        match self {
            TrackKind::Manufacturing => "manufacturing",
            TrackKind::Container => "container",
            TrackKind::Packaging => "packaging",
            TrackKind::Custom(name) => name,
        }
    }
}

/// A track (factory row) onto which tasks are placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier.
    pub id: String,
    /// Human-readable name (also a legacy reference key).
    pub name: String,
    /// Compatibility kind.
    pub kind: TrackKind,
}

impl Track {
    /// Creates a new track.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Creates a manufacturing track.
    pub fn manufacturing(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, TrackKind::Manufacturing)
    }

    /// Creates a packaging track.
    pub fn packaging(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, TrackKind::Packaging)
    }

    /// Creates a container track.
    pub fn container(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, TrackKind::Container)
    }
}

/// Read-only track lookup table.
///
/// Built once per interaction from the track snapshot list and passed
/// into the validator explicitly, so validation stays pure and
/// independently testable — no ambient singletons.
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    tracks: Vec<Track>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl TrackIndex {
    /// Builds an index from a track snapshot list.
    ///
    /// On duplicate ids or names the first occurrence wins.
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for (i, track) in tracks.iter().enumerate() {
            by_id.entry(track.id.clone()).or_insert(i);
            by_name.entry(track.name.clone()).or_insert(i);
        }
        Self {
            tracks,
            by_id,
            by_name,
        }
    }

    /// Resolves a track reference: by id first, by name as a fallback.
    ///
    /// The name fallback is a data-migration shim for legacy records;
    /// this is the only place it exists.
    pub fn resolve(&self, track_ref: &str) -> Option<&Track> {
        self.by_id
            .get(track_ref)
            .or_else(|| self.by_name.get(track_ref))
            .map(|&i| &self.tracks[i])
    }

    /// Resolves the track a task is placed on.
    pub fn resolve_task(&self, task: &Task) -> Option<&Track> {
        self.resolve(&task.track_ref)
    }

    /// Whether two tasks resolve to the same track.
    ///
    /// Unresolvable references fall back to raw string comparison so
    /// legacy records still group together.
    pub fn same_track(&self, a: &Task, b: &Task) -> bool {
        match (self.resolve_task(a), self.resolve_task(b)) {
            (Some(ta), Some(tb)) => ta.id == tb.id,
            _ => a.track_ref == b.track_ref,
        }
    }

    /// Tracks in snapshot order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the index holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tasks from a snapshot that resolve to the given track id.
    pub fn tasks_on<'a>(&self, track_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|t| {
                self.resolve_task(t)
                    .map(|track| track.id == track_id)
                    .unwrap_or(t.track_ref == track_id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_index() -> TrackIndex {
        TrackIndex::new(vec![
            Track::manufacturing("trk-1", "Line A"),
            Track::packaging("trk-2", "Pack 1"),
            Track::container("trk-3", "Dock"),
        ])
    }

    #[test]
    fn test_resolve_by_id() {
        let index = sample_index();
        assert_eq!(index.resolve("trk-2").unwrap().name, "Pack 1");
    }

    #[test]
    fn test_resolve_name_fallback() {
        let index = sample_index();
        // Legacy records carry the display name.
        assert_eq!(index.resolve("Line A").unwrap().id, "trk-1");
        assert!(index.resolve("nowhere").is_none());
    }

    #[test]
    fn test_id_wins_over_name() {
        // A name that collides with another track's id must lose.
        let index = TrackIndex::new(vec![
            Track::manufacturing("trk-1", "Line A"),
            Track::manufacturing("Line A", "Odd"),
        ]);
        assert_eq!(index.resolve("Line A").unwrap().name, "Odd");
    }

    #[test]
    fn test_same_track_mixed_references() {
        let index = sample_index();
        let range = DateRange::new(d(2025, 1, 1), d(2025, 1, 2));
        let by_id = Task::new("T1", "trk-1", range);
        let by_name = Task::new("T2", "Line A", range);
        assert!(index.same_track(&by_id, &by_name));

        let elsewhere = Task::new("T3", "trk-2", range);
        assert!(!index.same_track(&by_id, &elsewhere));
    }

    #[test]
    fn test_tasks_on_track() {
        let index = sample_index();
        let range = DateRange::new(d(2025, 1, 1), d(2025, 1, 2));
        let tasks = vec![
            Task::new("T1", "trk-1", range),
            Task::new("T2", "Line A", range),
            Task::new("T3", "trk-2", range),
        ];
        let on_a = index.tasks_on("trk-1", &tasks);
        assert_eq!(on_a.len(), 2);
        assert!(on_a.iter().all(|t| t.id == "T1" || t.id == "T2"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TrackKind::Manufacturing.label(), "manufacturing");
        assert_eq!(TrackKind::Custom("paint".into()).label(), "paint");
    }
}
