//! Interval lane packer.
//!
//! Assigns each task on a track a vertical lane index so that tasks
//! with overlapping date ranges never share a lane. This is greedy
//! first-fit interval partitioning: processed in start order, each
//! task takes the lowest lane whose current occupant it does not
//! overlap.
//!
//! Lane count is capped at [`MAX_LANES`]; overflow tasks collapse into
//! the last lane. That is accepted visual overlap on a pathologically
//! busy track, not an error — a degraded-but-safe fallback.
//!
//! # Reference
//! Kleinberg & Tardos (2006), "Algorithm Design", Ch. 4.1
//! (Interval Partitioning)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{DateRange, Task, TrackIndex};

/// Upper bound on lanes per track.
pub const MAX_LANES: usize = 10;

/// Result of packing one track's tasks into lanes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanePacking {
    lane_of: HashMap<String, usize>,
    lane_count: usize,
}

impl LanePacking {
    /// Lane index assigned to a task, if it was part of the packing.
    pub fn lane_of(&self, task_id: &str) -> Option<usize> {
        self.lane_of.get(task_id).copied()
    }

    /// Number of lanes in use (0 for an empty track).
    ///
    /// Drives the track's row height; layout floors this at one lane.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Number of packed tasks.
    pub fn task_count(&self) -> usize {
        self.lane_of.len()
    }
}

/// Packs the given tasks (all on one track) into lanes.
///
/// # Algorithm
/// 1. Sort by start date ascending, tie-break by id (determinism).
/// 2. For each task, scan lanes from 0 upward; take the first lane
///    whose tracked occupant does not date-overlap the task.
/// 3. Past [`MAX_LANES`], place the task in the last lane anyway.
///
/// Each lane tracks only its most recent occupant; with start-sorted
/// input that occupant is the only one a later task can still overlap.
pub fn pack_lanes(tasks: &[&Task]) -> LanePacking {
    let mut ordered: Vec<&Task> = tasks.to_vec();
    ordered.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut occupants: Vec<DateRange> = Vec::new();
    let mut lane_of = HashMap::with_capacity(ordered.len());

    for task in ordered {
        let lane = occupants
            .iter()
            .position(|occupant| !occupant.overlaps(&task.range));

        match lane {
            Some(lane) => {
                occupants[lane] = task.range;
                lane_of.insert(task.id.clone(), lane);
            }
            None if occupants.len() < MAX_LANES => {
                occupants.push(task.range);
                lane_of.insert(task.id.clone(), occupants.len() - 1);
            }
            None => {
                // Cap reached: collapse into the last lane.
                let last = occupants.len() - 1;
                occupants[last] = task.range;
                lane_of.insert(task.id.clone(), last);
            }
        }
    }

    LanePacking {
        lane_of,
        lane_count: occupants.len(),
    }
}

/// Packs all tasks that resolve to `track_id`.
pub fn pack_track(track_id: &str, tasks: &[Task], index: &TrackIndex) -> LanePacking {
    let on_track = index.tasks_on(track_id, tasks);
    pack_lanes(&on_track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, from: u32, to: u32) -> Task {
        Task::new(
            id,
            "trk-1",
            DateRange::new(d(2025, 1, from), d(2025, 1, to)),
        )
    }

    fn pack(tasks: &[Task]) -> LanePacking {
        let refs: Vec<&Task> = tasks.iter().collect();
        pack_lanes(&refs)
    }

    #[test]
    fn test_disjoint_tasks_share_lane_zero() {
        let tasks = vec![task("A", 1, 3), task("B", 5, 7), task("C", 9, 10)];
        let packing = pack(&tasks);
        assert_eq!(packing.lane_count(), 1);
        for t in &tasks {
            assert_eq!(packing.lane_of(&t.id), Some(0));
        }
    }

    #[test]
    fn test_overlapping_tasks_split_lanes() {
        let tasks = vec![task("A", 1, 5), task("B", 3, 8), task("C", 6, 9)];
        let packing = pack(&tasks);
        assert_eq!(packing.lane_of("A"), Some(0));
        assert_eq!(packing.lane_of("B"), Some(1));
        // C overlaps B but not A (A ends day 5, C starts day 6).
        assert_eq!(packing.lane_of("C"), Some(0));
        assert_eq!(packing.lane_count(), 2);
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        // Inclusive ranges: ending day 5 and starting day 5 share a day.
        let tasks = vec![task("A", 1, 5), task("B", 5, 9)];
        let packing = pack(&tasks);
        assert_ne!(packing.lane_of("A"), packing.lane_of("B"));
    }

    #[test]
    fn test_id_tie_break_is_deterministic() {
        let tasks = vec![task("B", 1, 5), task("A", 1, 5)];
        let packing = pack(&tasks);
        // Same start: lexicographic id order places A first.
        assert_eq!(packing.lane_of("A"), Some(0));
        assert_eq!(packing.lane_of("B"), Some(1));
    }

    #[test]
    fn test_identical_input_identical_output() {
        let tasks: Vec<Task> = (0..20)
            .map(|i| task(&format!("T{i:02}"), 1 + (i % 7), 4 + (i % 7)))
            .collect();
        let first = pack(&tasks);
        let second = pack(&tasks);
        for t in &tasks {
            assert_eq!(first.lane_of(&t.id), second.lane_of(&t.id));
        }
        assert_eq!(first.lane_count(), second.lane_count());
    }

    #[test]
    fn test_overflow_collapses_into_last_lane() {
        // Twelve tasks all covering the same days: lanes 0..9 get one
        // each, the remaining two land in lane 9.
        let tasks: Vec<Task> = (0..12).map(|i| task(&format!("T{i:02}"), 1, 9)).collect();
        let packing = pack(&tasks);
        assert_eq!(packing.lane_count(), MAX_LANES);
        let in_last = tasks
            .iter()
            .filter(|t| packing.lane_of(&t.id) == Some(MAX_LANES - 1))
            .count();
        assert_eq!(in_last, 3);
    }

    #[test]
    fn test_empty_track() {
        let packing = pack(&[]);
        assert_eq!(packing.lane_count(), 0);
        assert_eq!(packing.task_count(), 0);
    }

    #[test]
    fn test_pack_track_resolves_legacy_names() {
        let index = TrackIndex::new(vec![crate::models::Track::manufacturing(
            "trk-1", "Line A",
        )]);
        let tasks = vec![
            task("A", 1, 5),
            Task::new("B", "Line A", DateRange::new(d(2025, 1, 3), d(2025, 1, 7))),
        ];
        let packing = pack_track("trk-1", &tasks, &index);
        assert_eq!(packing.task_count(), 2);
        assert_ne!(packing.lane_of("A"), packing.lane_of("B"));
    }

    prop_compose! {
        fn arb_tasks()(spans in prop::collection::vec((1u32..20, 0u32..8), 0..8)) -> Vec<Task> {
            spans
                .iter()
                .enumerate()
                .map(|(i, &(from, len))| task(&format!("T{i:02}"), from, from + len))
                .collect()
        }
    }

    proptest! {
        // With fewer tasks than MAX_LANES, no two tasks sharing a lane
        // may have overlapping ranges.
        #[test]
        fn prop_no_overlap_within_a_lane(tasks in arb_tasks()) {
            let packing = pack(&tasks);
            for a in &tasks {
                for b in &tasks {
                    if a.id != b.id
                        && packing.lane_of(&a.id) == packing.lane_of(&b.id)
                    {
                        prop_assert!(!a.range.overlaps(&b.range));
                    }
                }
            }
        }

        #[test]
        fn prop_every_task_gets_a_lane(tasks in arb_tasks()) {
            let packing = pack(&tasks);
            prop_assert_eq!(packing.task_count(), tasks.len());
            for t in &tasks {
                let lane = packing.lane_of(&t.id).unwrap();
                prop_assert!(lane < packing.lane_count().max(1));
            }
        }
    }
}
