//! Vertical row layout derived from lane packing.
//!
//! Stacks one row per track, each `lane_count × lane_height` tall, and
//! answers the two geometry questions the drag controller asks: which
//! track is under a pointer y, and where a task's ghost sits
//! vertically.
//!
//! Building a layout re-packs every track, which is the heavy pass —
//! it runs after a committed structural change, never per preview
//! frame. Queries against a built layout are cheap.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lanes::{pack_track, LanePacking};
use crate::models::{Task, TrackIndex};

/// Default height of a single lane in pixels.
pub const DEFAULT_LANE_HEIGHT: f32 = 36.0;

/// One track's vertical extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    /// Track id.
    pub track_id: String,
    /// Top edge in pixels.
    pub y: f32,
    /// Row height (`lane_count × lane_height`, at least one lane).
    pub height: f32,
    /// Lanes in use on this track.
    pub lane_count: usize,
}

/// Built vertical geometry: track rows plus per-track lane packings.
#[derive(Debug, Clone, Default)]
pub struct RowLayout {
    rows: Vec<TrackRow>,
    packings: HashMap<String, LanePacking>,
    lane_height: f32,
}

impl RowLayout {
    /// Packs every track and stacks rows in track snapshot order.
    pub fn build(tasks: &[Task], index: &TrackIndex, lane_height: f32) -> Self {
        let lane_height = lane_height.max(1.0);
        let mut rows = Vec::with_capacity(index.len());
        let mut packings = HashMap::with_capacity(index.len());
        let mut y = 0.0;

        for track in index.tracks() {
            let packing = pack_track(&track.id, tasks, index);
            // Empty tracks still render one lane tall.
            let lane_count = packing.lane_count().max(1);
            let height = lane_count as f32 * lane_height;
            rows.push(TrackRow {
                track_id: track.id.clone(),
                y,
                height,
                lane_count,
            });
            packings.insert(track.id.clone(), packing);
            y += height;
        }

        Self {
            rows,
            packings,
            lane_height,
        }
    }

    /// Lane height in pixels.
    #[inline]
    pub fn lane_height(&self) -> f32 {
        self.lane_height
    }

    /// Rows in track order.
    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    /// Total stacked height.
    pub fn total_height(&self) -> f32 {
        self.rows.last().map(|r| r.y + r.height).unwrap_or(0.0)
    }

    /// The row for a track id.
    pub fn row_of(&self, track_id: &str) -> Option<&TrackRow> {
        self.rows.iter().find(|r| r.track_id == track_id)
    }

    /// The lane packing computed for a track.
    pub fn packing(&self, track_id: &str) -> Option<&LanePacking> {
        self.packings.get(track_id)
    }

    /// Resolves the track under a pointer y, clamping to the nearest
    /// row when the pointer is above the first or below the last.
    pub fn track_at_y(&self, y: f32) -> Option<&TrackRow> {
        if self.rows.is_empty() {
            return None;
        }
        if y < 0.0 {
            return self.rows.first();
        }
        self.rows
            .iter()
            .find(|r| y >= r.y && y < r.y + r.height)
            .or_else(|| self.rows.last())
    }

    /// Top edge of a task's ghost: its track row plus its lane offset.
    ///
    /// Unknown tracks or unpacked tasks sit at lane 0 of the nearest
    /// known geometry (y = 0.0 fallback) rather than failing.
    pub fn task_y(&self, track_id: &str, task_id: &str) -> f32 {
        let Some(row) = self.row_of(track_id) else {
            return 0.0;
        };
        let lane = self
            .packings
            .get(track_id)
            .and_then(|p| p.lane_of(task_id))
            .unwrap_or(0);
        row.y + lane as f32 * self.lane_height
    }
}
