//! Grid coordinate calculator.
//!
//! Pure date↔pixel mapping over an ordered, contiguous sequence of
//! calendar days. One day = one column of `cell_width` pixels. No
//! hidden state — every function is safe to call on every pointer-move
//! or animation frame.
//!
//! # Degenerate Input
//! A zero or negative cell width is treated as 1 px, out-of-range
//! pixels clamp to the first/last grid day, and an empty day list maps
//! to `None`. Nothing here panics on user input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

/// Which point of the containing cell a pixel snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapMode {
    /// Left edge of the cell.
    Start,
    /// Horizontal center of the cell.
    Center,
    /// Right edge of the cell.
    End,
}

/// A task's horizontal extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Left edge, relative to the grid origin.
    pub x: f32,
    /// Width in pixels (never below one cell).
    pub width: f32,
}

/// Grid configuration: the date-indexed horizontal axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Ordered, contiguous calendar days, one per column.
    days: Vec<NaiveDate>,
    /// Column width in pixels.
    cell_width: f32,
    /// Current horizontal scroll offset in pixels.
    scroll_x: f32,
}

impl GridConfig {
    /// Creates a grid of `day_count` contiguous days from `first_day`.
    pub fn new(first_day: NaiveDate, day_count: usize, cell_width: f32) -> Self {
        let days = (0..day_count as i64)
            .map(|i| first_day + chrono::Duration::days(i))
            .collect();
        Self {
            days,
            cell_width,
            scroll_x: 0.0,
        }
    }

    /// Creates a grid from an explicit (already ordered) day list.
    pub fn from_days(days: Vec<NaiveDate>, cell_width: f32) -> Self {
        Self {
            days,
            cell_width,
            scroll_x: 0.0,
        }
    }

    /// Sets the scroll offset.
    pub fn with_scroll(mut self, scroll_x: f32) -> Self {
        self.scroll_x = scroll_x;
        self
    }

    /// Updates the scroll offset in place (auto-scroll feedback path).
    pub fn set_scroll(&mut self, scroll_x: f32) {
        self.scroll_x = scroll_x;
    }

    /// Current scroll offset.
    #[inline]
    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    /// Effective cell width, guarded to at least 1 px.
    #[inline]
    pub fn cell_width(&self) -> f32 {
        if self.cell_width < 1.0 {
            1.0
        } else {
            self.cell_width
        }
    }

    /// Number of day columns.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// First grid day, if any.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Last grid day, if any.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Total grid width in pixels.
    pub fn pixel_width(&self) -> f32 {
        self.days.len() as f32 * self.cell_width()
    }

    /// Whether an unscrolled x coordinate falls inside the grid.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= 0.0 && x < self.pixel_width()
    }

    /// Maps a date to the left edge of its column.
    ///
    /// Dates before the first grid day yield negative pixels; the
    /// caller clamps if it needs an on-grid value. Empty grid → 0.
    pub fn date_to_pixel(&self, date: NaiveDate) -> f32 {
        match self.first_day() {
            Some(first) => (date - first).num_days() as f32 * self.cell_width(),
            None => 0.0,
        }
    }

    /// Maps a pixel to its containing grid day.
    ///
    /// With `include_scroll` the current scroll offset is added first
    /// (container-local pointer coordinates). The column index is
    /// floored and clamped to `[0, day_count-1]`; an empty grid
    /// returns `None`.
    pub fn pixel_to_date(&self, x: f32, include_scroll: bool) -> Option<NaiveDate> {
        if self.days.is_empty() {
            return None;
        }
        let x = if include_scroll { x + self.scroll_x } else { x };
        let index = (x / self.cell_width()).floor() as i64;
        let index = index.clamp(0, self.days.len() as i64 - 1) as usize;
        Some(self.days[index])
    }

    /// Snaps a pixel to the start, center, or end of its cell.
    pub fn snap_to_grid(&self, x: f32, mode: SnapMode) -> f32 {
        let cell = self.cell_width();
        let column = (x / cell).floor();
        match mode {
            SnapMode::Start => column * cell,
            SnapMode::Center => column * cell + cell / 2.0,
            SnapMode::End => (column + 1.0) * cell,
        }
    }

    /// Visual extent of a date range.
    ///
    /// Width is `day_span + one cell`, floored at one cell, so even a
    /// zero-length span stays grabbable.
    pub fn task_span(&self, range: &DateRange) -> Span {
        let cell = self.cell_width();
        let day_span = (range.end - range.start).num_days() as f32 * cell;
        Span {
            x: self.date_to_pixel(range.start),
            width: (day_span + cell).max(cell),
        }
    }
}
