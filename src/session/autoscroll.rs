//! Edge auto-scroll velocity model.
//!
//! While a drag is in flight and the pointer nears a horizontal edge of
//! the scrollable viewport, the view scrolls proportionally to
//! proximity, up to a capped speed. The core performs no I/O, so the
//! repeating ~60 Hz timer lives in the host; this module provides the
//! armed/disarmed gate and the pure velocity sample the timer reads.
//!
//! The scroller is armed only while the owning session is in its
//! dragging phase. Every exit path disarms it, which is the
//! deterministic equivalent of cancelling the host timer.

use serde::{Deserialize, Serialize};

/// Pointer-to-edge distance below which scrolling engages, in pixels.
pub const EDGE_PROXIMITY_PX: f32 = 80.0;

/// Scroll speed cap in pixels per tick (one tick ≈ 16 ms at 60 Hz).
pub const MAX_SCROLL_SPEED: f32 = 24.0;

/// Proximity-proportional edge scroller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeScroller {
    proximity: f32,
    max_speed: f32,
    armed: bool,
}

impl Default for EdgeScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeScroller {
    /// Creates a scroller with the default proximity and speed cap.
    pub fn new() -> Self {
        Self {
            proximity: EDGE_PROXIMITY_PX,
            max_speed: MAX_SCROLL_SPEED,
            armed: false,
        }
    }

    /// Sets the engagement proximity.
    pub fn with_proximity(mut self, proximity: f32) -> Self {
        self.proximity = proximity.max(1.0);
        self
    }

    /// Sets the speed cap.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self
    }

    /// Arms the scroller (session entered its dragging phase).
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Disarms the scroller (session left its dragging phase).
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether the host timer should be running.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Scroll velocity for the current pointer position, in pixels per
    /// tick. Negative scrolls left, positive scrolls right, zero when
    /// disarmed or away from both edges.
    pub fn velocity(&self, pointer_x: f32, viewport_width: f32) -> f32 {
        if !self.armed || viewport_width <= 0.0 {
            return 0.0;
        }

        let to_left = pointer_x;
        let to_right = viewport_width - pointer_x;

        if to_left < self.proximity {
            // Pointer past the edge scrolls at full speed.
            let strength = (1.0 - to_left / self.proximity).clamp(0.0, 1.0);
            -strength * self.max_speed
        } else if to_right < self.proximity {
            let strength = (1.0 - to_right / self.proximity).clamp(0.0, 1.0);
            strength * self.max_speed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> EdgeScroller {
        let mut s = EdgeScroller::new();
        s.arm();
        s
    }

    #[test]
    fn test_disarmed_is_silent() {
        let s = EdgeScroller::new();
        assert_eq!(s.velocity(0.0, 800.0), 0.0);
        assert_eq!(s.velocity(799.0, 800.0), 0.0);
    }

    #[test]
    fn test_idle_zone_center() {
        let s = armed();
        assert_eq!(s.velocity(400.0, 800.0), 0.0);
        assert_eq!(s.velocity(80.0, 800.0), 0.0); // exactly at threshold
    }

    #[test]
    fn test_velocity_proportional_to_proximity() {
        let s = armed();
        let near = s.velocity(10.0, 800.0);
        let far = s.velocity(60.0, 800.0);
        assert!(near < far && far < 0.0); // both leftward, near is faster
        assert!((s.velocity(40.0, 800.0) + MAX_SCROLL_SPEED / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_velocity_capped_past_edge() {
        let s = armed();
        assert_eq!(s.velocity(-200.0, 800.0), -MAX_SCROLL_SPEED);
        assert_eq!(s.velocity(1_000.0, 800.0), MAX_SCROLL_SPEED);
    }

    #[test]
    fn test_right_edge_scrolls_right() {
        let s = armed();
        assert!(s.velocity(790.0, 800.0) > 0.0);
    }

    #[test]
    fn test_disarm_stops_immediately() {
        let mut s = armed();
        assert!(s.velocity(0.0, 800.0) < 0.0);
        s.disarm();
        assert_eq!(s.velocity(0.0, 800.0), 0.0);
        assert!(!s.is_armed());
    }

    #[test]
    fn test_degenerate_viewport() {
        let s = armed();
        assert_eq!(s.velocity(10.0, 0.0), 0.0);
    }
}
