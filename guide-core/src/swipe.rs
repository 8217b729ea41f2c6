//! Back-swipe gesture tracking.
//!
//! A rightward drag on an exhibition screen navigates back to its parent.
//! The gesture must travel at least 80 px and be predominantly horizontal,
//! so vertical scrolling never triggers it. While a horizontal drag is in
//! progress the page scroll must be suppressed (iOS Safari).

use serde::{Deserialize, Serialize};

/// Minimum rightward travel for a back swipe, in pixels.
pub const BACK_THRESHOLD_PX: f64 = 80.0;

/// Horizontal travel beyond which scrolling is suppressed mid-drag.
pub const SCROLL_LOCK_PX: f64 = 10.0;

/// Result of releasing a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The gesture qualifies as a back swipe.
    Back,
    /// No navigation.
    None,
}

/// Tracks one touch sequence over a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A touch went down.
    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// A touch moved; returns whether the default scroll should be
    /// prevented for this event.
    #[must_use]
    pub fn touch_move(&self, x: f64, y: f64) -> bool {
        let Some((sx, sy)) = self.start else {
            return false;
        };
        let dx = x - sx;
        let dy = y - sy;
        dx.abs() > dy.abs() && dx.abs() > SCROLL_LOCK_PX
    }

    /// The touch lifted; decides whether the gesture navigates back.
    pub fn touch_end(&mut self, x: f64, y: f64) -> SwipeOutcome {
        let Some((sx, sy)) = self.start.take() else {
            return SwipeOutcome::None;
        };
        let dx = x - sx;
        let dy = y - sy;
        if dx > BACK_THRESHOLD_PX && dx.abs() > dy.abs() {
            SwipeOutcome::Back
        } else {
            SwipeOutcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_horizontal_drag_triggers_back() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(20.0, 200.0);
        assert_eq!(tracker.touch_end(120.0, 215.0), SwipeOutcome::Back);
    }

    #[test]
    fn short_drag_does_not_trigger() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(20.0, 200.0);
        assert_eq!(tracker.touch_end(60.0, 200.0), SwipeOutcome::None);
    }

    #[test]
    fn leftward_drag_never_navigates_back() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(300.0, 200.0);
        assert_eq!(tracker.touch_end(100.0, 200.0), SwipeOutcome::None);
    }

    #[test]
    fn vertical_scroll_wins_over_back() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(20.0, 100.0);
        assert_eq!(tracker.touch_end(120.0, 260.0), SwipeOutcome::None);
    }

    #[test]
    fn horizontal_move_suppresses_scroll() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(20.0, 200.0);
        assert!(tracker.touch_move(45.0, 204.0));
        assert!(!tracker.touch_move(28.0, 204.0));
        assert!(!tracker.touch_move(40.0, 260.0));
    }

    #[test]
    fn end_without_start_is_inert() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.touch_end(200.0, 0.0), SwipeOutcome::None);
        assert!(!tracker.touch_move(200.0, 0.0));
    }

    #[test]
    fn release_consumes_the_gesture() {
        let mut tracker = SwipeTracker::new();
        tracker.touch_start(0.0, 0.0);
        assert_eq!(tracker.touch_end(150.0, 0.0), SwipeOutcome::Back);
        // A stray second release must not fire again.
        assert_eq!(tracker.touch_end(300.0, 0.0), SwipeOutcome::None);
    }
}
