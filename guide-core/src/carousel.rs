//! Carousel index state.
//!
//! With wraparound enabled the track carries two cloned boundary slides:
//! slot `0` shows the last logical item and slot `N + 1` the first, so the
//! track can keep animating in one direction. After an animated step lands
//! on a clone, [`CarouselState::reanchor`] yields the equivalent real slot
//! to jump to with animation disabled; the viewer never sees the jump.

use serde::{Deserialize, Serialize};

/// Result of a slide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMove {
    /// Animate the track to this physical slot.
    Animated(usize),
    /// At a boundary and wraparound is off; nothing moves.
    Blocked,
}

/// Logical index state of a carousel over a fixed item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    item_count: usize,
    wraparound: bool,
    physical: usize,
}

impl CarouselState {
    /// Create a carousel positioned on the first logical item.
    ///
    /// `item_count` is the number of real items, excluding clones.
    #[must_use]
    pub fn new(item_count: usize, wraparound: bool) -> Self {
        Self {
            item_count,
            wraparound,
            physical: usize::from(wraparound),
        }
    }

    /// Number of physical slots, including boundary clones.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        if self.wraparound {
            self.item_count + 2
        } else {
            self.item_count
        }
    }

    /// Current physical slot.
    #[must_use]
    pub const fn physical_index(&self) -> usize {
        self.physical
    }

    /// Current logical item, `0..item_count`.
    #[must_use]
    pub fn logical_index(&self) -> usize {
        self.logical_for_slot(self.physical)
    }

    /// Logical item shown in a physical slot.
    ///
    /// Clone slots map to the real item they duplicate, which is also how
    /// taps on a clone resolve to an exhibition.
    #[must_use]
    pub fn logical_for_slot(&self, slot: usize) -> usize {
        if !self.wraparound {
            return slot.min(self.item_count.saturating_sub(1));
        }
        if slot == 0 {
            self.item_count.saturating_sub(1)
        } else if slot > self.item_count {
            0
        } else {
            slot - 1
        }
    }

    /// Track offset for the current slot, in percent of the viewport.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_percent(&self) -> f32 {
        -(self.physical as f32) * 100.0
    }

    /// Advance one slide.
    pub fn next(&mut self) -> SlideMove {
        let last = self.slot_count().saturating_sub(1);
        if self.physical >= last {
            return SlideMove::Blocked;
        }
        self.physical += 1;
        SlideMove::Animated(self.physical)
    }

    /// Go back one slide.
    pub fn prev(&mut self) -> SlideMove {
        if self.physical == 0 {
            return SlideMove::Blocked;
        }
        self.physical -= 1;
        SlideMove::Animated(self.physical)
    }

    /// Jump to a logical item.
    pub fn jump_to(&mut self, logical: usize) -> SlideMove {
        if logical >= self.item_count {
            return SlideMove::Blocked;
        }
        self.physical = if self.wraparound { logical + 1 } else { logical };
        SlideMove::Animated(self.physical)
    }

    /// If the track rests on a clone slot, move the anchor to the real
    /// slot and return it; the caller re-positions without animation.
    pub fn reanchor(&mut self) -> Option<usize> {
        if !self.wraparound {
            return None;
        }
        if self.physical == 0 {
            self.physical = self.item_count;
            Some(self.physical)
        } else if self.physical == self.item_count + 1 {
            self.physical = 1;
            Some(self.physical)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulates the animated step plus the silent re-anchor the DOM
    /// controller performs after each transition ends.
    fn step(state: &mut CarouselState) {
        assert!(matches!(state.next(), SlideMove::Animated(_)));
        state.reanchor();
    }

    #[test]
    fn starts_on_first_logical_item() {
        let state = CarouselState::new(3, true);
        assert_eq!(state.logical_index(), 0);
        assert_eq!(state.physical_index(), 1);

        let plain = CarouselState::new(3, false);
        assert_eq!(plain.logical_index(), 0);
        assert_eq!(plain.physical_index(), 0);
    }

    #[test]
    fn full_cycle_returns_to_start_without_drift() {
        let mut state = CarouselState::new(3, true);
        let start = state.clone();
        for _ in 0..3 {
            step(&mut state);
        }
        assert_eq!(state, start);
        assert!((state.offset_percent() - start.offset_percent()).abs() < f32::EPSILON);
    }

    #[test]
    fn next_past_last_real_item_lands_on_clone_then_reanchors() {
        let mut state = CarouselState::new(3, true);
        state.jump_to(2);
        assert_eq!(state.next(), SlideMove::Animated(4));
        // Slot 4 is the clone of the first item.
        assert_eq!(state.logical_index(), 0);
        assert_eq!(state.reanchor(), Some(1));
        assert_eq!(state.logical_index(), 0);
    }

    #[test]
    fn prev_from_first_item_wraps_backwards() {
        let mut state = CarouselState::new(3, true);
        assert_eq!(state.prev(), SlideMove::Animated(0));
        assert_eq!(state.logical_index(), 2);
        assert_eq!(state.reanchor(), Some(3));
        assert_eq!(state.logical_index(), 2);
    }

    #[test]
    fn without_wraparound_bounds_block() {
        let mut state = CarouselState::new(2, false);
        assert_eq!(state.prev(), SlideMove::Blocked);
        assert_eq!(state.next(), SlideMove::Animated(1));
        assert_eq!(state.next(), SlideMove::Blocked);
        assert_eq!(state.reanchor(), None);
    }

    #[test]
    fn clone_slots_resolve_to_their_real_item() {
        let state = CarouselState::new(3, true);
        assert_eq!(state.logical_for_slot(0), 2);
        assert_eq!(state.logical_for_slot(1), 0);
        assert_eq!(state.logical_for_slot(3), 2);
        assert_eq!(state.logical_for_slot(4), 0);
    }

    #[test]
    fn jump_to_out_of_range_is_blocked() {
        let mut state = CarouselState::new(3, true);
        assert_eq!(state.jump_to(3), SlideMove::Blocked);
        assert_eq!(state.jump_to(1), SlideMove::Animated(2));
    }

    #[test]
    fn offset_tracks_physical_slot() {
        let mut state = CarouselState::new(3, true);
        assert!((state.offset_percent() + 100.0).abs() < f32::EPSILON);
        state.next();
        assert!((state.offset_percent() + 200.0).abs() < f32::EPSILON);
    }
}
