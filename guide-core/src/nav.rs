//! Navigation state machine.
//!
//! The [`Navigator`] serializes screen changes: it owns the single
//! [`NavigationState`], decides whether a transition request is accepted,
//! and hands the transition engine a [`TransitionPlan`] describing the
//! animation directions. While a transition is in flight every further
//! request is rejected, never queued.

use serde::{Deserialize, Serialize};

use crate::screen::Screen;

/// Whether a navigation pushes deeper or returns toward home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavIntent {
    /// Push deeper, e.g. list to detail.
    Forward,
    /// Return toward home.
    Backward,
}

/// The edge a screen slides in from or out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideEdge {
    /// The leading (right) edge.
    Leading,
    /// The trailing (left) edge.
    Trailing,
}

impl SlideEdge {
    /// CSS class applied to the entering screen node.
    #[must_use]
    pub const fn enter_class(self) -> &'static str {
        match self {
            Self::Leading => "enter-right",
            Self::Trailing => "enter-left",
        }
    }

    /// CSS class applied to the exiting screen node.
    #[must_use]
    pub const fn exit_class(self) -> &'static str {
        match self {
            Self::Leading => "exit-right",
            Self::Trailing => "exit-left",
        }
    }
}

/// The externally visible navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// The active screen; `None` until the first transition settles.
    pub active: Option<Screen>,
    /// True from acceptance of a request until settle or abort.
    pub transitioning: bool,
}

/// Everything the transition engine needs to animate one screen change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// The screen being mounted.
    pub target: Screen,
    /// The screen being replaced, if any.
    pub previous: Option<Screen>,
    /// Edge the new screen enters from.
    pub enter: SlideEdge,
    /// Edge the old screen exits to.
    pub exit: SlideEdge,
}

/// Outcome of a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request accepted; the engine must run the plan and then call
    /// [`Navigator::settle`] or [`Navigator::abort`].
    Begin(TransitionPlan),
    /// The target already is the active screen; silent no-op.
    AlreadyActive,
    /// A transition is in flight; the request is dropped.
    Busy,
}

/// Owner of the navigation state.
///
/// Exactly one instance exists per app; only the transition engine calls
/// its operations.
#[derive(Debug, Default)]
pub struct Navigator {
    active: Option<Screen>,
    transitioning: bool,
}

impl Navigator {
    /// Create a navigator with no active screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a transition to `target`.
    ///
    /// Accepting the request sets the transitioning guard; the caller is
    /// then obliged to finish with [`settle`](Self::settle) or
    /// [`abort`](Self::abort).
    pub fn begin(&mut self, target: Screen, intent: NavIntent) -> Decision {
        if self.transitioning {
            tracing::debug!(?target, "transition request dropped: busy");
            return Decision::Busy;
        }
        if self.active.as_ref() == Some(&target) {
            return Decision::AlreadyActive;
        }

        let (enter, exit) = match intent {
            NavIntent::Forward => (SlideEdge::Leading, SlideEdge::Trailing),
            NavIntent::Backward => (SlideEdge::Trailing, SlideEdge::Leading),
        };

        self.transitioning = true;
        Decision::Begin(TransitionPlan {
            target,
            previous: self.active.clone(),
            enter,
            exit,
        })
    }

    /// Commit a finished transition: the target becomes active and the
    /// guard clears.
    pub fn settle(&mut self, target: Screen) {
        debug_assert!(self.transitioning, "settle without a begun transition");
        self.active = Some(target);
        self.transitioning = false;
    }

    /// Abort the in-flight transition, leaving the previous screen active.
    pub fn abort(&mut self) {
        tracing::warn!("transition aborted");
        self.transitioning = false;
    }

    /// The active screen, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Screen> {
        self.active.as_ref()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Snapshot of the externally visible state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        NavigationState {
            active: self.active.clone(),
            transitioning: self.transitioning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ExhibitionId;

    fn exhibition(id: u8) -> Screen {
        Screen::Exhibition {
            id: ExhibitionId::new(id).expect("valid id"),
        }
    }

    #[test]
    fn first_transition_has_no_previous() {
        let mut nav = Navigator::new();
        let Decision::Begin(plan) = nav.begin(Screen::Home, NavIntent::Backward) else {
            panic!("expected Begin");
        };
        assert_eq!(plan.previous, None);
        assert!(nav.is_transitioning());
    }

    #[test]
    fn forward_enters_from_leading_edge() {
        let mut nav = Navigator::new();
        let Decision::Begin(plan) = nav.begin(exhibition(1), NavIntent::Forward) else {
            panic!("expected Begin");
        };
        assert_eq!(plan.enter, SlideEdge::Leading);
        assert_eq!(plan.exit, SlideEdge::Trailing);
        assert_eq!(plan.enter.enter_class(), "enter-right");
        assert_eq!(plan.exit.exit_class(), "exit-left");
    }

    #[test]
    fn backward_enters_from_trailing_edge() {
        let mut nav = Navigator::new();
        let Decision::Begin(plan) = nav.begin(Screen::Home, NavIntent::Backward) else {
            panic!("expected Begin");
        };
        assert_eq!(plan.enter, SlideEdge::Trailing);
        assert_eq!(plan.exit, SlideEdge::Leading);
        assert_eq!(plan.enter.enter_class(), "enter-left");
        assert_eq!(plan.exit.exit_class(), "exit-right");
    }

    #[test]
    fn requests_while_transitioning_are_dropped() {
        let mut nav = Navigator::new();
        assert!(matches!(
            nav.begin(Screen::Home, NavIntent::Backward),
            Decision::Begin(_)
        ));
        // Rapid repeated requests before the first settles.
        for _ in 0..5 {
            assert_eq!(nav.begin(exhibition(1), NavIntent::Forward), Decision::Busy);
        }
        nav.settle(Screen::Home);
        assert!(matches!(
            nav.begin(exhibition(1), NavIntent::Forward),
            Decision::Begin(_)
        ));
    }

    #[test]
    fn already_active_screen_is_a_silent_noop() {
        let mut nav = Navigator::new();
        nav.begin(Screen::Home, NavIntent::Backward);
        nav.settle(Screen::Home);
        assert_eq!(
            nav.begin(Screen::Home, NavIntent::Backward),
            Decision::AlreadyActive
        );
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn same_view_with_different_params_is_accepted() {
        let mut nav = Navigator::new();
        nav.begin(exhibition(1), NavIntent::Forward);
        nav.settle(exhibition(1));
        assert!(matches!(
            nav.begin(exhibition(2), NavIntent::Forward),
            Decision::Begin(_)
        ));
    }

    #[test]
    fn abort_keeps_previous_screen_active() {
        let mut nav = Navigator::new();
        nav.begin(Screen::Home, NavIntent::Backward);
        nav.settle(Screen::Home);

        nav.begin(exhibition(2), NavIntent::Forward);
        nav.abort();

        assert_eq!(nav.active(), Some(&Screen::Home));
        assert!(!nav.is_transitioning());
        // The navigator accepts new requests again.
        assert!(matches!(
            nav.begin(exhibition(2), NavIntent::Forward),
            Decision::Begin(_)
        ));
    }

    #[test]
    fn settle_commits_target() {
        let mut nav = Navigator::new();
        nav.begin(exhibition(3), NavIntent::Forward);
        nav.settle(exhibition(3));
        assert_eq!(nav.active(), Some(&exhibition(3)));
        let state = nav.state();
        assert!(!state.transitioning);
        assert_eq!(state.active, Some(exhibition(3)));
    }
}
