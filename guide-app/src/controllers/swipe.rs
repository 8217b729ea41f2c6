//! Back-swipe controller.
//!
//! Listens for a rightward drag on the active screen and navigates to the
//! screen's declared parent. The move handler is registered non-passive
//! so a dominant horizontal drag can suppress page scrolling.

use std::cell::RefCell;
use std::rc::Rc;

use guide_core::{GuideError, GuideResult, NavIntent, SwipeOutcome, SwipeTracker};
use wasm_bindgen::JsCast;

use crate::controllers::{ControllerContext, FeatureController};
use crate::dom::EventSubscription;

/// Primary touch point of a touch event, in client coordinates.
pub(crate) fn touch_point(event: &web_sys::Event) -> Option<(f64, f64)> {
    let touch_event = event.dyn_ref::<web_sys::TouchEvent>()?;
    let touch = touch_event
        .touches()
        .item(0)
        .or_else(|| touch_event.changed_touches().item(0))?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Navigates back to the parent screen on a qualifying right swipe.
pub struct BackSwipeController {
    subscriptions: Vec<EventSubscription>,
}

impl BackSwipeController {
    /// Wire the swipe listeners onto the mounted screen.
    ///
    /// # Errors
    ///
    /// Fails if the screen declares no parent or a listener cannot attach.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let parent = ctx.screen.descriptor().parent.ok_or_else(|| {
            GuideError::InvalidParameter(format!(
                "screen {} has no back-swipe parent",
                ctx.screen.view_name()
            ))
        })?;

        let tracker = Rc::new(RefCell::new(SwipeTracker::new()));
        let target = ctx.root.clone();
        let mut subscriptions = Vec::new();

        {
            let tracker = Rc::clone(&tracker);
            subscriptions.push(EventSubscription::listen(
                &target,
                "touchstart",
                move |event| {
                    if let Some((x, y)) = touch_point(&event) {
                        tracker.borrow_mut().touch_start(x, y);
                    }
                },
            )?);
        }
        {
            let tracker = Rc::clone(&tracker);
            subscriptions.push(EventSubscription::listen_active(
                &target,
                "touchmove",
                move |event| {
                    if let Some((x, y)) = touch_point(&event) {
                        if tracker.borrow().touch_move(x, y) {
                            event.prevent_default();
                        }
                    }
                },
            )?);
        }
        {
            let tracker = Rc::clone(&tracker);
            let nav = ctx.nav.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "touchend",
                move |event| {
                    if let Some((x, y)) = touch_point(&event) {
                        if tracker.borrow_mut().touch_end(x, y) == SwipeOutcome::Back {
                            nav.request(parent.clone(), NavIntent::Backward);
                        }
                    }
                },
            )?);
        }

        Ok(Self { subscriptions })
    }
}

impl FeatureController for BackSwipeController {
    fn teardown(&mut self) {
        self.subscriptions.clear();
    }
}
