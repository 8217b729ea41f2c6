//! Home-screen exhibition carousel.
//!
//! The track carries cloned boundary slides so swiping keeps moving in
//! one direction; after the slide animation ends on a clone the track is
//! silently re-anchored to the matching real slide with the transition
//! disabled. Autoplay advances on a fixed timer and any manual
//! interaction resets it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use guide_core::{CarouselState, ExhibitionId, GuideResult, NavIntent, Screen, SlideMove};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::controllers::swipe::touch_point;
use crate::controllers::{ControllerContext, FeatureController};
use crate::dom::{self, EventSubscription, TimerHandle};
use crate::engine::NavHandle;

/// Autoplay cadence in milliseconds.
const AUTOPLAY_MS: i32 = 5000;

/// Minimum horizontal travel for a slide swipe, in pixels.
const SWIPE_THRESHOLD_PX: f64 = 50.0;

struct CarouselShared {
    state: RefCell<CarouselState>,
    track: HtmlElement,
    dots: Vec<Element>,
    arrow_left: Option<Element>,
    arrow_right: Option<Element>,
    autoplay: RefCell<Option<TimerHandle>>,
    touch_start_x: Cell<f64>,
    nav: NavHandle,
}

/// Carousel widget over the home screen's slider markup.
pub struct CarouselController {
    shared: Rc<CarouselShared>,
    subscriptions: Vec<EventSubscription>,
}

impl CarouselController {
    /// Bind to the slider markup and start autoplay.
    ///
    /// # Errors
    ///
    /// Fails when the screen has no slider track.
    #[allow(clippy::too_many_lines)]
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let track = dom::as_html(&dom::query(&ctx.root, ".slider-track")?)?;
        let slots = collect(&ctx.root, ".slider-item");
        // Three or more slots means the markup carries the two boundary
        // clones; anything smaller is a plain track.
        let (item_count, wraparound) = if slots.len() >= 3 {
            (slots.len() - 2, true)
        } else {
            (slots.len(), false)
        };

        let shared = Rc::new(CarouselShared {
            state: RefCell::new(CarouselState::new(item_count, wraparound)),
            track,
            dots: collect(&ctx.root, ".dot"),
            arrow_left: dom::query_opt(&ctx.root, ".slider-arrow-left"),
            arrow_right: dom::query_opt(&ctx.root, ".slider-arrow-right"),
            autoplay: RefCell::new(None),
            touch_start_x: Cell::new(0.0),
            nav: ctx.nav.clone(),
        });

        let mut subscriptions = Vec::new();

        if let Some(arrow) = shared.arrow_left.clone() {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(&arrow, "click", move |_| {
                slide(&shared, SlideDirection::Prev);
                reset_autoplay(&shared);
            })?);
        }
        if let Some(arrow) = shared.arrow_right.clone() {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(&arrow, "click", move |_| {
                slide(&shared, SlideDirection::Next);
                reset_autoplay(&shared);
            })?);
        }

        for (index, dot) in shared.dots.clone().iter().enumerate() {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(dot, "click", move |_| {
                let moved = shared.state.borrow_mut().jump_to(index);
                if matches!(moved, SlideMove::Animated(_)) {
                    update_view(&shared, true);
                }
                reset_autoplay(&shared);
            })?);
        }

        // Taps on a slide open its exhibition; clone slots resolve to the
        // real exhibition they duplicate.
        for (slot, item) in slots.iter().enumerate() {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(item, "click", move |_| {
                open_exhibition(&shared, slot);
            })?);
        }

        let touch_surface = shared.track.clone();
        {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(
                &touch_surface,
                "touchstart",
                move |event| {
                    if let Some((x, _)) = touch_point(&event) {
                        shared.touch_start_x.set(x);
                    }
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(
                &touch_surface,
                "touchend",
                move |event| {
                    if let Some((x, _)) = touch_point(&event) {
                        let diff = shared.touch_start_x.get() - x;
                        if diff.abs() > SWIPE_THRESHOLD_PX {
                            let direction = if diff > 0.0 {
                                SlideDirection::Next
                            } else {
                                SlideDirection::Prev
                            };
                            slide(&shared, direction);
                            reset_autoplay(&shared);
                        }
                    }
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(
                &touch_surface,
                "transitionend",
                move |_| {
                    let reanchored = shared.state.borrow_mut().reanchor();
                    if reanchored.is_some() {
                        update_view(&shared, false);
                    }
                },
            )?);
        }

        update_view(&shared, false);
        reset_autoplay(&shared);

        Ok(Self {
            shared,
            subscriptions,
        })
    }
}

impl FeatureController for CarouselController {
    fn teardown(&mut self) {
        // Clearing the timer first guarantees no autoplay step can fire
        // between listener removal and drop.
        *self.shared.autoplay.borrow_mut() = None;
        self.subscriptions.clear();
    }
}

#[derive(Clone, Copy)]
enum SlideDirection {
    Next,
    Prev,
}

fn collect(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn slide(shared: &Rc<CarouselShared>, direction: SlideDirection) {
    let moved = match direction {
        SlideDirection::Next => shared.state.borrow_mut().next(),
        SlideDirection::Prev => shared.state.borrow_mut().prev(),
    };
    if matches!(moved, SlideMove::Animated(_)) {
        update_view(shared, true);
    }
}

fn open_exhibition(shared: &Rc<CarouselShared>, slot: usize) {
    let logical = shared.state.borrow().logical_for_slot(slot);
    let Ok(number) = u8::try_from(logical + 1) else {
        return;
    };
    match ExhibitionId::new(number) {
        Ok(id) => shared
            .nav
            .request(Screen::Exhibition { id }, NavIntent::Forward),
        Err(_) => tracing::warn!(slot, "slide maps to no exhibition"),
    }
}

fn update_view(shared: &Rc<CarouselShared>, animated: bool) {
    let state = shared.state.borrow();
    let style = shared.track.style();
    if animated {
        let _ = style.remove_property("transition");
    } else {
        let _ = style.set_property("transition", "none");
    }
    let _ = style.set_property(
        "transform",
        &format!("translateX({}%)", state.offset_percent()),
    );
    if !animated {
        // Restore the transition once the silent jump has been committed.
        let track = shared.track.clone();
        let _ = dom::on_next_frame(move || {
            let _ = track.style().remove_property("transition");
        });
    }

    let logical = state.logical_index();
    for (index, dot) in shared.dots.iter().enumerate() {
        if index == logical {
            let _ = dot.class_list().add_1("active");
        } else {
            let _ = dot.class_list().remove_1("active");
        }
    }

    set_arrow_opacity(shared.arrow_left.as_ref(), state.physical_index() == 0);
    set_arrow_opacity(
        shared.arrow_right.as_ref(),
        state.physical_index() + 1 == state.slot_count(),
    );
}

fn set_arrow_opacity(arrow: Option<&Element>, at_bound: bool) {
    let Some(arrow) = arrow else {
        return;
    };
    let Ok(arrow) = dom::as_html(arrow) else {
        return;
    };
    let opacity = if at_bound { "0.3" } else { "0.7" };
    let _ = arrow.style().set_property("opacity", opacity);
}

fn reset_autoplay(shared: &Rc<CarouselShared>) {
    let step_shared = Rc::clone(shared);
    match TimerHandle::interval(AUTOPLAY_MS, move || {
        slide(&step_shared, SlideDirection::Next);
    }) {
        Ok(timer) => *shared.autoplay.borrow_mut() = Some(timer),
        Err(err) => tracing::warn!(%err, "autoplay timer not scheduled"),
    }
}
