//! Numeric catalog lookup controller.
//!
//! Digit buttons feed the pad; after every digit the input is matched
//! against the numbered exhibition's dataset and the found/not-found
//! state rendered. The dataset is fetched once on first use and cached
//! for the lifetime of the screen.

use std::cell::RefCell;
use std::rc::Rc;

use guide_core::{
    content, Artwork, ArtworkCollection, ExhibitionId, GuideResult, LookupOutcome, NumberPad,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlImageElement};

use crate::controllers::{ControllerContext, FeatureController};
use crate::dom::{self, EventSubscription};
use crate::fetch;

/// The exhibition whose pieces carry catalog numbers.
const LOOKUP_EXHIBITION: u8 = 3;

struct NumberShared {
    pad: RefCell<NumberPad>,
    collection: RefCell<Option<Rc<ArtworkCollection>>>,
    display: Element,
    delete_button: Option<Element>,
    enter_button: Option<Element>,
    results: Element,
    empty_state: Option<Element>,
    found_state: Option<Element>,
    result_item: Option<Element>,
    thumb: Option<HtmlImageElement>,
    artist: Option<Element>,
    title: Option<Element>,
}

/// Number pad widget over the number screen's markup.
pub struct NumberPadController {
    subscriptions: Vec<EventSubscription>,
}

impl NumberPadController {
    /// Bind to the number screen's markup.
    ///
    /// # Errors
    ///
    /// Fails when display or results container are missing.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let root = &ctx.root;
        let shared = Rc::new(NumberShared {
            pad: RefCell::new(NumberPad::new()),
            collection: RefCell::new(None),
            display: dom::query(root, "[data-number-display]")?,
            delete_button: dom::query_opt(root, r#"[data-action="delete"]"#),
            enter_button: dom::query_opt(root, r#"[data-action="enter"]"#),
            results: dom::query(root, "#number-results")?,
            empty_state: dom::query_opt(root, r#"[data-number-state="empty"]"#),
            found_state: dom::query_opt(root, r#"[data-number-state="found"]"#),
            result_item: dom::query_opt(root, ".number-result-item"),
            thumb: dom::query_opt(root, "[data-number-thumb]")
                .and_then(|e| e.dyn_into::<HtmlImageElement>().ok()),
            artist: dom::query_opt(root, "[data-number-artist]"),
            title: dom::query_opt(root, "[data-number-title]"),
        });

        let mut subscriptions = Vec::new();

        let digit_buttons = root
            .query_selector_all("[data-digit]")
            .map_err(|e| dom::js_err("digit buttons", e))?;
        for index in 0..digit_buttons.length() {
            let Some(button) = digit_buttons
                .item(index)
                .and_then(|n| n.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let digit = button
                .get_attribute("data-digit")
                .and_then(|d| d.chars().next());
            let Some(digit) = digit else {
                continue;
            };
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(&button, "click", move |_| {
                if shared.pad.borrow_mut().push_digit(digit) {
                    update_display(&shared);
                    refresh_results(&shared);
                }
            })?);
        }

        if let Some(button) = shared.delete_button.clone() {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(&button, "click", move |_| {
                shared.pad.borrow_mut().clear();
                reset_results(&shared);
                update_display(&shared);
            })?);
        }

        if let Some(button) = shared.enter_button.clone() {
            // Reserved: the enter key has no action yet.
            subscriptions.push(EventSubscription::listen(&button, "click", move |_| {})?);
        }

        update_display(&shared);
        reset_results(&shared);

        Ok(Self { subscriptions })
    }
}

impl FeatureController for NumberPadController {
    fn teardown(&mut self) {
        self.subscriptions.clear();
    }
}

fn update_display(shared: &Rc<NumberShared>) {
    let pad = shared.pad.borrow();
    shared.display.set_text_content(Some(&pad.display()));
    let has_digits = !pad.is_empty();
    toggle_class(&shared.display, "number-display-filled", has_digits);
    toggle_class(&shared.display, "number-display-empty", !has_digits);

    set_action_state(shared.delete_button.as_ref(), has_digits);
    let has_result = shared
        .results
        .get_attribute("data-has-result")
        .as_deref()
        == Some("true");
    set_action_state(shared.enter_button.as_ref(), has_result);
}

/// Match the current input against the dataset, loading it on first use.
fn refresh_results(shared: &Rc<NumberShared>) {
    if shared.pad.borrow().is_empty() {
        reset_results(shared);
        update_display(shared);
        return;
    }

    let cached = shared.collection.borrow().clone();
    if let Some(collection) = cached {
        apply_lookup(shared, &collection);
        return;
    }

    let shared = Rc::clone(shared);
    spawn_local(async move {
        let Ok(id) = ExhibitionId::new(LOOKUP_EXHIBITION) else {
            return;
        };
        match fetch::fetch_collection(id).await {
            Ok(collection) => {
                let collection = Rc::new(collection);
                *shared.collection.borrow_mut() = Some(Rc::clone(&collection));
                apply_lookup(&shared, &collection);
            }
            Err(err) => {
                tracing::error!(%err, "lookup dataset unavailable");
                reset_results(&shared);
            }
        }
    });
}

fn apply_lookup(shared: &Rc<NumberShared>, collection: &ArtworkCollection) {
    let found: Option<Artwork> = match shared.pad.borrow().lookup(collection) {
        LookupOutcome::Found(artwork) => Some(artwork.clone()),
        LookupOutcome::Empty | LookupOutcome::NotFound => None,
    };
    match found {
        Some(artwork) => render_result(shared, &artwork),
        None => reset_results(shared),
    }
    update_display(shared);
}

fn render_result(shared: &Rc<NumberShared>, artwork: &Artwork) {
    let Ok(id) = ExhibitionId::new(LOOKUP_EXHIBITION) else {
        return;
    };
    if let Some(thumb) = &shared.thumb {
        let base = content::content_base(id);
        thumb.set_src(&content::resolve_media(&base, &artwork.thumbnail));
        thumb.set_alt(&artwork.title);
    }
    if let Some(artist) = &shared.artist {
        artist.set_text_content(Some(&artwork.artist));
    }
    if let Some(title) = &shared.title {
        title.set_text_content(Some(&artwork.title));
    }
    set_hidden(shared.empty_state.as_ref(), true);
    set_hidden(shared.found_state.as_ref(), false);
    set_hidden(shared.result_item.as_ref(), false);
    let _ = shared.results.set_attribute("data-has-result", "true");
}

fn reset_results(shared: &Rc<NumberShared>) {
    let _ = shared.results.set_attribute("data-has-result", "false");
    set_hidden(shared.empty_state.as_ref(), false);
    set_hidden(shared.found_state.as_ref(), true);
    set_hidden(shared.result_item.as_ref(), true);
}

fn set_hidden(element: Option<&Element>, hidden: bool) {
    let Some(element) = element else {
        return;
    };
    if let Ok(html) = dom::as_html(element) {
        html.set_hidden(hidden);
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if on {
        let _ = element.class_list().add_1(class);
    } else {
        let _ = element.class_list().remove_1(class);
    }
}

fn set_action_state(button: Option<&Element>, active: bool) {
    let Some(button) = button else {
        return;
    };
    toggle_class(button, "number-action-active", active);
    let _ = button.set_attribute("aria-disabled", if active { "false" } else { "true" });
    if let Ok(button) = button.clone().dyn_into::<HtmlButtonElement>() {
        button.set_disabled(!active);
    }
}
