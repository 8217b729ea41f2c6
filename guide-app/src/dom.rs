//! DOM plumbing shared by the engine and the controllers.
//!
//! Event listeners and timers are owned values: dropping an
//! [`EventSubscription`] removes the listener, dropping a [`TimerHandle`]
//! clears the timer. A controller keeps everything it wires up in its own
//! fields, so teardown is a synchronous drop and a cancelled timer can
//! never fire afterwards.

use guide_core::{GuideError, GuideResult};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

/// Convert an opaque JS error into a [`GuideError::Dom`].
#[must_use]
#[allow(clippy::needless_pass_by_value)] // call sites hand over owned JsValue errors
pub fn js_err(context: &str, err: JsValue) -> GuideError {
    let detail = err
        .as_string()
        .unwrap_or_else(|| format!("{err:?}"));
    GuideError::Dom(format!("{context}: {detail}"))
}

/// The browser window.
///
/// # Errors
///
/// Returns [`GuideError::Dom`] outside a browser context.
pub fn window() -> GuideResult<Window> {
    web_sys::window().ok_or_else(|| GuideError::Dom("no window object".to_string()))
}

/// The current document.
///
/// # Errors
///
/// Returns [`GuideError::Dom`] outside a browser context.
pub fn document() -> GuideResult<Document> {
    window()?
        .document()
        .ok_or_else(|| GuideError::Dom("no document object".to_string()))
}

/// Query a required element below `root`.
///
/// # Errors
///
/// Returns [`GuideError::Dom`] if the selector matches nothing.
pub fn query(root: &Element, selector: &str) -> GuideResult<Element> {
    root.query_selector(selector)
        .map_err(|e| js_err("query_selector", e))?
        .ok_or_else(|| GuideError::Dom(format!("element not found: {selector}")))
}

/// Query an optional element below `root`.
#[must_use]
pub fn query_opt(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Cast an element to [`HtmlElement`].
///
/// # Errors
///
/// Returns [`GuideError::Dom`] if the element is not an HTML element.
pub fn as_html(element: &Element) -> GuideResult<HtmlElement> {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| GuideError::Dom("element is not an HtmlElement".to_string()))
}

/// An event listener that is removed when the subscription drops.
pub struct EventSubscription {
    target: EventTarget,
    event: String,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventSubscription {
    /// Attach a listener to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::Dom`] if the listener cannot be attached.
    pub fn listen(
        target: &EventTarget,
        event: &str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> GuideResult<Self> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| js_err("add_event_listener", e))?;
        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            closure,
        })
    }

    /// Attach a non-passive listener, for handlers that call
    /// `prevent_default` on touch events.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::Dom`] if the listener cannot be attached.
    pub fn listen_active(
        target: &EventTarget,
        event: &str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> GuideResult<Self> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| js_err("add_event_listener", e))?;
        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            closure,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscription")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// A timeout or interval cleared when the handle drops.
pub struct TimerHandle {
    window: Window,
    id: i32,
    repeating: bool,
    _closure: Closure<dyn FnMut()>,
}

impl TimerHandle {
    /// Schedule `callback` once after `ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::Dom`] if the timer cannot be scheduled.
    pub fn timeout(ms: i32, callback: impl FnMut() + 'static) -> GuideResult<Self> {
        Self::schedule(ms, callback, false)
    }

    /// Schedule `callback` every `ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::Dom`] if the timer cannot be scheduled.
    pub fn interval(ms: i32, callback: impl FnMut() + 'static) -> GuideResult<Self> {
        Self::schedule(ms, callback, true)
    }

    fn schedule(ms: i32, callback: impl FnMut() + 'static, repeating: bool) -> GuideResult<Self> {
        let window = window()?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let function = closure.as_ref().unchecked_ref();
        let id = if repeating {
            window.set_interval_with_callback_and_timeout_and_arguments_0(function, ms)
        } else {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(function, ms)
        }
        .map_err(|e| js_err("schedule timer", e))?;
        Ok(Self {
            window,
            id,
            repeating,
            _closure: closure,
        })
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if self.repeating {
            self.window.clear_interval_with_handle(self.id);
        } else {
            self.window.clear_timeout_with_handle(self.id);
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("repeating", &self.repeating)
            .finish_non_exhaustive()
    }
}

/// Resolve after `ms` milliseconds, yielding to the event loop.
///
/// # Errors
///
/// Returns [`GuideError::Dom`] if scheduling fails.
pub async fn sleep(ms: i32) -> GuideResult<()> {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| js_err("sleep", e))
}

/// Run `callback` on the next animation frame, after pending DOM inserts
/// have been committed.
///
/// # Errors
///
/// Returns [`GuideError::Dom`] if the frame cannot be requested.
pub fn on_next_frame(callback: impl FnOnce() + 'static) -> GuideResult<()> {
    let window = window()?;
    let closure = Closure::once_into_js(callback);
    window
        .request_animation_frame(closure.unchecked_ref())
        .map(|_| ())
        .map_err(|e| js_err("request_animation_frame", e))
}
