//! Browser history adapter.
//!
//! Thin glue between the pure codec in [`guide_core::history`] and the
//! platform: read the current query on load and popstate, push an entry on
//! every user-driven navigation. The transitioning flag is never encoded.

use guide_core::{decode_query, encode_query, GuideResult, Screen};
use wasm_bindgen::JsValue;

use crate::dom;

/// The screen encoded in the current URL; falls back to home.
///
/// # Errors
///
/// Returns [`guide_core::GuideError::Dom`] outside a browser context.
pub fn current_screen() -> GuideResult<Screen> {
    let search = dom::window()?
        .location()
        .search()
        .map_err(|e| dom::js_err("location.search", e))?;
    Ok(decode_query(&search))
}

/// Push a history entry for `screen`, updating the address bar.
///
/// # Errors
///
/// Returns [`guide_core::GuideError::Dom`] if the history API rejects the
/// entry.
pub fn push(screen: &Screen) -> GuideResult<()> {
    let query = format!("?{}", encode_query(screen));
    dom::window()?
        .history()
        .map_err(|e| dom::js_err("history", e))?
        .push_state_with_url(&JsValue::NULL, "", Some(&query))
        .map_err(|e| dom::js_err("push_state", e))
}
