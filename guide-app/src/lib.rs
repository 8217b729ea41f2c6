//! # Galerie SiFi Guide WASM Application
//!
//! Browser bindings for the museum guide: the screen transition engine,
//! the per-screen feature controllers and the `GuideApp` entry point.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web guide-app
//! ```
//!
//! Then import in JavaScript:
//! ```javascript
//! import init, { GuideApp } from './pkg/guide_app.js';
//!
//! await init();
//! const app = new GuideApp('screens', 'tab-bar');
//! app.start();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod controllers;
pub mod dom;
pub mod engine;
pub mod fetch;
pub mod history;

use guide_core::{decode_query, CacheManifest, GuideError, NavIntent, Screen};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::EventSubscription;
use crate::engine::Engine;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Galerie SiFi guide initialized");
}

#[allow(clippy::needless_pass_by_value)] // map_err hands over owned errors
fn to_js(err: GuideError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Screen a tab button navigates to, from its `data-screen` attribute.
fn screen_for_tab(slug: &str) -> Option<Screen> {
    match slug {
        "home" => Some(Screen::Home),
        "scan" => Some(Screen::Scanner),
        "number" => Some(Screen::Number),
        "map" => Some(Screen::Map {
            area: guide_core::MapArea::Overview,
        }),
        _ => None,
    }
}

/// Intent for a user-driven jump to `screen`: everything pushes forward
/// except returning home.
fn intent_for(screen: &Screen) -> NavIntent {
    if *screen == Screen::Home {
        NavIntent::Backward
    } else {
        NavIntent::Forward
    }
}

/// The main guide application for WASM.
#[wasm_bindgen]
pub struct GuideApp {
    engine: Engine,
    // Held for their Drop impls; listeners live as long as the app.
    listeners: Vec<EventSubscription>,
}

#[wasm_bindgen]
impl GuideApp {
    /// Create the app over the screen container and tab bar element ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the container element is not found.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, tab_bar_id: &str) -> Result<GuideApp, JsValue> {
        let document = dom::document().map_err(to_js)?;
        let container = document.get_element_by_id(container_id).ok_or_else(|| {
            JsValue::from_str(&format!("Container element '{container_id}' not found"))
        })?;
        let tab_bar = document.get_element_by_id(tab_bar_id);

        Ok(Self {
            engine: Engine::new(container, tab_bar),
            listeners: Vec::new(),
        })
    }

    /// Boot from the current URL and wire the tab bar and browser
    /// back/forward navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform listeners cannot be attached.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let screen = history::current_screen().map_err(to_js)?;
        tracing::info!(?screen, "booting");
        self.engine.request(screen, NavIntent::Backward, false);

        self.wire_tabs().map_err(to_js)?;
        self.wire_popstate().map_err(to_js)?;
        Ok(())
    }

    /// Navigate programmatically with a query string, e.g.
    /// `view=exhibition&id=2`.
    pub fn navigate(&self, query: &str) {
        let screen = decode_query(query);
        let intent = intent_for(&screen);
        self.engine.request(screen, intent, true);
    }

    fn wire_tabs(&mut self) -> guide_core::GuideResult<()> {
        let document = dom::document()?;
        let buttons = document
            .query_selector_all(".tab-button")
            .map_err(|e| dom::js_err("tab buttons", e))?;

        for index in 0..buttons.length() {
            let Some(button) = buttons
                .item(index)
                .and_then(|n| n.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(screen) = button
                .get_attribute("data-screen")
                .as_deref()
                .and_then(screen_for_tab)
            else {
                continue;
            };
            let engine = self.engine.clone();
            self.listeners
                .push(EventSubscription::listen(&button, "click", move |event| {
                    event.prevent_default();
                    engine.request(screen.clone(), intent_for(&screen), true);
                })?);
        }
        Ok(())
    }

    fn wire_popstate(&mut self) -> guide_core::GuideResult<()> {
        let window = dom::window()?;
        let engine = self.engine.clone();
        self.listeners
            .push(EventSubscription::listen(&window, "popstate", move |_| {
                match history::current_screen() {
                    // The entry already exists; re-render without pushing.
                    Ok(screen) => engine.request(screen, NavIntent::Backward, false),
                    Err(err) => tracing::error!(%err, "popstate decode failed"),
                }
            })?);
        Ok(())
    }
}

/// The offline cache manifest for the service worker, as JSON.
#[wasm_bindgen(js_name = cacheManifestJson)]
#[must_use]
pub fn cache_manifest_json() -> String {
    CacheManifest::current().to_json().unwrap_or_default()
}
