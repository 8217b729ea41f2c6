//! Map navigation controller.
//!
//! Floor tabs switch between the map areas of the current building; the
//! overview screen additionally carries building thumbnails that jump to
//! each building's first mapped floor.

use guide_core::screen::FloorTab;
use guide_core::{GuideError, GuideResult, MapArea, NavIntent, Screen};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::controllers::{ControllerContext, FeatureController};
use crate::dom::{self, EventSubscription};

/// Tab and thumbnail wiring for the map screens.
pub struct MapNavController {
    subscriptions: Vec<EventSubscription>,
}

impl MapNavController {
    /// Bind floor tabs and thumbnails on the mounted map screen.
    ///
    /// # Errors
    ///
    /// Fails when mounted on a non-map screen.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let Screen::Map { area } = &ctx.screen else {
            return Err(GuideError::InvalidParameter(
                "map controller outside a map screen".to_string(),
            ));
        };
        let area = *area;

        let mut subscriptions = Vec::new();

        for tab in elements(&ctx.root, ".map-tab") {
            let Some(floor) = tab
                .get_attribute("data-floor")
                .as_deref()
                .and_then(FloorTab::from_attr)
            else {
                continue;
            };
            let Some(target) = area.area_for_tab(floor) else {
                continue;
            };
            let nav = ctx.nav.clone();
            subscriptions.push(EventSubscription::listen(&tab, "click", move |_| {
                nav.request(Screen::Map { area: target }, NavIntent::Forward);
            })?);
        }

        for thumbnail in elements(&ctx.root, ".map-thumbnail") {
            let target = match thumbnail.get_attribute("data-building").as_deref() {
                Some("hauptgebaeude") => MapArea::MainEg,
                Some("oktogon") => MapArea::OktogonFirst,
                _ => continue,
            };
            let nav = ctx.nav.clone();
            subscriptions.push(EventSubscription::listen(&thumbnail, "click", move |_| {
                nav.request(Screen::Map { area: target }, NavIntent::Forward);
            })?);
        }

        Ok(Self { subscriptions })
    }
}

impl FeatureController for MapNavController {
    fn teardown(&mut self) {
        self.subscriptions.clear();
    }
}

fn elements(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}
