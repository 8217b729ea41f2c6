//! Artworks list controller.
//!
//! Fetches the exhibition's dataset and renders one row per artwork;
//! tapping a row opens its detail screen.

use std::cell::RefCell;
use std::rc::Rc;

use guide_core::{content, ArtworkId, GuideResult, NavIntent, Screen};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::controllers::{screen_exhibition, ControllerContext, FeatureController};
use crate::dom::{self, EventSubscription};
use crate::engine::NavHandle;
use crate::fetch;

/// List widget for one exhibition's artworks.
pub struct ListController {
    subscriptions: Rc<RefCell<Vec<EventSubscription>>>,
}

impl ListController {
    /// Bind to the list container and start loading the dataset.
    ///
    /// # Errors
    ///
    /// Fails when the screen carries no exhibition or has no list
    /// container.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let exhibition = screen_exhibition(&ctx.screen)?;
        let container = dom::query(&ctx.root, "#artworksList")?;
        let subscriptions = Rc::new(RefCell::new(Vec::new()));

        {
            let container = container.clone();
            let subscriptions = Rc::clone(&subscriptions);
            let nav = ctx.nav.clone();
            spawn_local(async move {
                match fetch::fetch_collection(exhibition).await {
                    Ok(collection) => {
                        if collection.artworks.is_empty() {
                            container.set_inner_html(
                                r#"<div class="artworks-loading">Keine Exponate gefunden</div>"#,
                            );
                            return;
                        }
                        if let Err(err) =
                            render_rows(&container, exhibition, &collection, &nav, &subscriptions)
                        {
                            tracing::error!(%err, "artworks list render failed");
                        }
                    }
                    Err(err) => {
                        tracing::error!(%err, "artworks list failed to load");
                        container.set_inner_html(
                            r#"<div class="artworks-loading">Fehler beim Laden der Exponate</div>"#,
                        );
                    }
                }
            });
        }

        Ok(Self { subscriptions })
    }
}

impl FeatureController for ListController {
    fn teardown(&mut self) {
        self.subscriptions.borrow_mut().clear();
    }
}

fn render_rows(
    container: &Element,
    exhibition: guide_core::ExhibitionId,
    collection: &guide_core::ArtworkCollection,
    nav: &NavHandle,
    subscriptions: &Rc<RefCell<Vec<EventSubscription>>>,
) -> GuideResult<()> {
    let document = dom::document()?;
    let base = content::content_base(exhibition);
    container.set_inner_html("");

    for artwork in &collection.artworks {
        let item = document
            .create_element("div")
            .map_err(|e| dom::js_err("list item", e))?;
        item.set_class_name("artwork-item");

        let thumb = document
            .create_element("div")
            .map_err(|e| dom::js_err("list thumb", e))?;
        thumb.set_class_name("artwork-thumb");
        let image = document
            .create_element("img")
            .map_err(|e| dom::js_err("list image", e))?;
        let _ = image.set_attribute("src", &content::resolve_media(&base, &artwork.thumbnail));
        let _ = image.set_attribute("alt", &artwork.title);
        let _ = thumb.append_child(&image);

        let info = document
            .create_element("div")
            .map_err(|e| dom::js_err("list info", e))?;
        info.set_class_name("artwork-list-info");
        let artist = document
            .create_element("p")
            .map_err(|e| dom::js_err("list artist", e))?;
        artist.set_class_name("artwork-list-artist");
        artist.set_text_content(Some(&artwork.artist));
        let title = document
            .create_element("p")
            .map_err(|e| dom::js_err("list title", e))?;
        title.set_class_name("artwork-list-title");
        title.set_text_content(Some(&artwork.title));
        let _ = info.append_child(&artist);
        let _ = info.append_child(&title);

        let _ = item.append_child(&thumb);
        let _ = item.append_child(&info);
        let _ = container.append_child(&item);

        let Ok(artwork_id) = ArtworkId::new(artwork.id.clone()) else {
            continue;
        };
        let nav = nav.clone();
        subscriptions
            .borrow_mut()
            .push(EventSubscription::listen(&item, "click", move |_| {
                nav.request(
                    Screen::ArtworkDetail {
                        exhibition,
                        artwork: artwork_id.clone(),
                    },
                    NavIntent::Forward,
                );
            })?);
    }

    Ok(())
}
