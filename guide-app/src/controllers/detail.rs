//! Artwork detail controller.
//!
//! Loads the exhibition's dataset, locates the artwork and renders image,
//! artist with life dates, title with year, materials and description
//! paragraphs. When the record carries an audio guide, an
//! [`AudioPlayerController`] is mounted into the detail screen and torn
//! down with it.

use std::cell::RefCell;
use std::rc::Rc;

use guide_core::{content, Artwork, ExhibitionId, GuideError, GuideResult, Screen};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::controllers::{AudioPlayerController, ControllerContext, FeatureController};
use crate::dom;
use crate::fetch;

/// Audio guide language rendered on detail screens.
const AUDIO_LANGUAGE: &str = "de";

/// Detail widget for one artwork.
pub struct DetailController {
    audio: Rc<RefCell<Option<AudioPlayerController>>>,
}

impl DetailController {
    /// Start loading and rendering the artwork.
    ///
    /// # Errors
    ///
    /// Fails when mounted on a screen that names no artwork.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let Screen::ArtworkDetail {
            exhibition,
            artwork,
        } = &ctx.screen
        else {
            return Err(GuideError::InvalidParameter(
                "detail controller outside a detail screen".to_string(),
            ));
        };
        let exhibition = *exhibition;
        let artwork_id = artwork.as_str().to_string();
        let audio = Rc::new(RefCell::new(None));

        {
            let root = ctx.root.clone();
            let audio = Rc::clone(&audio);
            spawn_local(async move {
                match fetch::fetch_collection(exhibition).await {
                    Ok(collection) => match collection.find_by_id(&artwork_id) {
                        Some(record) => render(&root, exhibition, record, &audio),
                        None => {
                            tracing::error!(%artwork_id, "artwork missing from dataset");
                            show_error(&root);
                        }
                    },
                    Err(err) => {
                        tracing::error!(%err, "artwork detail failed to load");
                        show_error(&root);
                    }
                }
            });
        }

        Ok(Self { audio })
    }
}

impl FeatureController for DetailController {
    fn teardown(&mut self) {
        if let Some(mut player) = self.audio.borrow_mut().take() {
            player.teardown();
        }
    }
}

fn render(
    root: &Element,
    exhibition: ExhibitionId,
    artwork: &Artwork,
    audio: &Rc<RefCell<Option<AudioPlayerController>>>,
) {
    let base = content::content_base(exhibition);

    if let Some(container) = dom::query_opt(root, "#artworkDetailImage") {
        if let Some(path) = artwork.lead_image() {
            if let Ok(document) = dom::document() {
                if let Ok(image) = document.create_element("img") {
                    let _ = image.set_attribute("src", &content::resolve_media(&base, path));
                    let _ = image.set_attribute("alt", &artwork.title);
                    let _ = container.append_child(&image);
                }
            }
        }
    }

    if let Some(artist) = dom::query_opt(root, "#artworkDetailArtist") {
        artist.set_text_content(Some(&artwork.display_artist()));
    }
    if let Some(title) = dom::query_opt(root, "#artworkDetailTitle") {
        title.set_text_content(Some(&artwork.display_title()));
    }
    if let Some(materials) = dom::query_opt(root, "#artworkDetailMaterials") {
        if !artwork.materials.is_empty() {
            materials.set_text_content(Some(&artwork.materials));
        }
    }

    if let Some(description) = dom::query_opt(root, "#artworkDetailDescription") {
        if let Ok(document) = dom::document() {
            for paragraph in artwork.paragraphs() {
                if let Ok(p) = document.create_element("p") {
                    p.set_text_content(Some(paragraph));
                    let _ = description.append_child(&p);
                }
            }
        }
    }

    if let Some(path) = artwork.audio_path(AUDIO_LANGUAGE) {
        if let Some(container) = dom::query_opt(root, "#artworkDetailAudio") {
            let src = content::resolve_media(&base, path);
            match AudioPlayerController::new(&container, &src) {
                Ok(player) => {
                    // Replace (and release) any player from a previous render.
                    if let Some(mut previous) = audio.borrow_mut().replace(player) {
                        previous.teardown();
                    }
                    tracing::debug!(%src, "audio player mounted");
                }
                Err(err) => tracing::error!(%err, "audio player failed to mount"),
            }
        }
    }
}

fn show_error(root: &Element) {
    if let Some(description) = dom::query_opt(root, "#artworkDetailDescription") {
        description.set_inner_html("<p>Fehler beim Laden der Exponat-Details</p>");
    }
}
