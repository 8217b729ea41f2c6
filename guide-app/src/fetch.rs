//! Content fetching over the browser fetch API.
//!
//! Failure is split the way callers need it: any non-ok response is
//! [`GuideError::NotFound`] (the caller decides the fallback, there is no
//! retry), and a fragment that arrives but does not parse as JSON is a
//! [`GuideError::Parse`]. No explicit timeout is imposed; a slow fetch
//! simply resolves late.

use guide_core::{ArtworkCollection, ExhibitionId, GuideError, GuideResult};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::dom;

/// Fetch an HTML fragment by path.
///
/// # Errors
///
/// Returns [`GuideError::NotFound`] when the fragment is absent or
/// unreachable.
pub async fn fetch_fragment(path: &str) -> GuideResult<String> {
    fetch_text(path).await
}

/// Fetch and parse an exhibition's artworks document.
///
/// # Errors
///
/// Returns [`GuideError::NotFound`] when the document is unreachable and
/// [`GuideError::Parse`] when it is malformed.
pub async fn fetch_collection(id: ExhibitionId) -> GuideResult<ArtworkCollection> {
    let path = guide_core::content::artworks_path(id);
    let json = fetch_text(&path).await?;
    let collection = ArtworkCollection::from_json(&json)?;
    tracing::debug!(
        exhibition = id.get(),
        artworks = collection.artworks.len(),
        "loaded artworks document"
    );
    Ok(collection)
}

/// Fetch a JSON document and parse it with serde.
///
/// # Errors
///
/// Returns [`GuideError::NotFound`] when unreachable,
/// [`GuideError::Parse`] when malformed.
pub async fn fetch_json<T: serde::de::DeserializeOwned>(path: &str) -> GuideResult<T> {
    let json = fetch_text(path).await?;
    Ok(serde_json::from_str(&json)?)
}

async fn fetch_text(path: &str) -> GuideResult<String> {
    let window = dom::window()?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|_| GuideError::NotFound(path.to_string()))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| GuideError::Dom("fetch did not yield a Response".to_string()))?;

    if !response.ok() {
        return Err(GuideError::NotFound(format!(
            "{path} (status {})",
            response.status()
        )));
    }

    let text_promise = response
        .text()
        .map_err(|e| dom::js_err("response.text", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| dom::js_err("response body", e))?;
    text.as_string()
        .ok_or_else(|| GuideError::Dom("response body is not text".to_string()))
}
