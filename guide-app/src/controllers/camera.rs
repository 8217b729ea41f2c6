//! Camera recognition controller.
//!
//! Acquires the rear camera, draws a frame to an offscreen canvas every
//! 1.5 s, hands it to the external classifier and renders the result.
//! `start` and `stop` are idempotent; the capture generation guarantees a
//! classification completing after `stop` is discarded, never rendered.

use std::cell::RefCell;
use std::rc::Rc;

use guide_core::recognition::{CaptureSession, FRAME_INTERVAL_MS};
use guide_core::{Classification, GuideError, GuideResult, RecognitionCatalog};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

use crate::controllers::{ControllerContext, FeatureController};
use crate::dom::{self, TimerHandle};
use crate::{classify, fetch};

/// Side dataset mapping model labels to display metadata.
const CATALOG_PATH: &str = "Content/recognition.json";

struct CameraShared {
    session: RefCell<CaptureSession>,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    panel: Element,
    stream: RefCell<Option<MediaStream>>,
    timer: RefCell<Option<TimerHandle>>,
    catalog: RefCell<RecognitionCatalog>,
}

/// Starts the camera on mount and stops it on teardown.
pub struct CameraController {
    shared: Rc<CameraShared>,
}

impl CameraController {
    /// Bind to the scanner screen's video, canvas and result panel and
    /// start capturing.
    ///
    /// # Errors
    ///
    /// Fails when the screen lacks the scanner elements.
    pub fn mount(ctx: &ControllerContext) -> GuideResult<Self> {
        let video = dom::query(&ctx.root, "#camera")?
            .dyn_into::<HtmlVideoElement>()
            .map_err(|_| GuideError::Dom("#camera is not a video element".to_string()))?;
        let canvas = dom::query(&ctx.root, "#canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GuideError::Dom("#canvas is not a canvas element".to_string()))?;
        let panel = dom::query(&ctx.root, "#result")?;

        let shared = Rc::new(CameraShared {
            session: RefCell::new(CaptureSession::new()),
            video,
            canvas,
            panel,
            stream: RefCell::new(None),
            timer: RefCell::new(None),
            catalog: RefCell::new(RecognitionCatalog::default()),
        });

        {
            let shared = Rc::clone(&shared);
            spawn_local(async move {
                match fetch::fetch_json::<RecognitionCatalog>(CATALOG_PATH).await {
                    Ok(catalog) => *shared.catalog.borrow_mut() = catalog,
                    // Raw model labels still display without the catalog.
                    Err(err) => tracing::warn!(%err, "recognition catalog unavailable"),
                }
            });
        }

        start(&shared);
        Ok(Self { shared })
    }
}

impl FeatureController for CameraController {
    fn teardown(&mut self) {
        stop(&self.shared);
    }
}

/// Begin capturing. A second call while running is a no-op, so the camera
/// is only ever acquired once.
fn start(shared: &Rc<CameraShared>) {
    let Some(generation) = shared.session.borrow_mut().start() else {
        return;
    };
    render_status(&shared.panel, "Kamera wird geöffnet…");
    let shared = Rc::clone(shared);
    spawn_local(async move {
        match request_stream().await {
            Ok(stream) => {
                if !shared.session.borrow().accepts(generation) {
                    // Stopped while the permission prompt was open.
                    release_tracks(&stream);
                    return;
                }
                shared.video.set_src_object(Some(&stream));
                let _ = shared.video.play();
                *shared.stream.borrow_mut() = Some(stream);
                schedule_tick(&shared, generation);
            }
            Err(err) => {
                tracing::error!(%err, "camera unavailable");
                shared.session.borrow_mut().stop();
                render_status(&shared.panel, "Kamera nicht verfügbar");
            }
        }
    });
}

/// Stop capturing and release the camera. Idempotent.
fn stop(shared: &CameraShared) {
    if !shared.session.borrow_mut().stop() {
        return;
    }
    // Dropping the handle clears the pending timeout synchronously.
    *shared.timer.borrow_mut() = None;
    if let Some(stream) = shared.stream.borrow_mut().take() {
        release_tracks(&stream);
    }
    shared.video.set_src_object(None);
    render_status(&shared.panel, "Gestoppt");
}

fn release_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

async fn request_stream() -> GuideResult<MediaStream> {
    let navigator = dom::window()?.navigator();
    let devices = navigator.media_devices().map_err(|_| {
        GuideError::CapabilityUnavailable("media devices not supported".to_string())
    })?;

    let constraints = MediaStreamConstraints::new();
    let video_options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &video_options,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str("environment"),
    );
    constraints.set_video(&video_options.into());
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| GuideError::CapabilityUnavailable("camera request rejected".to_string()))?;
    JsFuture::from(promise)
        .await
        .map_err(|_| GuideError::CapabilityUnavailable("camera access denied".to_string()))?
        .dyn_into::<MediaStream>()
        .map_err(|_| GuideError::Dom("getUserMedia did not yield a stream".to_string()))
}

#[allow(clippy::cast_possible_wrap)]
fn schedule_tick(shared: &Rc<CameraShared>, generation: u64) {
    let tick_shared = Rc::clone(shared);
    match TimerHandle::timeout(FRAME_INTERVAL_MS as i32, move || {
        let shared = Rc::clone(&tick_shared);
        spawn_local(async move {
            tick(shared, generation).await;
        });
    }) {
        Ok(timer) => *shared.timer.borrow_mut() = Some(timer),
        Err(err) => tracing::warn!(%err, "capture timer not scheduled"),
    }
}

async fn tick(shared: Rc<CameraShared>, generation: u64) {
    if !shared.session.borrow().accepts(generation) {
        return;
    }

    match capture_frame(&shared) {
        Ok(()) => match classify::classify_frame(&shared.canvas).await {
            Ok(result) => {
                if !shared.session.borrow().accepts(generation) {
                    // Late result after stop: discard, never render.
                    return;
                }
                render_result(&shared.panel, &result, &shared.catalog.borrow());
            }
            Err(err) => {
                if !shared.session.borrow().accepts(generation) {
                    return;
                }
                tracing::warn!(%err, "classification failed");
                render_status(&shared.panel, "Vorhersage-Fehler");
            }
        },
        // Video metadata not ready yet; try again next round.
        Err(err) => tracing::debug!(%err, "frame capture skipped"),
    }

    if shared.session.borrow().accepts(generation) {
        schedule_tick(&shared, generation);
    }
}

fn capture_frame(shared: &CameraShared) -> GuideResult<()> {
    let width = shared.video.video_width();
    let height = shared.video.video_height();
    if width == 0 || height == 0 {
        return Err(GuideError::Dom("video stream not ready".to_string()));
    }
    shared.canvas.set_width(width);
    shared.canvas.set_height(height);

    let context = shared
        .canvas
        .get_context("2d")
        .map_err(|e| dom::js_err("canvas context", e))?
        .ok_or_else(|| GuideError::Dom("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GuideError::Dom("not a 2d context".to_string()))?;
    context
        .draw_image_with_html_video_element(&shared.video, 0.0, 0.0)
        .map_err(|e| dom::js_err("draw frame", e))
}

fn render_result(panel: &Element, result: &Classification, catalog: &RecognitionCatalog) {
    let percent = result.confidence_percent();
    if !result.is_confident() {
        panel.set_inner_html(&format!(
            r#"<div class="result-empty">Zu unsicher ({percent}%)</div>"#
        ));
        return;
    }

    let (title, artist) = catalog.entry(&result.label).map_or_else(
        || (result.label.clone(), String::new()),
        |entry| (entry.title.clone(), entry.artist.clone()),
    );
    let artist_line = if artist.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="result-artist">{artist}</div>"#)
    };
    panel.set_inner_html(&format!(
        r#"<div class="result-class">🎨 {title}</div>{artist_line}<div class="result-confidence">Sicherheit: {percent}%</div><div class="result-status">✓ Erkannt</div>"#
    ));
}

fn render_status(panel: &Element, message: &str) {
    panel.set_inner_html(&format!(r#"<div class="result-empty">{message}</div>"#));
}
