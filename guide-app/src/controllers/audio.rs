//! Audio guide player.
//!
//! Renders its own markup into the container it is given, drives playback
//! through an [`HtmlAudioElement`] and maps pointer position on the
//! timeline linearly to playback position. Scrubbing while playing pauses
//! for the duration of the drag and resumes once the platform reports the
//! seek as completed; progress updates are suppressed in between. The
//! volume control is omitted on iOS, where media volume is read-only.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use guide_core::{format_remaining, GuideError, GuideResult, ScrubState};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlAudioElement, HtmlElement, HtmlInputElement};

use crate::controllers::swipe::touch_point;
use crate::controllers::FeatureController;
use crate::dom::{self, EventSubscription};

struct AudioShared {
    audio: HtmlAudioElement,
    scrub: RefCell<ScrubState>,
    playing: Cell<bool>,
    play_button: Element,
    timeline: Element,
    progress: Option<Element>,
    indicator: Option<Element>,
    time_display: Option<Element>,
}

/// One audio player bound to one artwork's audio file.
pub struct AudioPlayerController {
    shared: Rc<AudioShared>,
    subscriptions: Vec<EventSubscription>,
}

impl AudioPlayerController {
    /// Render the player into `container` and load `src` metadata.
    ///
    /// # Errors
    ///
    /// Fails when the media element cannot be created.
    #[allow(clippy::too_many_lines)]
    pub fn new(container: &Element, src: &str) -> GuideResult<Self> {
        container.set_inner_html(&player_markup(is_ios()));

        let audio = HtmlAudioElement::new_with_src(src)
            .map_err(|_| GuideError::CapabilityUnavailable("audio playback".to_string()))?;
        audio.set_preload("metadata");

        let shared = Rc::new(AudioShared {
            audio,
            scrub: RefCell::new(ScrubState::new()),
            playing: Cell::new(false),
            play_button: dom::query(container, ".audio-player-play-pause")?,
            timeline: dom::query(container, ".audio-player-timeline")?,
            progress: dom::query_opt(container, ".audio-player-progress"),
            indicator: dom::query_opt(container, ".audio-player-position-indicator"),
            time_display: dom::query_opt(container, ".audio-player-time"),
        });

        let mut subscriptions = Vec::new();

        {
            let shared = Rc::clone(&shared);
            let target = shared.play_button.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "click",
                move |event| {
                    event.stop_propagation();
                    toggle_play(&shared);
                },
            )?);
        }

        // Mouse scrubbing: press on the timeline, drag anywhere on the
        // document, release anywhere.
        let document = dom::document()?;
        {
            let shared = Rc::clone(&shared);
            let target = shared.timeline.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "mousedown",
                move |event| {
                    shared.scrub.borrow_mut().begin_drag();
                    if let Some(x) = mouse_x(&event) {
                        seek_to(&shared, x);
                    }
                    event.prevent_default();
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(
                &document,
                "mousemove",
                move |event| {
                    if shared.scrub.borrow().is_dragging() {
                        if let Some(x) = mouse_x(&event) {
                            seek_to(&shared, x);
                        }
                    }
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            subscriptions.push(EventSubscription::listen(&document, "mouseup", move |_| {
                shared.scrub.borrow_mut().end_drag();
            })?);
        }

        // Touch scrubbing on the timeline itself.
        {
            let shared = Rc::clone(&shared);
            let target = shared.timeline.clone();
            subscriptions.push(EventSubscription::listen_active(
                &target,
                "touchstart",
                move |event| {
                    shared.scrub.borrow_mut().begin_drag();
                    if let Some((x, _)) = touch_point(&event) {
                        seek_to(&shared, x);
                    }
                    event.prevent_default();
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            let target = shared.timeline.clone();
            subscriptions.push(EventSubscription::listen_active(
                &target,
                "touchmove",
                move |event| {
                    if shared.scrub.borrow().is_dragging() {
                        event.prevent_default();
                        if let Some((x, _)) = touch_point(&event) {
                            seek_to(&shared, x);
                        }
                    }
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            let target = shared.timeline.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "touchend",
                move |_| {
                    shared.scrub.borrow_mut().end_drag();
                },
            )?);
        }

        // Media events.
        {
            let shared = Rc::clone(&shared);
            let target = shared.audio.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "timeupdate",
                move |_| update_progress(&shared),
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            let target = shared.audio.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "loadedmetadata",
                move |_| update_time_display(&shared),
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            let target = shared.audio.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "seeked",
                move |_| {
                    if shared.scrub.borrow_mut().seek_completed() {
                        play(&shared);
                    }
                    update_progress(&shared);
                },
            )?);
        }
        {
            let shared = Rc::clone(&shared);
            let target = shared.audio.clone();
            subscriptions.push(EventSubscription::listen(
                &target,
                "ended",
                move |_| {
                    set_paused_ui(&shared);
                    shared.audio.set_current_time(0.0);
                    update_progress(&shared);
                },
            )?);
        }

        // Volume, absent on iOS.
        if let Some(volume_button) = dom::query_opt(container, ".audio-player-volume-btn") {
            let panel = dom::query_opt(container, ".audio-player-volume-panel");
            {
                let panel = panel.clone();
                subscriptions.push(EventSubscription::listen(
                    &volume_button,
                    "click",
                    move |_| {
                        if let Some(panel) = panel.as_ref().and_then(|p| as_html_opt(p)) {
                            panel.set_hidden(!panel.hidden());
                        }
                    },
                )?);
            }
            if let Some(slider) = dom::query_opt(container, ".audio-player-volume-slider") {
                let shared = Rc::clone(&shared);
                subscriptions.push(EventSubscription::listen(&slider, "input", move |event| {
                    let Some(input) = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    else {
                        return;
                    };
                    if let Ok(level) = input.value().parse::<f64>() {
                        shared.audio.set_volume(level / 100.0);
                    }
                })?);
            }
        }

        update_time_display(&shared);

        Ok(Self {
            shared,
            subscriptions,
        })
    }
}

impl FeatureController for AudioPlayerController {
    fn teardown(&mut self) {
        let _ = self.shared.audio.pause();
        // Releasing the source drops the underlying media resource.
        self.shared.audio.set_src("");
        self.subscriptions.clear();
    }
}

fn player_markup(omit_volume: bool) -> String {
    let volume = if omit_volume {
        String::new()
    } else {
        r#"
        <button class="audio-player-volume-btn" aria-label="Volume"></button>
        <div class="audio-player-volume-panel" hidden>
          <input type="range" min="0" max="100" value="100" class="audio-player-volume-slider">
        </div>"#
            .to_string()
    };
    format!(
        r#"<div class="audio-player-container">
        <button class="audio-player-play-pause" aria-label="Play"></button>
        <div class="audio-player-timeline-wrapper">
          <div class="audio-player-timeline">
            <div class="audio-player-progress"></div>
            <div class="audio-player-position-indicator"></div>
          </div>
        </div>
        <div class="audio-player-time">0:00min</div>{volume}
      </div>"#
    )
}

fn is_ios() -> bool {
    dom::window()
        .ok()
        .and_then(|w| w.navigator().user_agent().ok())
        .is_some_and(|agent| {
            agent.contains("iPad") || agent.contains("iPhone") || agent.contains("iPod")
        })
}

fn mouse_x(event: &web_sys::Event) -> Option<f64> {
    event
        .dyn_ref::<web_sys::MouseEvent>()
        .map(|m| f64::from(m.client_x()))
}

fn as_html_opt(element: &Element) -> Option<HtmlElement> {
    dom::as_html(element).ok()
}

fn toggle_play(shared: &Rc<AudioShared>) {
    if shared.playing.get() {
        pause(shared);
    } else {
        play(shared);
    }
}

fn play(shared: &Rc<AudioShared>) {
    let _ = shared.audio.play();
    shared.playing.set(true);
    let _ = shared.play_button.class_list().add_1("playing");
    let _ = shared.play_button.set_attribute("aria-label", "Pause");
}

fn pause(shared: &Rc<AudioShared>) {
    let _ = shared.audio.pause();
    set_paused_ui(shared);
}

fn set_paused_ui(shared: &Rc<AudioShared>) {
    shared.playing.set(false);
    let _ = shared.play_button.class_list().remove_1("playing");
    let _ = shared.play_button.set_attribute("aria-label", "Play");
}

fn seek_to(shared: &Rc<AudioShared>, client_x: f64) {
    let rect = shared.timeline.get_bounding_client_rect();
    let playing = !shared.audio.paused();
    let request = shared.scrub.borrow_mut().request_seek(
        client_x - rect.left(),
        rect.width(),
        shared.audio.duration(),
        playing,
    );
    if let Some(request) = request {
        if request.pause_playback {
            let _ = shared.audio.pause();
        }
        shared.audio.set_current_time(request.position);
    }
}

fn update_progress(shared: &Rc<AudioShared>) {
    if shared.scrub.borrow().suppress_progress() {
        return;
    }
    let duration = shared.audio.duration();
    if !duration.is_finite() || duration <= 0.0 {
        return;
    }
    let percent = (shared.audio.current_time() / duration) * 100.0;
    if let Some(progress) = shared.progress.as_ref().and_then(as_html_opt) {
        let _ = progress.style().set_property("width", &format!("{percent}%"));
    }
    if let Some(indicator) = shared.indicator.as_ref().and_then(as_html_opt) {
        let _ = indicator.style().set_property("left", &format!("{percent}%"));
    }
    update_time_display(shared);
}

fn update_time_display(shared: &Rc<AudioShared>) {
    let Some(display) = &shared.time_display else {
        return;
    };
    let remaining = format_remaining(shared.audio.duration(), shared.audio.current_time());
    display.set_text_content(Some(&remaining));
}
