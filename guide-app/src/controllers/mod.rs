//! Per-screen feature controllers.
//!
//! A controller is created when its screen becomes active and torn down
//! when that screen is replaced. Everything a controller wires up
//! (listeners, timers, media) is owned by the instance, so teardown is a
//! synchronous release of exactly the resources it acquired.

mod audio;
mod camera;
mod carousel;
mod detail;
mod list;
mod map;
mod number;
mod swipe;

pub use audio::AudioPlayerController;
pub use camera::CameraController;
pub use carousel::CarouselController;
pub use detail::DetailController;
pub use list::ListController;
pub use map::MapNavController;
pub use number::NumberPadController;
pub use swipe::BackSwipeController;

use guide_core::{ControllerKind, GuideError, GuideResult, Screen};
use web_sys::Element;

use crate::engine::NavHandle;

/// A widget bound to one screen's DOM subtree.
pub trait FeatureController {
    /// Release every resource acquired at mount time. Called exactly once
    /// when the screen is replaced; must be safe against partial mounts.
    fn teardown(&mut self);
}

/// Everything a controller factory gets to work with.
#[derive(Debug, Clone)]
pub struct ControllerContext {
    /// The screen being mounted.
    pub screen: Screen,
    /// The mounted screen node; controllers stay within this subtree.
    pub root: Element,
    /// Handle for requesting navigation.
    pub nav: NavHandle,
}

/// Build the controller for `kind` on the mounted screen.
///
/// # Errors
///
/// Returns an error when the screen's DOM lacks the elements the
/// controller needs; the engine logs and skips it.
pub fn mount(
    kind: ControllerKind,
    ctx: &ControllerContext,
) -> GuideResult<Box<dyn FeatureController>> {
    match kind {
        ControllerKind::Camera => Ok(Box::new(CameraController::mount(ctx)?)),
        ControllerKind::Carousel => Ok(Box::new(CarouselController::mount(ctx)?)),
        ControllerKind::NumberPad => Ok(Box::new(NumberPadController::mount(ctx)?)),
        ControllerKind::MapNav => Ok(Box::new(MapNavController::mount(ctx)?)),
        ControllerKind::BackSwipe => Ok(Box::new(BackSwipeController::mount(ctx)?)),
        ControllerKind::ArtworkList => Ok(Box::new(ListController::mount(ctx)?)),
        ControllerKind::ArtworkDetail => Ok(Box::new(DetailController::mount(ctx)?)),
    }
}

/// The exhibition a screen's controller works against.
///
/// # Errors
///
/// Returns [`GuideError::InvalidParameter`] when the screen carries none.
fn screen_exhibition(screen: &Screen) -> GuideResult<guide_core::ExhibitionId> {
    match screen {
        Screen::Exhibition { id } => Ok(*id),
        Screen::ArtworkList { exhibition } | Screen::ArtworkDetail { exhibition, .. } => {
            Ok(*exhibition)
        }
        _ => Err(GuideError::InvalidParameter(
            "screen has no exhibition".to_string(),
        )),
    }
}
