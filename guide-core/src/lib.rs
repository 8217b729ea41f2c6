//! # Galerie SiFi Guide Core
//!
//! Core logic for the mobile museum guide.
//! Compiles to WASM so the browser app and the native test suite share
//! one implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               guide-core.wasm               │
//! ├─────────────────────────────────────────────┤
//! │  Screen Registry │  Navigator               │
//! │  - Screen enum   │  - Transition guard      │
//! │  - Descriptors   │  - Slide directions      │
//! │  - Controllers   │  - Settle / abort        │
//! ├─────────────────────────────────────────────┤
//! │  History Codec   │  Widget State            │
//! │  - encode/decode │  - Carousel, NumberPad   │
//! │  - Home fallback │  - Scrub, Swipe, Camera  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod audio;
pub mod cache;
pub mod carousel;
pub mod content;
pub mod error;
pub mod history;
pub mod lookup;
pub mod nav;
pub mod recognition;
pub mod screen;
pub mod swipe;

pub use audio::{format_remaining, ScrubState, SeekRequest};
pub use cache::CacheManifest;
pub use carousel::{CarouselState, SlideMove};
pub use content::{Artwork, ArtworkCollection, ExhibitionInfo};
pub use error::{GuideError, GuideResult};
pub use history::{decode_query, encode_query};
pub use lookup::{LookupOutcome, NumberPad};
pub use nav::{Decision, NavIntent, NavigationState, Navigator, SlideEdge, TransitionPlan};
pub use recognition::{CaptureSession, Classification, RecognitionCatalog};
pub use screen::{ArtworkId, ControllerKind, ExhibitionId, MapArea, Screen, ScreenDescriptor};
pub use swipe::{SwipeOutcome, SwipeTracker};

/// Guide core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
