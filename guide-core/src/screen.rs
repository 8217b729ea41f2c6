//! Screen registry: the navigable screens of the guide and their
//! descriptors.
//!
//! Screens are a closed enum rather than free-form names, so the mapping
//! from screen to fragment path, feature controllers and back-swipe parent
//! is total and checked at compile time.

use serde::{Deserialize, Serialize};

use crate::error::GuideError;

/// Identifier of one of the gallery's exhibitions.
///
/// Valid ids are `1..=3`; each maps to a fixed content slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ExhibitionId(u8);

impl ExhibitionId {
    /// Smallest valid exhibition id.
    pub const MIN: u8 = 1;
    /// Largest valid exhibition id.
    pub const MAX: u8 = 3;

    /// Create an exhibition id, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::InvalidParameter`] if `id` is outside `1..=3`.
    pub fn new(id: u8) -> Result<Self, GuideError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(Self(id))
        } else {
            Err(GuideError::InvalidParameter(format!(
                "exhibition id {id} out of range {}..={}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The numeric id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The fixed human-readable content slug for this exhibition.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self.0 {
            1 => "OfOtherPlaces",
            2 => "VesselsOfUnbecoming",
            _ => "DenkeFreiSchaffeNeu",
        }
    }

    /// All valid exhibition ids in order.
    #[must_use]
    pub fn all() -> [Self; 3] {
        [Self(1), Self(2), Self(3)]
    }
}

impl TryFrom<u8> for ExhibitionId {
    type Error = GuideError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ExhibitionId> for u8 {
    fn from(id: ExhibitionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ExhibitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an artwork within an exhibition's dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtworkId(String);

impl ArtworkId {
    /// Create an artwork id.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::InvalidParameter`] for an empty id.
    pub fn new(id: impl Into<String>) -> Result<Self, GuideError> {
        let id = id.into();
        if id.is_empty() {
            return Err(GuideError::InvalidParameter(
                "empty artwork id".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One view of the building maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapArea {
    /// Both buildings at a glance.
    Overview,
    /// Main building, ground floor.
    MainEg,
    /// Main building, first floor.
    MainFirst,
    /// Main building, second floor.
    MainSecond,
    /// Oktogon, first floor.
    OktogonFirst,
    /// Oktogon, second floor.
    OktogonSecond,
}

impl MapArea {
    /// URL slug of this area.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::MainEg => "main-eg",
            Self::MainFirst => "main-1og",
            Self::MainSecond => "main-2og",
            Self::OktogonFirst => "oktogon-1og",
            Self::OktogonSecond => "oktogon-2og",
        }
    }

    /// Parse an area from its URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "overview" => Some(Self::Overview),
            "main-eg" => Some(Self::MainEg),
            "main-1og" => Some(Self::MainFirst),
            "main-2og" => Some(Self::MainSecond),
            "oktogon-1og" => Some(Self::OktogonFirst),
            "oktogon-2og" => Some(Self::OktogonSecond),
            _ => None,
        }
    }

    /// Whether this area belongs to the oktogon building.
    #[must_use]
    pub const fn is_oktogon(self) -> bool {
        matches!(self, Self::OktogonFirst | Self::OktogonSecond)
    }

    /// Target area for a floor-tab tap from this area.
    ///
    /// The overview behaves like the main building; from the oktogon the
    /// main-building tab always lands on the ground floor.
    #[must_use]
    pub fn area_for_tab(self, tab: FloorTab) -> Option<Self> {
        if self.is_oktogon() {
            match tab {
                FloorTab::First => Some(Self::OktogonFirst),
                FloorTab::Second => Some(Self::OktogonSecond),
                FloorTab::MainBuilding => Some(Self::MainEg),
                FloorTab::Ground | FloorTab::Oktogon => None,
            }
        } else {
            match tab {
                FloorTab::Ground => Some(Self::MainEg),
                FloorTab::First => Some(Self::MainFirst),
                FloorTab::Second => Some(Self::MainSecond),
                FloorTab::Oktogon => Some(Self::OktogonFirst),
                FloorTab::MainBuilding => None,
            }
        }
    }
}

/// Floor tabs shown on the map screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorTab {
    /// Ground floor ("EG").
    Ground,
    /// First floor ("1. OG").
    First,
    /// Second floor ("2. OG").
    Second,
    /// Switch to the oktogon building.
    Oktogon,
    /// Switch back to the main building.
    MainBuilding,
}

impl FloorTab {
    /// Parse a tab from its `data-floor` attribute value.
    #[must_use]
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "eg" => Some(Self::Ground),
            "1og" => Some(Self::First),
            "2og" => Some(Self::Second),
            "oktogon" => Some(Self::Oktogon),
            "hauptgebaeude" => Some(Self::MainBuilding),
            _ => None,
        }
    }
}

/// One navigable full-page view of the guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params", rename_all = "lowercase")]
pub enum Screen {
    /// Landing screen with the exhibition carousel.
    Home,
    /// Camera screen for artwork recognition.
    Scanner,
    /// Numeric catalog lookup.
    Number,
    /// Building maps.
    Map {
        /// The visible map area.
        area: MapArea,
    },
    /// Landing page of one exhibition.
    Exhibition {
        /// The exhibition.
        id: ExhibitionId,
    },
    /// List of an exhibition's artworks.
    ArtworkList {
        /// The exhibition the list belongs to.
        exhibition: ExhibitionId,
    },
    /// Detail view of a single artwork.
    ArtworkDetail {
        /// The exhibition the artwork belongs to.
        exhibition: ExhibitionId,
        /// The artwork.
        artwork: ArtworkId,
    },
}

impl Screen {
    /// The `view` query-parameter value for this screen.
    #[must_use]
    pub const fn view_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Scanner => "scan",
            Self::Number => "number",
            Self::Map { .. } => "map",
            Self::Exhibition { .. } => "exhibition",
            Self::ArtworkList { .. } => "artworks",
            Self::ArtworkDetail { .. } => "artwork",
        }
    }

    /// The tab-bar slug highlighted for this screen, if any.
    ///
    /// Exhibition and artwork screens highlight no tab.
    #[must_use]
    pub const fn tab_slug(&self) -> Option<&'static str> {
        match self {
            Self::Home => Some("home"),
            Self::Scanner => Some("scan"),
            Self::Number => Some("number"),
            Self::Map { .. } => Some("map"),
            _ => None,
        }
    }

    /// Resolve the full descriptor for this screen.
    #[must_use]
    pub fn descriptor(&self) -> ScreenDescriptor {
        match self {
            Self::Home => ScreenDescriptor {
                fragment_path: "screens/home.html".to_string(),
                controllers: vec![ControllerKind::Carousel],
                parent: None,
            },
            Self::Scanner => ScreenDescriptor {
                fragment_path: "screens/scanner.html".to_string(),
                controllers: vec![ControllerKind::Camera],
                parent: None,
            },
            Self::Number => ScreenDescriptor {
                fragment_path: "screens/number.html".to_string(),
                controllers: vec![ControllerKind::NumberPad],
                parent: None,
            },
            Self::Map { area } => ScreenDescriptor {
                fragment_path: format!("screens/maps/map-{}.html", area.slug()),
                controllers: vec![ControllerKind::MapNav],
                parent: None,
            },
            Self::Exhibition { id } => ScreenDescriptor {
                fragment_path: format!("screens/exhibitions/exhibition-{id}.html"),
                controllers: vec![ControllerKind::BackSwipe],
                parent: Some(Self::Home),
            },
            Self::ArtworkList { exhibition } => ScreenDescriptor {
                fragment_path: "screens/exhibitions/artworks-list.html".to_string(),
                controllers: vec![ControllerKind::ArtworkList, ControllerKind::BackSwipe],
                parent: Some(Self::Exhibition { id: *exhibition }),
            },
            Self::ArtworkDetail { exhibition, .. } => ScreenDescriptor {
                fragment_path: "screens/exhibitions/artwork-detail.html".to_string(),
                controllers: vec![ControllerKind::ArtworkDetail, ControllerKind::BackSwipe],
                parent: Some(Self::ArtworkList {
                    exhibition: *exhibition,
                }),
            },
        }
    }
}

/// The feature controllers a screen mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// Camera acquisition and artwork recognition loop.
    Camera,
    /// Exhibition image carousel.
    Carousel,
    /// Numeric catalog lookup pad.
    NumberPad,
    /// Map floor-tab navigation.
    MapNav,
    /// Horizontal back-swipe to the parent screen.
    BackSwipe,
    /// Artworks list rendering.
    ArtworkList,
    /// Artwork detail rendering (mounts the audio player itself).
    ArtworkDetail,
}

/// Static description of a screen, resolved from [`Screen::descriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDescriptor {
    /// Path of the HTML fragment populating the screen.
    pub fragment_path: String,
    /// Controllers mounted once the fragment is in the DOM.
    pub controllers: Vec<ControllerKind>,
    /// Declared back-swipe target, if the screen has one.
    pub parent: Option<Screen>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhibition_id_accepts_valid_range() {
        for id in 1..=3 {
            assert!(ExhibitionId::new(id).is_ok());
        }
    }

    #[test]
    fn exhibition_id_rejects_out_of_range() {
        assert!(ExhibitionId::new(0).is_err());
        assert!(ExhibitionId::new(4).is_err());
    }

    #[test]
    fn exhibition_slugs_are_fixed() {
        let [a, b, c] = ExhibitionId::all();
        assert_eq!(a.slug(), "OfOtherPlaces");
        assert_eq!(b.slug(), "VesselsOfUnbecoming");
        assert_eq!(c.slug(), "DenkeFreiSchaffeNeu");
    }

    #[test]
    fn artwork_id_rejects_empty() {
        assert!(ArtworkId::new("").is_err());
        assert!(ArtworkId::new("artwork-7").is_ok());
    }

    #[test]
    fn map_area_slug_roundtrip() {
        for area in [
            MapArea::Overview,
            MapArea::MainEg,
            MapArea::MainFirst,
            MapArea::MainSecond,
            MapArea::OktogonFirst,
            MapArea::OktogonSecond,
        ] {
            assert_eq!(MapArea::from_slug(area.slug()), Some(area));
        }
        assert_eq!(MapArea::from_slug("attic"), None);
    }

    #[test]
    fn floor_tabs_from_main_building() {
        let area = MapArea::MainEg;
        assert_eq!(area.area_for_tab(FloorTab::First), Some(MapArea::MainFirst));
        assert_eq!(
            area.area_for_tab(FloorTab::Oktogon),
            Some(MapArea::OktogonFirst)
        );
        assert_eq!(area.area_for_tab(FloorTab::MainBuilding), None);
    }

    #[test]
    fn floor_tabs_from_oktogon_land_on_ground_floor() {
        let area = MapArea::OktogonSecond;
        assert_eq!(
            area.area_for_tab(FloorTab::MainBuilding),
            Some(MapArea::MainEg)
        );
        assert_eq!(area.area_for_tab(FloorTab::Ground), None);
    }

    #[test]
    fn overview_behaves_like_main_building() {
        let area = MapArea::Overview;
        assert_eq!(
            area.area_for_tab(FloorTab::Second),
            Some(MapArea::MainSecond)
        );
    }

    #[test]
    fn exhibition_fragment_path_embeds_id() {
        let screen = Screen::Exhibition {
            id: ExhibitionId::new(2).expect("valid id"),
        };
        assert_eq!(
            screen.descriptor().fragment_path,
            "screens/exhibitions/exhibition-2.html"
        );
    }

    #[test]
    fn every_screen_resolves_a_descriptor() {
        let ex = ExhibitionId::new(1).expect("valid id");
        let artwork = ArtworkId::new("artwork-1").expect("valid id");
        let screens = [
            Screen::Home,
            Screen::Scanner,
            Screen::Number,
            Screen::Map {
                area: MapArea::Overview,
            },
            Screen::Exhibition { id: ex },
            Screen::ArtworkList { exhibition: ex },
            Screen::ArtworkDetail {
                exhibition: ex,
                artwork,
            },
        ];
        for screen in screens {
            let descriptor = screen.descriptor();
            assert!(descriptor.fragment_path.ends_with(".html"));
        }
    }

    #[test]
    fn detail_screen_backs_into_list_of_same_exhibition() {
        let ex = ExhibitionId::new(3).expect("valid id");
        let screen = Screen::ArtworkDetail {
            exhibition: ex,
            artwork: ArtworkId::new("artwork-12").expect("valid id"),
        };
        assert_eq!(
            screen.descriptor().parent,
            Some(Screen::ArtworkList { exhibition: ex })
        );
    }

    #[test]
    fn static_screens_have_no_parent() {
        assert_eq!(Screen::Home.descriptor().parent, None);
        assert_eq!(Screen::Scanner.descriptor().parent, None);
    }

    #[test]
    fn tab_slug_only_for_tab_screens() {
        assert_eq!(Screen::Home.tab_slug(), Some("home"));
        assert_eq!(
            Screen::Exhibition {
                id: ExhibitionId::new(1).expect("valid id")
            }
            .tab_slug(),
            None
        );
    }
}
