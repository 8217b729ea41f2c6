//! History entry codec.
//!
//! Maps a [`Screen`] to the shareable query string and back. Encoding
//! writes only the keys the screen type requires; decoding recovers from
//! any invalid or missing parameter by falling back to the home screen,
//! so a stale or mistyped link never breaks the app.

use url::form_urlencoded;

use crate::screen::{ArtworkId, ExhibitionId, MapArea, Screen};

/// Encode a screen into its query string (no leading `?`).
#[must_use]
pub fn encode_query(screen: &Screen) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("view", screen.view_name());

    match screen {
        Screen::Home | Screen::Scanner | Screen::Number => {}
        Screen::Map { area } => {
            query.append_pair("id", area.slug());
        }
        Screen::Exhibition { id } => {
            query.append_pair("id", &id.to_string());
        }
        Screen::ArtworkList { exhibition } => {
            query.append_pair("exhibition", &exhibition.to_string());
        }
        Screen::ArtworkDetail {
            exhibition,
            artwork,
        } => {
            query.append_pair("exhibition", &exhibition.to_string());
            query.append_pair("artwork", artwork.as_str());
        }
    }

    query.finish()
}

/// Decode a query string (with or without leading `?`) into a screen.
///
/// Unknown views, out-of-range identifiers and missing required keys all
/// fall back to [`Screen::Home`]; the transient transitioning flag is
/// never part of the encoding.
#[must_use]
pub fn decode_query(query: &str) -> Screen {
    let query = query.strip_prefix('?').unwrap_or(query);
    decode_pairs(query).unwrap_or_else(|| {
        tracing::debug!(query, "unusable query, falling back to home");
        Screen::Home
    })
}

fn decode_pairs(query: &str) -> Option<Screen> {
    let mut view = None;
    let mut id = None;
    let mut exhibition = None;
    let mut artwork = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "view" => view = Some(value.into_owned()),
            "id" => id = Some(value.into_owned()),
            "exhibition" => exhibition = Some(value.into_owned()),
            "artwork" => artwork = Some(value.into_owned()),
            _ => {}
        }
    }

    match view.as_deref() {
        None | Some("home") => Some(Screen::Home),
        Some("scan") => Some(Screen::Scanner),
        Some("number") => Some(Screen::Number),
        Some("map") => {
            let area = match id {
                Some(slug) => MapArea::from_slug(&slug)?,
                None => MapArea::Overview,
            };
            Some(Screen::Map { area })
        }
        Some("exhibition") => {
            let id = parse_exhibition(&id?)?;
            Some(Screen::Exhibition { id })
        }
        Some("artworks") => {
            let exhibition = parse_exhibition(&exhibition?)?;
            Some(Screen::ArtworkList { exhibition })
        }
        Some("artwork") => {
            let exhibition = parse_exhibition(&exhibition?)?;
            let artwork = ArtworkId::new(artwork?).ok()?;
            Some(Screen::ArtworkDetail {
                exhibition,
                artwork,
            })
        }
        Some(_) => None,
    }
}

fn parse_exhibition(raw: &str) -> Option<ExhibitionId> {
    let id: u8 = raw.parse().ok()?;
    ExhibitionId::new(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_screens() -> Vec<Screen> {
        let ex = ExhibitionId::new(2).expect("valid id");
        vec![
            Screen::Home,
            Screen::Scanner,
            Screen::Number,
            Screen::Map {
                area: MapArea::OktogonFirst,
            },
            Screen::Exhibition { id: ex },
            Screen::ArtworkList { exhibition: ex },
            Screen::ArtworkDetail {
                exhibition: ex,
                artwork: ArtworkId::new("artwork-7").expect("valid id"),
            },
        ]
    }

    #[test]
    fn round_trip_law_holds_for_every_screen() {
        for screen in all_screens() {
            let encoded = encode_query(&screen);
            assert_eq!(decode_query(&encoded), screen, "query was {encoded}");
        }
    }

    #[test]
    fn encode_writes_only_required_keys() {
        assert_eq!(encode_query(&Screen::Home), "view=home");
        assert_eq!(encode_query(&Screen::Scanner), "view=scan");
        let ex = Screen::Exhibition {
            id: ExhibitionId::new(1).expect("valid id"),
        };
        assert_eq!(encode_query(&ex), "view=exhibition&id=1");
    }

    #[test]
    fn detail_encodes_exhibition_and_artwork() {
        let screen = Screen::ArtworkDetail {
            exhibition: ExhibitionId::new(3).expect("valid id"),
            artwork: ArtworkId::new("artwork-12").expect("valid id"),
        };
        assert_eq!(
            encode_query(&screen),
            "view=artwork&exhibition=3&artwork=artwork-12"
        );
    }

    #[test]
    fn leading_question_mark_is_accepted() {
        assert_eq!(decode_query("?view=scan"), Screen::Scanner);
    }

    #[test]
    fn empty_query_is_home() {
        assert_eq!(decode_query(""), Screen::Home);
        assert_eq!(decode_query("?"), Screen::Home);
    }

    #[test]
    fn out_of_range_exhibition_falls_back_to_home() {
        assert_eq!(decode_query("view=exhibition&id=4"), Screen::Home);
        assert_eq!(decode_query("view=exhibition&id=0"), Screen::Home);
        assert_eq!(decode_query("view=exhibition&id=abc"), Screen::Home);
    }

    #[test]
    fn missing_required_key_falls_back_to_home() {
        assert_eq!(decode_query("view=exhibition"), Screen::Home);
        assert_eq!(decode_query("view=artwork&exhibition=1"), Screen::Home);
    }

    #[test]
    fn unknown_view_falls_back_to_home() {
        assert_eq!(decode_query("view=cafeteria"), Screen::Home);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(
            decode_query("view=scan&utm_source=poster"),
            Screen::Scanner
        );
    }

    #[test]
    fn map_without_id_opens_overview() {
        assert_eq!(
            decode_query("view=map"),
            Screen::Map {
                area: MapArea::Overview
            }
        );
    }

    #[test]
    fn map_with_bad_area_falls_back_to_home() {
        assert_eq!(decode_query("view=map&id=basement"), Screen::Home);
    }
}
