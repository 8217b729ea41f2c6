//! Content model for exhibition datasets.
//!
//! Each exhibition ships a `artworks.json` under its content directory:
//! `Content/ausstellung-<id>-<slug>/`. The document lists the artworks
//! with display metadata and relative media paths; every field is a
//! string, empty when unknown.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, GuideResult};
use crate::screen::ExhibitionId;

/// Content directory of an exhibition, with trailing slash.
#[must_use]
pub fn content_base(id: ExhibitionId) -> String {
    format!("Content/ausstellung-{}-{}/", id.get(), id.slug())
}

/// Path of an exhibition's artworks document.
#[must_use]
pub fn artworks_path(id: ExhibitionId) -> String {
    format!("{}artworks.json", content_base(id))
}

/// Resolve a media path from a content document against its base
/// directory. Absolute URLs and root-relative paths pass through.
#[must_use]
pub fn resolve_media(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("{base}{path}")
    }
}

/// One artwork record from `artworks.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    /// Stable id, e.g. `artwork-7`.
    pub id: String,
    /// Catalog number as printed next to the piece; may be empty.
    pub number: String,
    /// Title of the piece.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Artist's year of birth; may be empty.
    #[serde(rename = "artistBorn")]
    pub artist_born: String,
    /// Artist's year of death; may be empty.
    #[serde(rename = "artistDied")]
    pub artist_died: String,
    /// Year of creation; may be empty.
    pub year: String,
    /// Materials line.
    pub materials: String,
    /// Descriptive text with blank-line paragraph separators.
    pub description: String,
    /// Relative image paths; the first is the lead image.
    pub images: Vec<String>,
    /// Relative thumbnail path.
    pub thumbnail: String,
    /// Audio guide paths per language; entries may be empty.
    pub audio: BTreeMap<String, String>,
}

impl Artwork {
    /// The catalog number parsed as an integer, if present.
    #[must_use]
    pub fn catalog_number(&self) -> Option<u32> {
        self.number.trim().parse().ok()
    }

    /// Artist line with life dates, e.g. `Maria Lassnig (*1919 & 2014)`.
    #[must_use]
    pub fn display_artist(&self) -> String {
        if self.artist_born.is_empty() && self.artist_died.is_empty() {
            return self.artist.clone();
        }
        let born = if self.artist_born.is_empty() {
            "?"
        } else {
            &self.artist_born
        };
        if self.artist_died.is_empty() {
            format!("{} (*{born})", self.artist)
        } else {
            format!("{} (*{born} & {})", self.artist, self.artist_died)
        }
    }

    /// Title line with the creation year, e.g. `Selbstporträt, 1971`.
    #[must_use]
    pub fn display_title(&self) -> String {
        if self.year.is_empty() {
            self.title.clone()
        } else {
            format!("{}, {}", self.title, self.year)
        }
    }

    /// Description split into paragraphs at blank lines.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<&str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Audio guide path for a language, if the record carries one.
    #[must_use]
    pub fn audio_path(&self, language: &str) -> Option<&str> {
        self.audio
            .get(language)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    /// The lead image path, if any.
    #[must_use]
    pub fn lead_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Exhibition metadata embedded in `artworks.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitionInfo {
    /// Content directory name.
    pub id: String,
    /// Exhibition title.
    pub title: String,
    /// Date range line.
    pub date: String,
    /// Introductory text.
    pub description: String,
}

/// A parsed `artworks.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkCollection {
    /// The artworks in catalog order.
    pub artworks: Vec<Artwork>,
    /// Exhibition metadata, when the document carries it.
    pub exhibition: Option<ExhibitionInfo>,
}

impl ArtworkCollection {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::Parse`] for malformed JSON.
    pub fn from_json(json: &str) -> GuideResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find an artwork by its stable id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }

    /// Find an artwork by catalog number.
    #[must_use]
    pub fn find_by_number(&self, number: u32) -> Option<&Artwork> {
        self.artworks
            .iter()
            .find(|a| a.catalog_number() == Some(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "artworks": [
            {
                "id": "artwork-7",
                "number": "7",
                "title": "Ohne Titel",
                "artist": "Anna Beispiel",
                "artistBorn": "1931",
                "artistDied": "2007",
                "year": "1965",
                "materials": "Öl auf Leinwand",
                "description": "Erster Absatz.\n\nZweiter Absatz.",
                "images": ["media/images/artwork-7.jpg"],
                "thumbnail": "media/images/artwork-7_thumb.jpg",
                "audio": {"de": "media/audio/artwork-7-de.mp3", "en": ""}
            },
            {
                "id": "artwork-8",
                "number": "",
                "title": "Studie",
                "artist": "B. Muster",
                "artistBorn": "",
                "artistDied": "",
                "year": "",
                "materials": "",
                "description": "",
                "images": [],
                "thumbnail": "",
                "audio": {"de": "", "en": ""}
            }
        ],
        "exhibition": {
            "id": "ausstellung-3-DenkeFreiSchaffeNeu",
            "title": "Denke frei, schaffe neu",
            "date": "2026",
            "description": "Begleittext."
        }
    }"#;

    #[test]
    fn parses_full_document() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        assert_eq!(doc.artworks.len(), 2);
        assert_eq!(
            doc.exhibition.as_ref().map(|e| e.title.as_str()),
            Some("Denke frei, schaffe neu")
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ArtworkCollection::from_json("{ artworks: oops").unwrap_err();
        assert!(matches!(err, GuideError::Parse(_)));
    }

    #[test]
    fn finds_by_id_and_number() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        assert!(doc.find_by_id("artwork-7").is_some());
        assert!(doc.find_by_id("artwork-99").is_none());
        assert_eq!(
            doc.find_by_number(7).map(|a| a.id.as_str()),
            Some("artwork-7")
        );
        assert!(doc.find_by_number(8).is_none());
    }

    #[test]
    fn display_artist_includes_life_dates() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        let artwork = doc.find_by_id("artwork-7").expect("present");
        assert_eq!(artwork.display_artist(), "Anna Beispiel (*1931 & 2007)");

        let plain = doc.find_by_id("artwork-8").expect("present");
        assert_eq!(plain.display_artist(), "B. Muster");
    }

    #[test]
    fn display_title_appends_year_when_known() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        assert_eq!(
            doc.find_by_id("artwork-7").expect("present").display_title(),
            "Ohne Titel, 1965"
        );
        assert_eq!(
            doc.find_by_id("artwork-8").expect("present").display_title(),
            "Studie"
        );
    }

    #[test]
    fn paragraphs_split_at_blank_lines() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        let artwork = doc.find_by_id("artwork-7").expect("present");
        assert_eq!(
            artwork.paragraphs(),
            vec!["Erster Absatz.", "Zweiter Absatz."]
        );
        assert!(doc
            .find_by_id("artwork-8")
            .expect("present")
            .paragraphs()
            .is_empty());
    }

    #[test]
    fn empty_audio_entry_counts_as_absent() {
        let doc = ArtworkCollection::from_json(SAMPLE).expect("sample parses");
        let artwork = doc.find_by_id("artwork-7").expect("present");
        assert_eq!(artwork.audio_path("de"), Some("media/audio/artwork-7-de.mp3"));
        assert_eq!(artwork.audio_path("en"), None);
        assert_eq!(artwork.audio_path("fr"), None);
    }

    #[test]
    fn content_paths_embed_id_and_slug() {
        let id = ExhibitionId::new(3).expect("valid id");
        assert_eq!(
            content_base(id),
            "Content/ausstellung-3-DenkeFreiSchaffeNeu/"
        );
        assert_eq!(
            artworks_path(id),
            "Content/ausstellung-3-DenkeFreiSchaffeNeu/artworks.json"
        );
    }

    #[test]
    fn media_resolution_passes_absolute_urls_through() {
        assert_eq!(
            resolve_media("Content/a/", "media/images/x.jpg"),
            "Content/a/media/images/x.jpg"
        );
        assert_eq!(
            resolve_media("Content/a/", "https://cdn.example/x.jpg"),
            "https://cdn.example/x.jpg"
        );
        assert_eq!(resolve_media("Content/a/", "/images/x.jpg"), "/images/x.jpg");
    }
}
