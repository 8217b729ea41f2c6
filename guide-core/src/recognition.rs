//! Artwork recognition state.
//!
//! The inference itself is an opaque external capability
//! (`classify(frame) -> label + confidence`); this module owns what the
//! guide does with it: the capture cadence, the display threshold, the
//! label-to-display-metadata catalog, and the generation counter that
//! discards results arriving after the camera stopped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GuideResult;

/// Milliseconds between capture/classify rounds.
pub const FRAME_INTERVAL_MS: u32 = 1500;

/// Minimum confidence for showing a recognition result.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// One classification produced by the external model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Model label of the recognized piece.
    pub label: String,
    /// Confidence score, `0.0..=1.0`.
    pub confidence: f32,
}

impl Classification {
    /// Whether the result clears the display threshold.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_THRESHOLD
    }

    /// Confidence as a percentage string with one decimal, e.g. `87.5`.
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", f64::from(self.confidence) * 100.0)
    }
}

/// Display metadata for one recognizable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    /// Title shown for the recognized piece.
    pub title: String,
    /// Artist shown for the recognized piece.
    pub artist: String,
}

/// Side dataset mapping model labels to display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecognitionCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl RecognitionCatalog {
    /// Parse the catalog from JSON (`{"label": {"title": .., "artist": ..}}`).
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed JSON.
    pub fn from_json(json: &str) -> GuideResult<Self> {
        let entries: BTreeMap<String, CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Look up the display metadata for a label.
    #[must_use]
    pub fn entry(&self, label: &str) -> Option<&CatalogEntry> {
        self.entries.get(label)
    }

    /// Number of known labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Start/stop and staleness bookkeeping for the capture loop.
///
/// Each `start` opens a new generation; `stop` invalidates it, so a
/// classification completing after `stop` is discarded instead of
/// rendered. Both operations are idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSession {
    running: bool,
    generation: u64,
}

impl CaptureSession {
    /// Create a stopped session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start capturing. Returns the new generation token, or `None` if
    /// already running (the camera is acquired only once).
    pub fn start(&mut self) -> Option<u64> {
        if self.running {
            return None;
        }
        self.running = true;
        self.generation += 1;
        Some(self.generation)
    }

    /// Stop capturing. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.generation += 1;
        true
    }

    /// Whether the loop is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a result carrying `generation` may still be displayed.
    #[must_use]
    pub const fn accepts(&self, generation: u64) -> bool {
        self.running && generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_gates_display() {
        let confident = Classification {
            label: "artwork-7".to_string(),
            confidence: 0.82,
        };
        assert!(confident.is_confident());

        let unsure = Classification {
            label: "artwork-7".to_string(),
            confidence: 0.49,
        };
        assert!(!unsure.is_confident());
    }

    #[test]
    fn confidence_renders_one_decimal_percent() {
        let result = Classification {
            label: "x".to_string(),
            confidence: 0.825,
        };
        assert_eq!(result.confidence_percent(), "82.5");
    }

    #[test]
    fn catalog_parses_and_looks_up() {
        let catalog = RecognitionCatalog::from_json(
            r#"{"artwork-7": {"title": "Ohne Titel", "artist": "Anna Beispiel"}}"#,
        )
        .expect("valid catalog");
        assert_eq!(catalog.len(), 1);
        let entry = catalog.entry("artwork-7").expect("known label");
        assert_eq!(entry.artist, "Anna Beispiel");
        assert!(catalog.entry("artwork-9").is_none());
    }

    #[test]
    fn catalog_rejects_malformed_json() {
        assert!(RecognitionCatalog::from_json("[1, 2]").is_err());
    }

    #[test]
    fn start_twice_acquires_once() {
        let mut session = CaptureSession::new();
        let generation = session.start().expect("first start");
        assert_eq!(session.start(), None);
        assert!(session.accepts(generation));
    }

    #[test]
    fn stop_discards_in_flight_results() {
        let mut session = CaptureSession::new();
        let generation = session.start().expect("first start");
        assert!(session.stop());
        // A classification finishing now must not be displayed.
        assert!(!session.accepts(generation));
    }

    #[test]
    fn stop_when_stopped_is_a_noop() {
        let mut session = CaptureSession::new();
        assert!(!session.stop());
        assert!(!session.is_running());
    }

    #[test]
    fn restart_opens_a_fresh_generation() {
        let mut session = CaptureSession::new();
        let first = session.start().expect("first start");
        session.stop();
        let second = session.start().expect("restart");
        assert_ne!(first, second);
        assert!(session.accepts(second));
        assert!(!session.accepts(first));
    }
}
