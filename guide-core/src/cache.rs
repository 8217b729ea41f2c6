//! Offline cache manifest.
//!
//! The service worker that actually persists assets lives outside this
//! crate; it consumes the manifest declared here. The cache identifier is
//! versioned so a deploy invalidates the previous cache wholesale.

use serde::{Deserialize, Serialize};

/// Current cache version; bump on every content-affecting deploy.
pub const CACHE_VERSION: &str = "20260108.1203";

/// App shell paths persisted for offline use.
pub const STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/manifest.json",
    "/css/styles.css",
    "/Content/exhibitions.json",
    "/images/logo.png",
    "/images/icons/home.png",
    "/images/icons/camera.png",
    "/images/icons/number2.png",
    "/images/icons/map.png",
    "/images/icons/menue.png",
    "/images/icons/arrow_left.png",
    "/images/icons/arrow_right.png",
    "/images/icons/prev.png",
    "/images/icons/next.png",
    "/fonts/TWKLausanne-350.ttf",
    "/screens/home.html",
    "/screens/scanner.html",
    "/screens/number.html",
    "/screens/exhibitions/exhibition-1.html",
    "/screens/exhibitions/exhibition-2.html",
    "/screens/exhibitions/exhibition-3.html",
];

/// Versioned manifest of assets to persist offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Cache version stamp.
    pub version: String,
    /// Paths to persist.
    pub static_assets: Vec<String>,
}

impl CacheManifest {
    /// The manifest for the current build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: CACHE_VERSION.to_string(),
            static_assets: STATIC_ASSETS.iter().map(ToString::to_string).collect(),
        }
    }

    /// The versioned cache identifier.
    #[must_use]
    pub fn name(&self) -> String {
        format!("galerie-sifi-v{}", self.version)
    }

    /// Serialize for handing to the service worker.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_name_embeds_version() {
        let manifest = CacheManifest::current();
        assert_eq!(manifest.name(), format!("galerie-sifi-v{CACHE_VERSION}"));
    }

    #[test]
    fn shell_assets_are_present() {
        let manifest = CacheManifest::current();
        for path in ["/index.html", "/screens/home.html", "/css/styles.css"] {
            assert!(
                manifest.static_assets.iter().any(|a| a == path),
                "missing {path}"
            );
        }
    }

    #[test]
    fn manifest_serializes_to_json() {
        let json = CacheManifest::current().to_json().expect("serializable");
        assert!(json.contains(CACHE_VERSION));
        assert!(json.contains("static_assets"));
    }
}
