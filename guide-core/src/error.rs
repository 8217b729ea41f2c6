//! Error types for guide operations.

use thiserror::Error;

/// Result type for guide operations.
pub type GuideResult<T> = Result<T, GuideError>;

/// Errors that can occur in guide operations.
#[derive(Debug, Error)]
pub enum GuideError {
    /// Requested fragment or data document is absent or unreachable.
    #[error("Content not found: {0}")]
    NotFound(String),

    /// A data document was fetched but could not be parsed.
    #[error("Malformed content document: {0}")]
    Parse(#[from] serde_json::Error),

    /// An identifier in a URL or lookup is missing or out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A platform capability (camera, media playback) cannot be acquired.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A required platform object (window, document, element) is missing
    /// or has an unexpected type.
    #[error("DOM error: {0}")]
    Dom(String),
}
