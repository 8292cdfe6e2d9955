//! Error types for pipeline runs.

use std::path::PathBuf;

use thiserror::Error;

/// Terminal error of a pipeline stage.
///
/// Manifest parse problems never surface here; they are recovered per file
/// and reported through [`crate::manifest::ManifestWarning`].
#[derive(Debug, Error)]
pub enum TrackError {
    /// No plan file exists at any of the candidate locations.
    #[error("no plan file found under {}; looked for: {}", root.display(), candidates.join(", "))]
    NotFound {
        /// Checkout root that was searched.
        root: PathBuf,
        /// Candidate paths tried, in priority order.
        candidates: Vec<String>,
    },

    /// The caller passed a malformed identifier or argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A file could not be read from the checkout.
    #[error("failed to read {path}: {message}")]
    Read {
        /// Path relative to the checkout root.
        path: String,
        /// Underlying failure.
        message: String,
    },

    /// Manifest discovery failed as a whole.
    #[error("manifest discovery failed: {0}")]
    Discovery(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for results carrying a [`TrackError`].
pub type Result<T> = std::result::Result<T, TrackError>;
