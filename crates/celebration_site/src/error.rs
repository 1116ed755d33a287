//! # Site Error Types
//!
//! All errors that can occur in the page widgets and their local state.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the site widgets.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Reading or writing local state failed.
    #[error("state I/O failed at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored state could not be (de)serialized.
    #[error("state serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration was not valid TOML for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A storage key contains characters the store can't hold.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A widget was handed input it can't act on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The audio sink refused to start playback.
    #[error("playback refused: {0}")]
    Playback(String),
}

/// Result type for site operations.
pub type SiteResult<T> = Result<T, SiteError>;
