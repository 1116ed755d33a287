//! Page-level errors: whatever a widget or the config loader reports.

use std::path::PathBuf;

use celebration_fireworks::FireworkError;
use celebration_site::SiteError;
use thiserror::Error;

/// Errors surfaced by [`crate::Page`].
#[derive(Error, Debug)]
pub enum PageError {
    /// The page config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The page config is not valid TOML for the expected schema.
    #[error("malformed page config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Firework settings were rejected.
    #[error(transparent)]
    Fireworks(#[from] FireworkError),

    /// A widget or its store failed.
    #[error(transparent)]
    Site(#[from] SiteError),
}

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;
