//! # Firework Error Types
//!
//! The animation path itself never fails. Errors only come from loading
//! and validating configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring the firework effect.
#[derive(Error, Debug)]
pub enum FireworkError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid TOML for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A colour string was not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid colour: {0:?}")]
    InvalidColor(String),

    /// The configuration parsed but breaks an invariant of the effect.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for firework operations.
pub type FireworkResult<T> = Result<T, FireworkError>;
