//! # Page Configuration
//!
//! One TOML file for the whole page. Each section is optional.
//!
//! ```toml
//! intro_burst_ms = 1200
//!
//! [site]
//! wish_limit = 30
//!
//! [site.birthday]
//! calendar = "solar"
//! month = 11
//! day = 2
//!
//! [fireworks]
//! particle_count = 80
//! gravity = 0.05
//! ```

use std::path::Path;
use std::time::Duration;

use celebration_fireworks::FireworkConfig;
use celebration_site::SiteConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Delay of the one-time burst after page setup; 0 disables it.
    pub intro_burst_ms: u64,
    /// Widget settings.
    pub site: SiteConfig,
    /// Firework settings.
    pub fireworks: FireworkConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            intro_burst_ms: 1200,
            site: SiteConfig::default(),
            fireworks: FireworkConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or either section is
    /// invalid.
    pub fn from_toml_str(text: &str) -> PageResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("page config loaded from {}", path.display());
        Ok(config)
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> PageResult<()> {
        self.site.validate()?;
        self.fireworks.validate()?;
        Ok(())
    }

    /// Delay of the intro burst, if enabled.
    #[must_use]
    pub fn intro_burst(&self) -> Option<Duration> {
        (self.intro_burst_ms > 0).then(|| Duration::from_millis(self.intro_burst_ms))
    }
}
