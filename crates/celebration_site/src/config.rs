//! # Site Configuration
//!
//! Loaded once at startup. Every field has a default, so an empty file
//! gives the stock page.
//!
//! ```toml
//! wish_limit = 30
//!
//! [birthday]
//! calendar = "lunar"
//! month = 9
//! day = 18
//!
//! [lantern]
//! default_wish = "平安喜乐"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

/// Storage key for the wish board.
pub const WISHES_KEY: &str = "wangcan_birthday_wishes_v1";

/// Storage key for collected trivia stars.
pub const STARS_KEY: &str = "wangcan_birthday_stars_v1";

/// Wishes kept in local storage.
pub const WISH_LIMIT: usize = 30;

/// Wish used when no lantern tag carries one.
pub const DEFAULT_LANTERN_WISH: &str = "中原热情";

/// Which calendar the birthday recurs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calendar", rename_all = "lowercase")]
pub enum BirthdayRule {
    /// Same Gregorian month and day every year.
    Solar {
        /// Month, 1-12.
        month: u32,
        /// Day of month, 1-31.
        day: u32,
    },
    /// Same Chinese lunar month and day every year (non-leap month).
    Lunar {
        /// Lunar month, 1-12.
        month: u32,
        /// Lunar day, 1-30.
        day: u32,
    },
}

impl Default for BirthdayRule {
    fn default() -> Self {
        Self::Solar { month: 11, day: 2 }
    }
}

/// Lantern launcher timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanternConfig {
    /// Wish used when no tag is selected.
    pub default_wish: String,
    /// Delay of the automatic first launch.
    pub auto_launch_ms: u64,
    /// Time a lantern floats before it starts fading.
    pub fade_after_ms: u64,
    /// Length of the fade transition.
    pub fade_duration_ms: u64,
    /// Log lines kept.
    pub log_len: usize,
}

impl Default for LanternConfig {
    fn default() -> Self {
        Self {
            default_wish: DEFAULT_LANTERN_WISH.to_owned(),
            auto_launch_ms: 800,
            fade_after_ms: 6000,
            fade_duration_ms: 1200,
            log_len: 4,
        }
    }
}

impl LanternConfig {
    /// Delay of the automatic first launch.
    #[must_use]
    pub fn auto_launch(&self) -> Duration {
        Duration::from_millis(self.auto_launch_ms)
    }

    /// Time a lantern floats before fading.
    #[must_use]
    pub fn fade_after(&self) -> Duration {
        Duration::from_millis(self.fade_after_ms)
    }

    /// Length of the fade.
    #[must_use]
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

/// Page-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Storage key for wishes.
    pub wishes_key: String,
    /// Storage key for trivia stars.
    pub stars_key: String,
    /// Wishes kept in storage.
    pub wish_limit: usize,
    /// When the countdown points at.
    pub birthday: BirthdayRule,
    /// Lantern launcher timings.
    pub lantern: LanternConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            wishes_key: WISHES_KEY.to_owned(),
            stars_key: STARS_KEY.to_owned(),
            wish_limit: WISH_LIMIT,
            birthday: BirthdayRule::default(),
            lantern: LanternConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails [`Self::validate`].
    pub fn from_toml_str(text: &str) -> SiteResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("site config loaded from {}", path.display());
        Ok(config)
    }

    /// Checks that keys are set and the birthday is a real date.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> SiteResult<()> {
        if self.wishes_key.is_empty() || self.stars_key.is_empty() {
            return Err(SiteError::InvalidConfig("storage keys must not be empty".into()));
        }
        if self.wishes_key == self.stars_key {
            return Err(SiteError::InvalidConfig("wishes and stars need distinct keys".into()));
        }
        if self.wish_limit == 0 {
            return Err(SiteError::InvalidConfig("wish_limit must be at least 1".into()));
        }
        match self.birthday {
            BirthdayRule::Solar { month, day } => {
                // Feb 29 is allowed; the countdown skips to the next leap year.
                if chrono::NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                    return Err(SiteError::InvalidConfig(format!(
                        "solar birthday {month}-{day} is not a date"
                    )));
                }
            }
            BirthdayRule::Lunar { month, day } => {
                if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
                    return Err(SiteError::InvalidConfig(format!(
                        "lunar birthday {month}-{day} is out of range"
                    )));
                }
            }
        }
        if self.lantern.log_len == 0 {
            return Err(SiteError::InvalidConfig("lantern.log_len must be at least 1".into()));
        }
        Ok(())
    }
}
