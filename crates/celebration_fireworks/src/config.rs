//! # Firework Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an
//! empty file yields the stock burst:
//!
//! ```toml
//! particle_count = 80
//! gravity = 0.05
//! palette = ["#ffd166", "#ef476f", "#06d6a0"]
//!
//! [speed]
//! min = 2.0
//! max = 6.0
//! ```

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{default_palette, Color};
use crate::error::{FireworkError, FireworkResult};

/// Largest accepted `particle_count`.
pub const MAX_PARTICLE_COUNT: usize = 10_000;

/// Smallest accepted `decay.min`, a lifetime of 1000 frames.
pub const MIN_DECAY: f32 = 1e-3;

/// Inclusive range a per-particle value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl SpawnRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..=self.max)
    }

    /// Returns true if `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(&self, name: &str) -> FireworkResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FireworkError::InvalidConfig(format!("{name} range must be finite")));
        }
        if self.min > self.max {
            return Err(FireworkError::InvalidConfig(format!(
                "{name} range is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Tuning for a single burst and the frame loop that animates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkConfig {
    /// Particles spawned per launch.
    pub particle_count: usize,
    /// Initial speed in pixels per frame.
    pub speed: SpawnRange,
    /// Drawn circle radius in pixels.
    pub radius: SpawnRange,
    /// Opacity lost per frame.
    pub decay: SpawnRange,
    /// Downward acceleration in pixels per frame squared.
    pub gravity: f32,
    /// Colours a particle is drawn from.
    pub palette: Vec<Color>,
    /// Trail overlay painted over the whole surface each frame.
    pub overlay: Color,
    /// Default origin as a fraction of the surface size (x, y).
    pub default_origin: [f32; 2],
    /// Virtual frame duration used when no display clock drives the loop.
    pub frame_duration_ms: u64,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            speed: SpawnRange::new(2.0, 6.0),
            radius: SpawnRange::new(1.0, 3.0),
            decay: SpawnRange::new(0.008, 0.023),
            gravity: 0.05,
            palette: default_palette(),
            overlay: Color::BLACK.with_alpha(0.2),
            default_origin: [0.5, 1.0 / 3.0],
            frame_duration_ms: 16,
        }
    }
}

impl FireworkConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails [`Self::validate`].
    pub fn from_toml_str(text: &str) -> FireworkResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> FireworkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FireworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            "firework config loaded from {}: {} particles per burst",
            path.display(),
            config.particle_count
        );
        Ok(config)
    }

    /// Checks the invariants the frame loop relies on.
    ///
    /// Decay must be at least [`MIN_DECAY`], otherwise a burst would never
    /// end or would outlive the lifetime bound through rounding.
    ///
    /// # Errors
    ///
    /// Returns [`FireworkError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> FireworkResult<()> {
        if self.particle_count == 0 {
            return Err(FireworkError::InvalidConfig("particle_count must be at least 1".into()));
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(FireworkError::InvalidConfig(format!(
                "particle_count must be at most {MAX_PARTICLE_COUNT}, got {}",
                self.particle_count
            )));
        }
        self.speed.check("speed")?;
        self.radius.check("radius")?;
        self.decay.check("decay")?;

        if self.speed.min < 0.0 || self.radius.min < 0.0 {
            return Err(FireworkError::InvalidConfig(
                "speed and radius must not be negative".into(),
            ));
        }
        if self.decay.min <= 0.0 {
            return Err(FireworkError::InvalidConfig("decay must be greater than zero".into()));
        }
        if self.decay.min < MIN_DECAY {
            return Err(FireworkError::InvalidConfig(format!(
                "decay must be at least {MIN_DECAY}"
            )));
        }
        if !self.gravity.is_finite() {
            return Err(FireworkError::InvalidConfig("gravity must be finite".into()));
        }
        if self.palette.is_empty() {
            return Err(FireworkError::InvalidConfig("palette must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.overlay.a) {
            return Err(FireworkError::InvalidConfig("overlay alpha must be within [0, 1]".into()));
        }
        if self.default_origin.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(FireworkError::InvalidConfig(
                "default_origin fractions must be within [0, 1]".into(),
            ));
        }
        if self.frame_duration_ms == 0 {
            return Err(FireworkError::InvalidConfig("frame_duration_ms must be at least 1".into()));
        }
        Ok(())
    }

    /// Virtual frame duration.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms)
    }

    /// Upper bound on the frames a burst can live: `ceil(1 / decay.min)`.
    #[must_use]
    pub fn max_lifetime_frames(&self) -> u32 {
        (1.0 / self.decay.min).ceil() as u32
    }
}
