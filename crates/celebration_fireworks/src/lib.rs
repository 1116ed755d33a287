//! # Celebration Fireworks
//!
//! Click-triggered particle bursts that scatter, fall and fade on a 2D
//! raster surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FIREWORK PIPELINE                    │
//! ├───────────────────────────────────────────────────────────┤
//! │  Click / Timer → FireworkStage → FireworkSession → Surface│
//! │        ↓               ↓                ↓            ↓    │
//! │  origin point    inert if no      advance + prune   paint │
//! │                  surface          per frame         clear │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifetime of a burst
//!
//! Every particle starts fully opaque and loses a fixed `decay` each
//! frame and is pruned once its opacity is down to rounding residue.
//! Decay is validated to be at least `MIN_DECAY`, so a burst always ends
//! within `ceil(1 / decay.min)` frames. When the last particle is gone
//! the loop stops scheduling frames and clears the surface.
//!
//! ## Example
//!
//! ```rust
//! use celebration_fireworks::{FireworkConfig, FireworkSession, RecordingSurface};
//!
//! let mut session = FireworkSession::with_seed(FireworkConfig::default(), 1);
//! let mut surface = RecordingSurface::new(800, 600);
//!
//! session.launch(400.0, 300.0);
//! let summary = session.run_until_idle(&mut surface, 1_000);
//! assert!(summary.finished);
//! assert_eq!(session.active_count(), 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod session;
pub mod stage;
pub mod surface;

pub use color::Color;
pub use config::{FireworkConfig, SpawnRange, MAX_PARTICLE_COUNT, MIN_DECAY};
pub use error::{FireworkError, FireworkResult};
pub use particle::{advance, draw, Particle, SPENT_ALPHA};
pub use session::{FireworkSession, FrameState, RunSummary, SessionStats};
pub use stage::FireworkStage;
pub use surface::{DrawCommand, RasterSurface, RecordingSurface, Rgba8, Surface};
