//! # Firework Session
//!
//! One owned session per surface. It holds the only particle collection,
//! the RNG and the "is a frame loop scheduled" flag.
//!
//! ```text
//! launch ──► particles += burst ──► running = true (if it wasn't)
//!                                         │
//!            ┌────────────────────────────┘
//!            ▼
//! frame: advance all ─► drop spent     ─► overlay ─► draw survivors
//!            │                                              │
//!            └──── survivors left? ◄────────────────────────┘
//!                   yes: keep running     no: clear + stop
//! ```

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::FireworkConfig;
use crate::particle::{advance, draw, Particle};
use crate::surface::Surface;

/// Frame step in frames. One display refresh.
const FRAME_STEP: f32 = 1.0;

/// What a call to [`FireworkSession::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// No loop was running; nothing was drawn.
    Idle,
    /// Particles remain; another frame should be scheduled.
    Running {
        /// Particles still alive after this frame.
        alive: usize,
    },
    /// The last particle faded this frame and the surface was cleared.
    Finished,
}

impl FrameState {
    /// Returns true if the caller should schedule another frame.
    #[must_use]
    pub fn wants_next_frame(self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Counters over the session's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Launch calls.
    pub bursts: u64,
    /// Particles spawned.
    pub spawned: u64,
    /// Particles removed after fading out.
    pub expired: u64,
    /// Frames simulated.
    pub frames: u64,
    /// Times the frame loop went from stopped to running.
    pub loops_started: u64,
    /// Particles removed during the most recent frame.
    pub expired_last_frame: u32,
}

/// Result of [`FireworkSession::run_until_idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames simulated.
    pub frames: u32,
    /// Virtual time those frames span.
    pub elapsed: Duration,
    /// True if the loop stopped on its own before the frame cap.
    pub finished: bool,
}

/// The animation session.
#[derive(Debug, Clone)]
pub struct FireworkSession {
    config: FireworkConfig,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
    running: bool,
    stats: SessionStats,
}

impl FireworkSession {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: FireworkConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates a deterministic session.
    #[must_use]
    pub fn with_seed(config: FireworkConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: FireworkConfig, rng: ChaCha8Rng) -> Self {
        let capacity = config.particle_count.saturating_mul(2);
        Self {
            config,
            particles: Vec::with_capacity(capacity),
            rng,
            running: false,
            stats: SessionStats::default(),
        }
    }

    /// Spawns one burst at (`origin_x`, `origin_y`).
    ///
    /// If a loop is already running the burst joins it; otherwise the loop
    /// is started.
    pub fn launch(&mut self, origin_x: f32, origin_y: f32) {
        let count = self.config.particle_count;
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(origin_x, origin_y, &self.config, &mut self.rng);
            self.particles.push(particle);
        }

        self.stats.bursts += 1;
        self.stats.spawned += count as u64;

        if self.running {
            tracing::trace!("burst joined running loop, {} active", self.particles.len());
        } else {
            self.running = true;
            self.stats.loops_started += 1;
            tracing::debug!("firework loop started at ({origin_x}, {origin_y})");
        }
    }

    /// Spawns one burst at the configured default origin of a
    /// `width` x `height` surface.
    pub fn launch_default(&mut self, width: u32, height: u32) {
        let [fx, fy] = self.config.default_origin;
        self.launch(width as f32 * fx, height as f32 * fy);
    }

    /// Simulates and draws one frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameState {
        if !self.running {
            return FrameState::Idle;
        }

        let gravity = self.config.gravity;
        for particle in &mut self.particles {
            *particle = advance(*particle, FRAME_STEP, gravity);
        }

        let before = self.particles.len();
        self.particles.retain(|p| !p.is_spent());
        let expired = before - self.particles.len();

        self.stats.frames += 1;
        self.stats.expired += expired as u64;
        self.stats.expired_last_frame = u32::try_from(expired).unwrap_or(u32::MAX);

        surface.fill_overlay(self.config.overlay);
        for particle in &self.particles {
            draw(surface, particle);
        }

        if self.particles.is_empty() {
            self.running = false;
            surface.clear();
            tracing::debug!("firework loop finished after {} frames total", self.stats.frames);
            return FrameState::Finished;
        }

        FrameState::Running {
            alive: self.particles.len(),
        }
    }

    /// Drives the loop with a virtual clock until it stops by itself or
    /// `max_frames` have run.
    pub fn run_until_idle<S: Surface + ?Sized>(&mut self, surface: &mut S, max_frames: u32) -> RunSummary {
        let mut frames = 0;
        let mut finished = !self.running;

        while frames < max_frames {
            match self.frame(surface) {
                FrameState::Idle => break,
                FrameState::Running { .. } => frames += 1,
                FrameState::Finished => {
                    frames += 1;
                    finished = true;
                    break;
                }
            }
        }

        RunSummary {
            frames,
            elapsed: self.config.frame_duration() * frames,
            finished,
        }
    }

    /// Active particles in spawn order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of active particles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.particles.len()
    }

    /// Returns true while a frame loop is scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &FireworkConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn session() -> FireworkSession {
        FireworkSession::with_seed(FireworkConfig::default(), 42)
    }

    #[test]
    fn test_frame_on_idle_session_draws_nothing() {
        let mut s = session();
        let mut surface = RecordingSurface::new(100, 100);
        assert_eq!(s.frame(&mut surface), FrameState::Idle);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_frame_paints_overlay_before_particles() {
        let mut s = session();
        let mut surface = RecordingSurface::new(400, 300);
        s.launch(200.0, 150.0);

        let state = s.frame(&mut surface);
        assert_eq!(state, FrameState::Running { alive: 80 });

        let commands = surface.commands();
        assert!(matches!(commands[0], DrawCommand::Overlay { .. }));
        assert_eq!(commands.len(), 81);
        assert!(commands[1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
    }

    #[test]
    fn test_launch_default_uses_origin_fraction() {
        let mut s = session();
        s.launch_default(900, 600);
        assert!(s
            .particles()
            .iter()
            .all(|p| (p.x - 450.0).abs() < 1e-3 && (p.y - 200.0).abs() < 1e-3));
    }

    #[test]
    fn test_run_until_idle_respects_frame_cap() {
        let mut s = session();
        let mut surface = RecordingSurface::new(100, 100);
        s.launch(50.0, 50.0);

        let summary = s.run_until_idle(&mut surface, 3);
        assert_eq!(summary.frames, 3);
        assert!(!summary.finished);
        assert_eq!(summary.elapsed, Duration::from_millis(48));
        assert!(s.is_running());
    }

    #[test]
    fn test_run_until_idle_on_idle_session() {
        let mut s = session();
        let mut surface = RecordingSurface::new(100, 100);
        let summary = s.run_until_idle(&mut surface, 10);
        assert_eq!(summary.frames, 0);
        assert!(summary.finished);
    }

    #[test]
    fn test_stats_track_lifecycle() {
        let mut s = session();
        let mut surface = RecordingSurface::new(100, 100);
        s.launch(10.0, 10.0);
        s.run_until_idle(&mut surface, 1_000);

        let stats = s.stats();
        assert_eq!(stats.bursts, 1);
        assert_eq!(stats.spawned, 80);
        assert_eq!(stats.expired, 80);
        assert_eq!(stats.loops_started, 1);
        assert!(stats.expired_last_frame > 0);
        assert!(stats.expired_last_frame <= 80);
    }

    #[test]
    fn test_largest_burst_counts_every_expiry() {
        let config = FireworkConfig {
            particle_count: crate::config::MAX_PARTICLE_COUNT,
            decay: crate::config::SpawnRange::new(0.5, 0.5),
            ..Default::default()
        };
        let mut s = FireworkSession::with_seed(config, 9);
        let mut surface = RecordingSurface::new(10, 10);
        s.launch(5.0, 5.0);

        assert_eq!(s.frame(&mut surface), FrameState::Running { alive: 10_000 });
        assert_eq!(s.frame(&mut surface), FrameState::Finished);
        assert_eq!(s.stats().expired_last_frame, 10_000);
        assert_eq!(s.stats().expired, 10_000);
    }
}
