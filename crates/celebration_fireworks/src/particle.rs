//! Particle record and the two pure functions that animate it.
//!
//! A particle is plain data. [`advance`] steps it forward in time and
//! [`draw`] paints it; neither touches any other particle.

use std::f32::consts::TAU;

use rand::Rng;

use crate::color::Color;
use crate::config::FireworkConfig;
use crate::surface::Surface;

/// Opacity at or below which a particle counts as gone.
///
/// Repeated `f32` subtraction of `decay` can leave a positive residue of
/// a few ulps where the exact value is zero. The residue stays below this
/// for every decay [`FireworkConfig::validate`] accepts.
pub const SPENT_ALPHA: f32 = 1e-4;

/// A single glowing point of a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in surface pixels.
    pub x: f32,
    /// Vertical position in surface pixels (grows downward).
    pub y: f32,
    /// Horizontal velocity in pixels per frame.
    pub dx: f32,
    /// Vertical velocity in pixels per frame.
    pub dy: f32,
    /// Drawn circle radius.
    pub radius: f32,
    /// Palette colour, always opaque.
    pub color: Color,
    /// Current opacity, starts at 1.0.
    pub alpha: f32,
    /// Opacity lost per frame, fixed at spawn.
    pub decay: f32,
}

impl Particle {
    /// Spawns a particle at the origin with randomized heading, speed,
    /// radius, colour and decay drawn from `config`.
    pub fn spawn<R: Rng + ?Sized>(x: f32, y: f32, config: &FireworkConfig, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = config.speed.sample(rng);
        let color = config.palette[rng.gen_range(0..config.palette.len())];

        Self {
            x,
            y,
            dx: angle.cos() * speed,
            dy: angle.sin() * speed,
            radius: config.radius.sample(rng),
            color,
            alpha: 1.0,
            decay: config.decay.sample(rng),
        }
    }

    /// Returns true once the particle is fully transparent.
    #[inline]
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.alpha <= SPENT_ALPHA
    }
}

/// Steps a particle forward by `dt` frames.
///
/// Position moves by the current velocity first, then gravity bends the
/// vertical velocity, then opacity drops by `decay`. With `dt == 1.0`
/// the opacity drop is exactly `decay`.
#[inline]
#[must_use]
pub fn advance(particle: Particle, dt: f32, gravity: f32) -> Particle {
    Particle {
        x: particle.x + particle.dx * dt,
        y: particle.y + particle.dy * dt,
        dy: particle.dy + gravity * dt,
        alpha: particle.alpha - particle.decay * dt,
        ..particle
    }
}

/// Paints a particle at its current position and opacity.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, particle: &Particle) {
    surface.fill_circle(
        particle.x,
        particle.y,
        particle.radius,
        particle.color.with_alpha(particle.alpha.clamp(0.0, 1.0)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> Particle {
        Particle {
            x: 10.0,
            y: 20.0,
            dx: 3.0,
            dy: -2.0,
            radius: 2.0,
            color: Color::GOLD,
            alpha: 1.0,
            decay: 0.015,
        }
    }

    #[test]
    fn test_spawn_respects_config_ranges() {
        let config = FireworkConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Particle::spawn(50.0, 60.0, &config, &mut rng);
            let speed = p.dx.hypot(p.dy);
            assert!(speed <= config.speed.max + 1e-4, "speed {speed} out of range");
            assert!(speed >= config.speed.min - 1e-4, "speed {speed} out of range");
            assert!(config.radius.contains(p.radius));
            assert!(config.decay.contains(p.decay));
            assert!(config.palette.contains(&p.color));
            assert!((p.alpha - 1.0).abs() < f32::EPSILON);
            assert_eq!((p.x, p.y), (50.0, 60.0));
        }
    }

    #[test]
    fn test_advance_moves_then_applies_gravity() {
        let next = advance(sample(), 1.0, 0.05);
        assert!((next.x - 13.0).abs() < 1e-6);
        assert!((next.y - 18.0).abs() < 1e-6);
        assert!((next.dy - -1.95).abs() < 1e-6);
        assert!((next.dx - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_advance_drops_alpha_by_exactly_decay() {
        let mut p = sample();
        for _ in 0..30 {
            let before = p.alpha;
            p = advance(p, 1.0, 0.05);
            assert_eq!(p.alpha, before - p.decay);
        }
    }

    #[test]
    fn test_rounding_residue_counts_as_spent() {
        let mut p = sample();
        p.decay = 0.01;
        for _ in 0..100 {
            p = advance(p, 1.0, 0.05);
        }
        assert!(p.alpha.abs() < SPENT_ALPHA, "residue {}", p.alpha);
        assert!(p.is_spent());

        p.alpha = 0.004;
        assert!(!p.is_spent());
    }

    #[test]
    fn test_draw_uses_current_alpha() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut p = sample();
        p.alpha = 0.25;
        draw(&mut surface, &p);

        match surface.last_command() {
            Some(DrawCommand::Circle { x, y, radius, color }) => {
                assert_eq!((*x, *y, *radius), (10.0, 20.0, 2.0));
                assert!((color.a - 0.25).abs() < f32::EPSILON);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }
}
