//! Page wiring for the firework session.
//!
//! The stage owns an optional surface and the session. A page without a
//! canvas still gets a stage; every trigger on it is a silent no-op.

use std::time::Duration;

use crate::session::{FireworkSession, FrameState, RunSummary};
use crate::surface::Surface;

/// Binds a [`FireworkSession`] to a surface and its triggers.
#[derive(Debug)]
pub struct FireworkStage<S: Surface> {
    surface: Option<S>,
    session: FireworkSession,
    scheduled: Option<Duration>,
}

impl<S: Surface> FireworkStage<S> {
    /// Creates a stage. Pass `None` when the page has no drawing surface.
    #[must_use]
    pub fn new(surface: Option<S>, session: FireworkSession) -> Self {
        if surface.is_none() {
            tracing::debug!("no firework surface on this page, stage is inert");
        }
        Self {
            surface,
            session,
            scheduled: None,
        }
    }

    /// Returns true if the stage has a surface to draw on.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// Pointer click at surface-relative coordinates.
    pub fn on_click(&mut self, x: f32, y: f32) {
        if self.surface.is_some() {
            self.session.launch(x, y);
        }
    }

    /// Programmatic trigger at the default origin.
    pub fn trigger(&mut self) {
        if let Some(surface) = &self.surface {
            let (width, height) = surface.size();
            self.session.launch_default(width, height);
        }
    }

    /// Viewport resize. Particles in flight keep their absolute coordinates.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = &mut self.surface {
            surface.resize(width, height);
        }
    }

    /// Arms a one-shot trigger that fires after `delay` of timer time.
    pub fn schedule_trigger(&mut self, delay: Duration) {
        if self.surface.is_some() {
            self.scheduled = Some(delay);
        }
    }

    /// Advances timer time; fires the scheduled trigger once it is due.
    ///
    /// Returns true if the trigger fired.
    pub fn advance_timers(&mut self, elapsed: Duration) -> bool {
        let Some(remaining) = self.scheduled else {
            return false;
        };

        if elapsed >= remaining {
            self.scheduled = None;
            self.trigger();
            true
        } else {
            self.scheduled = Some(remaining - elapsed);
            false
        }
    }

    /// Display refresh callback.
    pub fn on_frame(&mut self) -> FrameState {
        match &mut self.surface {
            Some(surface) => self.session.frame(surface),
            None => FrameState::Idle,
        }
    }

    /// Runs frames on the virtual clock until the loop stops itself.
    pub fn run_until_idle(&mut self, max_frames: u32) -> RunSummary {
        match &mut self.surface {
            Some(surface) => self.session.run_until_idle(surface, max_frames),
            None => RunSummary {
                frames: 0,
                elapsed: Duration::ZERO,
                finished: true,
            },
        }
    }

    /// Returns true while a frame should be requested.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.surface.is_some() && self.session.is_running()
    }

    /// The session driving this stage.
    #[must_use]
    pub fn session(&self) -> &FireworkSession {
        &self.session
    }

    /// The surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FireworkConfig;
    use crate::surface::RecordingSurface;

    fn session() -> FireworkSession {
        FireworkSession::with_seed(FireworkConfig::default(), 3)
    }

    #[test]
    fn test_stage_without_surface_is_inert() {
        let mut stage: FireworkStage<RecordingSurface> = FireworkStage::new(None, session());
        stage.on_click(10.0, 10.0);
        stage.trigger();
        stage.on_resize(50, 50);
        stage.schedule_trigger(Duration::from_millis(1));

        assert!(!stage.is_active());
        assert!(!stage.advance_timers(Duration::from_secs(1)));
        assert_eq!(stage.on_frame(), FrameState::Idle);
        assert_eq!(stage.session().active_count(), 0);
        assert!(!stage.wants_frame());
    }

    #[test]
    fn test_scheduled_trigger_fires_once() {
        let mut stage = FireworkStage::new(Some(RecordingSurface::new(300, 300)), session());
        stage.schedule_trigger(Duration::from_millis(800));

        assert!(!stage.advance_timers(Duration::from_millis(500)));
        assert_eq!(stage.session().active_count(), 0);
        assert!(stage.advance_timers(Duration::from_millis(300)));
        assert_eq!(stage.session().active_count(), 80);
        assert!(!stage.advance_timers(Duration::from_secs(5)));
        assert_eq!(stage.session().stats().bursts, 1);
    }

    #[test]
    fn test_resize_keeps_particles_in_place() {
        let mut surface = RecordingSurface::new(800, 600);
        {
            let mut stage = FireworkStage::new(Some(&mut surface), session());
            stage.on_click(700.0, 500.0);
            stage.on_frame();
            let before: Vec<_> = stage.session().particles().iter().map(|p| (p.x, p.y)).collect();

            stage.on_resize(200, 100);
            let after: Vec<_> = stage.session().particles().iter().map(|p| (p.x, p.y)).collect();
            assert_eq!(before, after);
            assert!(stage.wants_frame());
        }
        assert_eq!(surface.resize_count(), 1);
        assert_eq!(crate::surface::Surface::size(&surface), (200, 100));
    }
}
