//! # Lantern Launcher
//!
//! Visitors pick a wish tag and release a sky lantern carrying it.
//!
//! ```text
//! launch ─► Rising ─(next frame)─► Floating ─(fade_after)─► Fading ─(fade_duration)─► removed
//! ```
//!
//! A short log keeps the latest launches, newest first. One automatic
//! launch fires shortly after the stage is set up.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::NaiveTime;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::LanternConfig;
use crate::text::sanitize_html;

/// Where a lantern is in its flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanternPhase {
    /// Just added; starts floating on the next tick.
    Rising,
    /// Drifting upward.
    Floating,
    /// Fading out; removed when the fade completes.
    Fading,
}

/// One lantern in the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Lantern {
    /// Launch sequence number.
    pub id: u64,
    /// Escaped wish text.
    pub label: String,
    /// Horizontal position, percent of the sky width in [10, 90).
    pub x_percent: f32,
    /// Flight phase.
    pub phase: LanternPhase,
    age: Duration,
}

/// A selectable wish tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanternTag {
    /// Wish carried by the tag; empty means "keep the current wish".
    pub wish: String,
}

/// The lantern stage.
#[derive(Debug)]
pub struct LanternStage {
    config: LanternConfig,
    tags: Vec<LanternTag>,
    active_tag: Option<usize>,
    current_wish: String,
    lanterns: Vec<Lantern>,
    log: VecDeque<String>,
    auto_launch: Option<Duration>,
    next_id: u64,
    rng: ChaCha8Rng,
}

impl LanternStage {
    /// Sets up the stage. The first tag, if any, starts selected.
    #[must_use]
    pub fn new(config: LanternConfig, tags: Vec<LanternTag>) -> Self {
        Self::with_rng(config, tags, ChaCha8Rng::from_entropy())
    }

    /// Deterministic stage for tests and replays.
    #[must_use]
    pub fn with_seed(config: LanternConfig, tags: Vec<LanternTag>, seed: u64) -> Self {
        Self::with_rng(config, tags, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: LanternConfig, tags: Vec<LanternTag>, rng: ChaCha8Rng) -> Self {
        let current_wish = tags
            .first()
            .map(|t| t.wish.clone())
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| config.default_wish.clone());
        let auto_launch = Some(config.auto_launch());
        let log = VecDeque::with_capacity(config.log_len + 1);

        let mut stage = Self {
            config,
            tags,
            active_tag: None,
            current_wish,
            lanterns: Vec::new(),
            log,
            auto_launch,
            next_id: 0,
            rng,
        };
        stage.select_tag(0);
        stage
    }

    /// Tag clicked. Returns the stage's new `data-selected` value, or `None`
    /// for an unknown tag.
    pub fn select_tag(&mut self, index: usize) -> Option<&str> {
        let tag = self.tags.get(index)?;
        if !tag.wish.is_empty() {
            self.current_wish.clone_from(&tag.wish);
        }
        self.active_tag = Some(index);
        Some(&self.current_wish)
    }

    /// Releases a lantern with the current wish, logged at `now`.
    pub fn launch(&mut self, now: NaiveTime) -> &Lantern {
        let wish = if self.current_wish.is_empty() {
            self.config.default_wish.clone()
        } else {
            self.current_wish.clone()
        };

        self.log
            .push_front(format!("{} {}", now.format("%H:%M"), sanitize_html(&wish)));
        self.log.truncate(self.config.log_len);

        let id = self.next_id;
        self.next_id += 1;
        let x_percent = self.rng.gen_range(10.0..90.0_f32);
        tracing::debug!("lantern {id} released at {x_percent:.1}%");

        self.lanterns.push(Lantern {
            id,
            label: sanitize_html(&wish),
            x_percent,
            phase: LanternPhase::Rising,
            age: Duration::ZERO,
        });
        let index = self.lanterns.len() - 1;
        &self.lanterns[index]
    }

    /// Key pressed on the launch button. Enter and Space launch.
    pub fn on_key(&mut self, key: &str, now: NaiveTime) -> bool {
        if matches!(key, "Enter" | " ") {
            self.launch(now);
            true
        } else {
            false
        }
    }

    /// Advances timers by `elapsed`. `now` stamps a due automatic launch.
    ///
    /// Returns the number of lanterns removed.
    pub fn tick(&mut self, elapsed: Duration, now: NaiveTime) -> usize {
        if let Some(remaining) = self.auto_launch {
            if elapsed >= remaining {
                self.auto_launch = None;
                self.launch(now);
            } else {
                self.auto_launch = Some(remaining - elapsed);
            }
        }

        let fade_after = self.config.fade_after();
        let gone_after = fade_after + self.config.fade_duration();

        for lantern in &mut self.lanterns {
            match lantern.phase {
                // The float transition starts on the frame after insertion.
                LanternPhase::Rising => lantern.phase = LanternPhase::Floating,
                LanternPhase::Floating | LanternPhase::Fading => lantern.age += elapsed,
            }
            if lantern.phase == LanternPhase::Floating && lantern.age >= fade_after {
                lantern.phase = LanternPhase::Fading;
            }
        }

        let before = self.lanterns.len();
        self.lanterns.retain(|l| l.age < gone_after);
        before - self.lanterns.len()
    }

    /// Lanterns currently in the sky.
    #[must_use]
    pub fn lanterns(&self) -> &[Lantern] {
        &self.lanterns
    }

    /// Log lines, newest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Log as the `<span>` list the page shows.
    #[must_use]
    pub fn log_html(&self) -> String {
        self.log.iter().map(|entry| format!("<span>{entry}</span>")).collect()
    }

    /// Currently selected wish.
    #[must_use]
    pub fn current_wish(&self) -> &str {
        &self.current_wish
    }

    /// Index of the highlighted tag.
    #[must_use]
    pub fn active_tag(&self) -> Option<usize> {
        self.active_tag
    }
}
