//! # Page Assembly
//!
//! Builds every widget the page has elements for and routes events and
//! timer ticks to them.
//!
//! ```text
//! setup:  elements ──► Option<widget> per feature
//! input:  PageEvent ──► handle() ──► Reaction
//! timers: tick(elapsed, now) ──► countdown view, lantern timers,
//!                                intro burst, one firework frame
//! ```
//!
//! A missing element leaves its widget as `None`; events for it are
//! ignored. The firework stage always exists but is inert without a
//! surface, and clicks are ignored without a trigger element.

use std::time::Duration;

use celebration_fireworks::{FireworkSession, FireworkStage, FrameState, Surface};
use celebration_site::{
    AudioSink, ChineseCalendar, Countdown, CountdownView, FlipCards, KeyValueStore, LanternStage,
    LanternTag, LunarFormatter, MapBubble, MapPin, MusicToggle, NavMenu, Question, TriviaGame,
    WishBoard,
};
use chrono::{DateTime, TimeZone};

use crate::config::PageConfig;
use crate::error::PageResult;
use crate::events::{PageEvent, Reaction};

/// Elements present on the page. Absent elements disable their widget.
pub struct PageElements<S> {
    /// Navigation menu and its toggle button.
    pub nav: bool,
    /// Countdown container.
    pub countdown: bool,
    /// Lunar calendar formatter for a lunar birthday. Defaults to
    /// [`ChineseCalendar`] when absent.
    pub lunar: Option<Box<dyn LunarFormatter>>,
    /// Firework drawing surface.
    pub firework_surface: Option<S>,
    /// Element whose clicks launch fireworks.
    pub firework_trigger: bool,
    /// Map pins with their popup text.
    pub map_pins: Option<Vec<MapPin>>,
    /// Wish form and list.
    pub wish_board: bool,
    /// Trivia questions.
    pub questions: Option<Vec<Question>>,
    /// Audio element behind the music button.
    pub audio: Option<Box<dyn AudioSink>>,
    /// Lantern stage with its wish tags.
    pub lantern_tags: Option<Vec<LanternTag>>,
    /// Number of flip cards.
    pub cards: Option<usize>,
}

impl<S> Default for PageElements<S> {
    fn default() -> Self {
        Self {
            nav: false,
            countdown: false,
            lunar: None,
            firework_surface: None,
            firework_trigger: false,
            map_pins: None,
            wish_board: false,
            questions: None,
            audio: None,
            lantern_tags: None,
            cards: None,
        }
    }
}

/// Results of one timer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Fresh countdown view, when the page has a countdown.
    pub countdown: Option<CountdownView>,
    /// Firework loop state after this tick's frame.
    pub frame: FrameState,
    /// Lanterns that finished fading.
    pub lanterns_removed: usize,
    /// True if the one-time intro burst fired this tick.
    pub intro_fired: bool,
}

struct MapView {
    pins: Vec<MapPin>,
    bubble: MapBubble,
}

/// The assembled page.
pub struct Page<S: Surface, K: KeyValueStore> {
    store: K,
    nav: Option<NavMenu>,
    countdown: Option<Countdown>,
    fireworks: FireworkStage<S>,
    firework_trigger: bool,
    map: Option<MapView>,
    wishes: Option<WishBoard>,
    game: Option<TriviaGame>,
    music: Option<MusicToggle<Box<dyn AudioSink>>>,
    lantern: Option<LanternStage>,
    cards: Option<FlipCards>,
}

impl<S: Surface, K: KeyValueStore> Page<S, K> {
    /// Sets up every widget with entropy-seeded randomness.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the trivia questions
    /// are malformed.
    pub fn setup(config: &PageConfig, elements: PageElements<S>, store: K) -> PageResult<Self> {
        Self::build(config, elements, store, None)
    }

    /// Same as [`Self::setup`] with fixed seeds, for tests and replays.
    ///
    /// # Errors
    ///
    /// See [`Self::setup`].
    pub fn setup_seeded(
        config: &PageConfig,
        elements: PageElements<S>,
        store: K,
        seed: u64,
    ) -> PageResult<Self> {
        Self::build(config, elements, store, Some(seed))
    }

    fn build(
        config: &PageConfig,
        elements: PageElements<S>,
        store: K,
        seed: Option<u64>,
    ) -> PageResult<Self> {
        config.validate()?;
        let site = &config.site;

        let session = match seed {
            Some(seed) => FireworkSession::with_seed(config.fireworks.clone(), seed),
            None => FireworkSession::new(config.fireworks.clone()),
        };
        let mut fireworks = FireworkStage::new(elements.firework_surface, session);
        if let Some(delay) = config.intro_burst() {
            fireworks.schedule_trigger(delay);
        }

        let game = match elements.questions {
            Some(questions) => Some(TriviaGame::open(&store, &site.stars_key, questions)?),
            None => None,
        };

        let lantern = elements.lantern_tags.map(|tags| match seed {
            Some(seed) => LanternStage::with_seed(site.lantern.clone(), tags, seed),
            None => LanternStage::new(site.lantern.clone(), tags),
        });

        let lunar = elements
            .lunar
            .unwrap_or_else(|| Box::new(ChineseCalendar::new()));

        let page = Self {
            nav: elements.nav.then(NavMenu::new),
            countdown: elements
                .countdown
                .then(|| Countdown::new(site.birthday, Some(lunar))),
            fireworks,
            firework_trigger: elements.firework_trigger,
            map: elements.map_pins.map(|pins| MapView {
                pins,
                bubble: MapBubble::new(),
            }),
            wishes: elements
                .wish_board
                .then(|| WishBoard::open(&store, &site.wishes_key, site.wish_limit)),
            game,
            music: elements.audio.map(MusicToggle::new),
            lantern,
            cards: elements.cards.map(FlipCards::new),
            store,
        };

        tracing::info!("page ready: {}", page.summary());
        Ok(page)
    }

    fn summary(&self) -> String {
        let widgets = [
            ("nav", self.nav.is_some()),
            ("countdown", self.countdown.is_some()),
            ("fireworks", self.fireworks.is_active()),
            ("map", self.map.is_some()),
            ("wishes", self.wishes.is_some()),
            ("game", self.game.is_some()),
            ("music", self.music.is_some()),
            ("lantern", self.lantern.is_some()),
            ("cards", self.cards.is_some()),
        ];
        let active: Vec<&str> = widgets
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();
        if active.is_empty() {
            "no widgets".to_owned()
        } else {
            active.join(", ")
        }
    }

    /// Routes one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if a store write fails, a trivia choice is out of
    /// range, or the audio sink refuses to play.
    pub fn handle<Tz: TimeZone>(&mut self, event: PageEvent, now: &DateTime<Tz>) -> PageResult<Reaction> {
        let reaction = match event {
            PageEvent::NavToggle => match &mut self.nav {
                Some(nav) => {
                    nav.toggle();
                    Reaction::NavExpanded(nav.aria_expanded())
                }
                None => Reaction::Ignored,
            },
            PageEvent::NavLink => match &mut self.nav {
                Some(nav) => {
                    nav.link_clicked();
                    Reaction::NavClosed
                }
                None => Reaction::Ignored,
            },
            PageEvent::FireworkClick { x, y } => {
                if self.firework_trigger && self.fireworks.is_active() {
                    self.fireworks.on_click(x, y);
                    Reaction::FireworksLaunched
                } else {
                    Reaction::Ignored
                }
            }
            PageEvent::Resize { width, height } => {
                if self.fireworks.is_active() {
                    self.fireworks.on_resize(width, height);
                    Reaction::Resized
                } else {
                    Reaction::Ignored
                }
            }
            PageEvent::PinClicked(index) => match &mut self.map {
                Some(map) => match map.pins.get(index) {
                    Some(pin) => {
                        map.bubble.show(pin);
                        Reaction::BubbleShown
                    }
                    None => Reaction::Ignored,
                },
                None => Reaction::Ignored,
            },
            PageEvent::BubbleClosed => match &mut self.map {
                Some(map) => {
                    map.bubble.close();
                    Reaction::BubbleHidden
                }
                None => Reaction::Ignored,
            },
            PageEvent::WishSubmitted { name, message } => match &mut self.wishes {
                Some(board) => board
                    .submit(&mut self.store, &name, &message, now.timestamp_millis())?
                    .map_or(Reaction::Ignored, Reaction::WishAdded),
                None => Reaction::Ignored,
            },
            PageEvent::AnswerChosen(choice) => match &mut self.game {
                Some(game) => Reaction::Answer(game.answer(&mut self.store, choice)?),
                None => Reaction::Ignored,
            },
            PageEvent::GameRestart => match &mut self.game {
                Some(game) => {
                    game.reset();
                    Reaction::GameRestarted
                }
                None => Reaction::Ignored,
            },
            PageEvent::MusicToggled => match &mut self.music {
                Some(music) => Reaction::Music(music.toggle()?),
                None => Reaction::Ignored,
            },
            PageEvent::LanternTagSelected(index) => match &mut self.lantern {
                Some(lantern) => lantern
                    .select_tag(index)
                    .map_or(Reaction::Ignored, |wish| Reaction::LanternWish(wish.to_owned())),
                None => Reaction::Ignored,
            },
            PageEvent::LanternLaunch => match &mut self.lantern {
                Some(lantern) => Reaction::LanternLaunched(lantern.launch(now.naive_local().time()).id),
                None => Reaction::Ignored,
            },
            PageEvent::LanternKey(key) => match &mut self.lantern {
                Some(lantern) => {
                    if lantern.on_key(&key, now.naive_local().time()) {
                        lantern
                            .lanterns()
                            .last()
                            .map_or(Reaction::Ignored, |l| Reaction::LanternLaunched(l.id))
                    } else {
                        Reaction::Ignored
                    }
                }
                None => Reaction::Ignored,
            },
            PageEvent::CardClicked(index) => match &mut self.cards {
                Some(cards) => cards.toggle(index).map_or(Reaction::Ignored, Reaction::CardFlipped),
                None => Reaction::Ignored,
            },
        };
        Ok(reaction)
    }

    /// Advances timers by `elapsed` and runs one display frame.
    pub fn tick<Tz: TimeZone>(&mut self, elapsed: Duration, now: &DateTime<Tz>) -> TickReport {
        let local = now.naive_local();

        let countdown = self.countdown.as_mut().map(|c| c.render(local));
        let lanterns_removed = self
            .lantern
            .as_mut()
            .map_or(0, |lantern| lantern.tick(elapsed, local.time()));
        let intro_fired = self.fireworks.advance_timers(elapsed);
        let frame = if self.fireworks.wants_frame() {
            self.fireworks.on_frame()
        } else {
            FrameState::Idle
        };

        TickReport {
            countdown,
            frame,
            lanterns_removed,
            intro_fired,
        }
    }

    /// Firework stage.
    #[must_use]
    pub fn fireworks(&self) -> &FireworkStage<S> {
        &self.fireworks
    }

    /// Navigation menu, if present.
    #[must_use]
    pub fn nav(&self) -> Option<&NavMenu> {
        self.nav.as_ref()
    }

    /// Map info bubble, if the page has a map.
    #[must_use]
    pub fn map_bubble(&self) -> Option<&MapBubble> {
        self.map.as_ref().map(|map| &map.bubble)
    }

    /// Wish board, if present.
    #[must_use]
    pub fn wish_board(&self) -> Option<&WishBoard> {
        self.wishes.as_ref()
    }

    /// Trivia game, if present.
    #[must_use]
    pub fn game(&self) -> Option<&TriviaGame> {
        self.game.as_ref()
    }

    /// Music state, if the page has audio.
    #[must_use]
    pub fn music_playing(&self) -> Option<bool> {
        self.music.as_ref().map(MusicToggle::is_playing)
    }

    /// Lantern stage, if present.
    #[must_use]
    pub fn lantern(&self) -> Option<&LanternStage> {
        self.lantern.as_ref()
    }

    /// Flip cards, if present.
    #[must_use]
    pub fn cards(&self) -> Option<&FlipCards> {
        self.cards.as_ref()
    }

    /// Backing store.
    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Tears the page down, handing back the store.
    #[must_use]
    pub fn into_store(self) -> K {
        self.store
    }
}
