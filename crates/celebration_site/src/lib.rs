//! # Celebration Site
//!
//! Interactive widgets of the birthday page, modelled as plain state
//! machines the host drives with events and the current time.
//!
//! ## Widgets
//!
//! | Module        | Behaviour                                              |
//! |---------------|--------------------------------------------------------|
//! | [`nav`]       | Mobile menu that closes when a link is followed        |
//! | [`countdown`] | Days/hours/minutes/seconds to the next birthday        |
//! | [`lunar`]     | Next solar date of a Chinese lunar birthday            |
//! | [`map`]       | Info bubble for clicked map pins                       |
//! | [`wishes`]    | Persisted, capped wish board                           |
//! | [`lantern`]   | Sky lanterns with a timed float and fade               |
//! | [`game`]      | Trivia questions awarding persisted stars              |
//! | [`music`]     | Play/pause toggle over an audio sink                   |
//! | [`cards`]     | Flip cards                                             |
//!
//! State that outlives the page (wishes, stars) goes through a
//! [`KeyValueStore`], passed to the widget on every call that touches it.
//!
//! ## Example
//!
//! ```rust
//! use celebration_site::{MemoryStore, WishBoard, WISHES_KEY, WISH_LIMIT};
//!
//! let mut store = MemoryStore::new();
//! let mut board = WishBoard::open(&store, WISHES_KEY, WISH_LIMIT);
//! board.submit(&mut store, "阿明", "生日快乐", 0).unwrap();
//!
//! let reopened = WishBoard::open(&store, WISHES_KEY, WISH_LIMIT);
//! assert_eq!(reopened.wishes().len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cards;
pub mod config;
pub mod countdown;
pub mod error;
pub mod game;
pub mod lantern;
pub mod lunar;
pub mod map;
pub mod music;
pub mod nav;
pub mod storage;
pub mod text;
pub mod wishes;

pub use cards::FlipCards;
pub use config::{
    BirthdayRule, LanternConfig, SiteConfig, DEFAULT_LANTERN_WISH, STARS_KEY, WISHES_KEY, WISH_LIMIT,
};
pub use countdown::{Countdown, CountdownCell, CountdownView, Remaining};
pub use error::{SiteError, SiteResult};
pub use game::{AnswerOutcome, Question, TriviaGame};
pub use lantern::{Lantern, LanternPhase, LanternStage, LanternTag};
pub use lunar::{ChineseCalendar, LunarDate, LunarFinder, LunarFormatter, LunarText};
pub use map::{MapBubble, MapPin};
pub use music::{AudioSink, MusicToggle};
pub use nav::NavMenu;
pub use storage::{read_state, write_state, FileStore, KeyValueStore, MemoryStore};
pub use text::{format_timestamp, format_timestamp_in, sanitize_html};
pub use wishes::{Wish, WishBoard, WishCard};
