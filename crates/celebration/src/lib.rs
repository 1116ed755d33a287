//! # Celebration
//!
//! The birthday page, assembled from its widgets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         PAGE                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PageEvent ──► Page::handle ──► celebration_site widgets    │
//! │                     │                  │                    │
//! │                     ▼                  ▼                    │
//! │           celebration_fireworks   KeyValueStore             │
//! │           (stage + session)       (wishes, stars)           │
//! │                     ▲                                       │
//! │  Page::tick ────────┘  countdown, lanterns, intro burst     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: one TOML file for the page, fireworks and widgets
//! - `events`: input events and the page's reactions
//! - `page`: widget wiring

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod page;

pub use celebration_fireworks as fireworks;
pub use celebration_site as site;

pub use config::PageConfig;
pub use error::{PageError, PageResult};
pub use events::{PageEvent, Reaction};
pub use page::{Page, PageElements, TickReport};
