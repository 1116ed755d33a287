//! # Page Events
//!
//! Everything a visitor can do, as the host forwards it to [`crate::Page`].
//!
//! ```text
//! host input ──► PageEvent ──► Page::handle ──► widget ──► Reaction
//! ```
//!
//! An event aimed at an element the page doesn't have comes back as
//! [`Reaction::Ignored`].

use celebration_site::{AnswerOutcome, Wish};

/// User input forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Menu button pressed.
    NavToggle,
    /// A menu link was followed.
    NavLink,

    // =========================================================================
    // Fireworks
    // =========================================================================
    /// Firework trigger clicked at surface-relative coordinates.
    FireworkClick {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Viewport resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },

    // =========================================================================
    // Map
    // =========================================================================
    /// A map pin was clicked.
    PinClicked(usize),
    /// The info bubble's close button was pressed.
    BubbleClosed,

    // =========================================================================
    // Wish board, game, music
    // =========================================================================
    /// Wish form submitted.
    WishSubmitted {
        /// Name field.
        name: String,
        /// Message field.
        message: String,
    },
    /// Trivia option picked.
    AnswerChosen(usize),
    /// Trivia restarted from the first question.
    GameRestart,
    /// Music button pressed.
    MusicToggled,

    // =========================================================================
    // Lanterns and cards
    // =========================================================================
    /// Lantern wish tag clicked.
    LanternTagSelected(usize),
    /// Lantern launch button clicked.
    LanternLaunch,
    /// Key pressed while the launch button has focus.
    LanternKey(String),
    /// A flip card was clicked.
    CardClicked(usize),
}

/// What the page did in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// The target element is absent or the input was not actionable.
    Ignored,
    /// Menu visibility changed; carries the new `aria-expanded` value.
    NavExpanded(&'static str),
    /// Menu closed after a link was followed.
    NavClosed,
    /// A burst was added to the firework session.
    FireworksLaunched,
    /// Surface resized.
    Resized,
    /// Info bubble shows the clicked pin.
    BubbleShown,
    /// Info bubble hidden.
    BubbleHidden,
    /// A wish was stored.
    WishAdded(Wish),
    /// The trivia game answered.
    Answer(AnswerOutcome),
    /// Trivia back at the first question.
    GameRestarted,
    /// Music state after the toggle.
    Music(bool),
    /// Lantern stage now carries this wish.
    LanternWish(String),
    /// A lantern with this id was released.
    LanternLaunched(u64),
    /// Card flip state after the click.
    CardFlipped(bool),
}
