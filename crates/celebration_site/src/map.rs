//! Map pins and the popup bubble they open.

use serde::{Deserialize, Serialize};

/// A clickable place on the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPin {
    /// Bubble heading.
    pub title: String,
    /// Bubble body.
    pub message: String,
}

impl MapPin {
    /// Creates a pin.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The single popup shared by every pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapBubble {
    hidden: bool,
    title: String,
    message: String,
}

impl Default for MapBubble {
    fn default() -> Self {
        Self {
            hidden: true,
            title: String::new(),
            message: String::new(),
        }
    }
}

impl MapBubble {
    /// Creates a hidden bubble.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin clicked: copy its text and show the bubble.
    pub fn show(&mut self, pin: &MapPin) {
        self.title.clone_from(&pin.title);
        self.message.clone_from(&pin.message);
        self.hidden = false;
    }

    /// Close button clicked. The text stays for the next show.
    pub fn close(&mut self) {
        self.hidden = true;
    }

    /// Returns true while the bubble is hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Current heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
