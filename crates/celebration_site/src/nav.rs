//! Collapsible navigation menu.

/// Visibility state of the mobile navigation links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    visible: bool,
}

impl NavMenu {
    /// Creates a collapsed menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle button pressed. Returns the new `aria-expanded` value.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// A link inside the menu was followed; the menu collapses.
    pub fn link_clicked(&mut self) {
        self.visible = false;
    }

    /// Returns true while the links are shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Value for the toggle's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.visible {
            "true"
        } else {
            "false"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_link_collapse() {
        let mut nav = NavMenu::new();
        assert!(nav.toggle());
        assert_eq!(nav.aria_expanded(), "true");

        nav.link_clicked();
        assert!(!nav.is_visible());
        assert_eq!(nav.aria_expanded(), "false");

        assert!(nav.toggle());
        assert!(!nav.toggle());
    }
}
