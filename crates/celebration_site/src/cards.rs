//! Flip cards.

/// Front/back state of a row of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipCards {
    flipped: Vec<bool>,
}

impl FlipCards {
    /// Creates `count` cards, all showing their front.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            flipped: vec![false; count],
        }
    }

    /// Card clicked. Returns the new state, or `None` for an unknown card.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let card = self.flipped.get_mut(index)?;
        *card = !*card;
        Some(*card)
    }

    /// Returns true if the card shows its back.
    #[must_use]
    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.get(index).copied().unwrap_or(false)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flipped.len()
    }

    /// Returns true if there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flipped.is_empty()
    }
}
