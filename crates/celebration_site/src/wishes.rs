//! # Wish Board
//!
//! Visitors leave a name and a message. Wishes are stored newest first
//! under one key and capped at a fixed count.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SiteResult;
use crate::storage::{read_state, write_state, KeyValueStore};
use crate::text::{format_timestamp_in, sanitize_html};

/// A stored wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    /// Unique id.
    pub id: String,
    /// Visitor name, trimmed.
    pub name: String,
    /// Message, trimmed.
    pub message: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Escaped display form of a wish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishCard {
    /// Escaped name.
    pub name: String,
    /// `MM-DD HH:MM`.
    pub when: String,
    /// Escaped message.
    pub message: String,
}

impl WishCard {
    /// Inner HTML of the card element.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{} <small>&#x00B7; {}</small></strong>\n<p>{}</p>",
            self.name, self.when, self.message
        )
    }
}

/// The wish list shown on the page.
#[derive(Debug, Clone)]
pub struct WishBoard {
    key: String,
    limit: usize,
    wishes: Vec<Wish>,
}

impl WishBoard {
    /// Loads stored wishes from `store`.
    pub fn open<S: KeyValueStore + ?Sized>(store: &S, key: impl Into<String>, limit: usize) -> Self {
        let key = key.into();
        let wishes: Vec<Wish> = read_state(store, &key, Vec::new());
        tracing::debug!("wish board loaded {} wishes", wishes.len());
        Self { key, limit, wishes }
    }

    /// Form submitted. Blank names or messages are ignored.
    ///
    /// The new wish goes in front of whatever the store currently holds,
    /// the list is cut to the limit and written back.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails; the board is unchanged.
    pub fn submit<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: &str,
        message: &str,
        now_ms: i64,
    ) -> SiteResult<Option<Wish>> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() || message.is_empty() {
            return Ok(None);
        }

        let wish = Wish {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            message: message.to_owned(),
            timestamp: now_ms,
        };

        let mut next: Vec<Wish> = read_state(&*store, &self.key, Vec::new());
        next.insert(0, wish.clone());
        next.truncate(self.limit);
        write_state(store, &self.key, &next)?;

        self.wishes = next;
        Ok(Some(wish))
    }

    /// Wishes, newest first.
    #[must_use]
    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    /// Display cards with times in `tz`.
    #[must_use]
    pub fn cards_in<Tz>(&self, tz: &Tz) -> Vec<WishCard>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.wishes
            .iter()
            .map(|wish| WishCard {
                name: sanitize_html(&wish.name),
                when: format_timestamp_in(wish.timestamp, tz),
                message: sanitize_html(&wish.message),
            })
            .collect()
    }

    /// Display cards in local time.
    #[must_use]
    pub fn cards(&self) -> Vec<WishCard> {
        self.cards_in(&chrono::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    const KEY: &str = "wishes";

    #[test]
    fn test_blank_fields_are_ignored() {
        let mut store = MemoryStore::new();
        let mut board = WishBoard::open(&store, KEY, 30);

        assert_eq!(board.submit(&mut store, "   ", "hi", 0).unwrap(), None);
        assert_eq!(board.submit(&mut store, "小王", "\n\t", 0).unwrap(), None);
        assert!(store.is_empty());
        assert!(board.wishes().is_empty());
    }

    #[test]
    fn test_submit_trims_prepends_and_persists() {
        let mut store = MemoryStore::new();
        let mut board = WishBoard::open(&store, KEY, 30);

        let first = board.submit(&mut store, " 阿明 ", " 生日快乐 ", 1_000).unwrap().unwrap();
        let second = board.submit(&mut store, "Lin", "Have a great year", 2_000).unwrap().unwrap();

        assert_eq!(first.name, "阿明");
        assert_eq!(first.message, "生日快乐");
        assert_ne!(first.id, second.id);
        assert_eq!(board.wishes(), &[second.clone(), first.clone()]);

        let reopened = WishBoard::open(&store, KEY, 30);
        assert_eq!(reopened.wishes(), &[second, first]);
    }

    #[test]
    fn test_list_is_capped() {
        let mut store = MemoryStore::new();
        let mut board = WishBoard::open(&store, KEY, 3);
        for i in 0..5 {
            board.submit(&mut store, "n", &format!("m{i}"), i).unwrap();
        }

        let messages: Vec<_> = board.wishes().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, ["m4", "m3", "m2"]);
    }

    #[test]
    fn test_cards_are_escaped() {
        let mut store = MemoryStore::new();
        let mut board = WishBoard::open(&store, KEY, 30);
        board
            .submit(&mut store, "<b>x</b>", "a & b", 1_730_507_400_000)
            .unwrap();

        let cards = board.cards_in(&Utc);
        assert_eq!(cards[0].name, "&lt;b&gt;x&lt;/b&gt;");
        assert_eq!(
            cards[0].to_html(),
            "<strong>&lt;b&gt;x&lt;/b&gt; <small>&#x00B7; 11-02 00:30</small></strong>\n<p>a &amp; b</p>"
        );
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(KEY, "[{\"id\": 3}]").unwrap();
        let board = WishBoard::open(&store, KEY, 30);
        assert!(board.wishes().is_empty());
    }
}
