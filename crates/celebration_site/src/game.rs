//! # Trivia Game
//!
//! A fixed list of multiple-choice questions. Each correct answer awards a
//! star; collected stars are persisted so they survive reloads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};
use crate::storage::{read_state, write_state, KeyValueStore};

/// One question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text.
    pub prompt: String,
    /// Answer choices.
    pub options: Vec<String>,
    /// Index of the correct choice.
    pub answer: usize,
    /// Star awarded for answering correctly.
    pub reward: String,
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Right answer; the game moved on.
    Correct {
        /// Star id of the question.
        reward: String,
        /// False if the star was already collected on an earlier visit.
        newly_collected: bool,
    },
    /// Wrong answer; the question stays.
    Wrong,
    /// No questions left.
    Finished,
}

/// Game progress plus the collected stars.
#[derive(Debug, Clone)]
pub struct TriviaGame {
    key: String,
    questions: Vec<Question>,
    current: usize,
    stars: BTreeSet<String>,
}

impl TriviaGame {
    /// Starts at the first question with stars loaded from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidInput`] if a question's answer index is
    /// out of range.
    pub fn open<S: KeyValueStore + ?Sized>(
        store: &S,
        key: impl Into<String>,
        questions: Vec<Question>,
    ) -> SiteResult<Self> {
        if let Some(bad) = questions.iter().find(|q| q.answer >= q.options.len()) {
            return Err(SiteError::InvalidInput(format!(
                "question {:?} has answer {} but {} options",
                bad.prompt,
                bad.answer,
                bad.options.len()
            )));
        }

        let key = key.into();
        let stars: BTreeSet<String> = read_state(store, &key, BTreeSet::new());
        tracing::debug!("trivia loaded with {} stars", stars.len());
        Ok(Self {
            key,
            questions,
            current: 0,
            stars,
        })
    }

    /// Question awaiting an answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Picks option `choice` for the current question.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidInput`] for a choice outside the options,
    /// or the store's error if persisting a new star fails.
    pub fn answer<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        choice: usize,
    ) -> SiteResult<AnswerOutcome> {
        let Some(question) = self.questions.get(self.current) else {
            return Ok(AnswerOutcome::Finished);
        };
        if choice >= question.options.len() {
            return Err(SiteError::InvalidInput(format!(
                "choice {choice} out of {} options",
                question.options.len()
            )));
        }
        if choice != question.answer {
            return Ok(AnswerOutcome::Wrong);
        }

        let reward = question.reward.clone();
        let newly_collected = !self.stars.contains(&reward);
        if newly_collected {
            let mut next = self.stars.clone();
            next.insert(reward.clone());
            write_state(store, &self.key, &next)?;
            self.stars = next;
            tracing::info!("star {reward} collected ({} total)", self.stars.len());
        }
        self.current += 1;

        Ok(AnswerOutcome::Correct {
            reward,
            newly_collected,
        })
    }

    /// Collected stars, sorted.
    pub fn stars(&self) -> impl Iterator<Item = &str> {
        self.stars.iter().map(String::as_str)
    }

    /// Number of collected stars.
    #[must_use]
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// True once every question has been answered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Back to the first question. Stars are kept.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
