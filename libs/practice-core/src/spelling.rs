//! Spelling practice work queue.
//!
//! Each card must be spelled correctly once to leave the queue. A miss keeps
//! the card and moves the cursor on, so the card comes around again.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::card_set::CardSet;
use crate::error::{PracticeError, Result};
use crate::matching::{check_spelling, SpellingCheck};
use crate::types::{Attempt, Flashcard};

pub const CORRECT_MESSAGE: &str = "Correct!";

/// Message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

impl Feedback {
    fn correct() -> Self {
        Self {
            correct: true,
            message: CORRECT_MESSAGE.to_string(),
        }
    }

    fn incorrect(word: &str) -> Self {
        Self {
            correct: false,
            message: format!("Incorrect. The correct word is: {}", word.trim()),
        }
    }
}

/// What the learner sees for the current card: the meaning, never the word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingPrompt {
    pub card_id: String,
    pub translation: String,
    pub definition: String,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingOutcome {
    pub check: SpellingCheck,
    pub attempt: Attempt,
    pub feedback: Feedback,
}

#[derive(Debug, Clone)]
pub struct SpellingSession {
    queue: Vec<Flashcard>,
    cursor: usize,
    feedback: Option<Feedback>,
}

impl SpellingSession {
    /// Start on the handed-off selection, or on the whole card set when the
    /// selection is absent or empty.
    pub fn start(selected: Option<Vec<Flashcard>>, all: &CardSet) -> Result<Self> {
        let queue = match selected {
            Some(cards) if !cards.is_empty() => cards,
            _ => all.cards().to_vec(),
        };
        if queue.is_empty() {
            return Err(PracticeError::EmptyDeck);
        }
        Ok(Self {
            queue,
            cursor: 0,
            feedback: None,
        })
    }

    /// Check `raw_input` against the current card's word.
    pub fn submit(&mut self, raw_input: &str, now: DateTime<Utc>) -> Result<SpellingOutcome> {
        let card = self.current().ok_or(PracticeError::NoCurrentCard)?;
        let check = check_spelling(raw_input, &card.word);
        let attempt = Attempt::for_card(card, check.is_correct, now);
        let word = card.word.clone();

        let feedback = if check.is_correct {
            self.queue.remove(self.cursor);
            if self.queue.is_empty() || self.cursor >= self.queue.len() {
                self.cursor = 0;
            }
            Feedback::correct()
        } else {
            self.cursor = (self.cursor + 1) % self.queue.len();
            Feedback::incorrect(&word)
        };

        self.feedback = Some(feedback.clone());
        Ok(SpellingOutcome {
            check,
            attempt,
            feedback,
        })
    }

    /// Move on without recording anything.
    pub fn skip(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.queue.len();
        self.feedback = None;
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.queue.get(self.cursor)
    }

    pub fn prompt(&self) -> Option<SpellingPrompt> {
        self.current().map(|card| SpellingPrompt {
            card_id: card.id.clone(),
            translation: card.translation_or_placeholder().to_string(),
            definition: card.definition_or_placeholder().to_string(),
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> &[Flashcard] {
        &self.queue
    }

    /// True once every card has been spelled correctly.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }
}
