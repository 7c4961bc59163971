//! Type-then-reveal review over a hand-picked subset.

use serde::Serialize;

use crate::error::{PracticeError, Result};
use crate::types::Flashcard;

#[derive(Debug, Clone)]
pub struct RecallSession {
    deck: Vec<Flashcard>,
    index: usize,
    answer: Option<String>,
}

/// The current card as shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallView {
    pub position: usize,
    pub total: usize,
    pub card_id: String,
    pub word: String,
    pub answer: Option<String>,
    /// Present once the learner has answered.
    pub translation: Option<String>,
    pub definition: Option<String>,
}

impl RecallSession {
    /// Requires at least one selected card.
    pub fn start(selected: Vec<Flashcard>) -> Result<Self> {
        if selected.is_empty() {
            return Err(PracticeError::EmptySelection);
        }
        Ok(Self {
            deck: selected,
            index: 0,
            answer: None,
        })
    }

    /// Record the learner's answer and reveal the meaning.
    pub fn submit(&mut self, answer: &str) {
        self.answer = Some(answer.to_string());
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.deck.len();
        self.answer = None;
    }

    pub fn previous(&mut self) {
        self.index = (self.index + self.deck.len() - 1) % self.deck.len();
        self.answer = None;
    }

    pub fn is_revealed(&self) -> bool {
        self.answer.is_some()
    }

    pub fn current(&self) -> &Flashcard {
        &self.deck[self.index]
    }

    pub fn view(&self) -> RecallView {
        let card = self.current();
        let revealed = self.is_revealed();
        RecallView {
            position: self.index + 1,
            total: self.deck.len(),
            card_id: card.id.clone(),
            word: card.word.clone(),
            answer: self.answer.clone(),
            translation: revealed.then(|| card.translation_or_placeholder().to_string()),
            definition: revealed.then(|| card.definition_or_placeholder().to_string()),
        }
    }
}
