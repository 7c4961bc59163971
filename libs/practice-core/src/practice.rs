//! Practice session objects.
//!
//! A [`PracticeSession`] is created when a practice view starts and dropped
//! when it is left. It binds one mode state machine to its attempt ledger and
//! random source; nothing is shared between sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::card_set::CardSet;
use crate::error::{PracticeError, Result};
use crate::flip::{FlipState, FlipStateMachine};
use crate::ledger::AttemptLedger;
use crate::random::RandomSource;
use crate::recall::{RecallSession, RecallView};
use crate::spelling::{Feedback, SpellingPrompt, SpellingSession};
use crate::stats::{format_duration, rollup, Rollup};
use crate::types::{Face, Flashcard, PracticeMode, StatsSubmission};

enum ModeState {
    Flip(FlipStateMachine),
    Spelling(SpellingSession),
    Recall(RecallSession),
}

impl ModeState {
    fn mode(&self) -> PracticeMode {
        match self {
            Self::Flip(_) => PracticeMode::Flip,
            Self::Spelling(_) => PracticeMode::Spelling,
            Self::Recall(_) => PracticeMode::Recall,
        }
    }
}

/// Snapshot of the mode's current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeView {
    #[serde(rename_all = "camelCase")]
    Flip {
        state: FlipState,
        visible_face: Face,
        card: Flashcard,
        position: usize,
        total: usize,
    },
    #[serde(rename_all = "camelCase")]
    Spelling {
        prompt: Option<SpellingPrompt>,
        remaining: usize,
        feedback: Option<Feedback>,
        complete: bool,
    },
    Recall(RecallView),
}

/// Result of a submit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmitOutcome {
    #[serde(rename_all = "camelCase")]
    Spelling {
        feedback: Feedback,
        /// False when an earlier submission for this card already counted.
        recorded: bool,
        remaining: usize,
        complete: bool,
    },
    Recall(RecallView),
}

/// Session aggregate, shown live and on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub mode: PracticeMode,
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: u64,
    pub formatted_time: String,
    pub complete: bool,
    #[serde(flatten)]
    pub rollup: Rollup,
}

pub struct PracticeSession {
    mode: ModeState,
    ledger: AttemptLedger,
    rng: Box<dyn RandomSource>,
    started_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Start a session on `selected` cards, or on the whole card set when no
    /// selection was handed off.
    ///
    /// Flip and recall reject an empty selection; spelling falls back to the
    /// whole card set.
    pub fn start(
        mode: PracticeMode,
        cards: &CardSet,
        selected: Option<Vec<Flashcard>>,
        mut rng: Box<dyn RandomSource>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let state = match mode {
            PracticeMode::Spelling => ModeState::Spelling(SpellingSession::start(selected, cards)?),
            PracticeMode::Flip => {
                let deck = Self::deck_for(cards, selected)?;
                ModeState::Flip(FlipStateMachine::mount(deck, rng.as_mut())?)
            }
            PracticeMode::Recall => {
                let deck = Self::deck_for(cards, selected)?;
                ModeState::Recall(RecallSession::start(deck)?)
            }
        };

        Ok(Self {
            mode: state,
            ledger: AttemptLedger::new(),
            rng,
            started_at: now,
        })
    }

    fn deck_for(cards: &CardSet, selected: Option<Vec<Flashcard>>) -> Result<Vec<Flashcard>> {
        match selected {
            Some(chosen) if chosen.is_empty() => Err(PracticeError::EmptySelection),
            Some(chosen) => Ok(chosen),
            None if cards.is_empty() => Err(PracticeError::EmptyDeck),
            None => Ok(cards.cards().to_vec()),
        }
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode.mode()
    }

    fn unsupported<T>(&self, action: &'static str) -> Result<T> {
        Err(PracticeError::UnsupportedAction {
            action,
            mode: self.mode().as_str(),
        })
    }

    pub fn flip(&mut self) -> Result<()> {
        if let ModeState::Flip(machine) = &mut self.mode {
            machine.flip();
            return Ok(());
        }
        self.unsupported("flip")
    }

    pub fn next(&mut self) -> Result<()> {
        match &mut self.mode {
            ModeState::Flip(machine) => machine.next(self.rng.as_mut()),
            ModeState::Recall(recall) => recall.next(),
            ModeState::Spelling(_) => return self.unsupported("next"),
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        match &mut self.mode {
            ModeState::Flip(machine) => machine.previous(self.rng.as_mut()),
            ModeState::Recall(recall) => recall.previous(),
            ModeState::Spelling(_) => return self.unsupported("previous"),
        }
        Ok(())
    }

    pub fn shuffle(&mut self) -> Result<()> {
        if let ModeState::Flip(machine) = &mut self.mode {
            machine.shuffle(self.rng.as_mut());
            return Ok(());
        }
        self.unsupported("shuffle")
    }

    /// Spelling: check the word and record the attempt. Recall: reveal the answer.
    pub fn submit(&mut self, input: &str, now: DateTime<Utc>) -> Result<SubmitOutcome> {
        match &mut self.mode {
            ModeState::Spelling(spelling) => {
                let outcome = spelling.submit(input, now)?;
                let recorded = self.ledger.record(outcome.attempt);
                Ok(SubmitOutcome::Spelling {
                    feedback: outcome.feedback,
                    recorded,
                    remaining: spelling.remaining(),
                    complete: spelling.is_complete(),
                })
            }
            ModeState::Recall(recall) => {
                recall.submit(input);
                Ok(SubmitOutcome::Recall(recall.view()))
            }
            ModeState::Flip(_) => self.unsupported("submit"),
        }
    }

    pub fn skip(&mut self) -> Result<()> {
        if let ModeState::Spelling(spelling) = &mut self.mode {
            spelling.skip();
            return Ok(());
        }
        self.unsupported("skip")
    }

    /// One second of elapsed time.
    pub fn tick(&mut self) {
        self.ledger.tick();
    }

    pub fn ledger(&self) -> &AttemptLedger {
        &self.ledger
    }

    pub fn take_submission(&mut self) -> Option<StatsSubmission> {
        self.ledger.take_submission()
    }

    pub fn pending_submission(&self) -> StatsSubmission {
        self.ledger.pending()
    }

    /// Forget recorded attempts and dedup state after history was reset.
    pub fn reset_ledger(&mut self) {
        self.ledger.reset();
    }

    pub fn is_complete(&self) -> bool {
        match &self.mode {
            ModeState::Spelling(spelling) => spelling.is_complete(),
            _ => false,
        }
    }

    pub fn view(&self) -> ModeView {
        match &self.mode {
            ModeState::Flip(machine) => ModeView::Flip {
                state: machine.state(),
                visible_face: machine.visible_face(),
                card: machine.current().clone(),
                position: machine.position(),
                total: machine.len(),
            },
            ModeState::Spelling(spelling) => ModeView::Spelling {
                prompt: spelling.prompt(),
                remaining: spelling.remaining(),
                feedback: spelling.feedback().cloned(),
                complete: spelling.is_complete(),
            },
            ModeState::Recall(recall) => ModeView::Recall(recall.view()),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let stats = self.ledger.stats();
        SessionSummary {
            mode: self.mode(),
            started_at: self.started_at,
            elapsed_seconds: stats.elapsed_seconds,
            formatted_time: format_duration(stats.elapsed_seconds),
            complete: self.is_complete(),
            rollup: rollup(&stats.attempts),
        }
    }
}
