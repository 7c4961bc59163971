//! Per-session attempt bookkeeping.
//!
//! Only the first submission for a card counts. Recorded attempts and elapsed
//! seconds also go into an outbox that is drained into submissions for the
//! stats sink, so each attempt is sent at most once.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Attempt, StatsSubmission};

/// Session-local statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub elapsed_seconds: u64,
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Clone, Default)]
pub struct AttemptLedger {
    seen: HashSet<String>,
    stats: SessionStats,
    unsent_attempts: Vec<Attempt>,
    unsent_seconds: u64,
}

impl AttemptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `attempt` unless its card already has one. Returns whether it was recorded.
    pub fn record(&mut self, attempt: Attempt) -> bool {
        if !self.seen.insert(attempt.card_id.clone()) {
            return false;
        }
        self.unsent_attempts.push(attempt.clone());
        self.stats.attempts.push(attempt);
        true
    }

    /// One second of practice time.
    pub fn tick(&mut self) {
        self.stats.elapsed_seconds += 1;
        self.unsent_seconds += 1;
    }

    pub fn has_recorded(&self, card_id: &str) -> bool {
        self.seen.contains(card_id)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn has_pending(&self) -> bool {
        self.unsent_seconds > 0 || !self.unsent_attempts.is_empty()
    }

    /// Unsent time and attempts, without draining them.
    pub fn pending(&self) -> StatsSubmission {
        StatsSubmission {
            time_spent: self.unsent_seconds,
            words_practiced: self.unsent_attempts.clone(),
        }
    }

    /// Drain everything not yet handed to the sink.
    pub fn take_submission(&mut self) -> Option<StatsSubmission> {
        if !self.has_pending() {
            return None;
        }
        Some(StatsSubmission {
            time_spent: std::mem::take(&mut self.unsent_seconds),
            words_practiced: std::mem::take(&mut self.unsent_attempts),
        })
    }

    /// Forget everything, including which cards were seen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
