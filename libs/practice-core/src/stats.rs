//! Statistics rollups for session and historical display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{group_or_default, Attempt, HistoricalStats, StatsSubmission};

/// Correct/incorrect counts for one group, with their shares of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub incorrect_percent: u32,
}

impl GroupStats {
    fn add(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.accuracy_percent = percent(self.correct, self.total);
        self.incorrect_percent = percent(self.incorrect, self.total);
    }
}

/// Aggregate over an attempt sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup {
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub incorrect_percent: u32,
    pub per_group: BTreeMap<String, GroupStats>,
}

/// Fold attempts into totals and per-group counts. Empty input gives 0%.
pub fn rollup(attempts: &[Attempt]) -> Rollup {
    let mut totals = GroupStats::default();
    let mut per_group: BTreeMap<String, GroupStats> = BTreeMap::new();

    for attempt in attempts {
        totals.add(attempt.correct);
        per_group
            .entry(group_or_default(Some(&attempt.group)))
            .or_default()
            .add(attempt.correct);
    }

    Rollup {
        total_correct: totals.correct,
        total_incorrect: totals.incorrect,
        total: totals.total,
        accuracy_percent: totals.accuracy_percent,
        incorrect_percent: totals.incorrect_percent,
        per_group,
    }
}

/// `round(100 * part / whole)` with halves rounded up, 0 for an empty whole.
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 200 + u64::from(whole);
    (scaled / (2 * u64::from(whole))) as u32
}

/// Render seconds as `"{h}h {m}m {s}s"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours}h {minutes}m {secs}s")
}

/// Historical display model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRollup {
    pub total_time: u64,
    pub formatted_time: String,
    #[serde(flatten)]
    pub rollup: Rollup,
}

/// Combines the latest fetched history with attempts recorded locally but
/// not yet sent.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    snapshot: HistoricalStats,
    unsent: Vec<StatsSubmission>,
}

impl StatsAggregator {
    pub fn from_snapshot(snapshot: HistoricalStats) -> Self {
        Self {
            snapshot,
            unsent: Vec::new(),
        }
    }

    pub fn include_unsent(&mut self, submission: StatsSubmission) {
        if !submission.is_empty() {
            self.unsent.push(submission);
        }
    }

    pub fn display(&self) -> HistoricalRollup {
        let total_time = self.snapshot.total_time
            + self.unsent.iter().map(|s| s.time_spent).sum::<u64>();
        let attempts: Vec<Attempt> = self
            .snapshot
            .words_practiced
            .iter()
            .chain(self.unsent.iter().flat_map(|s| s.words_practiced.iter()))
            .cloned()
            .collect();

        HistoricalRollup {
            total_time,
            formatted_time: format_duration(total_time),
            rollup: rollup(&attempts),
        }
    }
}
