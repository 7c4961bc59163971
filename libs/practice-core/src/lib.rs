//! Vocabulary practice engine shared by the practice server and its tests.
//!
//! Provides:
//! - Card sets, group indexing and list sorting
//! - Selection of cards across groups
//! - Flip, spelling and recall practice state machines
//! - Attempt bookkeeping and statistics rollups
//! - Seedable randomness for shuffles and face draws

pub mod card_set;
pub mod error;
pub mod flip;
pub mod grouping;
pub mod ledger;
pub mod matching;
pub mod practice;
pub mod random;
pub mod recall;
pub mod selection;
pub mod spelling;
pub mod stats;
pub mod types;

pub use card_set::CardSet;
pub use error::{ErrorKind, PracticeError, Result};
pub use flip::{FlipState, FlipStateMachine};
pub use grouping::{compare_words, group_by, sort_cards, CardGroup, GroupIndex, RenamePlan};
pub use ledger::{AttemptLedger, SessionStats};
pub use matching::{check_spelling, normalize_spelling, SpellingCheck};
pub use practice::{ModeView, PracticeSession, SessionSummary, SubmitOutcome};
pub use random::{shuffle_with, RandomSource, SeededRandom};
pub use recall::{RecallSession, RecallView};
pub use selection::SelectionSet;
pub use spelling::{Feedback, SpellingOutcome, SpellingPrompt, SpellingSession};
pub use stats::{format_duration, percent, rollup, GroupStats, HistoricalRollup, Rollup, StatsAggregator};
pub use types::{
    group_or_default, Attempt, Face, Flashcard, HistoricalStats, PracticeMode, SortOption,
    StatsSubmission, DEFAULT_GROUP,
};
