//! Answer matching for spelling practice.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed word to the card's word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingCheck {
    /// Whether the typed word matches.
    pub is_correct: bool,
    /// Normalized typed word.
    pub typed_normalized: String,
    /// Normalized target word.
    pub target_normalized: String,
}

/// Trim surrounding whitespace and case-fold.
pub fn normalize_spelling(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compare a typed word to the target word after normalizing both sides.
pub fn check_spelling(typed: &str, target: &str) -> SpellingCheck {
    let typed_normalized = normalize_spelling(typed);
    let target_normalized = normalize_spelling(target);
    SpellingCheck {
        is_correct: typed_normalized == target_normalized,
        typed_normalized,
        target_normalized,
    }
}
