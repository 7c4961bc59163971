//! Error types for practice-core.

use thiserror::Error;

/// Result type alias using PracticeError.
pub type Result<T> = std::result::Result<T, PracticeError>;

/// Broad classification used by callers to pick a user-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
}

/// Errors raised by the practice engine.
///
/// Every failing operation leaves the state it was called on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PracticeError {
    #[error("No flashcards found.")]
    EmptyDeck,

    #[error("Please select at least one flashcard to practice.")]
    EmptySelection,

    #[error("group name cannot be empty")]
    EmptyGroupName,

    #[error("group not found: {name}")]
    UnknownGroup { name: String },

    #[error("group is already named {name}")]
    UnchangedGroupName { name: String },

    #[error("group name already in use: {name}")]
    DuplicateGroup { name: String },

    #[error("no card available")]
    NoCurrentCard,

    #[error("{action} is not available in {mode} mode")]
    UnsupportedAction {
        action: &'static str,
        mode: &'static str,
    },
}

impl PracticeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateGroup { .. } => ErrorKind::Duplicate,
            _ => ErrorKind::Validation,
        }
    }
}
