//! Core types for the practice engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Group assigned to cards that carry no group of their own.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// Resolve a raw group label, falling back to [`DEFAULT_GROUP`] when blank or absent.
pub fn group_or_default(raw: Option<&str>) -> String {
    match raw {
        Some(group) if !group.trim().is_empty() => group.to_string(),
        _ => DEFAULT_GROUP.to_string(),
    }
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

fn deserialize_group<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(group_or_default(raw.as_deref()))
}

/// A vocabulary flashcard as served by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    #[serde(alias = "_id")]
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default = "default_group", deserialize_with = "deserialize_group")]
    pub group: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    /// Create an ungrouped card.
    pub fn new(
        id: impl Into<String>,
        word: impl Into<String>,
        translation: impl Into<String>,
        definition: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            translation: translation.into(),
            definition: definition.into(),
            group: default_group(),
            created_at,
        }
    }

    /// Same card placed in `group` (blank means ungrouped).
    pub fn in_group(mut self, group: &str) -> Self {
        self.group = group_or_default(Some(group));
        self
    }

    /// Translation, or the placeholder shown when the card has none.
    pub fn translation_or_placeholder(&self) -> &str {
        if self.translation.trim().is_empty() {
            "No translation available"
        } else {
            &self.translation
        }
    }

    /// Definition, or the placeholder shown when the card has none.
    pub fn definition_or_placeholder(&self) -> &str {
        if self.definition.trim().is_empty() {
            "No definition available"
        } else {
            &self.definition
        }
    }
}

/// Which side of a card faces the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Word,
    Meaning,
}

impl Face {
    pub fn other(self) -> Self {
        match self {
            Self::Word => Self::Meaning,
            Self::Meaning => Self::Word,
        }
    }
}

/// List ordering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    Az,
    Za,
}

impl SortOption {
    /// Get the option name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Az => "az",
            Self::Za => "za",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "az" => Some(Self::Az),
            "za" => Some(Self::Za),
            _ => None,
        }
    }
}

/// Practice modes offered to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    Flip,
    Spelling,
    Recall,
}

impl PracticeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Spelling => "spelling",
            Self::Recall => "recall",
        }
    }
}

/// Outcome of one spelling submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub card_id: String,
    #[serde(default = "default_group", deserialize_with = "deserialize_group")]
    pub group: String,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    pub fn for_card(card: &Flashcard, correct: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            card_id: card.id.clone(),
            group: group_or_default(Some(&card.group)),
            correct,
            timestamp,
        }
    }
}

/// Server-held practice history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalStats {
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub words_practiced: Vec<Attempt>,
}

/// Payload accepted by the attempt sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSubmission {
    pub time_spent: u64,
    pub words_practiced: Vec<Attempt>,
}

impl StatsSubmission {
    pub fn is_empty(&self) -> bool {
        self.time_spent == 0 && self.words_practiced.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flashcard_reads_remote_shape() {
        let json = r#"{
            "_id": "65f0",
            "word": "apple",
            "translation": "manzana",
            "definition": "a fruit",
            "group": "",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let card: Flashcard = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, "65f0");
        assert_eq!(card.group, DEFAULT_GROUP);
        assert_eq!(card.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn flashcard_without_group_is_ungrouped() {
        let json = r#"{"id": "1", "word": "pear", "group": null}"#;
        let card: Flashcard = serde_json::from_str(json).unwrap();
        assert_eq!(card.group, DEFAULT_GROUP);
        assert_eq!(card.translation_or_placeholder(), "No translation available");
        assert_eq!(card.definition_or_placeholder(), "No definition available");
    }

    #[test]
    fn sort_option_round_trips_names() {
        for option in [SortOption::Newest, SortOption::Oldest, SortOption::Az, SortOption::Za] {
            assert_eq!(SortOption::from_str(option.as_str()), Some(option));
        }
        assert_eq!(SortOption::from_str("random"), None);
        assert_eq!(SortOption::default(), SortOption::Newest);
    }

    #[test]
    fn submission_serializes_camel_case() {
        let submission = StatsSubmission {
            time_spent: 12,
            words_practiced: vec![],
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["timeSpent"], 12);
        assert!(value["wordsPracticed"].as_array().unwrap().is_empty());
    }

    #[test]
    fn face_other_is_involution() {
        assert_eq!(Face::Word.other(), Face::Meaning);
        assert_eq!(Face::Word.other().other(), Face::Word);
    }
}
