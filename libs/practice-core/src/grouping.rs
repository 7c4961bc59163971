//! Grouping and ordering of flashcards for list presentation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{PracticeError, Result};
use crate::types::{group_or_default, Flashcard, SortOption};

/// Cards of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroup {
    pub name: String,
    pub cards: Vec<Flashcard>,
}

/// Cards partitioned by group name. Groups iterate in lexicographic order,
/// members in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: BTreeMap<String, Vec<Flashcard>>,
}

/// Cards affected by renaming a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePlan {
    pub from: String,
    pub to: String,
    pub card_ids: Vec<String>,
}

impl GroupIndex {
    pub fn build(cards: &[Flashcard]) -> Self {
        Self {
            groups: group_by(cards),
        }
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn members(&self, group: &str) -> &[Flashcard] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in name order with their members ordered by `option`.
    pub fn sorted(&self, option: SortOption) -> Vec<CardGroup> {
        self.groups
            .iter()
            .map(|(name, cards)| CardGroup {
                name: name.clone(),
                cards: sort_cards(cards, option),
            })
            .collect()
    }

    /// Validate a rename and list the cards it touches.
    pub fn plan_rename(&self, from: &str, to: &str) -> Result<RenamePlan> {
        let to = to.trim();
        if to.is_empty() {
            return Err(PracticeError::EmptyGroupName);
        }
        let members = self
            .groups
            .get(from)
            .ok_or_else(|| PracticeError::UnknownGroup {
                name: from.to_string(),
            })?;
        if to == from {
            return Err(PracticeError::UnchangedGroupName {
                name: from.to_string(),
            });
        }
        if self.groups.contains_key(to) {
            return Err(PracticeError::DuplicateGroup {
                name: to.to_string(),
            });
        }

        Ok(RenamePlan {
            from: from.to_string(),
            to: to.to_string(),
            card_ids: members.iter().map(|card| card.id.clone()).collect(),
        })
    }
}

/// Partition cards by group, defaulting blank groups to "Ungrouped".
pub fn group_by(cards: &[Flashcard]) -> BTreeMap<String, Vec<Flashcard>> {
    let mut groups: BTreeMap<String, Vec<Flashcard>> = BTreeMap::new();
    for card in cards {
        groups
            .entry(group_or_default(Some(&card.group)))
            .or_default()
            .push(card.clone());
    }
    groups
}

/// Return a sorted copy of `cards`. Stable: equal keys keep input order.
pub fn sort_cards(cards: &[Flashcard], option: SortOption) -> Vec<Flashcard> {
    let mut sorted = cards.to_vec();
    match option {
        SortOption::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::Az => sorted.sort_by(|a, b| compare_words(&a.word, &b.word)),
        SortOption::Za => sorted.sort_by(|a, b| compare_words(&b.word, &a.word)),
    }
    sorted
}

/// Locale-style word comparison: accents and case only break ties.
pub fn compare_words(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(word: &str) -> String {
    word.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
