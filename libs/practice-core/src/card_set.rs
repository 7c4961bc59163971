//! The flashcards available to a session.

use std::collections::HashSet;

use serde::Serialize;

use crate::selection::SelectionSet;
use crate::types::{group_or_default, Flashcard};

/// Immutable, id-unique view of fetched flashcards in their fetched order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CardSet {
    cards: Vec<Flashcard>,
}

impl CardSet {
    /// Build a card set. Later cards repeating an earlier id are dropped.
    pub fn new(cards: Vec<Flashcard>) -> Self {
        let mut seen = HashSet::new();
        let cards = cards
            .into_iter()
            .filter(|card| seen.insert(card.id.clone()))
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids of the cards in `group`, in card set order.
    pub fn group_member_ids(&self, group: &str) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|card| group_or_default(Some(&card.group)) == group)
            .map(|card| card.id.as_str())
            .collect()
    }

    /// Hand-off of the chosen cards, in card set order.
    pub fn selected(&self, selection: &SelectionSet) -> Vec<Flashcard> {
        self.cards
            .iter()
            .filter(|card| selection.is_selected(&card.id))
            .cloned()
            .collect()
    }

    pub fn into_cards(self) -> Vec<Flashcard> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn card(id: &str, group: &str) -> Flashcard {
        Flashcard::new(id, id, "", "", Utc.timestamp_opt(0, 0).unwrap()).in_group(group)
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut second = card("a", "Later");
        second.word = "other".to_string();
        let set = CardSet::new(vec![card("a", "First"), card("b", ""), second]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a").unwrap().group, "First");
    }

    #[test]
    fn group_members_follow_set_order() {
        let set = CardSet::new(vec![card("a", "X"), card("b", "Y"), card("c", "X")]);
        assert_eq!(set.group_member_ids("X"), vec!["a", "c"]);
        assert!(set.group_member_ids("Z").is_empty());
    }

    #[test]
    fn selected_hand_off_uses_set_order() {
        let set = CardSet::new(vec![card("a", ""), card("b", ""), card("c", "")]);
        let mut selection = SelectionSet::for_cards(&set);
        selection.toggle("c");
        selection.toggle("a");
        let ids: Vec<String> = set.selected(&selection).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
