//! Custom-session card selection.

use std::collections::{BTreeSet, HashSet};

use crate::card_set::CardSet;

/// Set of chosen card ids, constrained to the cards of one [`CardSet`].
///
/// No operation fails: ids outside the card set are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    known: HashSet<String>,
    selected: BTreeSet<String>,
}

impl SelectionSet {
    /// Empty selection over the cards of `cards`.
    pub fn for_cards(cards: &CardSet) -> Self {
        Self {
            known: cards.cards().iter().map(|card| card.id.clone()).collect(),
            selected: BTreeSet::new(),
        }
    }

    /// Flip membership of one card. Returns whether it is now selected.
    pub fn toggle(&mut self, card_id: &str) -> bool {
        if !self.known.contains(card_id) {
            return false;
        }
        if self.selected.remove(card_id) {
            false
        } else {
            self.selected.insert(card_id.to_string());
            true
        }
    }

    /// Deselect the group if all of its members are selected, otherwise select
    /// the members that are not yet selected. Returns whether the group is now
    /// fully selected.
    pub fn toggle_group<'a>(&mut self, members: impl IntoIterator<Item = &'a str>) -> bool {
        let members: Vec<&str> = members
            .into_iter()
            .filter(|id| self.known.contains(*id))
            .collect();
        if members.is_empty() {
            return false;
        }

        if members.iter().all(|id| self.selected.contains(*id)) {
            for id in members {
                self.selected.remove(id);
            }
            false
        } else {
            for id in members {
                self.selected.insert(id.to_string());
            }
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.selected.contains(card_id)
    }

    /// True when every known member of the group is selected and there is at least one.
    pub fn is_group_fully_selected<'a>(&self, members: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in members.into_iter().filter(|id| self.known.contains(*id)) {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Flashcard;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn set_of(ids: &[&str]) -> CardSet {
        let now = Utc::now();
        CardSet::new(
            ids.iter()
                .map(|id| Flashcard::new(*id, *id, "", "", now))
                .collect(),
        )
    }

    fn selected(selection: &SelectionSet) -> Vec<&str> {
        selection.ids().collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a", "b"]));
        assert!(selection.toggle("a"));
        assert_eq!(selection.count(), 1);
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a"]));
        assert!(!selection.toggle("zzz"));
        assert!(!selection.toggle_group(["zzz", "yyy"]));
        assert_eq!(selection.count(), 0);
    }

    #[test]
    fn partial_group_gets_completed() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a", "b", "c"]));
        selection.toggle("a");
        assert!(selection.toggle_group(["a", "b"]));
        assert_eq!(selected(&selection), vec!["a", "b"]);
    }

    #[test]
    fn full_group_gets_cleared() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a", "b", "c"]));
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");
        assert!(!selection.toggle_group(["a", "b"]));
        assert_eq!(selected(&selection), vec!["c"]);
    }

    #[test]
    fn toggle_group_twice_restores_group_membership() {
        let cards = set_of(&["a", "b", "c", "d"]);
        let group = ["b", "c", "d"];
        for preselected in [vec![], vec!["b"], vec!["b", "c", "d"], vec!["a", "c"]] {
            let mut selection = SelectionSet::for_cards(&cards);
            for id in &preselected {
                selection.toggle(id);
            }
            let before: Vec<bool> = group.iter().map(|id| selection.is_selected(id)).collect();
            let all_before = before.iter().all(|s| *s);

            selection.toggle_group(group);
            selection.toggle_group(group);

            let after: Vec<bool> = group.iter().map(|id| selection.is_selected(id)).collect();
            if all_before || before.iter().all(|s| !*s) {
                assert_eq!(after, before, "preselected {preselected:?}");
            } else {
                // A partial group is completed first, then cleared.
                assert!(after.iter().all(|s| !*s), "preselected {preselected:?}");
            }
            assert_eq!(selection.is_selected("a"), preselected.contains(&"a"));
        }
    }

    #[test]
    fn fully_selected_check() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a", "b"]));
        assert!(!selection.is_group_fully_selected(["a", "b"]));
        selection.toggle_group(["a", "b"]);
        assert!(selection.is_group_fully_selected(["a", "b"]));
        assert!(!selection.is_group_fully_selected(["nope"]));
    }

    #[test]
    fn clear_empties() {
        let mut selection = SelectionSet::for_cards(&set_of(&["a", "b"]));
        selection.toggle_group(["a", "b"]);
        selection.clear();
        assert_eq!(selection.count(), 0);
    }
}
