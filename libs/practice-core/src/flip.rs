//! Flip-review state machine.
//!
//! The machine is the pair (initial face, revealed). Navigation redraws the
//! initial face and hides the card; `flip` only toggles the reveal. It has no
//! terminal state and lives until its session ends.

use serde::Serialize;

use crate::error::{PracticeError, Result};
use crate::random::{shuffle_with, RandomSource};
use crate::types::{Face, Flashcard};

/// Observable flip state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipState {
    pub card_index: usize,
    pub is_revealed: bool,
    pub initial_face: Face,
}

#[derive(Debug, Clone)]
pub struct FlipStateMachine {
    deck: Vec<Flashcard>,
    state: FlipState,
}

impl FlipStateMachine {
    /// Mount on a non-empty deck.
    pub fn mount(deck: Vec<Flashcard>, rng: &mut dyn RandomSource) -> Result<Self> {
        if deck.is_empty() {
            return Err(PracticeError::EmptyDeck);
        }
        Ok(Self {
            deck,
            state: FlipState {
                card_index: 0,
                is_revealed: false,
                initial_face: rng.draw_face(),
            },
        })
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current(&self) -> &Flashcard {
        &self.deck[self.state.card_index]
    }

    /// One-based position for "card i of n" displays.
    pub fn position(&self) -> usize {
        self.state.card_index + 1
    }

    /// Face currently shown to the learner.
    pub fn visible_face(&self) -> Face {
        if self.state.is_revealed {
            self.state.initial_face.other()
        } else {
            self.state.initial_face
        }
    }

    pub fn flip(&mut self) {
        self.state.is_revealed = !self.state.is_revealed;
    }

    pub fn next(&mut self, rng: &mut dyn RandomSource) {
        let len = self.deck.len();
        self.reset_view((self.state.card_index + 1) % len, rng);
    }

    pub fn previous(&mut self, rng: &mut dyn RandomSource) {
        let len = self.deck.len();
        self.reset_view((self.state.card_index + len - 1) % len, rng);
    }

    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        self.deck = shuffle_with(&self.deck, rng);
        self.reset_view(0, rng);
    }

    fn reset_view(&mut self, card_index: usize, rng: &mut dyn RandomSource) {
        self.state = FlipState {
            card_index,
            is_revealed: false,
            initial_face: rng.draw_face(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    /// Replays scripted coin flips; permutations reverse the deck.
    struct Scripted {
        coins: Vec<bool>,
        draws: usize,
    }

    impl Scripted {
        fn new(coins: &[bool]) -> Self {
            Self {
                coins: coins.to_vec(),
                draws: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn coin_flip(&mut self) -> bool {
            let coin = self.coins[self.draws % self.coins.len()];
            self.draws += 1;
            coin
        }

        fn permutation(&mut self, len: usize) -> Vec<usize> {
            (0..len).rev().collect()
        }
    }

    fn deck(n: usize) -> Vec<Flashcard> {
        let created = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        (0..n)
            .map(|i| Flashcard::new(format!("c{i}"), format!("word{i}"), "t", "d", created))
            .collect()
    }

    #[test]
    fn empty_deck_cannot_mount() {
        let mut rng = SeededRandom::from_seed(0);
        let err = FlipStateMachine::mount(vec![], &mut rng).unwrap_err();
        assert_eq!(err, PracticeError::EmptyDeck);
    }

    #[test]
    fn mount_draws_face_and_hides() {
        let mut rng = Scripted::new(&[false]);
        let machine = FlipStateMachine::mount(deck(3), &mut rng).unwrap();
        assert_eq!(
            machine.state(),
            FlipState {
                card_index: 0,
                is_revealed: false,
                initial_face: Face::Meaning,
            }
        );
        assert_eq!(machine.visible_face(), Face::Meaning);
    }

    #[test]
    fn flip_toggles_reveal_without_redrawing() {
        let mut rng = Scripted::new(&[true, false]);
        let mut machine = FlipStateMachine::mount(deck(2), &mut rng).unwrap();
        machine.flip();
        assert!(machine.state().is_revealed);
        assert_eq!(machine.state().initial_face, Face::Word);
        assert_eq!(machine.visible_face(), Face::Meaning);
        machine.flip();
        assert!(!machine.state().is_revealed);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn navigation_wraps_both_ways_and_resets() {
        let mut rng = Scripted::new(&[true, false]);
        let mut machine = FlipStateMachine::mount(deck(3), &mut rng).unwrap();
        machine.flip();
        machine.previous(&mut rng);
        assert_eq!(machine.state().card_index, 2);
        assert!(!machine.state().is_revealed);
        assert_eq!(machine.state().initial_face, Face::Meaning);
        machine.next(&mut rng);
        assert_eq!(machine.state().card_index, 0);
        assert_eq!(rng.draws, 3);
    }

    #[test]
    fn index_stays_in_bounds() {
        let mut rng = SeededRandom::from_seed(9);
        let mut machine = FlipStateMachine::mount(deck(4), &mut rng).unwrap();
        for step in 0..50 {
            if step % 3 == 0 {
                machine.previous(&mut rng);
            } else {
                machine.next(&mut rng);
            }
            assert!(machine.state().card_index < machine.len());
        }
    }

    #[test]
    fn single_card_deck_navigates_in_place() {
        let mut rng = SeededRandom::from_seed(2);
        let mut machine = FlipStateMachine::mount(deck(1), &mut rng).unwrap();
        machine.next(&mut rng);
        machine.previous(&mut rng);
        assert_eq!(machine.state().card_index, 0);
    }

    #[test]
    fn shuffle_permutes_and_restarts() {
        let mut rng = Scripted::new(&[true]);
        let mut machine = FlipStateMachine::mount(deck(3), &mut rng).unwrap();
        machine.next(&mut rng);
        machine.flip();
        machine.shuffle(&mut rng);
        let ids: Vec<&str> = machine.deck().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1", "c0"]);
        assert_eq!(machine.state().card_index, 0);
        assert!(!machine.state().is_revealed);
        assert_eq!(machine.current().id, "c2");
    }

    #[test]
    fn seeded_sessions_replay() {
        let mut a = SeededRandom::from_seed(11);
        let mut b = SeededRandom::from_seed(11);
        let mut left = FlipStateMachine::mount(deck(5), &mut a).unwrap();
        let mut right = FlipStateMachine::mount(deck(5), &mut b).unwrap();
        left.shuffle(&mut a);
        right.shuffle(&mut b);
        left.next(&mut a);
        right.next(&mut b);
        assert_eq!(left.state(), right.state());
        assert_eq!(left.deck(), right.deck());
    }
}
