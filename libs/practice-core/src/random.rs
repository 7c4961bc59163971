//! Randomness used by practice sessions.
//!
//! All random draws go through [`RandomSource`] so that face selection and
//! shuffling can be replayed from a seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::Face;

/// Source of the random decisions a session makes.
pub trait RandomSource: Send {
    /// Fair coin.
    fn coin_flip(&mut self) -> bool;

    /// Uniformly random permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;

    /// Draw the face a card starts on.
    fn draw_face(&mut self) -> Face {
        if self.coin_flip() {
            Face::Word
        } else {
            Face::Meaning
        }
    }
}

/// ChaCha-backed random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Deterministic source for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Reorder `items` by a permutation drawn from `rng`.
pub fn shuffle_with<T: Clone>(items: &[T], rng: &mut dyn RandomSource) -> Vec<T> {
    rng.permutation(items.len())
        .into_iter()
        .map(|idx| items[idx].clone())
        .collect()
}
