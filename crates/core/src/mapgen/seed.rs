//! Seeded random source for world generation with a persistable position.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Position of a [`GenRng`] within its sequence: the seed and the ChaCha
/// word position reached since seeding. Every `next_u64` advances it by two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RngCursor {
    pub seed: u64,
    pub word_pos: u128,
}

#[derive(Clone, Debug)]
pub struct GenRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl GenRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Rebuilds the generator at `cursor`, yielding the same future words
    /// as the generator the cursor was taken from.
    pub fn resume(cursor: RngCursor) -> Self {
        let mut rng = Self::from_seed(cursor.seed);
        rng.inner.set_word_pos(cursor.word_pos);
        rng
    }

    pub fn cursor(&self) -> RngCursor {
        RngCursor { seed: self.seed, word_pos: self.inner.get_word_pos() }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }

    pub fn range_inclusive(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (max_value - min_value) as u64 + 1;
        min_value + self.below(span) as i32
    }

    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }
}

impl PartialEq for GenRng {
    fn eq(&self, other: &Self) -> bool {
        self.cursor() == other.cursor()
    }
}

impl Eq for GenRng {}
