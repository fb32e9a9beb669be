//! Alternate picking: "choose N distinct indices from 0..len, skipping some".
//!
//! The scheduler only sees the `AlternatePicker` trait so tests can swap in a
//! seeded RNG or a fully deterministic picker.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait AlternatePicker {
    /// Returns up to `count` distinct indices in `0..len`, none of them in `excluded`.
    /// Returns fewer when not enough candidates exist; never blocks.
    fn pick_distinct(&mut self, len: usize, excluded: &[usize], count: usize) -> Vec<usize>;
}

/// Uniform random picker backed by any `rand` RNG.
pub struct RandomPicker<R> {
    rng: R,
}

impl RandomPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> AlternatePicker for RandomPicker<R> {
    fn pick_distinct(&mut self, len: usize, excluded: &[usize], count: usize) -> Vec<usize> {
        let candidates: Vec<usize> = (0..len).filter(|i| !excluded.contains(i)).collect();
        candidates
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect()
    }
}
