//! Weighted categorical sampling over `(variant, weight)` tables.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;

/// A reusable weighted table. Build once, sample with any injected RNG.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    variants: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> WeightedTable<T> {
    /// Fails if the table is empty, has a negative weight, or all weights are zero.
    pub fn new(entries: &[(T, f64)]) -> Result<Self, WeightedError> {
        let index = WeightedIndex::new(entries.iter().map(|&(_, weight)| weight))?;
        Ok(Self {
            variants: entries.iter().map(|&(variant, _)| variant).collect(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.variants[self.index.sample(rng)]
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
