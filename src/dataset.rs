//! Benchmark input generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{contract_violation, Result};

/// Number of distinct values an element can take; elements are multiples of its inverse.
pub const GRANULARITY: u32 = 1_000_000;

/// Values to sum together with their ground-truth total.
///
/// The values never change after generation, every strategy borrows the same
/// slice for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
    reference_sum: f64,
}

impl Dataset {
    /// Generates `count` values uniformly drawn from `[0, 1)` in steps of
    /// `1 / GRANULARITY`, and sums them left to right.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Result<Self> {
        if count == 0 {
            return Err(contract_violation(count, 1, "dataset must not be empty"));
        }

        let mut values = Vec::with_capacity(count);
        let mut reference_sum = 0.0;
        for _ in 0..count {
            let element = f64::from(rng.random_range(0..GRANULARITY)) / f64::from(GRANULARITY);
            reference_sum += element;
            values.push(element);
        }

        Ok(Self {
            values,
            reference_sum,
        })
    }

    /// Generates a dataset from a [`StdRng`] seeded with `seed`.
    ///
    /// The same `(count, seed)` pair always yields the same values and sum.
    pub fn from_seed(count: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dataset = Self::generate(count, &mut rng)?;

        tracing::debug!(
            count,
            seed,
            reference_sum = dataset.reference_sum,
            "generated dataset"
        );

        Ok(dataset)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sequential left-to-right sum of [`Dataset::values`].
    pub fn reference_sum(&self) -> f64 {
        self.reference_sum
    }
}
