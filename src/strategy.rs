//! Summation strategies.
//!
//! Every strategy reduces a slice of `f64` to its sum. They differ only in how
//! many lanes they add at once and how many independent accumulators they keep
//! in flight, which changes the order of the additions but not the result
//! beyond rounding.

use std::fmt;

use crate::error::require_divisible;
use crate::simd::{F64x2, F64x8, SimdVector};

/// Adds the values one at a time, left to right.
#[inline(never)]
pub fn scalar(data: &[f64]) -> f64 {
    let mut result = 0.0;
    for &value in data {
        result += value;
    }
    result
}

/// Adds consecutive blocks of `V::LANE_COUNT` values into one vector
/// accumulator and reduces it at the end.
///
/// # Panics
///
/// Raises a contract violation if `data.len()` is not a multiple of
/// `V::LANE_COUNT`.
#[inline(always)]
pub fn simd_sum<V: SimdVector>(data: &[f64]) -> f64 {
    require_divisible(data.len(), V::LANE_COUNT);

    let mut acc = V::zero();
    for chunk in data.chunks_exact(V::LANE_COUNT) {
        acc += V::load(chunk);
    }
    acc.reduce_add()
}

/// Like [`simd_sum`], but with `U` accumulators: each iteration consumes `U`
/// consecutive blocks and adds block `k` into accumulator `k`, so the `U`
/// additions of one iteration do not depend on each other.
///
/// The accumulators are reduced separately and their totals added in order.
///
/// # Panics
///
/// Raises a contract violation if `data.len()` is not a multiple of
/// `V::LANE_COUNT * U`.
#[inline(always)]
pub fn simd_sum_unrolled<V: SimdVector, const U: usize>(data: &[f64]) -> f64 {
    let block = V::LANE_COUNT * U;
    require_divisible(data.len(), block);

    let mut acc = [V::zero(); U];
    for chunk in data.chunks_exact(block) {
        for (k, lanes) in chunk.chunks_exact(V::LANE_COUNT).enumerate() {
            acc[k] += V::load(lanes);
        }
    }

    let mut result = 0.0;
    for partial in acc {
        result += partial.reduce_add();
    }
    result
}

#[inline(never)]
pub fn simd2x1_no_align(data: &[f64]) -> f64 {
    simd_sum::<F64x2>(data)
}

#[inline(never)]
pub fn simd8x1_no_align(data: &[f64]) -> f64 {
    simd_sum::<F64x8>(data)
}

#[inline(never)]
pub fn simd8x4_no_align(data: &[f64]) -> f64 {
    simd_sum_unrolled::<F64x8, 4>(data)
}

/// A named summation function and the block length its input must be a multiple of.
#[derive(Clone, Copy)]
pub struct Strategy {
    name: &'static str,
    block_len: usize,
    sum: fn(&[f64]) -> f64,
}

impl Strategy {
    pub const fn new(name: &'static str, block_len: usize, sum: fn(&[f64]) -> f64) -> Self {
        Self {
            name,
            block_len,
            sum,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Vector width times unroll factor; `1` for the scalar strategy.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    #[inline(always)]
    pub fn sum(&self, data: &[f64]) -> f64 {
        (self.sum)(data)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("block_len", &self.block_len)
            .finish()
    }
}

pub const SCALAR: Strategy = Strategy::new("scalar", 1, scalar);

pub const SIMD2X1_NO_ALIGN: Strategy =
    Strategy::new("simd2x1_no_align", F64x2::LANE_COUNT, simd2x1_no_align);

pub const SIMD8X1_NO_ALIGN: Strategy =
    Strategy::new("simd8x1_no_align", F64x8::LANE_COUNT, simd8x1_no_align);

pub const SIMD8X4_NO_ALIGN: Strategy =
    Strategy::new("simd8x4_no_align", F64x8::LANE_COUNT * 4, simd8x4_no_align);

/// Every registered strategy, in report order.
pub const ALL: [Strategy; 4] = [SCALAR, SIMD2X1_NO_ALIGN, SIMD8X1_NO_ALIGN, SIMD8X4_NO_ALIGN];

/// Looks up a registered strategy by its report name.
pub fn find(name: &str) -> Option<Strategy> {
    ALL.iter().copied().find(|strategy| strategy.name == name)
}
