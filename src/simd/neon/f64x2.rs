#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, AddAssign};

use crate::simd::SimdVector;

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 2;

/// A SIMD vector of 2 64-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    elements: float64x2_t,
}

impl SimdVector for F64x2 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = NEON_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        Self {
            elements: unsafe { vdupq_n_f64(0.0) },
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        Self {
            elements: unsafe { vld1q_f64(ptr) },
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f64 {
        unsafe { vaddvq_f64(self.elements) }
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f64(self.elements, rhs.elements) },
        }
    }
}

impl AddAssign for F64x2 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::fallback;

    #[test]
    fn test_reduce_matches_fallback() {
        let data = [0.125, 0.375, 0.5, 0.75];

        let mut native = F64x2::zero();
        let mut portable = fallback::F64x2::zero();
        for chunk in data.chunks_exact(LANE_COUNT) {
            native += F64x2::load(chunk);
            portable += fallback::F64x2::load(chunk);
        }

        assert_eq!(native.reduce_add().to_bits(), portable.reduce_add().to_bits());
    }
}
