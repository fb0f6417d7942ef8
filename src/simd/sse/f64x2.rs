//! SSE2 2-lane f64 SIMD vector implementation.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign};

use crate::simd::SimdVector;

/// SSE memory alignment requirement in bytes.
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// Number of f64 elements that fit in a 128-bit SSE register.
pub(crate) const LANE_COUNT: usize = 2;

/// SSE2 vector containing 2 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    elements: __m128d,
}

impl SimdVector for F64x2 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = SSE_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        Self {
            elements: unsafe { _mm_setzero_pd() },
        }
    }

    /// Loads 2 values with `movupd`; no alignment requirement.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        Self {
            elements: unsafe { _mm_loadu_pd(ptr) },
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f64 {
        unsafe {
            let high = _mm_unpackhi_pd(self.elements, self.elements);
            _mm_cvtsd_f64(_mm_add_sd(self.elements, high))
        }
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_add_pd(self.elements, rhs.elements) },
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

    #[test]
    fn test_unaligned_load() {
        let data = [1.0, 2.0, 3.0];
        let vector = F64x2::load(&data[1..]);
        assert_eq!(vector.reduce_add(), 5.0);
    }
}
