#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, AddAssign};

use crate::simd::SimdVector;

use super::f64x2::NEON_ALIGNMENT;

pub const LANE_COUNT: usize = 8;

const REGISTER_LANES: usize = 2;

/// A SIMD vector of 8 64-bit floating point values spread over 4 NEON registers
#[derive(Copy, Clone, Debug)]
pub struct F64x8 {
    elements: [float64x2_t; 4],
}

impl SimdVector for F64x8 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = NEON_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        Self {
            elements: unsafe { [vdupq_n_f64(0.0); 4] },
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        unsafe {
            Self {
                elements: [
                    vld1q_f64(ptr),
                    vld1q_f64(ptr.add(REGISTER_LANES)),
                    vld1q_f64(ptr.add(2 * REGISTER_LANES)),
                    vld1q_f64(ptr.add(3 * REGISTER_LANES)),
                ],
            }
        }
    }

    /// Sums lanes 0 through 7 in order.
    #[inline(always)]
    fn reduce_add(self) -> f64 {
        let mut total = 0.0;
        for register in self.elements {
            unsafe {
                total += vgetq_lane_f64::<0>(register);
                total += vgetq_lane_f64::<1>(register);
            }
        }
        total
    }
}

impl Add for F64x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        unsafe {
            Self {
                elements: [
                    vaddq_f64(self.elements[0], rhs.elements[0]),
                    vaddq_f64(self.elements[1], rhs.elements[1]),
                    vaddq_f64(self.elements[2], rhs.elements[2]),
                    vaddq_f64(self.elements[3], rhs.elements[3]),
                ],
            }
        }
    }
}

impl AddAssign for F64x8 {
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
    fn test_lanes_match_fallback() {
        let data: Vec<f64> = (0..64).map(|i| i as f64 * 0.001).collect();

        let mut native = F64x8::zero();
        let mut portable = fallback::F64x8::zero();
        for chunk in data.chunks_exact(LANE_COUNT) {
            native += F64x8::load(chunk);
            portable += fallback::F64x8::load(chunk);
        }

        assert_eq!(native.reduce_add().to_bits(), portable.reduce_add().to_bits());
    }
}
