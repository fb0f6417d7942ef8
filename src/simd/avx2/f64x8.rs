//! AVX 8-lane f64 SIMD vector implementation.
//!
//! `F64x8` spans two `__m256d` registers. Adding two vectors issues two
//! independent `vaddpd` instructions, so a single accumulator already keeps
//! two additions in flight.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign};

use crate::simd::SimdVector;

/// AVX memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f64 elements held by the vector.
pub(crate) const LANE_COUNT: usize = 8;

/// Number of f64 elements in one 256-bit register.
const REGISTER_LANES: usize = 4;

/// AVX vector containing 8 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x8 {
    /// Lanes 0-3 and 4-7
    elements: [__m256d; 2],
}

impl SimdVector for F64x8 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = AVX_ALIGNMENT;

    #[inline(always)]
    fn zero() -> Self {
        unsafe {
            Self {
                elements: [_mm256_setzero_pd(), _mm256_setzero_pd()],
            }
        }
    }

    /// Loads 8 values with two `vmovupd`; no alignment requirement.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        unsafe {
            Self {
                elements: [
                    _mm256_loadu_pd(ptr),
                    _mm256_loadu_pd(ptr.add(REGISTER_LANES)),
                ],
            }
        }
    }

    #[inline(always)]
    fn reduce_add(self) -> f64 {
        let mut lanes = [0.0f64; LANE_COUNT];

        unsafe {
            _mm256_storeu_pd(lanes.as_mut_ptr(), self.elements[0]);
            _mm256_storeu_pd(lanes.as_mut_ptr().add(REGISTER_LANES), self.elements[1]);
        }

        let mut total = 0.0;
        for lane in lanes {
            total += lane;
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
                    _mm256_add_pd(self.elements[0], rhs.elements[0]),
                    _mm256_add_pd(self.elements[1], rhs.elements[1]),
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
