//! Portable accumulator vectors.
//!
//! [`Lanes`] stores its lanes in a plain array and leaves vectorization to the
//! compiler. It is the backend of last resort and the reference the native
//! backends are tested against.

use std::ops::{Add, AddAssign};

use crate::simd::SimdVector;

/// `N` packed `f64` values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lanes<const N: usize>(pub [f64; N]);

/// Two-lane portable vector.
pub type F64x2 = Lanes<2>;

/// Eight-lane portable vector.
pub type F64x8 = Lanes<8>;

impl<const N: usize> SimdVector for Lanes<N> {
    const LANE_COUNT: usize = N;
    // Same as a native register of this width: 16 for two lanes, 64 for eight.
    const ALIGNMENT: usize = N * std::mem::size_of::<f64>();

    #[inline(always)]
    fn zero() -> Self {
        Lanes([0.0; N])
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        let mut lanes = [0.0; N];
        // SAFETY: caller guarantees `N` readable values behind `ptr`.
        unsafe { std::ptr::copy_nonoverlapping(ptr, lanes.as_mut_ptr(), N) };
        Lanes(lanes)
    }

    #[inline(always)]
    fn reduce_add(self) -> f64 {
        let mut total = 0.0;
        for lane in self.0 {
            total += lane;
        }
        total
    }
}

impl<const N: usize> Add for Lanes<N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Lanes(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> AddAssign for Lanes<N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        for (lane, value) in self.0.iter_mut().zip(rhs.0) {
            *lane += value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_leading_values() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(F64x8::load(&data), Lanes([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]));
        assert_eq!(F64x2::load(&data[7..]), Lanes([8.0, 9.0]));
    }

    #[test]
    #[should_panic(expected = "at least 8 values")]
    fn test_load_rejects_short_chunk() {
        F64x8::load(&[1.0; 7]);
    }

    #[test]
    fn test_alignment_follows_lane_count() {
        assert_eq!(F64x2::ALIGNMENT, 16);
        assert_eq!(F64x8::ALIGNMENT, 64);

        let buffer = [0.0f64; 16];
        let base = buffer.as_ptr();
        let offset = if F64x2::is_aligned(base) { 1 } else { 0 };
        assert!(!F64x2::is_aligned(base.wrapping_add(offset)));
        assert!(F64x2::is_aligned(base.wrapping_add(1 - offset)));
    }

    #[test]
    fn test_add_and_reduce() {
        let mut acc = F64x2::zero();
        acc += Lanes([0.25, 0.5]);
        let acc = acc + Lanes([1.0, 2.0]);

        assert_eq!(acc, Lanes([1.25, 2.5]));
        assert_eq!(acc.reduce_add(), 3.75);
    }
}
