use std::ops::{Add, AddAssign};

/// A fixed-width vector of `f64` lanes usable as a summation accumulator.
///
/// Implementors only need element-wise addition, an unaligned load and a
/// horizontal reduction; this is the whole surface the summation strategies
/// rely on, so a new backend is a new implementation of this trait.
pub trait SimdVector: Copy + Add<Output = Self> + AddAssign {
    /// Number of `f64` lanes held by the vector.
    const LANE_COUNT: usize;

    /// Alignment in bytes at which loads reach their best throughput.
    const ALIGNMENT: usize;

    /// A vector with every lane set to `0.0`.
    fn zero() -> Self;

    /// Loads `LANE_COUNT` consecutive values starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANE_COUNT` `f64` values. It does not
    /// need to be aligned.
    unsafe fn load_unaligned(ptr: *const f64) -> Self;

    /// Loads the first `LANE_COUNT` values of `chunk`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk` holds fewer than `LANE_COUNT` values.
    #[inline(always)]
    fn load(chunk: &[f64]) -> Self {
        assert!(
            chunk.len() >= Self::LANE_COUNT,
            "chunk must hold at least {} values",
            Self::LANE_COUNT
        );

        // SAFETY: the assertion above guarantees LANE_COUNT readable values.
        unsafe { Self::load_unaligned(chunk.as_ptr()) }
    }

    /// Sums the lanes, lowest lane first.
    fn reduce_add(self) -> f64;

    /// Checks if a pointer is aligned to [`SimdVector::ALIGNMENT`].
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % Self::ALIGNMENT == 0
    }
}
