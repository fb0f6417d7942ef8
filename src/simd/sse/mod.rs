//! SSE2 implementations for 128-bit vector accumulators.
//!
//! SSE2 is part of the x86_64 baseline, so this backend is available on every
//! 64-bit x86 target. It provides the two-lane accumulator; the eight-lane one
//! comes from the AVX backend when the target enables AVX and from the
//! portable fallback otherwise.
//!
//! # Available Types
//!
//! - [`f64x2::F64x2`]: 128-bit vector containing 2 packed double-precision values

pub mod f64x2;
