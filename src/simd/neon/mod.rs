//! ARM NEON implementations for 128-bit vector accumulators.
//!
//! This module contains accumulators using ARM's Advanced SIMD (NEON) instruction set.
//! On AArch64 NEON supports double-precision lanes and is part of the baseline, so
//! this backend is available on Apple Silicon, AWS Graviton and every other ARM64 core.
//!
//! # Available Types
//!
//! - [`f64x2::F64x2`]: one `float64x2_t` register (2 lanes)
//! - [`f64x8::F64x8`]: four `float64x2_t` registers (8 lanes)
//!
//! # Conditional Compilation
//!
//! This module is only compiled under the `neon` cfg set by `build.rs`.

pub mod f64x2;

pub mod f64x8;
