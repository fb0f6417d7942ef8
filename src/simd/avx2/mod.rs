//! AVX implementations for 256-bit vector accumulators.
//!
//! This module contains accumulators built on Intel's Advanced Vector Extensions,
//! which provide 256-bit floating-point vector operations. The double-precision
//! adds and loads used here only need AVX, which every AVX2 processor has.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Sandy Bridge (2011+) or AMD Bulldozer (2011+)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: Must be compiled with AVX enabled (`-C target-cpu=native`
//!   on a capable host, or `-C target-feature=+avx`)
//! - **Selection**: `build.rs` turns this backend on when the target enables AVX
//!
//! # Available Types
//!
//! - [`f64x8::F64x8`]: two 256-bit registers holding 8 packed double-precision values
//!
//! # Conditional Compilation
//!
//! This module is only compiled under the `avx2` cfg. Without it the eight-lane
//! accumulator comes from the portable fallback.

pub mod f64x8;
