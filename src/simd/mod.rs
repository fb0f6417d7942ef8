//! Fixed-width `f64` accumulator vectors.
//!
//! [`F64x2`] and [`F64x8`] resolve to the best backend `build.rs` selected for
//! the compile target:
//!
//! | cfg        | `F64x2`              | `F64x8`                   |
//! |------------|----------------------|---------------------------|
//! | `avx2`     | SSE2 `__m128d`       | AVX `2 × __m256d`         |
//! | `sse`      | SSE2 `__m128d`       | portable `[f64; 8]`       |
//! | `neon`     | NEON `float64x2_t`   | NEON `4 × float64x2_t`    |
//! | `fallback` | portable `[f64; 2]`  | portable `[f64; 8]`       |
//!
//! The portable [`fallback`] module is always compiled.

#[cfg(any(avx2, sse))]
pub mod sse;

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod fallback;

pub mod traits;

pub use traits::SimdVector;

#[cfg(any(avx2, sse))]
pub use sse::f64x2::F64x2;

#[cfg(neon)]
pub use neon::f64x2::F64x2;

#[cfg(fallback)]
pub use fallback::F64x2;

#[cfg(avx2)]
pub use avx2::f64x8::F64x8;

#[cfg(neon)]
pub use neon::f64x8::F64x8;

#[cfg(any(sse, fallback))]
pub use fallback::F64x8;

/// Name of the backend compiled into this build.
pub const BACKEND: &str = if cfg!(avx2) {
    "avx2"
} else if cfg!(sse) {
    "sse"
} else if cfg!(neon) {
    "neon"
} else {
    "fallback"
};
