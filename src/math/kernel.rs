//! Kernel functions for density estimation.
//!
//! ## Purpose
//!
//! This module provides the closed-form density kernels used by kernel density
//! estimation, both as free functions and as closed enums that map to them.
//!
//! ## Design notes
//!
//! * **Open**: Every KDE routine accepts any `Fn(f64) -> f64` (or
//!   `Fn(f64, f64) -> f64` in 2D); the enums only name the built-in kernels.
//! * **Normalized**: Each 1D kernel integrates to one over its support.
//!
//! ## Key concepts
//!
//! * **Support**: Compact kernels are zero outside `|t| <= 1` (or `< 1`, per kernel).
//! * **Tails**: Gaussian, Cauchy and Picard have unbounded support.
//!
//! ## Invariants
//!
//! * All kernels are non-negative and symmetric.
//!
//! ## Non-goals
//!
//! * This module does not choose bandwidths (see `algorithms::kde`).

use core::f64::consts::{FRAC_1_SQRT_2, FRAC_2_SQRT_PI, PI};

use num_traits::Float;

/// `1 / sqrt(2π)`.
const FRAC_1_SQRT_2PI: f64 = FRAC_1_SQRT_2 * FRAC_2_SQRT_PI * 0.5;

// ============================================================================
// 1D Kernels
// ============================================================================

/// Gaussian kernel `exp(-t²/2) / sqrt(2π)`.
#[inline]
pub fn gaussian(t: f64) -> f64 {
    Float::exp(-0.5 * t * t) * FRAC_1_SQRT_2PI
}

/// Cauchy kernel `1 / (π (1 + t²))`.
#[inline]
pub fn cauchy(t: f64) -> f64 {
    1.0 / (PI * (1.0 + t * t))
}

/// Picard (Laplace) kernel `exp(-|t|) / 2`.
#[inline]
pub fn picard(t: f64) -> f64 {
    Float::exp(-Float::abs(t)) / 2.0
}

/// Epanechnikov kernel `3/4 (1 - t²)` on `|t| < 1`.
#[inline]
pub fn epanechnikov(t: f64) -> f64 {
    if Float::abs(t) < 1.0 { 0.75 * (1.0 - t * t) } else { 0.0 }
}

/// Uniform kernel `1/2` on `|t| <= 1`.
#[inline]
pub fn uniform(t: f64) -> f64 {
    if Float::abs(t) <= 1.0 { 0.5 } else { 0.0 }
}

/// Triangle kernel `1 - |t|` on `|t| <= 1`.
#[inline]
pub fn triangle(t: f64) -> f64 {
    let a = Float::abs(t);
    if a <= 1.0 { 1.0 - a } else { 0.0 }
}

/// Quartic (biweight) kernel `15/16 (1 - t²)²` on `|t| <= 1`.
#[inline]
pub fn quartic(t: f64) -> f64 {
    if Float::abs(t) <= 1.0 {
        let u = 1.0 - t * t;
        15.0 / 16.0 * u * u
    } else {
        0.0
    }
}

/// Triweight kernel `35/32 (1 - t²)³` on `|t| < 1`.
#[inline]
pub fn triweight(t: f64) -> f64 {
    if Float::abs(t) < 1.0 {
        let u = 1.0 - t * t;
        35.0 / 32.0 * u * u * u
    } else {
        0.0
    }
}

/// Tricube kernel `70/81 (1 - |t|³)³` on `|t| < 1`.
#[inline]
pub fn tricube(t: f64) -> f64 {
    let a = Float::abs(t);
    if a < 1.0 {
        let u = 1.0 - a * a * a;
        70.0 / 81.0 * u * u * u
    } else {
        0.0
    }
}

/// Cosine kernel `π/4 cos(π t / 2)` on `|t| < 1`.
#[inline]
pub fn cosine(t: f64) -> f64 {
    if Float::abs(t) < 1.0 {
        PI / 4.0 * Float::cos(PI * t / 2.0)
    } else {
        0.0
    }
}

// ============================================================================
// 2D Kernels
// ============================================================================

/// 2D Gaussian kernel `exp(-(tx² + ty²)/2) / (2π)`.
#[inline]
pub fn gaussian_2d(tx: f64, ty: f64) -> f64 {
    Float::exp(-0.5 * (tx * tx + ty * ty)) / (2.0 * PI)
}

/// 2D uniform kernel `1/4` on the unit square `|tx| <= 1, |ty| <= 1`.
#[inline]
pub fn uniform_2d(tx: f64, ty: f64) -> f64 {
    if Float::abs(tx) <= 1.0 && Float::abs(ty) <= 1.0 { 0.25 } else { 0.0 }
}

// ============================================================================
// Kernel Enums
// ============================================================================

/// Built-in 1D kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel1D {
    /// Gaussian (default).
    #[default]
    Gaussian,
    /// Cauchy.
    Cauchy,
    /// Picard (Laplace).
    Picard,
    /// Epanechnikov.
    Epanechnikov,
    /// Uniform.
    Uniform,
    /// Triangle.
    Triangle,
    /// Quartic (biweight).
    Quartic,
    /// Triweight.
    Triweight,
    /// Tricube.
    Tricube,
    /// Cosine.
    Cosine,
}

impl Kernel1D {
    /// The kernel as a plain function pointer.
    pub const fn as_fn(self) -> fn(f64) -> f64 {
        match self {
            Self::Gaussian => gaussian,
            Self::Cauchy => cauchy,
            Self::Picard => picard,
            Self::Epanechnikov => epanechnikov,
            Self::Uniform => uniform,
            Self::Triangle => triangle,
            Self::Quartic => quartic,
            Self::Triweight => triweight,
            Self::Tricube => tricube,
            Self::Cosine => cosine,
        }
    }

    /// Evaluate the kernel at `t`.
    #[inline]
    pub fn evaluate(self, t: f64) -> f64 {
        (self.as_fn())(t)
    }

    /// Whether the kernel is zero outside a bounded interval.
    pub const fn is_compact(self) -> bool {
        !matches!(self, Self::Gaussian | Self::Cauchy | Self::Picard)
    }
}

/// Built-in 2D kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel2D {
    /// Gaussian (default).
    #[default]
    Gaussian,
    /// Uniform on the unit square.
    Uniform,
}

impl Kernel2D {
    /// The kernel as a plain function pointer.
    pub const fn as_fn(self) -> fn(f64, f64) -> f64 {
        match self {
            Self::Gaussian => gaussian_2d,
            Self::Uniform => uniform_2d,
        }
    }

    /// Evaluate the kernel at `(tx, ty)`.
    #[inline]
    pub fn evaluate(self, tx: f64, ty: f64) -> f64 {
        (self.as_fn())(tx, ty)
    }
}
