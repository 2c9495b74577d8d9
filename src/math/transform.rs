//! Weight transforms for weighted regression.
//!
//! Weighted fits accept the raw weight column (often error-bar data) together
//! with a transform turning each raw value into a weight `w_i`. The fit then uses
//! `w_i²`.

use num_traits::Float;

/// Leaves the raw value unchanged: the weight is proportional to the data.
#[inline]
pub fn identity(v: f64) -> f64 {
    v
}

/// `1 / v`, with `|v|` floored at `abs_min` (keeping the sign) to avoid division by zero.
#[inline]
pub fn inverse_prop_safe(v: f64, abs_min: f64) -> f64 {
    let vv = if Float::abs(v) < abs_min {
        if v < 0.0 { -abs_min } else { abs_min }
    } else {
        v
    };
    1.0 / vv
}

/// `inverse_prop_safe` with `abs_min = 100 ε`.
///
/// Use this when the weight column holds errors: small errors give large weights.
#[inline]
pub fn inverse_prop_safe_default(v: f64) -> f64 {
    inverse_prop_safe(v, f64::EPSILON * 100.0)
}
