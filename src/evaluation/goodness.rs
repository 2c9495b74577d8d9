//! Goodness-of-fit measures for fitted models.
//!
//! ## Purpose
//!
//! This module scores a fitted function `f` against paired measurements: the
//! (weighted) sum of squared deviations and the coefficient of determination.
//!
//! ## Design notes
//!
//! * **Reference mean**: [`coefficient_of_determination`] measures the total sum
//!   of squares around the mean of the **x** values;
//!   [`coefficient_of_determination_conventional`] uses the mean of the y values.
//! * **Weights**: Weighted measures pass raw weights through a transform and
//!   square the result, like weighted regression.
//!
//! ## Invariants
//!
//! * Only jointly valid pairs (and valid squared weights) contribute.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::descriptive::average;
use crate::primitives::sample::{Sample, is_ok_float, valid_pairs};

fn sqr(v: f64) -> f64 {
    v * v
}

/// `1 − SSres / SStot` with a caller-supplied center for `SStot`.
fn r_squared<X, Y, F>(x: X, y: Y, f: F, center: f64) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    F: Fn(f64) -> f64,
{
    let (ss_res, ss_tot) = valid_pairs(x, y).fold((0.0, 0.0), |(res, tot), (vx, vy)| {
        (res + sqr(vy - f(vx)), tot + sqr(vy - center))
    });
    1.0 - ss_res / ss_tot
}

/// Coefficient of determination `R² = 1 − SSres / SStot` of `f` on `(x, y)`.
///
/// `SStot = Σ (y_i − x̄)²`, with `x̄` the mean of the valid x values.
pub fn coefficient_of_determination<X, Y, F>(x: X, y: Y, f: F) -> f64
where
    X: IntoIterator,
    X::IntoIter: Clone,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    F: Fn(f64) -> f64,
{
    let x = x.into_iter();
    let center = average(x.clone());
    r_squared(x, y, f, center)
}

/// Coefficient of determination with `SStot = Σ (y_i − ȳ)²` over the jointly
/// valid pairs.
pub fn coefficient_of_determination_conventional<X, Y, F>(x: X, y: Y, f: F) -> f64
where
    X: IntoIterator,
    X::IntoIter: Clone,
    X::Item: Sample,
    Y: IntoIterator,
    Y::IntoIter: Clone,
    Y::Item: Sample,
    F: Fn(f64) -> f64,
{
    let x = x.into_iter();
    let y = y.into_iter();
    let (sum, n) = valid_pairs(x.clone(), y.clone()).fold((0.0, 0usize), |(s, n), (_, vy)| (s + vy, n + 1));
    let center = if n == 0 { f64::NAN } else { sum / n as f64 };
    r_squared(x, y, f, center)
}

/// Weighted coefficient of determination
/// `1 − Σ w_i² (y_i − f(x_i))² / Σ w_i² (y_i − ȳ_w)²`, with `ȳ_w` the
/// `w²`-weighted mean of y.
pub fn weighted_coefficient_of_determination<X, Y, W, F, T>(x: X, y: Y, weights: W, f: F, weight_transform: T) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    F: Fn(f64) -> f64,
    T: Fn(f64) -> f64,
{
    let triples = weighted_triples(x, y, weights, &weight_transform);
    let (sw, swy) = triples.iter().fold((0.0, 0.0), |(sw, swy), &(_, vy, w2)| (sw + w2, swy + w2 * vy));
    let center = swy / sw;
    let (ss_res, ss_tot) = triples.iter().fold((0.0, 0.0), |(res, tot), &(vx, vy, w2)| {
        (res + w2 * sqr(vy - f(vx)), tot + w2 * sqr(vy - center))
    });
    1.0 - ss_res / ss_tot
}

/// Sum of squared deviations `χ² = Σ (y_i − f(x_i))²`.
pub fn sum_of_deviations<X, Y, F>(x: X, y: Y, f: F) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    F: Fn(f64) -> f64,
{
    valid_pairs(x, y).map(|(vx, vy)| sqr(vy - f(vx))).sum()
}

/// Weighted sum of squared deviations `Σ w_i² (y_i − f(x_i))²`, where
/// `w_i = weight_transform(raw_i)`.
pub fn weighted_sum_of_deviations<X, Y, W, F, T>(x: X, y: Y, weights: W, f: F, weight_transform: T) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    F: Fn(f64) -> f64,
    T: Fn(f64) -> f64,
{
    weighted_triples(x, y, weights, &weight_transform)
        .into_iter()
        .map(|(vx, vy, w2)| w2 * sqr(vy - f(vx)))
        .sum()
}

/// Root mean square of the deviations, `sqrt(χ² / N)`. NaN if no pair is valid.
pub fn rms_deviation<X, Y, F>(x: X, y: Y, f: F) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    F: Fn(f64) -> f64,
{
    let (ss, n) = valid_pairs(x, y).fold((0.0, 0usize), |(ss, n), (vx, vy)| (ss + sqr(vy - f(vx)), n + 1));
    if n == 0 { f64::NAN } else { Float::sqrt(ss / n as f64) }
}

fn weighted_triples<X, Y, W, T>(x: X, y: Y, weights: W, weight_transform: &T) -> Vec<(f64, f64, f64)>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    T: Fn(f64) -> f64,
{
    x.into_iter()
        .zip(y)
        .zip(weights)
        .map(|((vx, vy), vw)| {
            let wi = weight_transform(vw.to_sample());
            (vx.to_sample(), vy.to_sample(), wi * wi)
        })
        .filter(|&(vx, vy, w2)| is_ok_float(vx) && is_ok_float(vy) && is_ok_float(w2))
        .collect()
}
