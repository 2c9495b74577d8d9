//! Descriptive statistics aggregators.
//!
//! ## Purpose
//!
//! This module implements the single-pass (and a few two-pass) aggregates that
//! every other statistic builds on: averages, counts, sums, extrema, spread,
//! higher moments and correlation.
//!
//! ## Design notes
//!
//! * **Input**: Any `IntoIterator` whose items implement `Sample`. Two-pass
//!   statistics additionally require a cloneable iterator so the data can be
//!   walked again without buffering.
//! * **Accumulation**: Always in `f64`.
//! * **Variance**: Uses the textbook `(Σx² − (Σx)²/N) / (N − 1)` shortcut. It
//!   loses precision on data with a large offset.
//!
//! ## Invariants
//!
//! * Invalid samples (NaN/Inf) are skipped by every function, so the result on a
//!   sequence equals the result on the sequence with those samples removed.
//! * Averages return NaN when no valid sample exists; sums, variances and moments
//!   return 0.
//!
//! ## Non-goals
//!
//! * This module does not sort (see `algorithms::order`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::sample::{Sample, is_ok_float, valid, valid_pairs};

// ============================================================================
// Result Types
// ============================================================================

/// Extrema of a sequence together with their positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    /// Smallest valid value (NaN if none).
    pub min: f64,
    /// Largest valid value (NaN if none).
    pub max: f64,
    /// Index of the first occurrence of `min` in the input sequence.
    pub min_pos: Option<usize>,
    /// Index of the first occurrence of `max` in the input sequence.
    pub max_pos: Option<usize>,
    /// Number of valid values.
    pub n: usize,
}

impl MinMax {
    /// `max - min`.
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Variance together with the mean and count it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispersion {
    /// Variance (0 when fewer than two valid values).
    pub variance: f64,
    /// Mean (NaN when no valid value).
    pub mean: f64,
    /// Number of valid values.
    pub n: usize,
}

impl Dispersion {
    /// Square root of the variance.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        Float::sqrt(self.variance)
    }
}

// ============================================================================
// Averages and Counts
// ============================================================================

/// Arithmetic mean of the valid values. NaN if there are none.
pub fn average<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    let (sum, n) = valid(data).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Weighted mean `Σ w_i x_i / Σ w_i`.
///
/// `weights` is walked in lockstep with `data`; a pair is skipped if either
/// member is invalid. NaN if no pair is valid.
pub fn weighted_average<I, W>(data: I, weights: W) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
{
    let (sum, sum_w, n) = valid_pairs(data, weights)
        .fold((0.0, 0.0, 0usize), |(s, sw, n), (v, w)| (s + v * w, sw + w, n + 1));
    if n == 0 { f64::NAN } else { sum / sum_w }
}

/// Number of valid values.
pub fn count<I>(data: I) -> usize
where
    I: IntoIterator,
    I::Item: Sample,
{
    valid(data).count()
}

// ============================================================================
// Extrema
// ============================================================================

/// Minimum and maximum in one pass, with the index of their first occurrence.
pub fn min_max<I>(data: I) -> MinMax
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut res = MinMax {
        min: f64::NAN,
        max: f64::NAN,
        min_pos: None,
        max_pos: None,
        n: 0,
    };

    for (i, item) in data.into_iter().enumerate() {
        let v = item.to_sample();
        if !is_ok_float(v) {
            continue;
        }
        if res.n == 0 {
            res.min = v;
            res.max = v;
            res.min_pos = Some(i);
            res.max_pos = Some(i);
        } else {
            if v < res.min {
                res.min = v;
                res.min_pos = Some(i);
            }
            if v > res.max {
                res.max = v;
                res.max_pos = Some(i);
            }
        }
        res.n += 1;
    }

    res
}

/// Smallest valid value and its first index. `(NaN, None)` if there is none.
pub fn minimum<I>(data: I) -> (f64, Option<usize>)
where
    I: IntoIterator,
    I::Item: Sample,
{
    let r = min_max(data);
    (r.min, r.min_pos)
}

/// Largest valid value and its first index. `(NaN, None)` if there is none.
pub fn maximum<I>(data: I) -> (f64, Option<usize>)
where
    I: IntoIterator,
    I::Item: Sample,
{
    let r = min_max(data);
    (r.max, r.max_pos)
}

// ============================================================================
// Sums
// ============================================================================

/// `Σ f(x_i)` over the valid values. 0 if there are none.
pub fn modified_sum<I, F>(data: I, f: F) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
    F: Fn(f64) -> f64,
{
    valid(data).fold(0.0, |acc, v| acc + f(v))
}

/// `Σ x_i` over the valid values.
pub fn sum<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    modified_sum(data, |v| v)
}

/// `Σ x_i²` over the valid values.
pub fn sum_sqr<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    modified_sum(data, |v| v * v)
}

/// Running total appended to `out`, one entry per input element.
///
/// An invalid element re-emits the previous running total, so the output has
/// the same length as the input.
pub fn cumulative_sum_into<I, E>(data: I, out: &mut E)
where
    I: IntoIterator,
    I::Item: Sample,
    E: Extend<f64>,
{
    let mut total = 0.0;
    out.extend(data.into_iter().map(|item| {
        let v = item.to_sample();
        if is_ok_float(v) {
            total += v;
        }
        total
    }));
}

/// Running total as a new vector. See [`cumulative_sum_into`].
pub fn cumulative_sum<I>(data: I) -> Vec<f64>
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut out = Vec::new();
    cumulative_sum_into(data, &mut out);
    out
}

// ============================================================================
// Spread
// ============================================================================

/// Sample variance (Bessel-corrected) together with mean and count.
pub fn dispersion<I>(data: I) -> Dispersion
where
    I: IntoIterator,
    I::Item: Sample,
{
    let (s, s2, n) = valid(data).fold((0.0, 0.0, 0usize), |(s, s2, n), v| (s + v, s2 + v * v, n + 1));
    let nf = n as f64;
    let mean = if n == 0 { f64::NAN } else { s / nf };
    let variance = if n <= 1 { 0.0 } else { (s2 - s * s / nf) / (nf - 1.0) };
    Dispersion { variance, mean, n }
}

/// Sample variance `(Σx² − (Σx)²/N) / (N − 1)`. 0 if `N <= 1`.
pub fn variance<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    dispersion(data).variance
}

/// Sample standard deviation, `sqrt(variance)`.
pub fn std_dev<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    dispersion(data).std_dev()
}

/// Weighted variance `Σ w_i (x_i − x̄_w)² / Σ w_i` with `x̄_w` the weighted mean.
///
/// 0 if no pair is valid.
pub fn weighted_dispersion<I, W>(data: I, weights: W) -> Dispersion
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    W: IntoIterator,
    W::IntoIter: Clone,
    W::Item: Sample,
{
    let data = data.into_iter();
    let weights = weights.into_iter();
    let mean = weighted_average(data.clone(), weights.clone());

    let (s2, sw, n) = valid_pairs(data, weights).fold((0.0, 0.0, 0usize), |(s2, sw, n), (v, w)| {
        let d = v - mean;
        (s2 + d * d * w, sw + w, n + 1)
    });

    let variance = if n == 0 { 0.0 } else { s2 / sw };
    Dispersion { variance, mean, n }
}

/// Weighted variance. See [`weighted_dispersion`].
pub fn weighted_variance<I, W>(data: I, weights: W) -> f64
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    W: IntoIterator,
    W::IntoIter: Clone,
    W::Item: Sample,
{
    weighted_dispersion(data, weights).variance
}

/// Weighted standard deviation.
pub fn weighted_std_dev<I, W>(data: I, weights: W) -> f64
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    W: IntoIterator,
    W::IntoIter: Clone,
    W::Item: Sample,
{
    weighted_dispersion(data, weights).std_dev()
}

// ============================================================================
// Higher Moments
// ============================================================================

/// Skewness `m3 / m2^(3/2)` with population (divide-by-N) central moments.
///
/// 0 if there is no valid value.
pub fn skewness<I>(data: I) -> f64
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
{
    let data = data.into_iter();
    let mean = average(data.clone());

    let (s3, s2, n) = valid(data).fold((0.0, 0.0, 0usize), |(s3, s2, n), v| {
        let d = v - mean;
        (s3 + d * d * d, s2 + d * d, n + 1)
    });

    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let m2 = s2 / nf;
    s3 / nf / Float::sqrt(m2 * m2 * m2)
}

/// Central moment `⟨(X − μ)^order⟩`. 0 if there is no valid value.
pub fn central_moment<I>(data: I, order: i32) -> f64
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
{
    let data = data.into_iter();
    let mean = average(data.clone());

    let (s, n) = valid(data).fold((0.0, 0usize), |(s, n), v| (s + Float::powi(v - mean, order), n + 1));
    if n == 0 { 0.0 } else { s / n as f64 }
}

/// Non-central moment `⟨X^order⟩`. 0 if there is no valid value.
pub fn moment<I>(data: I, order: i32) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    let (s, n) = valid(data).fold((0.0, 0usize), |(s, n), v| (s + Float::powi(v, order), n + 1));
    if n == 0 { 0.0 } else { s / n as f64 }
}

// ============================================================================
// Correlation
// ============================================================================

/// Pearson correlation coefficient of the jointly valid pairs.
///
/// Computed as `Σ x'y' / sqrt(Σ x'² Σ y'²)` on mean-centered values.
/// NaN if no pair is valid.
pub fn correlation_coefficient<X, Y>(x: X, y: Y) -> f64
where
    X: IntoIterator,
    X::IntoIter: Clone,
    X::Item: Sample,
    Y: IntoIterator,
    Y::IntoIter: Clone,
    Y::Item: Sample,
{
    let x = x.into_iter();
    let y = y.into_iter();

    let (sx, sy, n) = valid_pairs(x.clone(), y.clone())
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), (a, b)| (sx + a, sy + b, n + 1));
    if n == 0 {
        return f64::NAN;
    }
    let xbar = sx / n as f64;
    let ybar = sy / n as f64;

    let (sxy, sxx, syy) = valid_pairs(x, y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (a, b)| {
        let dx = a - xbar;
        let dy = b - ybar;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    sxy / Float::sqrt(sxx * syy)
}
