//! Order statistics: median, quantiles, MAD and five-number summaries.
//!
//! ## Purpose
//!
//! This module provides the statistics that need the data in sorted order.
//! Each entry point filters the valid samples into a fresh buffer, sorts it
//! ascending and delegates to a primitive working on the sorted slice.
//!
//! ## Design notes
//!
//! * **Nearest rank**: Quantiles pick an actual data value at index
//!   `floor(q (N − 1))`, clamped to `[0, N − 1]`; there is no interpolation.
//! * **Median**: For even `N` the two middle elements are found at index
//!   `(N − 1) / 2` (integer division) and its right neighbour.
//! * **Sorted primitives**: The `*_of_sorted` functions do not filter. A NaN in
//!   their input propagates into the result.
//!
//! ## Key concepts
//!
//! * **MAD**: `median(|x_i − median(x)|)`, a robust scale estimate.
//! * **NMAD**: `MAD / 0.6745`, consistent with σ for normal data.
//! * **Five-number summary**: min/q1/median/q2/max at configurable quantiles, the
//!   basis of a box plot.
//!
//! ## Invariants
//!
//! * `quantile1 <= median <= quantile2` for the default 0.25/0.75 box.
//! * Outliers lie strictly below `minimum` or strictly above `maximum`; copies
//!   of a whisker value are never outliers.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::sample::{Sample, valid};

/// Normal-consistency constant for the MAD.
pub const NMAD_CONSTANT: f64 = 0.6745;

// ============================================================================
// Sorting Helpers
// ============================================================================

/// Collect the valid samples of `data` into a vector sorted ascending.
pub fn sorted_valid<I>(data: I) -> Vec<f64>
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut values: Vec<f64> = valid(data).collect();
    values.sort_unstable_by(f64::total_cmp);
    values
}

/// Nearest-rank index of quantile `q` in a sorted slice of length `n > 0`.
#[inline]
pub fn quantile_index(q: f64, n: usize) -> usize {
    let last = n.saturating_sub(1);
    let raw = Float::floor(q * last as f64);
    if raw > 0.0 { (raw as usize).min(last) } else { 0 }
}

// ============================================================================
// Sorted-Slice Primitives
// ============================================================================

/// Median of an ascending slice. NaN if empty.
///
/// Does not filter: a NaN anywhere in the slice may end up in the result.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => f64::NAN,
        1 => sorted[0],
        _ if n % 2 == 0 => {
            let mid = (n - 1) / 2;
            (sorted[mid] + sorted[mid + 1]) / 2.0
        }
        _ => sorted[(n - 1) / 2],
    }
}

/// Nearest-rank quantile of an ascending slice. NaN if empty.
pub fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted[quantile_index(q, sorted.len())]
}

// ============================================================================
// Sequence Entry Points
// ============================================================================

/// Median of the valid values. NaN if there are none.
pub fn median<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    median_of_sorted(&sorted_valid(data))
}

/// Nearest-rank quantile `q` of the valid values. NaN if there are none.
pub fn quantile<I>(data: I, q: f64) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    quantile_of_sorted(&sorted_valid(data), q)
}

/// Median absolute deviation together with the median it is centered on.
///
/// Both are NaN if there is no valid value.
pub fn mad_with_median<I>(data: I) -> (f64, f64)
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut values = sorted_valid(data);
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }

    let med = median_of_sorted(&values);
    for v in values.iter_mut() {
        *v = Float::abs(*v - med);
    }
    values.sort_unstable_by(f64::total_cmp);

    (median_of_sorted(&values), med)
}

/// Median absolute deviation `median(|x_i − median(x)|)`.
pub fn mad<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    mad_with_median(data).0
}

/// Normalized MAD, `MAD / 0.6745`.
pub fn nmad<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    mad(data) / NMAD_CONSTANT
}

// ============================================================================
// Five-Number Summary
// ============================================================================

/// Quantiles reported by a five-number summary.
///
/// The defaults describe a classic box plot: whiskers at the true extremes,
/// box from the 25th to the 75th percentile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberOptions {
    /// Quantile reported as the lower box edge.
    pub quantile1: f64,
    /// Quantile reported as the upper box edge.
    pub quantile2: f64,
    /// Quantile reported as the "minimum".
    pub minimum: f64,
    /// Quantile reported as the "maximum".
    pub maximum: f64,
}

impl Default for FiveNumberOptions {
    fn default() -> Self {
        Self {
            quantile1: 0.25,
            quantile2: 0.75,
            minimum: 0.0,
            maximum: 1.0,
        }
    }
}

impl FiveNumberOptions {
    /// Use the given quantiles as whisker ends, e.g. `(0.03, 0.97)`.
    pub fn with_whiskers(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Use the given quantiles as box edges.
    pub fn with_box(mut self, quantile1: f64, quantile2: f64) -> Self {
        self.quantile1 = quantile1;
        self.quantile2 = quantile2;
        self
    }
}

/// Five-number summary of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNumberSummary {
    /// Value at quantile `minimum_quantile`.
    pub minimum: f64,
    /// Quantile used for `minimum`.
    pub minimum_quantile: f64,
    /// Value at quantile `quantile1_spec`.
    pub quantile1: f64,
    /// Quantile used for `quantile1`.
    pub quantile1_spec: f64,
    /// Median.
    pub median: f64,
    /// Value at quantile `quantile2_spec`.
    pub quantile2: f64,
    /// Quantile used for `quantile2`.
    pub quantile2_spec: f64,
    /// Value at quantile `maximum_quantile`.
    pub maximum: f64,
    /// Quantile used for `maximum`.
    pub maximum_quantile: f64,
    /// Number of valid values.
    pub n: usize,
    /// Values outside `[minimum, maximum]` (only filled by the outlier variants).
    pub outliers: Vec<f64>,
}

impl Default for FiveNumberSummary {
    fn default() -> Self {
        Self::empty(FiveNumberOptions::default())
    }
}

impl FiveNumberSummary {
    fn empty(opts: FiveNumberOptions) -> Self {
        Self {
            minimum: f64::NAN,
            minimum_quantile: opts.minimum,
            quantile1: f64::NAN,
            quantile1_spec: opts.quantile1,
            median: f64::NAN,
            quantile2: f64::NAN,
            quantile2_spec: opts.quantile2,
            maximum: f64::NAN,
            maximum_quantile: opts.maximum,
            n: 0,
            outliers: Vec::new(),
        }
    }

    /// Interquartile range `quantile2 − quantile1`.
    #[inline]
    pub fn iqr(&self) -> f64 {
        self.quantile2 - self.quantile1
    }

    /// Half-width of the median notch, `2 · 1.58 · IQR / sqrt(N)`.
    #[inline]
    pub fn iqr_significance_estimate(&self) -> f64 {
        2.0 * (1.58 * self.iqr()) / Float::sqrt(self.n as f64)
    }
}

impl fmt::Display for FiveNumberSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.n)?;
        writeln!(f, "  Minimum (q={}):  {}", self.minimum_quantile, self.minimum)?;
        writeln!(f, "  Quantile1 (q={}): {}", self.quantile1_spec, self.quantile1)?;
        writeln!(f, "  Median:          {}", self.median)?;
        writeln!(f, "  Quantile2 (q={}): {}", self.quantile2_spec, self.quantile2)?;
        writeln!(f, "  Maximum (q={}):  {}", self.maximum_quantile, self.maximum)?;
        writeln!(f, "  IQR:             {}", self.iqr())?;
        if !self.outliers.is_empty() {
            writeln!(f, "  Outliers:        {:?}", self.outliers)?;
        }
        Ok(())
    }
}

/// Five-number summary of an ascending slice, without outliers.
pub fn five_number_statistics_of_sorted(sorted: &[f64], opts: FiveNumberOptions) -> FiveNumberSummary {
    let n = sorted.len();
    if n == 0 {
        return FiveNumberSummary::empty(opts);
    }

    let mut res = FiveNumberSummary::empty(opts);
    res.minimum = sorted[quantile_index(opts.minimum, n)];
    res.maximum = sorted[quantile_index(opts.maximum, n)];
    res.quantile1 = sorted[quantile_index(opts.quantile1, n)];
    res.quantile2 = sorted[quantile_index(opts.quantile2, n)];
    res.median = median_of_sorted(sorted);
    res.n = n;
    res
}

/// Five-number summary of an ascending slice, collecting outliers.
///
/// Every element strictly below the whisker `minimum` or strictly above the
/// whisker `maximum` is an outlier.
pub fn five_number_statistics_and_outliers_of_sorted(
    sorted: &[f64],
    opts: FiveNumberOptions,
) -> FiveNumberSummary {
    let mut res = five_number_statistics_of_sorted(sorted, opts);
    if res.n == 0 {
        return res;
    }

    let (lo, hi) = (res.minimum, res.maximum);
    res.outliers = sorted.iter().copied().filter(|&v| v < lo || v > hi).collect();
    res
}

/// Five-number summary of the valid values, without outliers.
pub fn five_number_statistics<I>(data: I, opts: FiveNumberOptions) -> FiveNumberSummary
where
    I: IntoIterator,
    I::Item: Sample,
{
    five_number_statistics_of_sorted(&sorted_valid(data), opts)
}

/// Five-number summary of the valid values, collecting outliers.
pub fn five_number_statistics_and_outliers<I>(data: I, opts: FiveNumberOptions) -> FiveNumberSummary
where
    I: IntoIterator,
    I::Item: Sample,
{
    five_number_statistics_and_outliers_of_sorted(&sorted_valid(data), opts)
}
