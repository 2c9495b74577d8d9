//! High-level API for histograms, density estimates and regressions.
//!
//! ## Purpose
//!
//! This module is the public surface of the crate. It re-exports the free
//! functions of every layer and adds fluent builders for the three
//! configurable computations: [`HistogramBuilder`], [`KdeBuilder`] and
//! [`RegressionBuilder`].
//!
//! ## Design notes
//!
//! * **Builder**: Every option is stored as `Option<_>` until `build()`, which
//!   fills defaults and validates.
//! * **Duplicates**: Setting the same option twice (or two options that
//!   configure the same thing, such as `bins` and `bin_width`) makes `build()`
//!   fail with `DuplicateParameter`.
//! * **Immutable**: A built configuration can be applied to any number of datasets.
//!
//! ## Key concepts
//!
//! * **Histogram**: `bins | bin_width | bin_edges`, `normalized` (default `true`),
//!   `cumulative` (default `false`), `anchor` (default left edge).
//! * **KDE**: `points | spacing | positions | range`, `kernel` (default Gaussian),
//!   `bandwidth` (default Silverman estimate per dataset), `cumulative`.
//! * **Regression**: `model`, `fix_a`, `fix_b`, `robust(p)`, `iterations`,
//!   `tolerance`, `weight_transform`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::descriptive::{
    Dispersion, MinMax, average, central_moment, correlation_coefficient, count, cumulative_sum,
    cumulative_sum_into, dispersion, maximum, min_max, minimum, modified_sum, moment, skewness, std_dev,
    sum, sum_sqr, variance, weighted_average, weighted_dispersion, weighted_std_dev, weighted_variance,
};
pub use crate::algorithms::grouping::{
    GroupKey, GroupedData, GroupedPairs, group_data, group_data_into, group_data_pairs, grouping_custom_round,
    grouping_identity, grouping_round, make_grouping_custom_round,
};
pub use crate::algorithms::histogram::{
    Histogram1D, HistogramOptions, histogram_1d, histogram_1d_autoranged_into, histogram_1d_autoranged_width_into,
    histogram_1d_edges_into, histogram_2d,
};
pub use crate::algorithms::kde::{
    KdeGrid, KdeResult, estimate_bandwidth, estimate_bandwidth_2d, estimate_bandwidths_2d, evaluate_kernel_sum,
    evaluate_kernel_sum_2d, kde_1d, kde_1d_into, kde_2d,
};
pub use crate::algorithms::order::{
    FiveNumberOptions, FiveNumberSummary, NMAD_CONSTANT, five_number_statistics,
    five_number_statistics_and_outliers, five_number_statistics_and_outliers_of_sorted,
    five_number_statistics_of_sorted, mad, mad_with_median, median, median_of_sorted, nmad, quantile,
    quantile_index, quantile_of_sorted, sorted_valid,
};
pub use crate::algorithms::polynomial::{Polynomial, poly_eval, poly_fit, poly_fit_with};
pub use crate::algorithms::regression::{
    Constraint, IrlsOptions, LinearCoefficients, RegressionFit, RegressionModel, TransformPair, linear_regression,
    linear_weighted_regression, regression, robust_irls_linear_regression, robust_irls_regression,
    weighted_regression,
};
pub use crate::evaluation::goodness::{
    coefficient_of_determination, coefficient_of_determination_conventional, rms_deviation, sum_of_deviations,
    weighted_coefficient_of_determination, weighted_sum_of_deviations,
};
pub use crate::math::kernel::{Kernel1D, Kernel2D};
pub use crate::math::linalg::{LinearSolver, LuSolver, QrSolver};
pub use crate::math::transform::{identity, inverse_prop_safe, inverse_prop_safe_default};
pub use crate::primitives::binning::{BinAnchor, BinLayout};
pub use crate::primitives::errors::StatsError;
pub use crate::primitives::grid::{Grid2D, GridSpec};
pub use crate::primitives::sample::{Sample, filter_valid, is_ok_float};

/// Record `name` as duplicated if `slot` is already set.
fn note_duplicate<T>(slot: &Option<T>, name: &'static str, duplicate: &mut Option<&'static str>) {
    if slot.is_some() {
        *duplicate = Some(name);
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// Fluent builder for 1D histograms.
#[derive(Debug, Clone, Default)]
pub struct HistogramBuilder {
    /// Bin layout.
    pub layout: Option<BinLayout>,

    /// Divide counts by the number of valid samples.
    pub normalized: Option<bool>,

    /// Emit running sums.
    pub cumulative: Option<bool>,

    /// Reported position within each bin.
    pub anchor: Option<BinAnchor>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl HistogramBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `bins` equal-width bins spanning the data.
    pub fn bins(mut self, bins: usize) -> Self {
        note_duplicate(&self.layout, "bins", &mut self.duplicate_param);
        self.layout = Some(BinLayout::Count(bins));
        self
    }

    /// Use bins of fixed width starting at the data minimum.
    pub fn bin_width(mut self, width: f64) -> Self {
        note_duplicate(&self.layout, "bin_width", &mut self.duplicate_param);
        self.layout = Some(BinLayout::Width(width));
        self
    }

    /// Use explicit bin starts.
    pub fn bin_edges(mut self, edges: Vec<f64>) -> Self {
        note_duplicate(&self.layout, "bin_edges", &mut self.duplicate_param);
        self.layout = Some(BinLayout::Edges(edges));
        self
    }

    /// Normalize counts by the number of valid samples.
    pub fn normalized(mut self, normalized: bool) -> Self {
        note_duplicate(&self.normalized, "normalized", &mut self.duplicate_param);
        self.normalized = Some(normalized);
        self
    }

    /// Emit the running sum of bin values.
    pub fn cumulative(mut self, cumulative: bool) -> Self {
        note_duplicate(&self.cumulative, "cumulative", &mut self.duplicate_param);
        self.cumulative = Some(cumulative);
        self
    }

    /// Set the reported position within each bin.
    pub fn anchor(mut self, anchor: BinAnchor) -> Self {
        note_duplicate(&self.anchor, "anchor", &mut self.duplicate_param);
        self.anchor = Some(anchor);
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<Histogram, StatsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let layout = self.layout.unwrap_or_default();
        match &layout {
            BinLayout::Count(bins) => Validator::validate_bin_count(*bins)?,
            BinLayout::Width(width) => Validator::validate_bin_width(*width)?,
            BinLayout::Edges(edges) => Validator::validate_bin_edges(edges)?,
        }

        let defaults = HistogramOptions::default();
        Ok(Histogram {
            layout,
            options: HistogramOptions {
                normalized: self.normalized.unwrap_or(defaults.normalized),
                cumulative: self.cumulative.unwrap_or(defaults.cumulative),
                anchor: self.anchor.unwrap_or(defaults.anchor),
            },
        })
    }
}

/// Validated histogram configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    layout: BinLayout,
    options: HistogramOptions,
}

impl Histogram {
    /// Bin layout.
    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Post-processing options.
    pub fn options(&self) -> HistogramOptions {
        self.options
    }

    /// Histogram of `data`.
    pub fn fit<I>(&self, data: I) -> Result<Histogram1D, StatsError>
    where
        I: IntoIterator,
        I::IntoIter: Clone,
        I::Item: Sample,
    {
        histogram_1d(data, &self.layout, self.options)
    }
}

// ============================================================================
// Kernel Density Estimation
// ============================================================================

/// Fluent builder for 1D kernel density estimates.
#[derive(Debug, Clone, Default)]
pub struct KdeBuilder {
    /// Evaluation grid.
    pub grid: Option<KdeGrid>,

    /// Kernel.
    pub kernel: Option<Kernel1D>,

    /// Fixed bandwidth; estimated per dataset if unset.
    pub bandwidth: Option<f64>,

    /// Emit running sums.
    pub cumulative: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl KdeBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate at `n + 1` equally spaced points from data minimum to maximum.
    pub fn points(mut self, n: usize) -> Self {
        note_duplicate(&self.grid, "points", &mut self.duplicate_param);
        self.grid = Some(KdeGrid::Points(n));
        self
    }

    /// Evaluate from the data minimum in steps of `spacing`.
    pub fn spacing(mut self, spacing: f64) -> Self {
        note_duplicate(&self.grid, "spacing", &mut self.duplicate_param);
        self.grid = Some(KdeGrid::Spacing(spacing));
        self
    }

    /// Evaluate at explicit positions.
    pub fn positions(mut self, positions: Vec<f64>) -> Self {
        note_duplicate(&self.grid, "positions", &mut self.duplicate_param);
        self.grid = Some(KdeGrid::Positions(positions));
        self
    }

    /// Evaluate at `left, left + delta, ...` up to `right`.
    pub fn range(mut self, left: f64, delta: f64, right: f64) -> Self {
        note_duplicate(&self.grid, "range", &mut self.duplicate_param);
        self.grid = Some(KdeGrid::Range { left, delta, right });
        self
    }

    /// Set the kernel.
    pub fn kernel(mut self, kernel: Kernel1D) -> Self {
        note_duplicate(&self.kernel, "kernel", &mut self.duplicate_param);
        self.kernel = Some(kernel);
        self
    }

    /// Use a fixed bandwidth instead of Silverman's estimate.
    pub fn bandwidth(mut self, bandwidth: f64) -> Self {
        note_duplicate(&self.bandwidth, "bandwidth", &mut self.duplicate_param);
        self.bandwidth = Some(bandwidth);
        self
    }

    /// Emit the running sum of densities.
    pub fn cumulative(mut self, cumulative: bool) -> Self {
        note_duplicate(&self.cumulative, "cumulative", &mut self.duplicate_param);
        self.cumulative = Some(cumulative);
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<Kde, StatsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let grid = self.grid.unwrap_or_default();
        match &grid {
            KdeGrid::Points(n) => Validator::validate_bin_count(*n)?,
            KdeGrid::Spacing(step) => Validator::validate_bin_width(*step)?,
            KdeGrid::Positions(positions) => Validator::validate_bin_edges(positions)?,
            KdeGrid::Range { left, delta, right } => Validator::validate_range(*left, *delta, *right)?,
        }
        if let Some(h) = self.bandwidth {
            Validator::validate_bandwidth(h)?;
        }

        Ok(Kde {
            grid,
            kernel: self.kernel.unwrap_or_default(),
            bandwidth: self.bandwidth,
            cumulative: self.cumulative.unwrap_or(false),
        })
    }
}

/// Validated KDE configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Kde {
    grid: KdeGrid,
    kernel: Kernel1D,
    bandwidth: Option<f64>,
    cumulative: bool,
}

impl Kde {
    /// Evaluation grid.
    pub fn grid(&self) -> &KdeGrid {
        &self.grid
    }

    /// Kernel.
    pub fn kernel(&self) -> Kernel1D {
        self.kernel
    }

    /// Density estimate of `data`.
    ///
    /// Without a fixed bandwidth, Silverman's estimate of `data` is used; data
    /// with zero spread then fails with `InvalidBandwidth`.
    pub fn fit<I>(&self, data: I) -> Result<KdeResult, StatsError>
    where
        I: IntoIterator,
        I::IntoIter: Clone,
        I::Item: Sample,
    {
        let data = data.into_iter();
        let bandwidth = match self.bandwidth {
            Some(h) => h,
            None => estimate_bandwidth(data.clone()),
        };
        kde_1d(data, &self.grid, self.kernel.as_fn(), bandwidth, self.cumulative)
    }
}

// ============================================================================
// Regression
// ============================================================================

/// Fluent builder for model regressions.
#[derive(Debug, Clone, Default)]
pub struct RegressionBuilder {
    /// Model to fit.
    pub model: Option<RegressionModel>,

    /// Held value of `a`, in model space.
    pub fix_a: Option<f64>,

    /// Held value of `b`, in model space.
    pub fix_b: Option<f64>,

    /// Lp norm exponent; enables the robust fit.
    pub robust_p: Option<f64>,

    /// IRLS iterations; enables the robust fit.
    pub iterations: Option<usize>,

    /// IRLS early-exit tolerance; enables the robust fit.
    pub tolerance: Option<f64>,

    /// Transform from raw weight data to `w_i`.
    pub weight_transform: Option<fn(f64) -> f64>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl RegressionBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model (default `Linear`).
    pub fn model(mut self, model: RegressionModel) -> Self {
        note_duplicate(&self.model, "model", &mut self.duplicate_param);
        self.model = Some(model);
        self
    }

    /// Hold `a` at `a` (model space).
    pub fn fix_a(mut self, a: f64) -> Self {
        note_duplicate(&self.fix_a, "fix_a", &mut self.duplicate_param);
        self.fix_a = Some(a);
        self
    }

    /// Hold `b` at `b` (model space).
    pub fn fix_b(mut self, b: f64) -> Self {
        note_duplicate(&self.fix_b, "fix_b", &mut self.duplicate_param);
        self.fix_b = Some(b);
        self
    }

    /// Fit robustly in the Lp norm with exponent `p`.
    pub fn robust(mut self, p: f64) -> Self {
        note_duplicate(&self.robust_p, "robust", &mut self.duplicate_param);
        self.robust_p = Some(p);
        self
    }

    /// Number of IRLS iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        note_duplicate(&self.iterations, "iterations", &mut self.duplicate_param);
        self.iterations = Some(iterations);
        self
    }

    /// Stop IRLS once the coefficients change by less than `tolerance`.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        note_duplicate(&self.tolerance, "tolerance", &mut self.duplicate_param);
        self.tolerance = Some(tolerance);
        self
    }

    /// Map raw weight data to weights for [`Regression::fit_weighted`].
    pub fn weight_transform(mut self, transform: fn(f64) -> f64) -> Self {
        note_duplicate(&self.weight_transform, "weight_transform", &mut self.duplicate_param);
        self.weight_transform = Some(transform);
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<Regression, StatsError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let Some(a) = self.fix_a {
            Validator::validate_scalar(a, "fix_a")?;
        }
        if let Some(b) = self.fix_b {
            Validator::validate_scalar(b, "fix_b")?;
        }

        let robust = self.robust_p.is_some() || self.iterations.is_some() || self.tolerance.is_some();
        let irls = if robust {
            let defaults = IrlsOptions::default();
            let opts = IrlsOptions {
                p: self.robust_p.unwrap_or(defaults.p),
                iterations: self.iterations.unwrap_or(defaults.iterations),
                tolerance: self.tolerance,
            };
            Validator::validate_exponent(opts.p)?;
            Validator::validate_iterations(opts.iterations)?;
            if let Some(tol) = opts.tolerance {
                Validator::validate_tolerance(tol)?;
            }
            Some(opts)
        } else {
            None
        };

        let constraint = match (self.fix_a, self.fix_b) {
            (None, None) => Constraint::Free,
            (Some(a), None) => Constraint::FixedA(a),
            (None, Some(b)) => Constraint::FixedB(b),
            (Some(a), Some(b)) => Constraint::FixedBoth(a, b),
        };

        Ok(Regression {
            model: self.model.unwrap_or_default(),
            constraint,
            irls,
            weight_transform: self.weight_transform.unwrap_or(identity),
        })
    }
}

/// Validated regression configuration.
#[derive(Debug, Clone, Copy)]
pub struct Regression {
    model: RegressionModel,
    constraint: Constraint,
    irls: Option<IrlsOptions>,
    weight_transform: fn(f64) -> f64,
}

impl Regression {
    /// Model being fitted.
    pub fn model(&self) -> RegressionModel {
        self.model
    }

    /// Coefficient constraint.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    /// IRLS settings, if the fit is robust.
    pub fn irls(&self) -> Option<IrlsOptions> {
        self.irls
    }

    /// Fit the model to `(x, y)`: robust IRLS if configured, otherwise least squares.
    pub fn fit<X, Y>(&self, x: X, y: Y) -> Result<RegressionFit, StatsError>
    where
        X: IntoIterator,
        X::Item: Sample,
        Y: IntoIterator,
        Y::Item: Sample,
    {
        match &self.irls {
            Some(opts) => robust_irls_regression(self.model, x, y, self.constraint, opts),
            None => regression(self.model, x, y, self.constraint),
        }
    }

    /// Weighted least-squares fit of the model. Robust settings do not apply.
    pub fn fit_weighted<X, Y, W>(&self, x: X, y: Y, weights: W) -> Result<RegressionFit, StatsError>
    where
        X: IntoIterator,
        X::Item: Sample,
        Y: IntoIterator,
        Y::Item: Sample,
        W: IntoIterator,
        W::Item: Sample,
    {
        weighted_regression(self.model, x, y, weights, self.constraint, self.weight_transform)
    }
}
