//! Kernel density estimation in one and two dimensions.
//!
//! ## Purpose
//!
//! This module estimates a probability density from samples by summing a
//! kernel centered at every valid sample, and evaluates that estimate on a grid.
//!
//! ## Design notes
//!
//! * **Direct summation**: Each evaluation point visits every sample, so a grid
//!   of `M` points over `N` samples costs `O(N · M)`. There is no binning or
//!   FFT approximation.
//! * **Open kernels**: Every routine accepts any `Fn(f64) -> f64`; the
//!   [`Kernel1D`](crate::math::kernel::Kernel1D) enum only names the built-ins.
//! * **Restartable input**: The data is re-iterated once per evaluation point,
//!   so the grid routines need a `Clone` iterator.
//!
//! ## Key concepts
//!
//! * **Density**: `f(t) = 1/(N h) Σ k((t − x_i) / h)`.
//! * **Silverman's rule**: `h = 1.06 σ N^(-1/5)`.
//! * **Grids**: By point count or spacing between the data extremes (both
//!   inclusive), at explicit positions, or over `left..=right` in steps.
//!
//! ## Invariants
//!
//! * With no valid samples the density is zero everywhere.
//! * `estimate_bandwidth` is scale-equivariant.
//!
//! ## Non-goals
//!
//! * This module does not select bandwidths by cross-validation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::descriptive::{dispersion, min_max};
use crate::primitives::errors::StatsError;
use crate::primitives::grid::{Grid2D, GridSpec};
use crate::primitives::sample::{Sample, valid, valid_pairs};

// ============================================================================
// Grid Layout
// ============================================================================

/// Evaluation positions of a 1D density estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum KdeGrid {
    /// `n` equal steps from the data minimum to the data maximum (`n + 1` points).
    Points(usize),

    /// Fixed spacing from the data minimum; the maximum is always included.
    Spacing(f64),

    /// Explicit positions, sorted ascending before use.
    Positions(Vec<f64>),

    /// `left, left + delta, ...` up to and including `right`.
    Range {
        /// First position.
        left: f64,
        /// Step between positions.
        delta: f64,
        /// Last admissible position.
        right: f64,
    },
}

impl Default for KdeGrid {
    fn default() -> Self {
        Self::Points(100)
    }
}

/// Owned 1D density estimate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KdeResult {
    /// Evaluation positions.
    pub x: Vec<f64>,
    /// Density (or running sum of densities) at each position.
    pub y: Vec<f64>,
    /// Bandwidth used.
    pub bandwidth: f64,
}

impl KdeResult {
    /// Number of evaluation points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` if nothing was evaluated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl fmt::Display for KdeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kernel density estimate:")?;
        writeln!(f, "  Points:    {}", self.len())?;
        writeln!(f, "  Bandwidth: {:.6}", self.bandwidth)?;
        writeln!(f)?;
        writeln!(f, "{:>12} {:>12}", "X", "Density")?;
        writeln!(f, "  {}", "-".repeat(23))?;
        for (x, y) in self.x.iter().zip(self.y.iter()) {
            writeln!(f, "{:>12.4} {:>12.6}", x, y)?;
        }
        Ok(())
    }
}

// ============================================================================
// Bandwidth
// ============================================================================

/// Silverman's rule-of-thumb bandwidth `1.06 σ N^(-1/5)`.
///
/// Zero for fewer than two valid values.
pub fn estimate_bandwidth<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    let disp = dispersion(data);
    if disp.n <= 1 {
        return 0.0;
    }
    1.06 * disp.std_dev() / Float::powf(disp.n as f64, 1.0 / 5.0)
}

/// Scott's-rule bandwidth for one axis of a 2D estimate, `σ N^(-1/6)`.
pub fn estimate_bandwidth_2d<I>(data: I) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
{
    let disp = dispersion(data);
    if disp.n <= 1 {
        return 0.0;
    }
    disp.std_dev() / Float::powf(disp.n as f64, 1.0 / 6.0)
}

fn check_bandwidth(h: f64) -> Result<(), StatsError> {
    if h > 0.0 && h.is_finite() {
        Ok(())
    } else {
        Err(StatsError::InvalidBandwidth(h))
    }
}

// ============================================================================
// Point Evaluation
// ============================================================================

/// Density estimate at `t`: `1/(N h) Σ k((t − x_i) / h)` over valid `x_i`.
///
/// Returns 0 if there is no valid sample.
pub fn evaluate_kernel_sum<I, K>(t: f64, data: I, kernel: K, bandwidth: f64) -> f64
where
    I: IntoIterator,
    I::Item: Sample,
    K: Fn(f64) -> f64,
{
    let mut acc = 0.0;
    let mut n = 0usize;
    for v in valid(data) {
        acc += kernel((t - v) / bandwidth);
        n += 1;
    }
    if n == 0 { 0.0 } else { acc / n as f64 / bandwidth }
}

/// 2D density estimate at `(x, y)` over the jointly valid sample pairs.
///
/// Normalized by `N sqrt(hx hy)`. Returns 0 if there is no valid pair.
pub fn evaluate_kernel_sum_2d<X, Y, K>(
    x: f64,
    y: f64,
    xs: X,
    ys: Y,
    kernel: K,
    bandwidth_x: f64,
    bandwidth_y: f64,
) -> f64
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    K: Fn(f64, f64) -> f64,
{
    let mut acc = 0.0;
    let mut n = 0usize;
    for (vx, vy) in valid_pairs(xs, ys) {
        acc += kernel((x - vx) / bandwidth_x, (y - vy) / bandwidth_y);
        n += 1;
    }
    if n == 0 {
        0.0
    } else {
        acc / n as f64 / Float::sqrt(bandwidth_x * bandwidth_y)
    }
}

// ============================================================================
// Grid Positions
// ============================================================================

/// Positions `start, start + step, ...` while `<= end`.
fn stepped_positions(start: f64, step: f64, end: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut i = 0usize;
    loop {
        let x = start + i as f64 * step;
        if x > end {
            break;
        }
        out.push(x);
        i += 1;
    }
    out
}

/// Stepped positions over `[min, max]`, closing with `max` if the last step falls short.
fn spanning_positions(min: f64, max: f64, step: f64) -> Vec<f64> {
    if max <= min {
        return vec![min];
    }
    let mut out = stepped_positions(min, step, max);
    if out.last().is_none_or(|&last| last < max) {
        out.push(max);
    }
    out
}

/// Resolve `grid` against the valid range of `data`.
fn grid_positions<I>(data: I, grid: &KdeGrid) -> Result<Vec<f64>, StatsError>
where
    I: IntoIterator,
    I::Item: Sample,
{
    match grid {
        KdeGrid::Points(n) => {
            if *n == 0 {
                return Err(StatsError::InvalidBinCount(*n));
            }
            let range = min_max(data);
            if range.n == 0 {
                return Err(StatsError::EmptyInput);
            }
            if range.range() <= 0.0 {
                return Ok(vec![range.min]);
            }
            let step = range.range() / *n as f64;
            Ok((0..=*n)
                .map(|i| if i == *n { range.max } else { range.min + i as f64 * step })
                .collect())
        }
        KdeGrid::Spacing(step) => {
            if !(*step > 0.0 && step.is_finite()) {
                return Err(StatsError::InvalidBinWidth(*step));
            }
            let range = min_max(data);
            if range.n == 0 {
                return Err(StatsError::EmptyInput);
            }
            Ok(spanning_positions(range.min, range.max, *step))
        }
        KdeGrid::Positions(positions) => {
            let mut out = positions.clone();
            if let Some(bad) = out.iter().find(|p| !p.is_finite()) {
                return Err(StatsError::InvalidBinEdges(format!("non-finite position {}", bad)));
            }
            out.sort_unstable_by(f64::total_cmp);
            Ok(out)
        }
        KdeGrid::Range { left, delta, right } => {
            if !(*delta > 0.0 && delta.is_finite()) {
                return Err(StatsError::InvalidBinWidth(*delta));
            }
            if !(left.is_finite() && right.is_finite()) {
                return Err(StatsError::InvalidGrid(format!(
                    "range bounds must be finite ({}, {})",
                    left, right
                )));
            }
            Ok(stepped_positions(*left, *delta, *right))
        }
    }
}

// ============================================================================
// 1D Grid Evaluation
// ============================================================================

/// Evaluate the density of `data` over `grid`, appending positions and values.
///
/// With `cumulative`, each emitted value is the running sum of the densities
/// up to that position.
pub fn kde_1d_into<I, K, E>(
    data: I,
    grid: &KdeGrid,
    kernel: K,
    bandwidth: f64,
    cumulative: bool,
    xs: &mut E,
    ys: &mut E,
) -> Result<(), StatsError>
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    K: Fn(f64) -> f64,
    E: Extend<f64>,
{
    check_bandwidth(bandwidth)?;
    let data = data.into_iter();
    let positions = grid_positions(data.clone(), grid)?;

    let mut running = 0.0;
    let values: Vec<f64> = positions
        .iter()
        .map(|&t| {
            let d = evaluate_kernel_sum(t, data.clone(), &kernel, bandwidth);
            if cumulative {
                running += d;
                running
            } else {
                d
            }
        })
        .collect();

    xs.extend(positions);
    ys.extend(values);
    Ok(())
}

/// Evaluate the density of `data` over `grid` into an owned [`KdeResult`].
pub fn kde_1d<I, K>(
    data: I,
    grid: &KdeGrid,
    kernel: K,
    bandwidth: f64,
    cumulative: bool,
) -> Result<KdeResult, StatsError>
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    K: Fn(f64) -> f64,
{
    let mut out = KdeResult {
        bandwidth,
        ..KdeResult::default()
    };
    kde_1d_into(data, grid, kernel, bandwidth, cumulative, &mut out.x, &mut out.y)?;
    Ok(out)
}

// ============================================================================
// 2D Grid Evaluation
// ============================================================================

/// Evaluate the 2D density of the `(x, y)` pairs at the lower-left corner of
/// every cell of `grid`.
pub fn kde_2d<X, Y, K>(
    x: X,
    y: Y,
    grid: GridSpec,
    kernel: K,
    bandwidth_x: f64,
    bandwidth_y: f64,
) -> Result<Grid2D, StatsError>
where
    X: IntoIterator,
    X::IntoIter: Clone,
    X::Item: Sample,
    Y: IntoIterator,
    Y::IntoIter: Clone,
    Y::Item: Sample,
    K: Fn(f64, f64) -> f64,
{
    grid.validate()?;
    check_bandwidth(bandwidth_x)?;
    check_bandwidth(bandwidth_y)?;

    let x = x.into_iter();
    let y = y.into_iter();
    let mut out = Grid2D::zeros(grid);
    let (cols, rows) = (out.x_positions(), out.y_positions());
    for (iy, &py) in rows.iter().enumerate() {
        for (ix, &px) in cols.iter().enumerate() {
            out.values[iy * grid.nx + ix] =
                evaluate_kernel_sum_2d(px, py, x.clone(), y.clone(), &kernel, bandwidth_x, bandwidth_y);
        }
    }
    Ok(out)
}

/// Per-axis Scott's-rule bandwidths of the jointly valid `(x, y)` pairs.
pub fn estimate_bandwidths_2d<X, Y>(x: X, y: Y) -> (f64, f64)
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    let (px, py): (Vec<f64>, Vec<f64>) = valid_pairs(x, y).unzip();
    (estimate_bandwidth_2d(&px), estimate_bandwidth_2d(&py))
}

