//! One- and two-dimensional histograms.
//!
//! ## Purpose
//!
//! This module bins valid samples into counts, optionally normalized by the
//! number of samples and optionally accumulated into a running sum.
//!
//! ## Design notes
//!
//! * **Three layouts**: Autoranged by bin count, autoranged by bin width, and
//!   explicit bin starts. The two autoranged layouts share one binning step; the
//!   explicit layout uses a binary search.
//! * **Emission**: Bin positions and values are appended to any `Extend<f64>`
//!   sinks, so callers can fill existing columns; [`Histogram1D`] is the owned form.
//! * **Explicit edges**: A value is assigned to the insertion point of a
//!   lower-bound search in the sorted edges, clamped to the last bin. Reported
//!   positions for the first and last bin use the width of the neighbouring bin.
//!
//! ## Invariants
//!
//! * Output length equals the number of bins.
//! * With `normalized` and not `cumulative`, the values sum to one.
//!
//! ## Non-goals
//!
//! * This module does not choose bin counts (no Sturges/Scott rules).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// Internal dependencies
use crate::algorithms::descriptive::min_max;
use crate::primitives::binning::{BinAnchor, BinLayout, bin_index, bins_for_width};
use crate::primitives::errors::StatsError;
use crate::primitives::grid::{Grid2D, GridSpec};
use crate::primitives::sample::{Sample, valid, valid_pairs};

// ============================================================================
// Options and Results
// ============================================================================

/// How bin counts are post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramOptions {
    /// Divide each count by the number of valid samples.
    pub normalized: bool,
    /// Emit the running sum instead of the per-bin value.
    pub cumulative: bool,
    /// Reported position within each bin.
    pub anchor: BinAnchor,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            normalized: true,
            cumulative: false,
            anchor: BinAnchor::Left,
        }
    }
}

/// Owned 1D histogram: bin positions and bin values of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram1D {
    /// Bin positions, per the configured anchor.
    pub x: Vec<f64>,
    /// Bin values (counts, fractions, or running sums).
    pub y: Vec<f64>,
}

impl Histogram1D {
    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` if there are no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(position, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl fmt::Display for Histogram1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram:")?;
        writeln!(f, "  Bins: {}", self.len())?;
        writeln!(f)?;
        writeln!(f, "{:>12} {:>12}", "X", "Value")?;
        writeln!(f, "  {}", "-".repeat(23))?;
        for (x, y) in self.iter() {
            writeln!(f, "{:>12.4} {:>12.6}", x, y)?;
        }
        Ok(())
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Append normalized / cumulative values of `counts` to `ys`.
fn emit_values<E: Extend<f64>>(counts: &[f64], n: usize, opts: HistogramOptions, ys: &mut E) {
    let norm = if opts.normalized && n > 0 { n as f64 } else { 1.0 };
    let mut running = 0.0;
    ys.extend(counts.iter().map(|&c| {
        let v = c / norm;
        if opts.cumulative {
            running += v;
            running
        } else {
            v
        }
    }));
}

// ============================================================================
// Autoranged 1D
// ============================================================================

/// Equal-width bins resolved against the data range.
#[derive(Debug, Clone, Copy)]
struct UniformBins {
    /// Left edge of the first bin.
    start: f64,
    width: f64,
    bins: usize,
    /// Number of valid samples.
    n: usize,
}

/// Shared binning step for the autoranged layouts.
fn histogram_uniform_into<I, E>(data: I, layout: UniformBins, opts: HistogramOptions, xs: &mut E, ys: &mut E)
where
    I: IntoIterator,
    I::Item: Sample,
    E: Extend<f64>,
{
    let UniformBins { start, width, bins, n } = layout;
    let mut counts = vec![0.0; bins];
    for v in valid(data) {
        counts[bin_index(v, start, width, bins)] += 1.0;
    }

    let offset = opts.anchor.offset(width);
    xs.extend((0..bins).map(|i| start + i as f64 * width + offset));
    emit_values(&counts, n, opts, ys);
}

/// Histogram with `bins` equal-width bins spanning the data range.
///
/// Fails with `EmptyInput` if there is no valid value and with
/// `InvalidBinCount` if `bins` is zero.
pub fn histogram_1d_autoranged_into<I, E>(
    data: I,
    bins: usize,
    opts: HistogramOptions,
    xs: &mut E,
    ys: &mut E,
) -> Result<(), StatsError>
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    E: Extend<f64>,
{
    if bins == 0 {
        return Err(StatsError::InvalidBinCount(bins));
    }
    let data = data.into_iter();
    let range = min_max(data.clone());
    if range.n == 0 {
        return Err(StatsError::EmptyInput);
    }

    let layout = UniformBins {
        start: range.min,
        width: range.range() / bins as f64,
        bins,
        n: range.n,
    };
    histogram_uniform_into(data, layout, opts, xs, ys);
    Ok(())
}

/// Histogram with bins of fixed `width` starting at the data minimum.
///
/// The bin count is `ceil(range / width)`, at least one.
pub fn histogram_1d_autoranged_width_into<I, E>(
    data: I,
    width: f64,
    opts: HistogramOptions,
    xs: &mut E,
    ys: &mut E,
) -> Result<(), StatsError>
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
    E: Extend<f64>,
{
    if !(width > 0.0 && width.is_finite()) {
        return Err(StatsError::InvalidBinWidth(width));
    }
    let data = data.into_iter();
    let range = min_max(data.clone());
    if range.n == 0 {
        return Err(StatsError::EmptyInput);
    }

    let layout = UniformBins {
        start: range.min,
        width,
        bins: bins_for_width(range.range(), width),
        n: range.n,
    };
    histogram_uniform_into(data, layout, opts, xs, ys);
    Ok(())
}

// ============================================================================
// Explicit Edges 1D
// ============================================================================

/// Width used to place the anchor of bin `i` among sorted `edges`.
///
/// The last bin borrows the width of its left neighbour; with only two edges
/// that rule does not apply and the last bin falls back to unit width.
fn edge_bin_width(edges: &[f64], i: usize) -> f64 {
    let n = edges.len();
    if i == 0 && i + 1 < n {
        edges[1] - edges[0]
    } else if i == n - 1 && i > 1 {
        edges[n - 1] - edges[n - 2]
    } else if i + 1 < n {
        edges[i + 1] - edges[i]
    } else {
        1.0
    }
}

/// Histogram over explicit bin starts.
///
/// `edges` are copied and sorted ascending. Each valid value goes to the
/// lower-bound insertion point among the edges, clamped to the last bin.
pub fn histogram_1d_edges_into<I, B, E>(
    data: I,
    edges: B,
    opts: HistogramOptions,
    xs: &mut E,
    ys: &mut E,
) -> Result<(), StatsError>
where
    I: IntoIterator,
    I::Item: Sample,
    B: IntoIterator,
    B::Item: Sample,
    E: Extend<f64>,
{
    let mut edges: Vec<f64> = edges.into_iter().map(|e| e.to_sample()).collect();
    if edges.is_empty() {
        return Err(StatsError::InvalidBinEdges("no bin edges given".into()));
    }
    if let Some(bad) = edges.iter().find(|e| !e.is_finite()) {
        return Err(StatsError::InvalidBinEdges(format!("non-finite edge {}", bad)));
    }
    edges.sort_unstable_by(f64::total_cmp);

    let bins = edges.len();
    let mut counts = vec![0.0; bins];
    let mut n = 0usize;
    for v in valid(data) {
        let pos = edges.partition_point(|&e| e < v);
        counts[pos.min(bins - 1)] += 1.0;
        n += 1;
    }

    xs.extend((0..bins).map(|i| match opts.anchor {
        BinAnchor::Left => edges[i],
        anchor => edges[i] + anchor.offset(edge_bin_width(&edges, i)),
    }));
    emit_values(&counts, n, opts, ys);
    Ok(())
}

// ============================================================================
// Owned 1D Entry Point
// ============================================================================

/// Histogram of `data` with the given layout, as an owned [`Histogram1D`].
pub fn histogram_1d<I>(data: I, layout: &BinLayout, opts: HistogramOptions) -> Result<Histogram1D, StatsError>
where
    I: IntoIterator,
    I::IntoIter: Clone,
    I::Item: Sample,
{
    let mut out = Histogram1D::default();
    match layout {
        BinLayout::Count(bins) => {
            histogram_1d_autoranged_into(data, *bins, opts, &mut out.x, &mut out.y)?
        }
        BinLayout::Width(width) => {
            histogram_1d_autoranged_width_into(data, *width, opts, &mut out.x, &mut out.y)?
        }
        BinLayout::Edges(edges) => histogram_1d_edges_into(data, edges, opts, &mut out.x, &mut out.y)?,
    }
    Ok(out)
}

// ============================================================================
// 2D
// ============================================================================

/// 2D histogram of the jointly valid `(x, y)` pairs over `grid`.
///
/// Values outside the grid are clamped into the border cells. With
/// `normalized`, each cell is divided by the number of valid pairs.
pub fn histogram_2d<X, Y>(x: X, y: Y, grid: GridSpec, normalized: bool) -> Result<Grid2D, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    grid.validate()?;
    let wx = grid.x_step();
    let wy = grid.y_step();

    let mut out = Grid2D::zeros(grid);
    let mut n = 0usize;
    for (vx, vy) in valid_pairs(x, y) {
        let bx = bin_index(vx, grid.xmin, wx, grid.nx);
        let by = bin_index(vy, grid.ymin, wy, grid.ny);
        out.values[by * grid.nx + bx] += 1.0;
        n += 1;
    }

    if normalized && n > 0 {
        let norm = n as f64;
        out.values.iter_mut().for_each(|v| *v /= norm);
    }
    Ok(out)
}
