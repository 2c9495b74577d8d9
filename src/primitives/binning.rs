//! Configuration types for binning and grid evaluation.
//!
//! ## Purpose
//!
//! This module defines the small value types shared by the histogram and KDE
//! engines: where a bin's emitted x-position lies, and how the bins (or
//! evaluation points) along one axis are laid out.
//!
//! ## Design notes
//!
//! * **Encapsulated**: Configuration is captured in simple enums with clear defaults.
//! * **Shared**: The same `bin_index` step drives 1D and 2D histograms.
//!
//! ## Key concepts
//!
//! 1. **Anchor**: Left edge, midpoint or right edge of a bin.
//! 2. **Layout**: Autoranged by count, autoranged by width, or explicit edges.
//!
//! ## Non-goals
//!
//! * This module does not perform binning itself (handled by `algorithms`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Position within a bin that is reported as the bin's x-coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinAnchor {
    /// The left edge (bin start).
    #[default]
    Left,

    /// The bin center.
    Mid,

    /// The right edge (bin end).
    Right,
}

impl BinAnchor {
    /// Offset added to the bin start for a bin of width `width`.
    #[inline]
    pub fn offset(&self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Mid => width / 2.0,
            Self::Right => width,
        }
    }
}

/// Layout of the bins along one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum BinLayout {
    /// Fixed number of bins spanning `[min, max]` of the data.
    Count(usize),

    /// Fixed bin width starting at the data minimum; count is `ceil(range / width)`.
    Width(f64),

    /// Explicit bin starts (sorted ascending before use).
    Edges(Vec<f64>),
}

impl Default for BinLayout {
    fn default() -> Self {
        Self::Count(11)
    }
}

/// Number of bins of width `width` needed to cover `range`.
///
/// Always at least one: a plain `ceil(range / width)` gives zero bins for
/// degenerate (zero-width) data, which here still yields a single bin.
#[inline]
pub fn bins_for_width(range: f64, width: f64) -> usize {
    let n = num_traits::Float::ceil(range / width);
    if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
}

/// Clamped bin index of `value` for bins of `width` starting at `start`.
///
/// Values below `start` fall into bin 0 and values past the end into the last bin.
#[inline]
pub fn bin_index(value: f64, start: f64, width: f64, bins: usize) -> usize {
    let raw = num_traits::Float::floor((value - start) / width);
    // NaN (zero-width range) maps to bin 0
    let idx = if raw > 0.0 { raw as usize } else { 0 };
    idx.min(bins.saturating_sub(1))
}
