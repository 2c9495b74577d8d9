//! Two-dimensional evaluation grids.
//!
//! ## Purpose
//!
//! The 2D histogram and 2D KDE both produce a rectangular image of values.
//! `GridSpec` describes the covered rectangle and its resolution, `Grid2D`
//! carries the row-major result.
//!
//! ## Design notes
//!
//! * **Row-major**: `values[iy * nx + ix]`; rows run along y.
//! * **Widths**: A grid may be given by bin widths instead of counts, in which case
//!   `nx = ceil((xmax - xmin) / xwidth)`.
//!
//! ## Invariants
//!
//! * `values.len() == nx * ny` for every `Grid2D` produced by the crate.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// Internal dependencies
use crate::algorithms::descriptive::min_max;
use crate::primitives::binning::bins_for_width;
use crate::primitives::errors::StatsError;
use crate::primitives::sample::Sample;

// ============================================================================
// GridSpec
// ============================================================================

/// Rectangle and resolution of a 2D grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Left boundary.
    pub xmin: f64,
    /// Right boundary.
    pub xmax: f64,
    /// Lower boundary.
    pub ymin: f64,
    /// Upper boundary.
    pub ymax: f64,
    /// Number of cells along x.
    pub nx: usize,
    /// Number of cells along y.
    pub ny: usize,
}

impl GridSpec {
    /// Grid with explicit boundaries and cell counts.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, nx: usize, ny: usize) -> Self {
        Self { xmin, xmax, ymin, ymax, nx, ny }
    }

    /// Grid with explicit boundaries whose cell counts derive from cell widths.
    pub fn from_widths(
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        xwidth: f64,
        ywidth: f64,
    ) -> Result<Self, StatsError> {
        for w in [xwidth, ywidth] {
            if !(w > 0.0 && w.is_finite()) {
                return Err(StatsError::InvalidBinWidth(w));
            }
        }
        let nx = bins_for_width(num_traits::Float::abs(xmax - xmin), xwidth);
        let ny = bins_for_width(num_traits::Float::abs(ymax - ymin), ywidth);
        Ok(Self::new(xmin, xmax, ymin, ymax, nx, ny))
    }

    /// Grid spanning the valid range of `x` and `y` with the given cell counts.
    pub fn autoranged<X, Y>(x: X, y: Y, nx: usize, ny: usize) -> Result<Self, StatsError>
    where
        X: IntoIterator,
        X::Item: Sample,
        Y: IntoIterator,
        Y::Item: Sample,
    {
        let rx = min_max(x);
        let ry = min_max(y);
        if rx.n == 0 || ry.n == 0 {
            return Err(StatsError::EmptyInput);
        }
        Ok(Self::new(rx.min, rx.max, ry.min, ry.max, nx, ny))
    }

    /// Width of one cell along x.
    #[inline]
    pub fn x_step(&self) -> f64 {
        num_traits::Float::abs(self.xmax - self.xmin) / self.nx as f64
    }

    /// Height of one cell along y.
    #[inline]
    pub fn y_step(&self) -> f64 {
        num_traits::Float::abs(self.ymax - self.ymin) / self.ny as f64
    }

    /// Check that the grid is non-empty and finite.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(StatsError::InvalidGrid(format!(
                "cell counts must be positive (nx={}, ny={})",
                self.nx, self.ny
            )));
        }
        let bounds = [self.xmin, self.xmax, self.ymin, self.ymax];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(StatsError::InvalidGrid(format!(
                "boundaries must be finite ({:?})",
                bounds
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Grid2D
// ============================================================================

/// Row-major 2D array of values over a `GridSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    /// Grid geometry.
    pub spec: GridSpec,
    /// Values, `values[iy * nx + ix]`.
    pub values: Vec<f64>,
}

impl Grid2D {
    /// Zero-filled grid.
    pub fn zeros(spec: GridSpec) -> Self {
        Self {
            spec,
            values: vec![0.0; spec.nx * spec.ny],
        }
    }

    /// Value of cell `(ix, iy)`, if in range.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix < self.spec.nx && iy < self.spec.ny {
            self.values.get(iy * self.spec.nx + ix).copied()
        } else {
            None
        }
    }

    /// Left edge of each column.
    pub fn x_positions(&self) -> Vec<f64> {
        let step = self.spec.x_step();
        (0..self.spec.nx)
            .map(|i| self.spec.xmin + i as f64 * step)
            .collect()
    }

    /// Lower edge of each row.
    pub fn y_positions(&self) -> Vec<f64> {
        let step = self.spec.y_step();
        (0..self.spec.ny)
            .map(|i| self.spec.ymin + i as f64 * step)
            .collect()
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl fmt::Display for Grid2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid:")?;
        writeln!(
            f,
            "  x: [{}, {}] in {} cells, y: [{}, {}] in {} cells",
            self.spec.xmin, self.spec.xmax, self.spec.nx, self.spec.ymin, self.spec.ymax, self.spec.ny
        )?;
        for row in self.values.chunks(self.spec.nx.max(1)).rev() {
            for v in row {
                write!(f, " {:>10.5}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
