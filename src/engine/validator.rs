//! Parameter validation for the statistics builders.
//!
//! ## Purpose
//!
//! This module checks builder parameters before a configuration is handed
//! out: bin counts and widths, bandwidths, IRLS settings and duplicate
//! setter calls.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Parameters only**: Sample data is never rejected for containing NaN or
//!   infinite values; those are skipped by the algorithms.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Widths, bandwidths, exponents and tolerances must be
//!   positive and finite.
//! * **Grids**: Evaluation ranges must be finite and non-empty.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// Internal dependencies
use crate::primitives::errors::StatsError;

/// Upper bound on IRLS iterations accepted by the builders.
pub const MAX_ITERATIONS: usize = 10_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for builder parameters.
///
/// All methods return `Result<(), StatsError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Scalar Validation
    // ========================================================================

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar(val: f64, name: &str) -> Result<(), StatsError> {
        if !val.is_finite() {
            return Err(StatsError::InvalidNumericValue(format!("{}={}", name, val)));
        }
        Ok(())
    }

    // ========================================================================
    // Binning Validation
    // ========================================================================

    /// Validate a bin or grid-point count.
    pub fn validate_bin_count(bins: usize) -> Result<(), StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidBinCount(bins));
        }
        Ok(())
    }

    /// Validate a bin width or grid spacing.
    pub fn validate_bin_width(width: f64) -> Result<(), StatsError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(StatsError::InvalidBinWidth(width));
        }
        Ok(())
    }

    /// Validate explicit bin starts (or evaluation positions).
    pub fn validate_bin_edges(edges: &[f64]) -> Result<(), StatsError> {
        if edges.is_empty() {
            return Err(StatsError::InvalidBinEdges("no bin edges given".into()));
        }
        for (i, &e) in edges.iter().enumerate() {
            if !e.is_finite() {
                return Err(StatsError::InvalidBinEdges(format!("edges[{}]={}", i, e)));
            }
        }
        Ok(())
    }

    /// Validate an evaluation range `left..=right` stepped by `delta`.
    pub fn validate_range(left: f64, delta: f64, right: f64) -> Result<(), StatsError> {
        Self::validate_scalar(left, "left")?;
        Self::validate_scalar(right, "right")?;
        Self::validate_bin_width(delta)?;
        if right < left {
            return Err(StatsError::InvalidGrid(format!(
                "range is empty: right ({}) < left ({})",
                right, left
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a KDE bandwidth.
    pub fn validate_bandwidth(bandwidth: f64) -> Result<(), StatsError> {
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(StatsError::InvalidBandwidth(bandwidth));
        }
        Ok(())
    }

    /// Validate the Lp norm exponent of the robust fit.
    pub fn validate_exponent(p: f64) -> Result<(), StatsError> {
        if !p.is_finite() || p <= 0.0 {
            return Err(StatsError::InvalidExponent(p));
        }
        Ok(())
    }

    /// Validate the number of IRLS iterations, `1..=MAX_ITERATIONS`.
    pub fn validate_iterations(iterations: usize) -> Result<(), StatsError> {
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(StatsError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the IRLS early-exit tolerance.
    pub fn validate_tolerance(tol: f64) -> Result<(), StatsError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(StatsError::InvalidTolerance(tol));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), StatsError> {
        if let Some(param) = duplicate_param {
            return Err(StatsError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
