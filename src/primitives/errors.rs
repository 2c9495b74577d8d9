//! Error types for statistics operations.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate: builder validation, regression preconditions and
//! the polynomial least-squares solve.
//!
//! ## Design notes
//!
//! * **Recoverable**: Precondition violations (too few points, singular normal
//!   equations) are reported as values, never as panics.
//! * **no_std**: `Display` is implemented by hand so the type works without `std`.
//!   `std::error::Error` is implemented when the `std` feature is enabled.
//!
//! ## Invariants
//!
//! * Invalid individual samples (NaN/Inf) are never an error; they are skipped.
//!
//! ## Non-goals
//!
//! * This module does not perform validation itself (see `engine::validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

// ============================================================================
// StatsError
// ============================================================================

/// Errors reported by statistics operations and configuration builders.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// The input contained no valid (finite) samples where at least one is required.
    EmptyInput,

    /// Too few points for the requested operation.
    TooFewPoints {
        /// Number of usable points.
        got: usize,
        /// Minimum required.
        min: usize,
    },

    /// The linear solver reported a singular system.
    SingularSystem,

    /// Number of bins (or evaluation points) is not usable.
    InvalidBinCount(usize),

    /// Bin width (or evaluation spacing) is not positive and finite.
    InvalidBinWidth(f64),

    /// Explicit bin edges are empty or contain non-finite values.
    InvalidBinEdges(String),

    /// Kernel bandwidth is not positive and finite.
    InvalidBandwidth(f64),

    /// IRLS norm exponent is not positive and finite.
    InvalidExponent(f64),

    /// IRLS iteration count outside the accepted range.
    InvalidIterations(usize),

    /// Convergence tolerance is not positive and finite.
    InvalidTolerance(f64),

    /// 2D grid is not usable.
    InvalidGrid(String),

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// A configuration scalar is NaN or infinite.
    InvalidNumericValue(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input contains no valid values"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {}, need at least {}", got, min)
            }
            Self::SingularSystem => write!(f, "Linear solver failed: system is singular"),
            Self::InvalidBinCount(n) => write!(f, "Invalid bin count: {} (must be at least 1)", n),
            Self::InvalidBinWidth(w) => {
                write!(f, "Invalid bin width: {} (must be > 0 and finite)", w)
            }
            Self::InvalidBinEdges(msg) => write!(f, "Invalid bin edges: {}", msg),
            Self::InvalidBandwidth(h) => {
                write!(f, "Invalid bandwidth: {} (must be > 0 and finite)", h)
            }
            Self::InvalidExponent(p) => {
                write!(f, "Invalid norm exponent: {} (must be > 0 and finite)", p)
            }
            Self::InvalidIterations(n) => {
                write!(f, "Invalid iterations: {} (must be in [1, 10000])", n)
            }
            Self::InvalidTolerance(t) => {
                write!(f, "Invalid tolerance: {} (must be > 0 and finite)", t)
            }
            Self::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
            Self::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}
