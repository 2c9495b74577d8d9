//! # plotstat: Statistics for Plotting
//!
//! A numeric core for the statistics a plotting library draws: descriptive
//! aggregates, order statistics and box-plot summaries, histograms, kernel
//! density estimates and two-parameter or polynomial regressions.
//!
//! ## Data model
//!
//! Every routine accepts any `IntoIterator` whose items convert to `f64` (all
//! primitive numeric types, and references to them). Values that are NaN or
//! infinite are **skipped** everywhere, so a statistic over a column with gaps
//! equals the statistic over the column with the gaps removed:
//!
//! ```rust
//! use plotstat::{average, median};
//!
//! let data = [1.0, f64::NAN, 2.0, 3.0, f64::INFINITY, 4.0];
//! assert_eq!(average(&data), 2.5);
//! assert_eq!(median(&data), 2.5);
//! ```
//!
//! Empty or all-invalid inputs give sentinels instead of errors: NaN for
//! averages and order statistics, 0 for sums and variances.
//!
//! ## Quick Start
//!
//! ### Descriptive statistics
//!
//! ```rust
//! use plotstat::prelude::*;
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//!
//! assert_eq!(average(&data), 5.5);
//! assert_eq!(median(&data), 5.5);
//! assert!((std_dev(&data) - 3.0277).abs() < 1e-4);
//!
//! let summary = five_number_statistics(&data, FiveNumberOptions::default());
//! println!("{}", summary);
//! ```
//!
//! ```text
//! Summary:
//!   Data points: 10
//!   Minimum (q=0):  1
//!   Quantile1 (q=0.25): 3
//!   Median:          5.5
//!   Quantile2 (q=0.75): 7
//!   Maximum (q=1):  10
//!   IQR:             4
//! ```
//!
//! ### Histograms and density estimates
//!
//! ```rust
//! use plotstat::prelude::*;
//!
//! let data = vec![1.0, 2.0, 2.5, 3.0, 3.2, 4.0, 5.0];
//!
//! let hist = Histogram::new()
//!     .bins(4)
//!     .anchor(Mid)
//!     .build()?
//!     .fit(&data)?;
//! assert_eq!(hist.len(), 4);
//!
//! let kde = Kde::new()
//!     .points(50)
//!     .kernel(Epanechnikov)
//!     .build()?
//!     .fit(&data)?;
//! assert_eq!(kde.len(), 51);
//! # Result::<(), StatsError>::Ok(())
//! ```
//!
//! ### Regression
//!
//! ```rust
//! use plotstat::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = vec![5.0, 8.0, 11.0, 14.0, 17.0];
//!
//! let fit = Regression::new().model(Linear).build()?.fit(&x, &y)?;
//! assert!((fit.a - 2.0).abs() < 1e-12);
//! assert!((fit.b - 3.0).abs() < 1e-12);
//!
//! let poly = poly_fit(&x, &y, 1)?;
//! assert!((poly.evaluate(10.0) - 32.0).abs() < 1e-9);
//! # Result::<(), StatsError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Operations that can fail for reasons other than missing data return
//! `Result<_, StatsError>`: fewer than two points for a regression, a singular
//! polynomial system, or an invalid builder parameter.
//!
//! ```rust
//! use plotstat::prelude::*;
//!
//! match linear_regression(&[1.0], &[2.0], Constraint::Free) {
//!     Ok(fit) => println!("a = {}, b = {}", fit.a, fit.b),
//!     Err(e) => eprintln!("fit failed: {}", e),
//! }
//! ```
//!
//! ## Output sinks
//!
//! Histogram and KDE routines have `_into` variants that append to any
//! `Extend<f64>`, so results can be written straight into existing columns:
//!
//! ```rust
//! use plotstat::{HistogramOptions, histogram_1d_autoranged_into};
//!
//! let mut xs = Vec::new();
//! let mut ys = Vec::new();
//! histogram_1d_autoranged_into(&[1, 2, 2, 3], 2, HistogramOptions::default(), &mut xs, &mut ys)?;
//! assert_eq!(ys, vec![0.25, 0.75]);
//! # Result::<(), plotstat::StatsError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! plotstat = { version = "0.3", default-features = false }
//! ```
//!
//! ## Features
//!
//! | Feature   | Default | Description                                              |
//! |-----------|---------|----------------------------------------------------------|
//! | `std`     | yes     | Standard library support (`std::error::Error`)           |
//! | `tracing` | no      | Emit `tracing` events from IRLS and polynomial fits      |
//! | `dev`     | no      | Expose internal modules under `plotstat::internals`      |
//!
//! ## Complexity
//!
//! Aggregates are `O(N)`; order statistics sort a copy of the valid values
//! (`O(N log N)`). Kernel density estimates sum over every sample at every
//! evaluation point, `O(N · M)` for `M` points. Robust regression performs
//! `iterations` weighted fits of `O(N)` each.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - sample conversion, errors, binning and grids.
mod primitives;

// Layer 2: Math - kernels, linear solves and weight transforms.
mod math;

// Layer 3: Algorithms - the statistics.
//
// Contains aggregators, order statistics, histograms, kernel density
// estimation, regression and grouping.
mod algorithms;

// Layer 4: Evaluation - goodness of fit.
mod evaluation;

// Layer 5: Engine - builder validation.
mod engine;

// Layer 6: API - builders and the public surface.
mod api;

pub use crate::api::*;

// ============================================================================
// Prelude
// ============================================================================

/// Standard plotstat prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use plotstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        BinAnchor::{Left, Mid, Right},
        Constraint, FiveNumberOptions, FiveNumberSummary, Grid2D, GridSpec, HistogramBuilder as Histogram,
        HistogramOptions, IrlsOptions, KdeBuilder as Kde, KdeGrid,
        Kernel1D::{Cauchy, Cosine, Epanechnikov, Gaussian, Picard, Quartic, Triangle, Tricube, Triweight, Uniform},
        RegressionBuilder as Regression, RegressionFit,
        RegressionModel::{Exponential, Linear, Logarithm, PowerLaw},
        StatsError, average, coefficient_of_determination, count, five_number_statistics,
        five_number_statistics_and_outliers, histogram_2d, kde_2d, linear_regression, mad, median, min_max, nmad,
        poly_fit, quantile, std_dev, sum, variance,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal statistics algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal evaluation measures.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal validation engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
