//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the statistics themselves:
//! - Descriptive aggregators (mean, variance, moments, correlation)
//! - Order statistics (median, quantiles, MAD, five-number summaries)
//! - Histograms and kernel density estimates in 1D and 2D
//! - Linear, weighted, robust and polynomial regression
//! - Grouping of category/value pairs
//!
//! Every routine skips values that are not finite.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-pass aggregators.
pub mod descriptive;

/// Median, quantiles, MAD and five-number summaries.
pub mod order;

/// 1D and 2D histograms.
pub mod histogram;

/// Kernel density estimation.
pub mod kde;

/// Straight-line and model regression.
pub mod regression;

/// Polynomial least-squares fits.
pub mod polynomial;

/// Category grouping.
pub mod grouping;
