//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data types and utilities every statistic builds on:
//! - Sample conversion and the "valid float" filter
//! - The crate error type
//! - Binning and 2D grid descriptions
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Sample conversion and validity filtering.
pub mod sample;

/// Bin anchors and bin layouts.
pub mod binning;

/// 2D grid geometry and results.
pub mod grid;
