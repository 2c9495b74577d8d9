//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Kernel functions for density estimation
//! - Dense linear solves for least-squares fits
//! - Weight transforms for weighted regression
//!
//! These are reusable mathematical building blocks with no statistics-specific logic.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel functions for density estimation.
pub mod kernel;

/// Linear solver abstraction.
pub mod linalg;

/// Weight transforms.
pub mod transform;
