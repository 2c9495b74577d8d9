//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer holds the checks that turn builder settings into a validated,
//! ready-to-run configuration.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Builder parameter validation.
pub mod validator;
