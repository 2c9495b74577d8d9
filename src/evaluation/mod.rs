//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer scores fitted models against the data they were fitted to.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// R², χ² and related goodness-of-fit measures.
pub mod goodness;
