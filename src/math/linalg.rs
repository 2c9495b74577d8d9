//! Dense linear system solving for least-squares fits.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the dense linear solve
//! needed by polynomial fitting, with a default implementation backed by nalgebra.
//!
//! ## Design notes
//!
//! * Matrices cross the trait boundary as column-major slices, so alternative
//!   backends do not need to depend on nalgebra.
//! * The default solver uses QR decomposition (Householder reflections), which is
//!   more stable than Cholesky on the ill-conditioned normal equations of
//!   high-degree polynomial fits.
//! * Singular systems are reported as failures; there is no pseudo-inverse
//!   fallback.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use nalgebra::{DMatrix, DVector};

// ============================================================================
// LinearSolver Trait
// ============================================================================

/// Solves a dense square system `A x = b`.
pub trait LinearSolver {
    /// Solve the `n × n` system given `a` in column-major order.
    ///
    /// Returns `None` if the system is singular.
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>>;
}

impl<S: LinearSolver + ?Sized> LinearSolver for &S {
    #[inline]
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
        (**self).solve(a, b, n)
    }
}

// ============================================================================
// Nalgebra Backend
// ============================================================================

/// QR-based solver backed by nalgebra. The default for polynomial fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrSolver;

impl LinearSolver for QrSolver {
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
        if n == 0 || a.len() != n * n || b.len() != n {
            return None;
        }
        let matrix = DMatrix::from_column_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let solution = matrix.qr().solve(&rhs)?;
        if solution.iter().all(|v| v.is_finite()) {
            Some(solution.as_slice().to_vec())
        } else {
            None
        }
    }
}

/// LU-based solver with partial pivoting, backed by nalgebra.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuSolver;

impl LinearSolver for LuSolver {
    fn solve(&self, a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
        if n == 0 || a.len() != n * n || b.len() != n {
            return None;
        }
        let matrix = DMatrix::from_column_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let solution = matrix.lu().solve(&rhs)?;
        if solution.iter().all(|v| v.is_finite()) {
            Some(solution.as_slice().to_vec())
        } else {
            None
        }
    }
}

/// Build the normal equations `VᵀV` and `Vᵀy` for a design matrix `V`
/// given row-major as `rows × cols`.
///
/// Returns `(VᵀV, Vᵀy)` with `VᵀV` in column-major order.
pub fn normal_equations(design: &[f64], y: &[f64], rows: usize, cols: usize) -> (Vec<f64>, Vec<f64>) {
    let v = DMatrix::from_row_slice(rows, cols, design);
    let rhs = DVector::from_column_slice(y);
    let vtv = v.tr_mul(&v);
    let vty = v.tr_mul(&rhs);
    (vtv.as_slice().to_vec(), vty.as_slice().to_vec())
}
