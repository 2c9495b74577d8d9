//! Least-squares polynomial fitting.
//!
//! ## Purpose
//!
//! This module fits `p_0 + p_1 x + ... + p_P x^P` to paired data by solving
//! the normal equations of the Vandermonde system.
//!
//! ## Design notes
//!
//! * **Solver seam**: The square solve is delegated to a [`LinearSolver`];
//!   [`poly_fit`] uses the QR solver.
//! * **No degree check**: A degree of `N` or more yields a singular system,
//!   reported as `SingularSystem` by the solver rather than checked up front.
//!
//! ## Invariants
//!
//! * A successful fit of degree `P` has exactly `P + 1` coefficients.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// Internal dependencies
use crate::math::linalg::{LinearSolver, QrSolver, normal_equations};
use crate::primitives::errors::StatsError;
use crate::primitives::sample::{Sample, valid_pairs};

// ============================================================================
// Polynomial
// ============================================================================

/// Polynomial with coefficients in ascending powers: `self.0[k]` multiplies `x^k`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial(pub Vec<f64>);

impl Polynomial {
    /// Coefficients `p_0..p_P`.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.0
    }

    /// Degree `P` (0 for an empty coefficient list).
    #[inline]
    pub fn degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Evaluate at `x` (Horner's scheme).
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        poly_eval(x, &self.0)
    }

    /// The polynomial as a closure.
    pub fn function(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.evaluate(x)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x) =")?;
        if self.0.is_empty() {
            return write!(f, " 0");
        }
        for (k, c) in self.0.iter().enumerate() {
            let sep = if k == 0 { " " } else { " + " };
            match k {
                0 => write!(f, "{}{}", sep, c)?,
                1 => write!(f, "{}{}·x", sep, c)?,
                _ => write!(f, "{}{}·x^{}", sep, c, k)?,
            }
        }
        Ok(())
    }
}

/// Evaluate `Σ p_k x^k` by Horner's scheme. 0 for no coefficients.
pub fn poly_eval(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

// ============================================================================
// Fitting
// ============================================================================

/// Fit a polynomial of `degree` with the given solver.
pub fn poly_fit_with<X, Y, S>(x: X, y: Y, degree: usize, solver: &S) -> Result<Polynomial, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    S: LinearSolver + ?Sized,
{
    let (xs, ys): (Vec<f64>, Vec<f64>) = valid_pairs(x, y).unzip();
    let rows = xs.len();
    if rows <= 1 {
        return Err(StatsError::TooFewPoints { got: rows, min: 2 });
    }

    let cols = degree + 1;
    let mut design = Vec::with_capacity(rows * cols);
    for &xi in &xs {
        let mut power = 1.0;
        for _ in 0..cols {
            design.push(power);
            power *= xi;
        }
    }

    let (vtv, vty) = normal_equations(&design, &ys, rows, cols);
    match solver.solve(&vtv, &vty, cols) {
        Some(coefficients) => Ok(Polynomial(coefficients)),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(rows, degree, "polynomial fit: singular normal equations");
            Err(StatsError::SingularSystem)
        }
    }
}

/// Least-squares polynomial of `degree` through the valid `(x, y)` pairs.
///
/// Fails with `TooFewPoints` for fewer than two valid pairs and with
/// `SingularSystem` if the normal equations cannot be solved.
pub fn poly_fit<X, Y>(x: X, y: Y, degree: usize) -> Result<Polynomial, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    poly_fit_with(x, y, degree, &QrSolver)
}
