//! Linear, weighted and robust regression with transform-based models.
//!
//! ## Purpose
//!
//! This module fits two-parameter models `f(x; a, b)` to paired data. Every
//! model is reduced to a straight-line fit in a transformed space, so one
//! linear solver serves all of them.
//!
//! ## Design notes
//!
//! * **Closed form**: Ordinary and weighted least squares use the analytic
//!   normal-equation solution; no matrix is built.
//! * **Constraints**: Either coefficient can be held fixed, in which case only
//!   the other is solved for. Holding both fixed returns the seeds unchanged.
//! * **Weights**: Raw weight data passes through a transform and is then squared,
//!   so `inverse_prop_safe_default` turns error bars into weights.
//! * **IRLS**: Robust fits solve the Lp problem by repeated weighted fits with
//!   weights `max(100ε, |e_i|)^((p − 2)/2)`. The default runs a fixed number of
//!   rounds; a tolerance enables an early exit.
//!
//! ## Key concepts
//!
//! | Model       | f(x; a, b)   | x   | y   | a (fit → model) |
//! |-------------|--------------|-----|-----|-----------------|
//! | Linear      | a + b x      | id  | id  | id              |
//! | PowerLaw    | a x^b        | ln  | ln  | exp             |
//! | Exponential | a exp(b x)   | id  | ln  | exp             |
//! | Logarithm   | a + b ln(x)  | ln  | id  | id              |
//!
//! ## Invariants
//!
//! * At least two valid pairs are required; fewer is `TooFewPoints`.
//! * Pairs whose transformed values are not finite are skipped.
//!
//! ## Non-goals
//!
//! * This module does not estimate parameter uncertainties.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

use core::fmt;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::transform::identity;
use crate::primitives::errors::StatsError;
use crate::primitives::sample::{Sample, is_ok_float};

// ============================================================================
// Coefficients and Constraints
// ============================================================================

/// Offset `a` and slope `b` of a straight line `a + b x`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearCoefficients {
    /// Offset.
    pub a: f64,
    /// Slope.
    pub b: f64,
}

/// Which coefficients a fit may change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Constraint {
    /// Fit both coefficients.
    #[default]
    Free,

    /// Hold `a` at the given value and fit `b`.
    FixedA(f64),

    /// Hold `b` at the given value and fit `a`.
    FixedB(f64),

    /// Hold both; the fit returns them unchanged.
    FixedBoth(f64, f64),
}

impl Constraint {
    /// Map the held values through the parameter transforms.
    fn map(self, fa: impl Fn(f64) -> f64, fb: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Free => Self::Free,
            Self::FixedA(a) => Self::FixedA(fa(a)),
            Self::FixedB(b) => Self::FixedB(fb(b)),
            Self::FixedBoth(a, b) => Self::FixedBoth(fa(a), fb(b)),
        }
    }
}

/// Options of the IRLS robust fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrlsOptions {
    /// Norm exponent `p` of the Lp objective `Σ |a + b x_i − y_i|^p`.
    pub p: f64,
    /// Total number of weighted fits, including the initial one.
    pub iterations: usize,
    /// Stop early once both coefficients move by less than this (relative) amount.
    pub tolerance: Option<f64>,
}

impl Default for IrlsOptions {
    fn default() -> Self {
        Self {
            p: 1.1,
            iterations: 100,
            tolerance: None,
        }
    }
}

impl IrlsOptions {
    fn check(&self) -> Result<(), StatsError> {
        if !(self.p > 0.0 && self.p.is_finite()) {
            return Err(StatsError::InvalidExponent(self.p));
        }
        if self.iterations == 0 {
            return Err(StatsError::InvalidIterations(self.iterations));
        }
        match self.tolerance {
            Some(tol) if !(tol > 0.0 && tol.is_finite()) => Err(StatsError::InvalidTolerance(tol)),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Weighted Sums
// ============================================================================

/// Sums `Σw`, `Σw x`, `Σw y`, `Σw x y`, `Σw x²` over weighted points.
#[derive(Debug, Clone, Copy, Default)]
struct WeightedSums {
    w: f64,
    x: f64,
    y: f64,
    xy: f64,
    x2: f64,
    n: usize,
}

impl WeightedSums {
    fn accumulate(points: impl Iterator<Item = (f64, f64, f64)>) -> Self {
        points.fold(Self::default(), |mut s, (x, y, w)| {
            s.w += w;
            s.x += w * x;
            s.y += w * y;
            s.xy += w * x * y;
            s.x2 += w * x * x;
            s.n += 1;
            s
        })
    }

    /// Solve for the free coefficients. With unit weights this is ordinary
    /// least squares.
    fn solve(&self, constraint: Constraint) -> LinearCoefficients {
        match constraint {
            Constraint::Free => {
                let b = (self.xy * self.w - self.x * self.y) / (self.x2 * self.w - self.x * self.x);
                let a = (self.y - b * self.x) / self.w;
                LinearCoefficients { a, b }
            }
            Constraint::FixedA(a) => LinearCoefficients {
                a,
                b: (self.y - a * self.w) / self.x,
            },
            Constraint::FixedB(b) => LinearCoefficients {
                a: (self.y - b * self.x) / self.w,
                b,
            },
            Constraint::FixedBoth(a, b) => LinearCoefficients { a, b },
        }
    }
}

fn require_points(n: usize) -> Result<(), StatsError> {
    if n > 1 {
        Ok(())
    } else {
        Err(StatsError::TooFewPoints { got: n, min: 2 })
    }
}

/// Weighted fit over pre-filtered `(x, y, w²)` triples.
fn fit_weighted(points: &[(f64, f64, f64)], constraint: Constraint) -> Result<LinearCoefficients, StatsError> {
    if let Constraint::FixedBoth(a, b) = constraint {
        return Ok(LinearCoefficients { a, b });
    }
    let sums = WeightedSums::accumulate(points.iter().copied());
    require_points(sums.n)?;
    Ok(sums.solve(constraint))
}

/// Valid `(x, y)` pairs after applying per-axis transforms.
fn transformed_pairs<X, Y>(x: X, y: Y, fx: fn(f64) -> f64, fy: fn(f64) -> f64) -> Vec<(f64, f64)>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    x.into_iter()
        .zip(y)
        .map(|(vx, vy)| (fx(vx.to_sample()), fy(vy.to_sample())))
        .filter(|&(vx, vy)| is_ok_float(vx) && is_ok_float(vy))
        .collect()
}

// ============================================================================
// Straight-Line Fits
// ============================================================================

/// Ordinary least-squares line through the valid `(x, y)` pairs.
///
/// `b = (Σxy − Σx Σy / N) / (Σx² − (Σx)² / N)`, `a = ȳ − b x̄`.
pub fn linear_regression<X, Y>(x: X, y: Y, constraint: Constraint) -> Result<LinearCoefficients, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    let points: Vec<(f64, f64, f64)> = transformed_pairs(x, y, identity, identity)
        .into_iter()
        .map(|(vx, vy)| (vx, vy, 1.0))
        .collect();
    fit_weighted(&points, constraint)
}

/// Weighted least-squares line, minimizing `Σ w_i² (y_i − a − b x_i)²`.
///
/// Each raw weight is mapped through `weight_transform` to give `w_i`. Triples
/// with an invalid `x`, `y` or `w_i²` are skipped.
pub fn linear_weighted_regression<X, Y, W, F>(
    x: X,
    y: Y,
    weights: W,
    constraint: Constraint,
    weight_transform: F,
) -> Result<LinearCoefficients, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    F: Fn(f64) -> f64,
{
    let points = weighted_points(x, y, weights, identity, identity, &weight_transform);
    fit_weighted(&points, constraint)
}

fn weighted_points<X, Y, W, F>(
    x: X,
    y: Y,
    weights: W,
    fx: fn(f64) -> f64,
    fy: fn(f64) -> f64,
    weight_transform: F,
) -> Vec<(f64, f64, f64)>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    F: Fn(f64) -> f64,
{
    x.into_iter()
        .zip(y)
        .zip(weights)
        .map(|((vx, vy), vw)| {
            let wi = weight_transform(vw.to_sample());
            (fx(vx.to_sample()), fy(vy.to_sample()), wi * wi)
        })
        .filter(|&(vx, vy, w2)| is_ok_float(vx) && is_ok_float(vy) && is_ok_float(w2))
        .collect()
}

/// IRLS over pre-filtered pairs.
fn fit_irls(pairs: &[(f64, f64)], constraint: Constraint, opts: &IrlsOptions) -> Result<LinearCoefficients, StatsError> {
    opts.check()?;
    if let Constraint::FixedBoth(a, b) = constraint {
        return Ok(LinearCoefficients { a, b });
    }
    require_points(pairs.len())?;

    let floor = f64::EPSILON * 100.0;
    let exponent = (opts.p - 2.0) / 2.0;
    let mut points: Vec<(f64, f64, f64)> = pairs.iter().map(|&(x, y)| (x, y, 1.0)).collect();
    let mut fit = fit_weighted(&points, constraint)?;

    for _iteration in 1..opts.iterations {
        for p in points.iter_mut() {
            let e = fit.a + fit.b * p.0 - p.1;
            let w = Float::powf(Float::max(floor, Float::abs(e)), exponent);
            p.2 = w * w;
        }
        let next = fit_weighted(&points, constraint)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(iteration = _iteration, a = next.a, b = next.b, "irls step");

        let converged = opts.tolerance.is_some_and(|tol| {
            Float::abs(next.a - fit.a) <= tol * (1.0 + Float::abs(fit.a))
                && Float::abs(next.b - fit.b) <= tol * (1.0 + Float::abs(fit.b))
        });
        fit = next;
        if converged {
            #[cfg(feature = "tracing")]
            tracing::debug!(iteration = _iteration, "irls converged");
            break;
        }
    }
    Ok(fit)
}

/// Robust straight-line fit minimizing `Σ |a + b x_i − y_i|^p` by IRLS.
///
/// Starts from an unweighted fit and performs `iterations − 1` reweighting
/// rounds (fewer if `tolerance` is set and reached).
pub fn robust_irls_linear_regression<X, Y>(
    x: X,
    y: Y,
    constraint: Constraint,
    opts: &IrlsOptions,
) -> Result<LinearCoefficients, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    fit_irls(&transformed_pairs(x, y, identity, identity), constraint, opts)
}

// ============================================================================
// Model Registry
// ============================================================================

/// A pair of `f64` maps: `(x, y)` data transforms or a parameter's `(forward, inverse)`.
pub type TransformPair = (fn(f64) -> f64, fn(f64) -> f64);

/// Two-parameter regression models, each linearized by data transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegressionModel {
    /// `f(x) = a + b x`
    #[default]
    Linear,

    /// `f(x) = a x^b`
    PowerLaw,

    /// `f(x) = a exp(b x)`
    Exponential,

    /// `f(x) = a + b ln(x)`
    Logarithm,
}

fn ln(v: f64) -> f64 {
    Float::ln(v)
}

fn exp(v: f64) -> f64 {
    Float::exp(v)
}

impl RegressionModel {
    /// All models, in declaration order.
    pub const ALL: [Self; 4] = [Self::Linear, Self::PowerLaw, Self::Exponential, Self::Logarithm];

    /// Evaluate `f(x; a, b)`.
    pub fn evaluate(self, x: f64, a: f64, b: f64) -> f64 {
        match self {
            Self::Linear => a + b * x,
            Self::PowerLaw => a * Float::powf(x, b),
            Self::Exponential => a * Float::exp(b * x),
            Self::Logarithm => a + b * Float::ln(x),
        }
    }

    /// The model with fixed coefficients as a closure.
    pub fn function(self, a: f64, b: f64) -> impl Fn(f64) -> f64 {
        move |x| self.evaluate(x, a, b)
    }

    /// Transforms applied to `(x, y)` before the linear fit.
    pub fn data_transform(self) -> TransformPair {
        match self {
            Self::Linear => (identity, identity),
            Self::PowerLaw => (ln, ln),
            Self::Exponential => (identity, ln),
            Self::Logarithm => (ln, identity),
        }
    }

    /// Forward and inverse transform of parameter `a`.
    pub fn param_a_transform(self) -> TransformPair {
        match self {
            Self::Linear | Self::Logarithm => (identity, identity),
            Self::PowerLaw | Self::Exponential => (ln, exp),
        }
    }

    /// Forward and inverse transform of parameter `b` (identity for every model).
    pub fn param_b_transform(self) -> TransformPair {
        (identity, identity)
    }

    /// Plain-text formula with the coefficients filled in.
    pub fn formula(self, a: f64, b: f64) -> String {
        match self {
            Self::Linear => format!("f(x) = {} + {}·x", a, b),
            Self::PowerLaw => format!("f(x) = {}·x^{}", a, b),
            Self::Exponential => format!("f(x) = {}·exp({}·x)", a, b),
            Self::Logarithm => format!("f(x) = {} + {}·ln(x)", a, b),
        }
    }

    /// Map a constraint into the linearized space.
    fn forward(self, constraint: Constraint) -> Constraint {
        constraint.map(self.param_a_transform().0, self.param_b_transform().0)
    }

    /// Map fitted coefficients back into model space.
    fn inverse(self, fit: LinearCoefficients) -> RegressionFit {
        RegressionFit {
            model: self,
            a: self.param_a_transform().1(fit.a),
            b: self.param_b_transform().1(fit.b),
        }
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::PowerLaw => "PowerLaw",
            Self::Exponential => "Exponential",
            Self::Logarithm => "Logarithm",
        };
        f.write_str(name)
    }
}

/// A fitted model with its coefficients in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    /// Fitted model.
    pub model: RegressionModel,
    /// First coefficient.
    pub a: f64,
    /// Second coefficient.
    pub b: f64,
}

impl RegressionFit {
    /// Evaluate the fitted model at `x`.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.model.evaluate(x, self.a, self.b)
    }

    /// The fitted model as a closure.
    pub fn function(&self) -> impl Fn(f64) -> f64 {
        self.model.function(self.a, self.b)
    }

    /// Plain-text formula, e.g. `f(x) = 2 + 3·x`.
    pub fn formula(&self) -> String {
        self.model.formula(self.a, self.b)
    }
}

impl fmt::Display for RegressionFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Regression ({}):", self.model)?;
        writeln!(f, "  a: {}", self.a)?;
        writeln!(f, "  b: {}", self.b)?;
        writeln!(f, "  {}", self.formula())
    }
}

// ============================================================================
// Model Fits
// ============================================================================

/// Least-squares fit of `model` via the linearizing transforms.
///
/// Held coefficients in `constraint` are given in model space.
pub fn regression<X, Y>(
    model: RegressionModel,
    x: X,
    y: Y,
    constraint: Constraint,
) -> Result<RegressionFit, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    let (fx, fy) = model.data_transform();
    let points: Vec<(f64, f64, f64)> = transformed_pairs(x, y, fx, fy)
        .into_iter()
        .map(|(vx, vy)| (vx, vy, 1.0))
        .collect();
    let fit = fit_weighted(&points, model.forward(constraint))?;
    Ok(model.inverse(fit))
}

/// Weighted least-squares fit of `model` via the linearizing transforms.
pub fn weighted_regression<X, Y, W, F>(
    model: RegressionModel,
    x: X,
    y: Y,
    weights: W,
    constraint: Constraint,
    weight_transform: F,
) -> Result<RegressionFit, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
    W: IntoIterator,
    W::Item: Sample,
    F: Fn(f64) -> f64,
{
    let (fx, fy) = model.data_transform();
    let points = weighted_points(x, y, weights, fx, fy, weight_transform);
    let fit = fit_weighted(&points, model.forward(constraint))?;
    Ok(model.inverse(fit))
}

/// Robust IRLS fit of `model` via the linearizing transforms.
pub fn robust_irls_regression<X, Y>(
    model: RegressionModel,
    x: X,
    y: Y,
    constraint: Constraint,
    opts: &IrlsOptions,
) -> Result<RegressionFit, StatsError>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    let (fx, fy) = model.data_transform();
    let fit = fit_irls(&transformed_pairs(x, y, fx, fy), model.forward(constraint), opts)?;
    Ok(model.inverse(fit))
}
