//! Tests for the two-parameter regression models.
//!
//! ## Test Organization
//!
//! 1. **Linear** - Ordinary least squares and constraints
//! 2. **Weighted** - Weighted least squares and weight transforms
//! 3. **Robust** - IRLS fits in the presence of outliers
//! 4. **Models** - Power law, exponential and logarithmic fits

use approx::assert_relative_eq;
use plotstat::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn line(a: f64, b: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y = x.iter().map(|v| a + b * v).collect();
    (x, y)
}

/// Deterministic wiggle around `1 + 0.5 x`.
fn noisy_line(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let y = x.iter().map(|v| 1.0 + 0.5 * v + 0.3 * (3.0 * v).sin()).collect();
    (x, y)
}

// ============================================================================
// Linear
// ============================================================================

#[test]
fn test_linear_exact() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [5.0, 8.0, 11.0, 14.0, 17.0];
    let fit = linear_regression(&x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 2.0, epsilon = 1e-12);
    assert_relative_eq!(fit.b, 3.0, epsilon = 1e-12);
}

#[test]
fn test_linear_constraints() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [5.0, 8.0, 11.0, 14.0, 17.0];

    let fit = linear_regression(&x, &y, Constraint::FixedA(2.0)).unwrap();
    assert_eq!(fit.a, 2.0);
    assert_relative_eq!(fit.b, 3.0, epsilon = 1e-12);

    let fit = linear_regression(&x, &y, Constraint::FixedB(3.0)).unwrap();
    assert_relative_eq!(fit.a, 2.0, epsilon = 1e-12);
    assert_eq!(fit.b, 3.0);

    // Both held: returned unchanged, even without data
    let fit = linear_regression(Vec::<f64>::new(), Vec::<f64>::new(), Constraint::FixedBoth(-1.0, 7.0)).unwrap();
    assert_eq!(fit, LinearCoefficients { a: -1.0, b: 7.0 });
}

#[test]
fn test_linear_too_few_points() {
    let err = linear_regression([1.0], [2.0], Constraint::Free).unwrap_err();
    assert_eq!(err, StatsError::TooFewPoints { got: 1, min: 2 });

    let err = linear_regression([1.0, f64::NAN], [2.0, 3.0], Constraint::Free).unwrap_err();
    assert_eq!(err, StatsError::TooFewPoints { got: 1, min: 2 });
}

#[test]
fn test_linear_skips_invalid_pairs() {
    let x = [1.0, f64::NAN, 2.0, 3.0, 4.0];
    let y = [3.0, 100.0, 5.0, f64::INFINITY, 9.0];
    let fit = linear_regression(&x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 1.0, epsilon = 1e-12);
    assert_relative_eq!(fit.b, 2.0, epsilon = 1e-12);
}

#[test]
fn test_residuals_have_no_trend() {
    let (x, y) = noisy_line(60);
    let fit = linear_regression(&x, &y, Constraint::Free).unwrap();

    let residuals: Vec<f64> = x.iter().zip(&y).map(|(xi, yi)| yi - (fit.a + fit.b * xi)).collect();
    let refit = linear_regression(&x, &residuals, Constraint::Free).unwrap();
    assert_relative_eq!(refit.a, 0.0, epsilon = 1e-10);
    assert_relative_eq!(refit.b, 0.0, epsilon = 1e-10);
}

// ============================================================================
// Weighted
// ============================================================================

#[test]
fn test_weighted_zero_weight_ignores_point() {
    let x = [1.0, 2.0, 3.0, 10.0];
    let y = [1.0, 2.0, 3.0, 100.0];
    let w = [1.0, 1.0, 1.0, 0.0];
    let fit = linear_weighted_regression(&x, &y, &w, Constraint::Free, identity).unwrap();
    assert_relative_eq!(fit.a, 0.0, epsilon = 1e-12);
    assert_relative_eq!(fit.b, 1.0, epsilon = 1e-12);
}

#[test]
fn test_weighted_unit_weights_match_ols() {
    let (x, y) = noisy_line(25);
    let ones = vec![1.0; x.len()];
    let ols = linear_regression(&x, &y, Constraint::Free).unwrap();
    let wls = linear_weighted_regression(&x, &y, &ones, Constraint::Free, identity).unwrap();
    assert_relative_eq!(ols.a, wls.a, epsilon = 1e-12);
    assert_relative_eq!(ols.b, wls.b, epsilon = 1e-12);
}

#[test]
fn test_weighted_with_error_column() {
    // Small errors dominate: the fit follows the first three points
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 1.0, 2.0, 30.0];
    let errors = [1e-3, 1e-3, 1e-3, 10.0];
    let fit = linear_weighted_regression(&x, &y, &errors, Constraint::Free, inverse_prop_safe_default).unwrap();
    assert_relative_eq!(fit.a, 0.0, epsilon = 1e-3);
    assert_relative_eq!(fit.b, 1.0, epsilon = 1e-3);
}

#[test]
fn test_weighted_squares_the_transformed_weight() {
    // Weights 1 and -1 are equivalent after squaring
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 2.0, 1.0];
    let a = linear_weighted_regression(&x, &y, [1.0, 1.0, 1.0], Constraint::Free, identity).unwrap();
    let b = linear_weighted_regression(&x, &y, [1.0, -1.0, 1.0], Constraint::Free, identity).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Robust
// ============================================================================

#[test]
fn test_irls_resists_outlier() {
    let (x, mut y) = line(1.0, 2.0, 11);
    y[8] += 50.0;

    let ols = linear_regression(&x, &y, Constraint::Free).unwrap();
    let irls = robust_irls_linear_regression(&x, &y, Constraint::Free, &IrlsOptions::default()).unwrap();

    let ols_err = (ols.a - 1.0).abs() + (ols.b - 2.0).abs();
    let irls_err = (irls.a - 1.0).abs() + (irls.b - 2.0).abs();
    assert!(irls_err < ols_err, "irls {:?} vs ols {:?}", irls, ols);
    assert!(irls_err < 0.1, "irls {:?}", irls);
}

#[test]
fn test_irls_single_iteration_is_ols() {
    let (x, y) = noisy_line(20);
    let opts = IrlsOptions {
        iterations: 1,
        ..IrlsOptions::default()
    };
    let ols = linear_regression(&x, &y, Constraint::Free).unwrap();
    let irls = robust_irls_linear_regression(&x, &y, Constraint::Free, &opts).unwrap();
    assert_eq!(ols, irls);
}

#[test]
fn test_irls_p2_is_ols() {
    let (x, y) = noisy_line(20);
    let opts = IrlsOptions {
        p: 2.0,
        iterations: 10,
        tolerance: None,
    };
    let ols = linear_regression(&x, &y, Constraint::Free).unwrap();
    let irls = robust_irls_linear_regression(&x, &y, Constraint::Free, &opts).unwrap();
    assert_relative_eq!(ols.a, irls.a, epsilon = 1e-12);
    assert_relative_eq!(ols.b, irls.b, epsilon = 1e-12);
}

#[test]
fn test_irls_tolerance_stops_early() {
    let (x, mut y) = line(1.0, 2.0, 11);
    y[3] -= 20.0;
    let full = robust_irls_linear_regression(&x, &y, Constraint::Free, &IrlsOptions::default()).unwrap();
    let early = IrlsOptions {
        tolerance: Some(1e-9),
        ..IrlsOptions::default()
    };
    let fit = robust_irls_linear_regression(&x, &y, Constraint::Free, &early).unwrap();
    assert_relative_eq!(fit.a, full.a, epsilon = 1e-3);
    assert_relative_eq!(fit.b, full.b, epsilon = 1e-3);
}

#[test]
fn test_irls_invalid_options() {
    let (x, y) = line(0.0, 1.0, 5);
    let bad_p = IrlsOptions {
        p: 0.0,
        ..IrlsOptions::default()
    };
    assert_eq!(
        robust_irls_linear_regression(&x, &y, Constraint::Free, &bad_p).unwrap_err(),
        StatsError::InvalidExponent(0.0)
    );

    let bad_iter = IrlsOptions {
        iterations: 0,
        ..IrlsOptions::default()
    };
    assert_eq!(
        robust_irls_linear_regression(&x, &y, Constraint::Free, &bad_iter).unwrap_err(),
        StatsError::InvalidIterations(0)
    );

    let bad_tol = IrlsOptions {
        tolerance: Some(f64::NAN),
        ..IrlsOptions::default()
    };
    assert!(matches!(
        robust_irls_linear_regression(&x, &y, Constraint::Free, &bad_tol),
        Err(StatsError::InvalidTolerance(_))
    ));
}

#[test]
fn test_irls_with_fixed_offset() {
    let (x, mut y) = line(1.0, 2.0, 11);
    y[10] += 40.0;
    let fit = robust_irls_linear_regression(&x, &y, Constraint::FixedA(1.0), &IrlsOptions::default()).unwrap();
    assert_eq!(fit.a, 1.0);
    assert_relative_eq!(fit.b, 2.0, epsilon = 0.05);
}

// ============================================================================
// Models
// ============================================================================

#[test]
fn test_power_law() {
    let x: Vec<f64> = (1..=8).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v.powf(1.5)).collect();
    let fit = regression(RegressionModel::PowerLaw, &x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 2.0, epsilon = 1e-10);
    assert_relative_eq!(fit.b, 1.5, epsilon = 1e-10);
    assert_relative_eq!(fit.evaluate(4.0), 16.0, epsilon = 1e-9);
}

#[test]
fn test_exponential() {
    let x: Vec<f64> = (0..8).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * (0.5 * v).exp()).collect();
    let fit = regression(RegressionModel::Exponential, &x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 3.0, epsilon = 1e-10);
    assert_relative_eq!(fit.b, 0.5, epsilon = 1e-10);
}

#[test]
fn test_logarithm() {
    let x: Vec<f64> = (1..=8).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v.ln()).collect();
    let fit = regression(RegressionModel::Logarithm, &x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 1.0, epsilon = 1e-10);
    assert_relative_eq!(fit.b, 2.0, epsilon = 1e-10);
}

#[test]
fn test_model_constraint_in_model_space() {
    let x: Vec<f64> = (1..=6).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v.powf(1.5)).collect();
    let fit = regression(RegressionModel::PowerLaw, &x, &y, Constraint::FixedA(2.0)).unwrap();
    assert_relative_eq!(fit.a, 2.0, epsilon = 1e-12);
    assert_relative_eq!(fit.b, 1.5, epsilon = 1e-10);
}

#[test]
fn test_model_skips_untransformable_points() {
    // ln of non-positive values is NaN; those pairs are dropped
    let x = [-1.0, 0.0, 1.0, 2.0, 4.0];
    let y = [5.0, 5.0, 3.0, 6.0, 12.0];
    let fit = regression(RegressionModel::PowerLaw, &x, &y, Constraint::Free).unwrap();
    assert_relative_eq!(fit.a, 3.0, epsilon = 1e-10);
    assert_relative_eq!(fit.b, 1.0, epsilon = 1e-10);
}

#[test]
fn test_weighted_and_robust_models() {
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let mut y: Vec<f64> = x.iter().map(|v| 3.0 * (0.2 * v).exp()).collect();
    let ones = vec![1.0; x.len()];

    let fit = weighted_regression(RegressionModel::Exponential, &x, &y, &ones, Constraint::Free, identity).unwrap();
    assert_relative_eq!(fit.a, 3.0, epsilon = 1e-10);
    assert_relative_eq!(fit.b, 0.2, epsilon = 1e-10);

    y[4] *= 5.0;
    let fit = robust_irls_regression(RegressionModel::Exponential, &x, &y, Constraint::Free, &IrlsOptions::default())
        .unwrap();
    assert_relative_eq!(fit.a, 3.0, epsilon = 0.05);
    assert_relative_eq!(fit.b, 0.2, epsilon = 0.01);
}

#[test]
fn test_model_registry() {
    assert_eq!(RegressionModel::ALL.len(), 4);
    assert_eq!(RegressionModel::default(), RegressionModel::Linear);

    for model in RegressionModel::ALL {
        let (fwd, inv) = model.param_a_transform();
        assert_relative_eq!(inv(fwd(2.5)), 2.5, epsilon = 1e-12);
        let (fwd, inv) = model.param_b_transform();
        assert_eq!(inv(fwd(-0.75)), -0.75);
    }

    let (fx, fy): TransformPair = RegressionModel::Exponential.data_transform();
    assert_eq!(fx(2.0), 2.0);
    assert_relative_eq!(fy(1f64.exp()), 1.0);

    let f = RegressionModel::Logarithm.function(1.0, 2.0);
    assert_relative_eq!(f(1.0), 1.0);
}

#[test]
fn test_formulas() {
    assert_eq!(RegressionModel::Linear.formula(2.0, 3.0), "f(x) = 2 + 3·x");
    assert_eq!(RegressionModel::PowerLaw.formula(2.0, 1.5), "f(x) = 2·x^1.5");
    assert_eq!(RegressionModel::Exponential.formula(3.0, 0.5), "f(x) = 3·exp(0.5·x)");
    assert_eq!(RegressionModel::Logarithm.formula(1.0, 2.0), "f(x) = 1 + 2·ln(x)");

    let fit = RegressionFit {
        model: RegressionModel::Linear,
        a: 2.0,
        b: 3.0,
    };
    assert_eq!(fit.formula(), "f(x) = 2 + 3·x");
    let text = format!("{}", fit);
    assert!(text.starts_with("Regression (Linear):"));
    assert!(text.contains("f(x) = 2 + 3·x"));
}
