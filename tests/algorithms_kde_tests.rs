use approx::assert_relative_eq;
use plotstat::*;

fn gaussian(t: f64) -> f64 {
    Kernel1D::Gaussian.evaluate(t)
}

fn positions(data: &[f64], grid: KdeGrid) -> Vec<f64> {
    kde_1d(data, &grid, gaussian, 1.0, false).unwrap().x
}

// ============================================================================
// Bandwidth
// ============================================================================

#[test]
fn test_estimate_bandwidth() {
    let data: Vec<f64> = (1..=10).map(f64::from).collect();
    let expected = 1.06 * std_dev(&data) / 10f64.powf(0.2);
    assert_relative_eq!(estimate_bandwidth(&data), expected, epsilon = 1e-12);

    assert_eq!(estimate_bandwidth([3.0]), 0.0);
    assert_eq!(estimate_bandwidth(Vec::<f64>::new()), 0.0);
}

#[test]
fn test_bandwidth_scale_equivariance() {
    let data = [0.3, 1.7, 2.2, 4.9, 5.0, 7.5, 8.1];
    let h = estimate_bandwidth(&data);
    for c in [0.01, 3.0, 250.0] {
        let scaled: Vec<f64> = data.iter().map(|v| v * c).collect();
        assert_relative_eq!(estimate_bandwidth(&scaled), c * h, max_relative = 1e-12);
    }
}

#[test]
fn test_bandwidth_shift_invariance() {
    let data = [0.3, 1.7, 2.2, 4.9, 5.0];
    let shifted: Vec<f64> = data.iter().map(|v| v + 10.0).collect();
    assert_relative_eq!(estimate_bandwidth(&shifted), estimate_bandwidth(&data), max_relative = 1e-9);
}

#[test]
fn test_estimate_bandwidths_2d() {
    let x = [1.0, 2.0, 3.0, f64::NAN, 4.0];
    let y = [2.0, 4.0, 6.0, 8.0, 8.0];
    let (hx, hy) = estimate_bandwidths_2d(&x, &y);

    let sx = std_dev([1.0, 2.0, 3.0, 4.0]);
    assert_relative_eq!(hx, sx / 4f64.powf(1.0 / 6.0), epsilon = 1e-12);
    assert_relative_eq!(hy, 2.0 * hx, epsilon = 1e-12);
}

// ============================================================================
// Point Evaluation
// ============================================================================

#[test]
fn test_evaluate_kernel_sum() {
    let uniform = Kernel1D::Uniform.as_fn();
    // Both samples within one bandwidth of t
    assert_relative_eq!(evaluate_kernel_sum(0.5, [0.0, 1.0], uniform, 1.0), 0.5);
    // Only the first sample contributes
    assert_relative_eq!(evaluate_kernel_sum(-0.5, [0.0, 1.0], uniform, 1.0), 0.25);
    // Bandwidth scales the density
    assert_relative_eq!(evaluate_kernel_sum(0.0, [0.0], uniform, 2.0), 0.25);
}

#[test]
fn test_evaluate_kernel_sum_empty_is_zero() {
    assert_eq!(evaluate_kernel_sum(0.0, [f64::NAN], gaussian, 1.0), 0.0);
    assert_eq!(evaluate_kernel_sum(0.0, Vec::<f64>::new(), gaussian, 1.0), 0.0);
}

#[test]
fn test_evaluate_kernel_sum_2d() {
    let k = Kernel2D::Gaussian.as_fn();
    let v = evaluate_kernel_sum_2d(0.0, 0.0, [0.0], [0.0], k, 4.0, 1.0);
    assert_relative_eq!(v, Kernel2D::Gaussian.evaluate(0.0, 0.0) / 2.0, epsilon = 1e-15);
    assert_eq!(evaluate_kernel_sum_2d(0.0, 0.0, [f64::NAN], [0.0], k, 1.0, 1.0), 0.0);
}

// ============================================================================
// Grid Layouts
// ============================================================================

#[test]
fn test_grid_points() {
    let data = [0.0, 1.0, 2.0, 3.0, 4.0];
    assert_eq!(positions(&data, KdeGrid::Points(4)), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let xs = positions(&[0.0, 1.0], KdeGrid::Points(3));
    assert_eq!(xs.len(), 4);
    assert_eq!(*xs.last().unwrap(), 1.0);

    // Degenerate range collapses to a single position
    assert_eq!(positions(&[2.0, 2.0], KdeGrid::Points(10)), vec![2.0]);
}

#[test]
fn test_grid_spacing_includes_maximum() {
    let data = [0.0, 4.0];
    assert_eq!(positions(&data, KdeGrid::Spacing(1.5)), vec![0.0, 1.5, 3.0, 4.0]);
    assert_eq!(positions(&data, KdeGrid::Spacing(2.0)), vec![0.0, 2.0, 4.0]);
}

#[test]
fn test_grid_range_and_positions() {
    let data = [0.0];
    let range = KdeGrid::Range {
        left: -1.0,
        delta: 0.5,
        right: 1.0,
    };
    assert_eq!(positions(&data, range), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert_eq!(
        positions(&data, KdeGrid::Positions(vec![3.0, -2.0, 0.0])),
        vec![-2.0, 0.0, 3.0]
    );
}

#[test]
fn test_grid_errors() {
    let data = [1.0, 2.0];
    let fit = |grid: KdeGrid| kde_1d(&data, &grid, gaussian, 1.0, false).unwrap_err();

    assert_eq!(fit(KdeGrid::Points(0)), StatsError::InvalidBinCount(0));
    assert_eq!(fit(KdeGrid::Spacing(0.0)), StatsError::InvalidBinWidth(0.0));
    assert!(matches!(fit(KdeGrid::Positions(vec![f64::NAN])), StatsError::InvalidBinEdges(_)));
    assert!(matches!(
        fit(KdeGrid::Range {
            left: f64::NEG_INFINITY,
            delta: 1.0,
            right: 0.0
        }),
        StatsError::InvalidGrid(_)
    ));

    let empty: [f64; 0] = [];
    assert_eq!(
        kde_1d(&empty, &KdeGrid::Points(5), gaussian, 1.0, false).unwrap_err(),
        StatsError::EmptyInput
    );
    assert_eq!(
        kde_1d(&data, &KdeGrid::default(), gaussian, 0.0, false).unwrap_err(),
        StatsError::InvalidBandwidth(0.0)
    );
}

// ============================================================================
// Density Evaluation
// ============================================================================

#[test]
fn test_kde_integrates_to_one() {
    let data = [1.0, 2.0, 2.5, 3.0, 3.2, 4.0, 5.0];
    let grid = KdeGrid::Range {
        left: -10.0,
        delta: 0.01,
        right: 16.0,
    };
    let kde = kde_1d(&data, &grid, gaussian, 0.5, false).unwrap();
    let area: f64 = kde.y.iter().sum::<f64>() * 0.01;
    assert_relative_eq!(area, 1.0, epsilon = 1e-6);
    assert_eq!(kde.bandwidth, 0.5);
}

#[test]
fn test_kde_cumulative() {
    let data = [0.0, 1.0, 3.0];
    let grid = KdeGrid::Points(6);
    let plain = kde_1d(&data, &grid, gaussian, 0.8, false).unwrap();
    let cumulative = kde_1d(&data, &grid, gaussian, 0.8, true).unwrap();

    let mut running = 0.0;
    for (p, c) in plain.y.iter().zip(&cumulative.y) {
        running += p;
        assert_relative_eq!(*c, running, epsilon = 1e-12);
    }
    assert!(cumulative.y.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_kde_skips_invalid() {
    let clean = [0.0, 1.0, 3.0];
    let gappy = [0.0, f64::NAN, 1.0, f64::INFINITY, 3.0];
    let grid = KdeGrid::Points(8);
    assert_eq!(
        kde_1d(&gappy, &grid, gaussian, 0.7, false).unwrap(),
        kde_1d(&clean, &grid, gaussian, 0.7, false).unwrap()
    );
}

#[test]
fn test_kde_positions_without_data() {
    let empty: [f64; 0] = [];
    let kde = kde_1d(&empty, &KdeGrid::Positions(vec![0.0, 1.0]), gaussian, 1.0, false).unwrap();
    assert_eq!(kde.y, vec![0.0, 0.0]);
}

#[test]
fn test_kde_into_appends() {
    let mut xs = vec![-1.0];
    let mut ys = vec![-1.0];
    kde_1d_into([0.0], &KdeGrid::Positions(vec![0.0]), gaussian, 1.0, false, &mut xs, &mut ys).unwrap();
    assert_eq!(xs, vec![-1.0, 0.0]);
    assert_relative_eq!(ys[1], gaussian(0.0));
}

#[test]
fn test_kde_result_display() {
    let kde = kde_1d([0.0, 1.0], &KdeGrid::Points(2), gaussian, 1.0, false).unwrap();
    assert_eq!(kde.len(), 3);
    assert!(!kde.is_empty());
    assert!(format!("{}", kde).contains("Points:    3"));
}

// ============================================================================
// 2D
// ============================================================================

#[test]
fn test_kde_2d() {
    let x = [0.0, f64::NAN];
    let y = [0.0, 1.0];
    let grid = GridSpec::new(0.0, 2.0, 0.0, 2.0, 2, 2);
    let kernel = Kernel2D::Gaussian.as_fn();

    let density = kde_2d(&x, &y, grid, kernel, 1.0, 1.0).unwrap();
    assert_eq!(density.values.len(), 4);
    // Evaluated at the lower-left corner of each cell
    assert_relative_eq!(density.get(0, 0).unwrap(), kernel(0.0, 0.0), epsilon = 1e-15);
    assert_relative_eq!(density.get(1, 0).unwrap(), kernel(1.0, 0.0), epsilon = 1e-15);
    assert_relative_eq!(density.get(1, 1).unwrap(), kernel(1.0, 1.0), epsilon = 1e-15);
}

#[test]
fn test_kde_2d_errors() {
    let kernel = Kernel2D::Uniform.as_fn();
    let grid = GridSpec::new(0.0, 1.0, 0.0, 1.0, 2, 2);
    assert_eq!(
        kde_2d([0.0], [0.0], grid, kernel, 1.0, -1.0).unwrap_err(),
        StatsError::InvalidBandwidth(-1.0)
    );
    let bad = GridSpec::new(0.0, 1.0, 0.0, 1.0, 2, 0);
    assert!(matches!(kde_2d([0.0], [0.0], bad, kernel, 1.0, 1.0), Err(StatsError::InvalidGrid(_))));
}
