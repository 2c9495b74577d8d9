use approx::assert_relative_eq;
use plotstat::*;

fn one_to_ten() -> Vec<f64> {
    (1..=10).map(f64::from).collect()
}

/// Interleave NaN and infinities between the values of `data`.
fn with_gaps(data: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN];
    for (i, &v) in data.iter().enumerate() {
        out.push(v);
        out.push(if i % 2 == 0 { f64::INFINITY } else { f64::NAN });
    }
    out.push(f64::NEG_INFINITY);
    out
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn test_one_to_ten_aggregates() {
    let data = one_to_ten();

    assert_eq!(count(&data), 10);
    assert_relative_eq!(average(&data), 5.5);
    assert_relative_eq!(sum(&data), 55.0);
    assert_relative_eq!(sum_sqr(&data), 385.0);
    assert_relative_eq!(variance(&data), 55.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(std_dev(&data), 3.027_650_354_097_491_7, epsilon = 1e-12);

    let mm = min_max(&data);
    assert_eq!((mm.min, mm.max, mm.n), (1.0, 10.0, 10));
    assert_relative_eq!(mm.range(), 9.0);
}

#[test]
fn test_generic_inputs() {
    let ints = [1i32, 2, 3, 4];
    let bytes: Vec<u8> = vec![1, 2, 3, 4];
    assert_relative_eq!(average(ints), 2.5);
    assert_relative_eq!(average(&bytes), 2.5);
    assert_relative_eq!(average(ints.iter().map(|&v| v as f32)), 2.5);
    assert_relative_eq!(sum(0..5u64), 10.0);
}

#[test]
fn test_invalid_values_are_skipped() {
    let data = one_to_ten();
    let gappy = with_gaps(&data);

    assert_eq!(count(&gappy), count(&data));
    assert_eq!(average(&gappy), average(&data));
    assert_eq!(sum(&gappy), sum(&data));
    assert_eq!(variance(&gappy), variance(&data));
    assert_eq!(skewness(&gappy), skewness(&data));
    assert_eq!(min_max(&gappy).range(), min_max(&data).range());
}

#[test]
fn test_every_aggregator_ignores_gaps() {
    let data = one_to_ten();
    let gappy = with_gaps(&data);

    // Weights follow their value, so gaps get a (valid) weight but an invalid value.
    let weights_for = |d: &[f64]| -> Vec<f64> {
        d.iter()
            .map(|&v| if v.is_finite() { 0.5 * v + 1.0 } else { 1.0 })
            .collect()
    };
    let (w, gappy_w) = (weights_for(&data), weights_for(&gappy));

    let unary: [(&str, fn(&[f64]) -> f64); 17] = [
        ("count", |d| count(d) as f64),
        ("sum", |d| sum(d)),
        ("sum_sqr", |d| sum_sqr(d)),
        ("modified_sum", |d| modified_sum(d, |v| v * v * v)),
        ("average", |d| average(d)),
        ("variance", |d| variance(d)),
        ("std_dev", |d| std_dev(d)),
        ("skewness", |d| skewness(d)),
        ("moment_3", |d| moment(d, 3)),
        ("central_moment_2", |d| central_moment(d, 2)),
        ("central_moment_3", |d| central_moment(d, 3)),
        ("minimum", |d| minimum(d).0),
        ("maximum", |d| maximum(d).0),
        ("median", |d| median(d)),
        ("quantile_0.3", |d| quantile(d, 0.3)),
        ("mad", |d| mad(d)),
        ("nmad", |d| nmad(d)),
    ];
    for (name, f) in unary {
        assert_eq!(f(&gappy), f(&data), "{} changed by invalid values", name);
    }

    let weighted: [(&str, fn(&[f64], &[f64]) -> f64); 4] = [
        ("weighted_average", |d, w| weighted_average(d, w)),
        ("weighted_variance", |d, w| weighted_variance(d, w)),
        ("weighted_std_dev", |d, w| weighted_std_dev(d, w)),
        ("correlation_coefficient", |d, w| correlation_coefficient(d, w)),
    ];
    for (name, f) in weighted {
        assert_eq!(f(&gappy, &gappy_w), f(&data, &w), "{} changed by invalid values", name);
    }

    let mm = (min_max(&gappy), min_max(&data));
    assert_eq!((mm.0.min, mm.0.max, mm.0.n), (mm.1.min, mm.1.max, mm.1.n));
}

#[test]
fn test_empty_sentinels() {
    let empty: [f64; 0] = [];
    let all_nan = [f64::NAN, f64::INFINITY];

    for data in [&empty[..], &all_nan[..]] {
        assert_eq!(count(data), 0);
        assert!(average(data).is_nan());
        assert_eq!(sum(data), 0.0);
        assert_eq!(variance(data), 0.0);
        assert_eq!(std_dev(data), 0.0);

        let mm = min_max(data);
        assert!(mm.min.is_nan() && mm.max.is_nan());
        assert_eq!(mm.min_pos, None);
        assert_eq!(mm.n, 0);
    }
}

#[test]
fn test_single_value_variance_is_zero() {
    assert_eq!(variance([4.2]), 0.0);
    assert_relative_eq!(average([4.2]), 4.2);
}

#[test]
fn test_min_max_positions() {
    let data = [3.0, f64::NAN, -1.0, 7.0, -1.0];
    assert_eq!(minimum(&data), (-1.0, Some(2)));
    assert_eq!(maximum(&data), (7.0, Some(3)));
    assert_eq!(min_max(&data).n, 4);
}

#[test]
fn test_modified_sum() {
    assert_relative_eq!(modified_sum([1.0, 2.0, 3.0], |v| v * 10.0), 60.0);
    assert_relative_eq!(modified_sum([1.0, f64::NAN, 3.0], f64::abs), 4.0);
}

#[test]
fn test_cumulative_sum() {
    assert_eq!(cumulative_sum([1.0, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
    // Invalid entries repeat the running total, keeping the output aligned
    assert_eq!(cumulative_sum([1.0, f64::NAN, 3.0]), vec![1.0, 1.0, 4.0]);

    let mut out = vec![-1.0];
    cumulative_sum_into([2, 2], &mut out);
    assert_eq!(out, vec![-1.0, 2.0, 4.0]);
}

// ============================================================================
// Weighted
// ============================================================================

#[test]
fn test_weighted_statistics() {
    let data = [1.0, 2.0, 3.0];
    let weights = [1.0, 1.0, 2.0];

    assert_relative_eq!(weighted_average(&data, &weights), 2.25);
    assert_relative_eq!(weighted_variance(&data, &weights), 0.6875);
    assert_relative_eq!(weighted_std_dev(&data, &weights), 0.6875f64.sqrt());

    let d = weighted_dispersion(&data, &weights);
    assert_eq!(d.n, 3);
    assert_relative_eq!(d.mean, 2.25);
}

#[test]
fn test_weighted_skips_invalid_pairs() {
    let data = [1.0, 2.0, f64::NAN, 3.0];
    let weights = [1.0, f64::INFINITY, 5.0, 1.0];
    assert_relative_eq!(weighted_average(&data, &weights), 2.0);
    assert!(weighted_average([f64::NAN], [1.0]).is_nan());
}

#[test]
fn test_unit_weights_match_population_variance() {
    let data = one_to_ten();
    let ones = vec![1.0; data.len()];
    assert_relative_eq!(weighted_average(&data, &ones), average(&data));
    assert_relative_eq!(weighted_variance(&data, &ones), 8.25, epsilon = 1e-12);
}

// ============================================================================
// Moments
// ============================================================================

#[test]
fn test_moments() {
    let data = one_to_ten();
    assert_relative_eq!(moment(&data, 1), 5.5);
    assert_relative_eq!(moment(&data, 2), 38.5);
    assert_relative_eq!(central_moment(&data, 2), 8.25, epsilon = 1e-12);
    assert_relative_eq!(central_moment(&data, 3), 0.0, epsilon = 1e-12);
    assert_relative_eq!(skewness(&data), 0.0, epsilon = 1e-12);
}

#[test]
fn test_skewness_sign() {
    assert!(skewness([1.0, 1.0, 1.0, 10.0]) > 0.0);
    assert!(skewness([-10.0, 1.0, 1.0, 1.0]) < 0.0);
}

#[test]
fn test_correlation_coefficient() {
    let x = one_to_ten();
    let up: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let down: Vec<f64> = x.iter().map(|v| -0.5 * v).collect();

    assert_relative_eq!(correlation_coefficient(&x, &up), 1.0, epsilon = 1e-12);
    assert_relative_eq!(correlation_coefficient(&x, &down), -1.0, epsilon = 1e-12);
    assert!(correlation_coefficient::<[f64; 0], [f64; 0]>([], []).is_nan());
}
