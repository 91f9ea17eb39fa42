// Tests for the statistical core with realistic pendulum readings
//
// Scenarios use stopwatch timings of 10-oscillation batches, the way the lab
// sheet records them.

use super::*;
use crate::error::LabError;

const TOL: f64 = 1e-9;

/// Average period is mean(trials) / period_count for a 1 m pendulum
#[test]
fn test_average_period_one_meter_pendulum() {
    let trials = [20.1, 20.3, 19.9];
    let avg = average_period(&trials, 10.0).unwrap();
    assert!((avg - 2.01).abs() < TOL, "avg = {}", avg);
    assert!((avg - mean(&trials).unwrap() / 10.0).abs() < TOL);
}

/// Zero period count must be an explicit error, never NaN or infinity
#[test]
fn test_average_period_zero_period_count() {
    let result = average_period(&[20.1, 20.3], 0.0);
    assert!(matches!(result, Err(LabError::DivisionByZero(_))));
}

#[test]
fn test_average_period_no_trials() {
    assert!(matches!(
        average_period(&[], 10.0),
        Err(LabError::EmptyInput)
    ));
}

/// A single trial has a defined standard error of zero
#[test]
fn test_standard_error_single_trial_is_zero() {
    let se = standard_error(&[20.1], 10.0).unwrap();
    assert!(se.is_finite());
    assert_eq!(se, 0.0);
}

#[test]
fn test_standard_error_matches_sample_formula() {
    // per-period: [2.01, 2.03, 1.99], mean 2.01, s = 0.02, se = 0.02 / sqrt(3)
    let se = standard_error(&[20.1, 20.3, 19.9], 10.0).unwrap();
    assert!((se - 0.02 / 3f64.sqrt()).abs() < 1e-12, "se = {}", se);
}

#[test]
fn test_standard_error_zero_period_count() {
    assert!(matches!(
        standard_error(&[20.1], 0.0),
        Err(LabError::DivisionByZero(_))
    ));
}

/// Perfectly linear synthetic data fits exactly
#[test]
fn test_linear_fit_exact_line() {
    let fit = linear_fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
    assert!((fit.slope - 2.0).abs() < TOL);
    assert!(fit.intercept.abs() < TOL);
}

#[test]
fn test_linear_fit_single_point() {
    assert!(matches!(
        linear_fit(&[1.0], &[2.0]),
        Err(LabError::InsufficientData(_))
    ));
}

/// Identical observed and expected values give chi2 = 0 and p = 1
/// under either summation bound
#[test]
fn test_chi_squared_perfect_agreement() {
    let observed = [2.01, 1.80, 1.42, 1.01];
    let std_dev = [0.02, 0.01, 0.03, 0.02];

    for bound in [SummationBound::AllPoints, SummationBound::ExcludeLast] {
        let test = chi_squared_goodness_of_fit(&observed, &observed, &std_dev, 2, bound).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert!((test.pvalue - 1.0).abs() < TOL);
        assert_eq!(test.df, 2);
    }
}

/// With df = 2 the chi-squared survival function is exp(-x / 2)
#[test]
fn test_chi_squared_known_pvalue() {
    let observed = [1.0, 2.0, 3.0];
    let expected = [1.0, 1.0, 1.0];
    let std_dev = [1.0, 1.0, 1.0];

    let all =
        chi_squared_goodness_of_fit(&observed, &expected, &std_dev, 1, SummationBound::AllPoints)
            .unwrap();
    assert!((all.statistic - 5.0).abs() < TOL);
    assert!((all.pvalue - (-2.5f64).exp()).abs() < 1e-6);
    assert_eq!(all.points_summed, 3);

    let legacy = chi_squared_goodness_of_fit(
        &observed,
        &expected,
        &std_dev,
        1,
        SummationBound::ExcludeLast,
    )
    .unwrap();
    assert!((legacy.statistic - 1.0).abs() < TOL);
    assert!((legacy.pvalue - (-0.5f64).exp()).abs() < 1e-6);
    assert_eq!(legacy.points_summed, 2);
}

#[test]
fn test_chi_squared_no_degrees_of_freedom() {
    let values = [1.0, 2.0];
    let result =
        chi_squared_goodness_of_fit(&values, &values, &values, 2, SummationBound::AllPoints);
    assert!(matches!(result, Err(LabError::InsufficientData(_))));
}

#[test]
fn test_chi_squared_zero_sigma() {
    let observed = [1.0, 2.0, 3.0];
    let std_dev = [1.0, 0.0, 1.0];
    let result =
        chi_squared_goodness_of_fit(&observed, &observed, &std_dev, 1, SummationBound::AllPoints);
    assert!(matches!(result, Err(LabError::DivisionByZero(_))));
}

/// The excluded last point may carry a zero sigma without failing
#[test]
fn test_chi_squared_exclude_last_ignores_final_sigma() {
    let observed = [1.0, 2.0, 3.0];
    let std_dev = [1.0, 1.0, 0.0];
    let result = chi_squared_goodness_of_fit(
        &observed,
        &observed,
        &std_dev,
        1,
        SummationBound::ExcludeLast,
    );
    assert!(result.is_ok());
}

#[test]
fn test_chi_squared_mismatched_lengths() {
    let result = chi_squared_goodness_of_fit(
        &[1.0, 2.0, 3.0],
        &[1.0, 2.0],
        &[1.0, 1.0, 1.0],
        1,
        SummationBound::AllPoints,
    );
    assert!(matches!(
        result,
        Err(LabError::MismatchedLengths { left: 3, right: 2 })
    ));
}

#[test]
fn test_confidence_interval_constant_values() {
    let ci = confidence_interval_of_mean(&[10.0, 10.0, 10.0, 10.0], 0.95).unwrap();
    assert_eq!(ci.mean, 10.0);
    assert_eq!(ci.std_error, 0.0);
    assert_eq!(ci.lower, 10.0);
    assert_eq!(ci.upper, 10.0);
    assert_eq!(ci.df, 3);
}

/// t(0.975, 4) = 2.776445, se = sqrt(2.5 / 5)
#[test]
fn test_confidence_interval_known_critical_value() {
    let ci = confidence_interval_of_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
    let expected_margin = 2.776445 * 0.5f64.sqrt();
    assert!((ci.mean - 3.0).abs() < TOL);
    assert!((ci.margin() - expected_margin).abs() < 1e-4);
    assert!(ci.contains(3.0));
}

#[test]
fn test_confidence_interval_wider_at_higher_level() {
    let values = [978.2, 981.5, 979.9, 982.3, 980.1];
    let ci95 = confidence_interval_of_mean(&values, 0.95).unwrap();
    let ci99 = confidence_interval_of_mean(&values, 0.99).unwrap();
    assert!(ci99.margin() > ci95.margin());
}

#[test]
fn test_confidence_interval_single_value() {
    assert!(matches!(
        confidence_interval_of_mean(&[9.8], 0.95),
        Err(LabError::InsufficientData(_))
    ));
}

#[test]
fn test_confidence_interval_invalid_level() {
    for level in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
        assert!(matches!(
            confidence_interval_of_mean(&[1.0, 2.0], level),
            Err(LabError::InvalidParameter(_))
        ));
    }
}
