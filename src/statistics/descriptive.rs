// Descriptive statistics over stopwatch trials
//
// A trial is the elapsed time for `period_count` oscillations, so every
// per-oscillation quantity divides the raw reading by the period count first.

use crate::error::{LabError, Result};

/// Arithmetic mean of a non-empty sequence
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(LabError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Convert raw trial readings into per-oscillation periods
pub fn per_period(trials: &[f64], period_count: f64) -> Result<Vec<f64>> {
    if period_count == 0.0 {
        return Err(LabError::DivisionByZero(
            "period count is zero".to_string(),
        ));
    }
    Ok(trials.iter().map(|t| t / period_count).collect())
}

/// Average period of one oscillation: `mean(trials) / period_count`
///
/// # Example
/// ```
/// use pendulab::statistics::average_period;
///
/// let avg = average_period(&[20.1, 20.3, 19.9], 10.0).unwrap();
/// assert!((avg - 2.01).abs() < 1e-9);
/// ```
pub fn average_period(trials: &[f64], period_count: f64) -> Result<f64> {
    if period_count == 0.0 {
        return Err(LabError::DivisionByZero(
            "period count is zero".to_string(),
        ));
    }
    Ok(mean(trials)? / period_count)
}

/// Sum of squared deviations from the mean
fn sum_squared_deviations(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    Ok(values.iter().map(|v| (v - m).powi(2)).sum())
}

/// Standard error of the per-period values
///
/// Uses the sample variance (ddof = 1) when there are at least two trials.
/// A single trial has no spread to estimate, so its variance is taken as the
/// population variance of one point (ddof = 0), which is zero.
pub fn standard_error(trials: &[f64], period_count: f64) -> Result<f64> {
    let values = per_period(trials, period_count)?;
    let n = values.len();
    let ssd = sum_squared_deviations(&values)?;

    let ddof = if n >= 2 { 1 } else { 0 };
    let variance = ssd / (n - ddof) as f64;

    Ok((variance / n as f64).sqrt())
}

/// Sample standard deviation (ddof = 1) of the per-period values
pub fn standard_deviation(trials: &[f64], period_count: f64) -> Result<f64> {
    let values = per_period(trials, period_count)?;
    if values.is_empty() {
        return Err(LabError::EmptyInput);
    }
    if values.len() < 2 {
        return Err(LabError::InsufficientData(
            "sample standard deviation needs at least 2 trials".to_string(),
        ));
    }

    let ssd = sum_squared_deviations(&values)?;
    Ok((ssd / (values.len() - 1) as f64).sqrt())
}
