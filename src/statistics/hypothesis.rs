// Goodness-of-fit and interval estimation
//
// Chi-squared p-values use the upper tail of statrs' ChiSquared distribution.
// Confidence intervals use the two-tailed Student's t critical value with
// n - 1 degrees of freedom.

use crate::error::{LabError, Result};
use crate::statistics::descriptive::mean;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// Which paired points contribute to the chi-squared sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummationBound {
    /// Sum over all n points
    #[default]
    AllPoints,
    /// Sum over points 0..n-1, leaving out the final observation.
    /// Matches results produced by the legacy lab scripts.
    ExcludeLast,
}

/// Result of a chi-squared goodness-of-fit test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChiSquaredTest {
    /// Chi-squared statistic
    pub statistic: f64,

    /// Upper-tail probability `1 - CDF(statistic; df)`
    /// - small values: observations deviate from the model more than σ explains
    /// - values near 1: the model fits within (or suspiciously inside) the errors
    pub pvalue: f64,

    /// Degrees of freedom (n - fitted parameters)
    pub df: usize,

    /// Number of points that contributed to the sum
    pub points_summed: usize,
}

impl ChiSquaredTest {
    /// Chi-squared per degree of freedom
    pub fn reduced(&self) -> f64 {
        self.statistic / self.df as f64
    }
}

/// Chi-squared goodness of fit of `observed` against `expected`
///
/// Each residual is scaled by the matching entry of `std_dev`. Degrees of
/// freedom are `n - ddof_reduction` (2 for a fitted straight line).
///
/// # Errors
/// - `MismatchedLengths` if the three sequences differ in length
/// - `InsufficientData` if degrees of freedom would be zero or negative
/// - `DivisionByZero` if a contributing standard deviation is zero
pub fn chi_squared_goodness_of_fit(
    observed: &[f64],
    expected: &[f64],
    std_dev: &[f64],
    ddof_reduction: usize,
    bound: SummationBound,
) -> Result<ChiSquaredTest> {
    let n = observed.len();
    for other in [expected.len(), std_dev.len()] {
        if other != n {
            return Err(LabError::MismatchedLengths {
                left: n,
                right: other,
            });
        }
    }

    let df = n
        .checked_sub(ddof_reduction)
        .filter(|df| *df > 0)
        .ok_or_else(|| {
            LabError::InsufficientData(format!(
                "chi-squared needs more than {} points, got {}",
                ddof_reduction, n
            ))
        })?;

    let points_summed = match bound {
        SummationBound::AllPoints => n,
        SummationBound::ExcludeLast => n - 1,
    };

    let mut statistic = 0.0;
    for i in 0..points_summed {
        if std_dev[i] == 0.0 {
            return Err(LabError::DivisionByZero(format!(
                "standard deviation of point {} is zero",
                i
            )));
        }
        statistic += ((observed[i] - expected[i]) / std_dev[i]).powi(2);
    }

    let distribution = ChiSquared::new(df as f64)
        .map_err(|e| LabError::InvalidParameter(format!("chi-squared distribution: {}", e)))?;
    let pvalue = 1.0 - distribution.cdf(statistic);

    Ok(ChiSquaredTest {
        statistic,
        pvalue,
        df,
        points_summed,
    })
}

/// Mean with a two-tailed Student's t confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
    /// Confidence level in (0, 1), e.g. 0.95
    pub level: f64,
    pub df: usize,
}

impl ConfidenceInterval {
    /// Half-width of the interval
    pub fn margin(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Confidence interval of the mean of `values` at `level`
///
/// # Example
/// ```
/// use pendulab::statistics::confidence_interval_of_mean;
///
/// let ci = confidence_interval_of_mean(&[10.0, 10.0, 10.0, 10.0], 0.95).unwrap();
/// assert_eq!(ci.mean, 10.0);
/// assert_eq!((ci.lower, ci.upper), (10.0, 10.0));
/// ```
pub fn confidence_interval_of_mean(values: &[f64], level: f64) -> Result<ConfidenceInterval> {
    if !(level > 0.0 && level < 1.0) {
        return Err(LabError::InvalidParameter(format!(
            "confidence level must be in (0, 1), got {}",
            level
        )));
    }
    if values.len() < 2 {
        return Err(LabError::InsufficientData(format!(
            "confidence interval needs at least 2 values, got {}",
            values.len()
        )));
    }

    let n = values.len();
    let df = n - 1;
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / df as f64;
    let std_error = (variance / n as f64).sqrt();

    let t = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| LabError::InvalidParameter(format!("Student's t distribution: {}", e)))?;
    let critical = t.inverse_cdf(1.0 - (1.0 - level) / 2.0);
    let margin = critical * std_error;

    Ok(ConfidenceInterval {
        mean: m,
        std_error,
        lower: m - margin,
        upper: m + margin,
        level,
        df,
    })
}
