// Ordinary least-squares line fit
//
// Used with x = sqrt(length) and y = average period. For an ideal pendulum
// T = (2π / sqrt(g)) · sqrt(L), so the slope carries g and the intercept
// absorbs systematic timing offsets.

use crate::error::{LabError, Result};
use serde::Serialize;

/// Slope and intercept of `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Value of the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `ys = slope * xs + intercept` by ordinary least squares
///
/// # Errors
/// - `MismatchedLengths` if `xs` and `ys` differ in length
/// - `InsufficientData` for fewer than 2 points or when every x is equal
///
/// # Example
/// ```
/// use pendulab::statistics::linear_fit;
///
/// let fit = linear_fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-9);
/// assert!(fit.intercept.abs() < 1e-9);
/// ```
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    if xs.len() != ys.len() {
        return Err(LabError::MismatchedLengths {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(LabError::InsufficientData(format!(
            "linear fit needs at least 2 points, got {}",
            xs.len()
        )));
    }

    if xs.iter().all(|x| *x == xs[0]) {
        return Err(LabError::InsufficientData(
            "x values have zero variance".to_string(),
        ));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (sxx, sxy) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

    // Distinct xs can still underflow to a zero spread
    if sxx == 0.0 {
        return Err(LabError::InsufficientData(
            "x values have zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
