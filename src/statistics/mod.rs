// Statistical core for pendulum period analysis
//
// Every function here is pure: explicit inputs, a small result struct out,
// and an explicit `LabError` on degenerate input. Nothing in this module
// substitutes placeholder values; that recovery happens in the record layer.
//
// - descriptive: mean, per-period average, standard error, standard deviation
// - fit: ordinary least-squares line
// - hypothesis: chi-squared goodness of fit, Student's t confidence interval
//
// Distributions come from statrs (chi-squared CDF, Student's t quantile).

mod descriptive;
mod fit;
mod hypothesis;

pub use descriptive::{average_period, mean, per_period, standard_deviation, standard_error};
pub use fit::{linear_fit, LinearFit};
pub use hypothesis::{
    chi_squared_goodness_of_fit, confidence_interval_of_mean, ChiSquaredTest, ConfidenceInterval,
    SummationBound,
};

#[cfg(test)]
mod tests;
