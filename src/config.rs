// Configuration for pendulum data analysis
//
// Controls the confidence level of the g interval, how many fitted parameters
// the chi-squared test subtracts from its degrees of freedom, which points the
// chi-squared sum covers, and the rounding of derived table columns.

use crate::error::{LabError, Result};
use crate::statistics::SummationBound;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analysis settings shared by reports, the menu session and the table adapter
///
/// # Example
/// ```
/// use pendulab::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert_eq!(config.fit_parameters, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for the gravitational acceleration interval
    ///
    /// - 0.95 (default): two-tailed 95% Student's t interval
    /// - 0.99: wider interval, fewer misses
    pub confidence_level: f64,

    /// Parameters estimated by the fit, subtracted from the chi-squared
    /// degrees of freedom
    ///
    /// Default: 2 (slope and intercept)
    pub fit_parameters: usize,

    /// Points that contribute to the chi-squared sum
    ///
    /// Default: all points. `exclude-last` reproduces tables computed by the
    /// legacy lab scripts, which never summed the final observation.
    pub chi_squared_bound: SummationBound,

    /// Decimal places kept for `avgPeriod` and `stdError` when saving
    ///
    /// Default: 5
    pub precision: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            fit_parameters: 2,
            chi_squared_bound: SummationBound::AllPoints,
            precision: 5,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    ///
    /// # Example TOML
    /// ```toml
    /// confidence_level = 0.99
    /// fit_parameters = 2
    /// chi_squared_bound = "exclude-last"
    /// precision = 4
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| LabError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with a different confidence level
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(LabError::Config(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }

        if self.precision > 12 {
            return Err(LabError::Config(format!(
                "precision must be at most 12 decimal places, got {}",
                self.precision
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.fit_parameters, 2);
        assert_eq!(config.chi_squared_bound, SummationBound::AllPoints);
        assert_eq!(config.precision, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str("confidence_level = 0.99\n").unwrap();
        assert_eq!(config.confidence_level, 0.99);
        assert_eq!(config.fit_parameters, 2);
        assert_eq!(config.precision, 5);
    }

    #[test]
    fn test_exclude_last_bound_from_toml() {
        let config = AnalysisConfig::from_toml_str("chi_squared_bound = \"exclude-last\"").unwrap();
        assert_eq!(config.chi_squared_bound, SummationBound::ExcludeLast);
    }

    #[test]
    fn test_unknown_bound_rejected() {
        let result = AnalysisConfig::from_toml_str("chi_squared_bound = \"some-points\"");
        assert!(matches!(result, Err(LabError::Config(_))));
    }

    #[test]
    fn test_invalid_confidence_level() {
        let config = AnalysisConfig::default().with_confidence_level(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_precision() {
        let mut config = AnalysisConfig::default();
        config.precision = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let result = AnalysisConfig::from_toml("/nonexistent/pendulab.toml");
        assert!(matches!(result, Err(LabError::Io(_))));
    }
}
