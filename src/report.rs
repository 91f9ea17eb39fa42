//! Text and JSON reports for a record set
//!
//! Whole-set computations that fail (too few records, a flat fit) are kept in
//! the report as error messages so the user sees why a section is missing.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::record_set::{gravity_from_slope, GravityEstimate, RecordSet};
use crate::statistics::{ChiSquaredTest, LinearFit, SummationBound};
use crate::table::format_trials;
use serde::Serialize;

/// One record with its derived values
#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub index: usize,
    pub length: f64,
    pub period_count: f64,
    pub trials: Vec<f64>,
    pub avg_period: f64,
    pub std_error: f64,
    pub std_dev: f64,
}

/// Linear fit of period against sqrt(length) with its goodness of fit
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub fit: LinearFit,
    /// g = 4π² / slope², in cm/s²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g_from_slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chi_squared: Option<ChiSquaredTest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chi_squared_error: Option<String>,
    pub chi_squared_bound: SummationBound,
}

impl FitReport {
    /// Fit the set and run the chi-squared test against the fitted line
    ///
    /// Fails only if the fit itself fails; a chi-squared failure is recorded
    /// in `chi_squared_error`.
    pub fn build(set: &RecordSet, config: &AnalysisConfig) -> Result<Self> {
        let fit = set.fit()?;
        let (chi_squared, chi_squared_error) = match set.chi_squared(&fit, config) {
            Ok(test) => (Some(test), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Ok(Self {
            fit,
            g_from_slope: gravity_from_slope(&fit).ok(),
            chi_squared,
            chi_squared_error,
            chi_squared_bound: config.chi_squared_bound,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Linear Fit: Period vs sqrt[Length] ===\n");
        out.push_str(&format!("  Slope:        {:.6} s/cm^1/2\n", self.fit.slope));
        out.push_str(&format!("  Intercept:    {:.6} s\n", self.fit.intercept));
        if let Some(g) = self.g_from_slope {
            out.push_str(&format!("  g from slope: {:.2} cm/s^2\n", g));
        }

        out.push_str("\n=== Chi-Squared Goodness of Fit ===\n");
        if let Some(test) = &self.chi_squared {
            out.push_str(&format!("  Chi-squared:  {:.4}\n", test.statistic));
            out.push_str(&format!("  Reduced:      {:.4}\n", test.reduced()));
            out.push_str(&format!("  DoF:          {}\n", test.df));
            out.push_str(&format!("  p-value:      {:.4}\n", test.pvalue));
            if self.chi_squared_bound == SummationBound::ExcludeLast {
                out.push_str(&format!(
                    "  Note: last point excluded from the sum ({} of {} points)\n",
                    test.points_summed,
                    test.points_summed + 1
                ));
            }
        }
        if let Some(error) = &self.chi_squared_error {
            out.push_str(&format!("  Unavailable: {}\n", error));
        }
        out
    }
}

/// Text block for a g confidence interval
pub fn gravity_text(estimate: &GravityEstimate) -> String {
    let ci = &estimate.interval;
    let mut out = String::new();
    out.push_str(&format!(
        "=== Gravitational Acceleration ({:.0}% confidence) ===\n",
        ci.level * 100.0
    ));
    out.push_str(&format!("  Estimates:    {}\n", estimate.estimates.len()));
    out.push_str(&format!("  Mean g:       {:.2} cm/s^2\n", ci.mean));
    out.push_str(&format!("  Std Error:    {:.2} cm/s^2\n", ci.std_error));
    out.push_str(&format!("  Interval:     [{:.2}, {:.2}] cm/s^2\n", ci.lower, ci.upper));
    out
}

/// Record table as printed by the menu
pub fn records_text(rows: &[RecordRow]) -> String {
    if rows.is_empty() {
        return "No records in data set.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} {:>10} {:>8} {:>11} {:>10}  trials\n",
        "#", "length", "periods", "avgPeriod", "stdError"
    ));
    out.push_str("--- ---------- -------- ----------- ----------  ------\n");
    for row in rows {
        out.push_str(&format!(
            "{:>3} {:>10.2} {:>8} {:>11.5} {:>10.5}  {}\n",
            row.index,
            row.length,
            row.period_count,
            row.avg_period,
            row.std_error,
            format_trials(&row.trials)
        ));
    }
    out
}

/// Everything known about a data set, for one-shot reports
#[derive(Debug, Clone, Serialize)]
pub struct DataSetReport {
    pub name: String,
    pub records: Vec<RecordRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<GravityEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity_error: Option<String>,
}

impl DataSetReport {
    pub fn build(set: &RecordSet, config: &AnalysisConfig) -> Self {
        let records = record_rows(set);

        let (fit, fit_error) = match FitReport::build(set, config) {
            Ok(report) => (Some(report), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let (gravity, gravity_error) = match set.g_confidence_interval(config.confidence_level) {
            Ok(estimate) => (Some(estimate), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            name: set.name().to_string(),
            records,
            fit,
            fit_error,
            gravity,
            gravity_error,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Data set: {} ({} records)\n\n", self.name, self.records.len()));
        out.push_str(&records_text(&self.records));
        out.push('\n');

        match (&self.fit, &self.fit_error) {
            (Some(fit), _) => out.push_str(&fit.to_text()),
            (None, Some(error)) => out.push_str(&format!("Fit unavailable: {}\n", error)),
            (None, None) => {}
        }
        out.push('\n');

        match (&self.gravity, &self.gravity_error) {
            (Some(gravity), _) => out.push_str(&gravity_text(gravity)),
            (None, Some(error)) => {
                out.push_str(&format!("g interval unavailable: {}\n", error))
            }
            (None, None) => {}
        }
        out
    }
}

/// Derived rows for every record, numbered from 1
pub fn record_rows(set: &RecordSet) -> Vec<RecordRow> {
    set.records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let derived = record.derived();
            RecordRow {
                index: i + 1,
                length: record.length,
                period_count: record.period_count,
                trials: record.trials.clone(),
                avg_period: derived.avg_period,
                std_error: derived.std_error,
                std_dev: derived.std_dev,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MeasurementRecord;

    fn lab_set() -> RecordSet {
        RecordSet::with_records(
            "lab",
            vec![
                MeasurementRecord::new(100.0, vec![20.1, 20.3, 19.9], 10.0),
                MeasurementRecord::new(80.0, vec![17.9, 18.0, 17.8], 10.0),
                MeasurementRecord::new(60.0, vec![15.6, 15.4, 15.5], 10.0),
                MeasurementRecord::new(40.0, vec![12.6, 12.8, 12.7], 10.0),
            ],
        )
    }

    #[test]
    fn test_full_report_sections() {
        let report = DataSetReport::build(&lab_set(), &AnalysisConfig::default());
        assert!(report.fit.is_some());
        assert!(report.gravity.is_some());

        let text = report.to_text();
        assert!(text.contains("Data set: lab (4 records)"));
        assert!(text.contains("Linear Fit"));
        assert!(text.contains("Chi-Squared"));
        assert!(text.contains("95% confidence"));
    }

    #[test]
    fn test_report_with_single_record_explains_missing_fit() {
        let set = RecordSet::with_records(
            "tiny",
            vec![MeasurementRecord::new(100.0, vec![20.1], 10.0)],
        );
        let report = DataSetReport::build(&set, &AnalysisConfig::default());
        assert!(report.fit.is_none());
        assert!(report.fit_error.unwrap().contains("Insufficient data"));
        assert!(report.gravity_error.is_some());
    }

    #[test]
    fn test_fit_report_without_chi_squared_dof() {
        let set = RecordSet::with_records(
            "pair",
            vec![
                MeasurementRecord::new(100.0, vec![20.1, 20.3], 10.0),
                MeasurementRecord::new(50.0, vec![14.1, 14.3], 10.0),
            ],
        );
        let report = FitReport::build(&set, &AnalysisConfig::default()).unwrap();
        assert!(report.chi_squared.is_none());
        assert!(report.to_text().contains("Unavailable"));
    }

    #[test]
    fn test_json_report_parses() {
        let report = DataSetReport::build(&lab_set(), &AnalysisConfig::default());
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "lab");
        assert_eq!(value["records"].as_array().unwrap().len(), 4);
        assert!(value["fit"]["fit"]["slope"].is_number());
        assert!(value["gravity"]["interval"]["lower"].is_number());
        assert_eq!(value["fit"]["chi_squared_bound"], "all-points");
    }

    #[test]
    fn test_records_text_empty() {
        assert_eq!(records_text(&[]), "No records in data set.\n");
    }
}
