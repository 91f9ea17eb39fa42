//! Named, ordered collection of measurement records
//!
//! Whole-set operations (the period fit, chi-squared diagnostics and the
//! gravitational acceleration interval) live here. Unlike per-record values,
//! their failures are returned to the caller.

use crate::config::AnalysisConfig;
use crate::error::{LabError, Result};
use crate::record::{Column, MeasurementRecord};
use crate::statistics::{
    chi_squared_goodness_of_fit, confidence_interval_of_mean, linear_fit, ChiSquaredTest,
    ConfidenceInterval, LinearFit,
};
use serde::Serialize;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Gravitational acceleration estimated from the whole record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravityEstimate {
    /// Fit of average period against sqrt(length) the estimates were built on
    pub fit: LinearFit,
    /// Per-record g in cm/s², in record order (degenerate records skipped)
    pub estimates: Vec<f64>,
    pub interval: ConfidenceInterval,
}

/// Ordered set of records; insertion order drives display and fitting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordSet {
    name: String,
    records: Vec<MeasurementRecord>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(name: impl Into<String>, records: Vec<MeasurementRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    /// Remove the record at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<MeasurementRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Stable sort by pendulum length, shortest first
    pub fn sort_by_length(&mut self) {
        self.records.sort_by(|a, b| a.length.total_cmp(&b.length));
    }

    /// One column across all records, in record order
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// Records that whole-set analysis uses, with their positions
    ///
    /// Records without a positive length or a derivable average period are
    /// skipped rather than fitted as placeholder zeros.
    fn analyzable(&self) -> impl Iterator<Item = (usize, &MeasurementRecord)> {
        self.records.iter().enumerate().filter(|&(index, record)| {
            let usable = record.is_analyzable();
            if !usable {
                warn!(index, length = record.length, "skipping record without a usable period");
            }
            usable
        })
    }

    /// One column across the analyzable records
    fn analyzable_column(&self, column: Column) -> Vec<f64> {
        self.analyzable().map(|(_, r)| r.value(column)).collect()
    }

    /// Least-squares fit of average period against sqrt(length)
    pub fn fit(&self) -> Result<LinearFit> {
        let xs = self.analyzable_column(Column::SqrtLength);
        let ys = self.analyzable_column(Column::AvgPeriod);
        let fit = linear_fit(&xs, &ys)?;
        debug!(
            records = xs.len(),
            slope = fit.slope,
            intercept = fit.intercept,
            "fitted period against sqrt(length)"
        );
        Ok(fit)
    }

    /// Chi-squared of measured periods against `fit`, with each record's
    /// standard deviation as its σ
    pub fn chi_squared(&self, fit: &LinearFit, config: &AnalysisConfig) -> Result<ChiSquaredTest> {
        let observed = self.analyzable_column(Column::AvgPeriod);
        let expected: Vec<f64> = self
            .analyzable_column(Column::SqrtLength)
            .into_iter()
            .map(|x| fit.predict(x))
            .collect();
        let std_dev = self.analyzable_column(Column::StdDev);

        chi_squared_goodness_of_fit(
            &observed,
            &expected,
            &std_dev,
            config.fit_parameters,
            config.chi_squared_bound,
        )
    }

    /// Per-record g = 4π²·L / (T − intercept)²
    ///
    /// Only analyzable records contribute.
    ///
    /// `fit` must have been computed over the current records; adding or
    /// removing a record changes the intercept and therefore every estimate.
    pub fn g_estimates(&self, fit: &LinearFit) -> Vec<f64> {
        self.analyzable()
            .filter_map(|(index, record)| {
                let corrected = record.avg_period() - fit.intercept;
                if corrected == 0.0 {
                    warn!(index, "skipping record with zero corrected period");
                    return None;
                }
                Some(4.0 * PI * PI * record.length / (corrected * corrected))
            })
            .collect()
    }

    /// Fit, per-record g estimates and their confidence interval
    pub fn g_confidence_interval(&self, level: f64) -> Result<GravityEstimate> {
        let fit = self.fit()?;
        let estimates = self.g_estimates(&fit);
        let interval = confidence_interval_of_mean(&estimates, level)?;

        Ok(GravityEstimate {
            fit,
            estimates,
            interval,
        })
    }
}

/// g implied by the fitted slope alone: T = (2π / sqrt(g)) · sqrt(L)
pub fn gravity_from_slope(fit: &LinearFit) -> Result<f64> {
    if fit.slope == 0.0 {
        return Err(LabError::DivisionByZero("fitted slope is zero".to_string()));
    }
    Ok(4.0 * PI * PI / (fit.slope * fit.slope))
}
