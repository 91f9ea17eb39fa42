//! Measurement records and their derived per-period statistics
//!
//! A record is one pendulum configuration: the string length and a batch of
//! stopwatch readings, each timing `period_count` oscillations. Derived
//! values are recomputed on demand and never stored.

use crate::error::Result;
use crate::statistics;
use serde::Serialize;
use tracing::{debug, warn};

/// One experimental configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Pendulum length in centimeters
    pub length: f64,
    /// Raw stopwatch readings in seconds, in entry order
    pub trials: Vec<f64>,
    /// Oscillations timed by each reading
    pub period_count: f64,
}

/// Per-record values derived from the trials
///
/// Degenerate records (no trials, zero period count, a single trial for the
/// standard deviation) report `0.0` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedStatistics {
    pub avg_period: f64,
    pub std_error: f64,
    pub std_dev: f64,
}

/// Derived column of a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Length,
    AvgPeriod,
    StdError,
    SqrtLength,
    TotalTime,
    PeriodCount,
    StdDev,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Length,
        Column::AvgPeriod,
        Column::StdError,
        Column::SqrtLength,
        Column::TotalTime,
        Column::PeriodCount,
        Column::StdDev,
    ];

    /// Column name as used in the persisted table and JSON reports
    pub fn name(self) -> &'static str {
        match self {
            Column::Length => "length",
            Column::AvgPeriod => "avgPeriod",
            Column::StdError => "stdError",
            Column::SqrtLength => "sqrtLength",
            Column::TotalTime => "totalTime",
            Column::PeriodCount => "periods",
            Column::StdDev => "stdDev",
        }
    }

    /// Axis label with units
    pub fn label(self) -> &'static str {
        match self {
            Column::Length => "Length(cm)",
            Column::AvgPeriod => "Period(s)",
            Column::StdError => "Std Error(s)",
            Column::SqrtLength => "sqrt[Length](cm^1/2)",
            Column::TotalTime => "Total Time(s)",
            Column::PeriodCount => "Periods",
            Column::StdDev => "Std Dev(s)",
        }
    }
}

/// Replace per-record failures with the zero placeholder
fn or_placeholder(value: Result<f64>, what: &str) -> f64 {
    match value {
        Ok(v) => v,
        Err(e) if e.is_recoverable_per_record() => {
            debug!(quantity = what, error = %e, "substituting 0 for unavailable value");
            0.0
        }
        Err(e) => {
            warn!(quantity = what, error = %e, "unexpected error, substituting 0");
            0.0
        }
    }
}

impl MeasurementRecord {
    pub fn new(length: f64, trials: Vec<f64>, period_count: f64) -> Self {
        Self {
            length,
            trials,
            period_count,
        }
    }

    /// Average period of one oscillation, or 0 when unavailable
    pub fn avg_period(&self) -> f64 {
        or_placeholder(
            statistics::average_period(&self.trials, self.period_count),
            "avgPeriod",
        )
    }

    /// Standard error of the per-period values, or 0 when unavailable
    pub fn std_error(&self) -> f64 {
        or_placeholder(
            statistics::standard_error(&self.trials, self.period_count),
            "stdError",
        )
    }

    /// Sample standard deviation of the per-period values, or 0 when unavailable
    pub fn std_dev(&self) -> f64 {
        or_placeholder(
            statistics::standard_deviation(&self.trials, self.period_count),
            "stdDev",
        )
    }

    /// Whether this record can take part in whole-set analysis
    ///
    /// Needs a positive length and a derivable average period; placeholder
    /// zeros would otherwise be fitted as if they were measurements.
    pub fn is_analyzable(&self) -> bool {
        self.length > 0.0 && statistics::average_period(&self.trials, self.period_count).is_ok()
    }

    pub fn sqrt_length(&self) -> f64 {
        self.length.sqrt()
    }

    /// Sum of the raw stopwatch readings
    pub fn total_time(&self) -> f64 {
        self.trials.iter().sum()
    }

    pub fn derived(&self) -> DerivedStatistics {
        DerivedStatistics {
            avg_period: self.avg_period(),
            std_error: self.std_error(),
            std_dev: self.std_dev(),
        }
    }

    /// Value of a single column for this record
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Length => self.length,
            Column::AvgPeriod => self.avg_period(),
            Column::StdError => self.std_error(),
            Column::SqrtLength => self.sqrt_length(),
            Column::TotalTime => self.total_time(),
            Column::PeriodCount => self.period_count,
            Column::StdDev => self.std_dev(),
        }
    }
}
