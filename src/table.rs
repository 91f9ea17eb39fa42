//! Persisted data table (CSV)
//!
//! Layout, one row per record:
//!
//! ```text
//! length,trials,periods,avgPeriod,stdError
//! 100,20.1; 20.3; 19.9,10,2.01,0.01155
//! ```
//!
//! Raw columns are written with shortest round-trip float formatting so they
//! read back exactly. `avgPeriod` and `stdError` are rounded for display and
//! are recomputed from the raw columns on load.

use crate::error::{LabError, Result};
use crate::record::{Column, MeasurementRecord};
use crate::record_set::RecordSet;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header row of the persisted table
pub const HEADER: [&str; 5] = ["length", "trials", "periods", "avgPeriod", "stdError"];

const TRIAL_SEPARATOR: &str = "; ";

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Serialize trials as `"t1; t2; t3"`
pub fn format_trials(trials: &[f64]) -> String {
    trials
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(TRIAL_SEPARATOR)
}

/// Parse a trials cell, splitting on `;` and trimming whitespace
///
/// An empty cell is an empty trial list.
pub fn parse_trials(cell: &str) -> std::result::Result<Vec<f64>, String> {
    if cell.trim().is_empty() {
        return Ok(Vec::new());
    }
    cell.split(';')
        .map(|part| parse_number(part, "trial"))
        .collect()
}

fn parse_number(text: &str, field: &str) -> std::result::Result<f64, String> {
    let text = text.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| format!("{} '{}' is not a number", field, text))?;
    if !value.is_finite() {
        return Err(format!("{} '{}' is not finite", field, text));
    }
    Ok(value)
}

/// Column positions of the raw fields, looked up by header name
struct RawColumns {
    length: usize,
    trials: usize,
    periods: usize,
}

impl RawColumns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LabError::MalformedRecord {
                    row: 0,
                    reason: format!("missing column '{}'", name),
                })
        };

        Ok(Self {
            length: find(Column::Length.name())?,
            trials: find("trials")?,
            periods: find(Column::PeriodCount.name())?,
        })
    }

    fn parse(&self, row: &csv::StringRecord) -> std::result::Result<MeasurementRecord, String> {
        let field = |index: usize, name: &str| {
            row.get(index)
                .ok_or_else(|| format!("missing {} field", name))
        };

        let length = parse_number(field(self.length, "length")?, "length")?;
        if length < 0.0 {
            return Err(format!("length {} is negative", length));
        }
        let trials = parse_trials(field(self.trials, "trials")?)?;
        let period_count = parse_number(field(self.periods, "periods")?, "periods")?;
        if period_count < 0.0 {
            return Err(format!("period count {} is negative", period_count));
        }

        Ok(MeasurementRecord::new(length, trials, period_count))
    }
}

/// Read a record set from CSV text
///
/// The first malformed row aborts the whole load. Rows are numbered from 1
/// after the header; header problems are reported as row 0.
pub fn read_table<R: Read>(reader: R, name: &str) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = RawColumns::from_headers(&headers)?;

    let mut set = RecordSet::new(name);
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| LabError::MalformedRecord {
            row,
            reason: e.to_string(),
        })?;
        let parsed = columns
            .parse(&record)
            .map_err(|reason| LabError::MalformedRecord { row, reason })?;
        debug!(row, length = parsed.length, trials = parsed.trials.len(), "parsed record");
        set.push(parsed);
    }

    Ok(set)
}

/// Write a record set as CSV, rounding derived columns to `precision` places
pub fn write_table<W: Write>(writer: W, set: &RecordSet, precision: u32) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for record in set.records() {
        writer.write_record([
            record.length.to_string(),
            format_trials(&record.trials),
            record.period_count.to_string(),
            round_to(record.avg_period(), precision).to_string(),
            round_to(record.std_error(), precision).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// A data set file on disk: `<dir>/<name>.csv`
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
    precision: u32,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>, precision: u32) -> Self {
        Self {
            path: path.into(),
            precision,
        }
    }

    /// Store for the data set `name` inside `dir`
    pub fn for_data_set(dir: impl AsRef<Path>, name: &str, precision: u32) -> Self {
        Self::new(dir.as_ref().join(format!("{}.csv", name)), precision)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the whole table
    pub fn load(&self, name: &str) -> Result<RecordSet> {
        let file = File::open(&self.path)?;
        let set = read_table(file, name)?;
        info!(path = %self.path.display(), records = set.len(), "loaded data set");
        Ok(set)
    }

    /// Replace the file with the current contents of `set`
    pub fn save(&self, set: &RecordSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        write_table(file, set, self.precision)?;
        info!(path = %self.path.display(), records = set.len(), "saved data set");
        Ok(())
    }
}
