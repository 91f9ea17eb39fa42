//! Plot series for the two standard lab plots
//!
//! Nothing here draws. A `PlotSeries` carries the x/y data, optional error
//! bars and labels for whatever renders it; the menu session prints it as a
//! table.

use crate::record::Column;
use crate::record_set::RecordSet;
use serde::Serialize;

/// Which plot to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Length vs average period with standard-error bars
    LengthVsPeriod,
    /// sqrt(length) vs average period, the linearised form
    SqrtLengthVsPeriod,
}

impl PlotKind {
    fn x_column(self) -> Column {
        match self {
            PlotKind::LengthVsPeriod => Column::Length,
            PlotKind::SqrtLengthVsPeriod => Column::SqrtLength,
        }
    }

    fn error_column(self) -> Option<Column> {
        match self {
            PlotKind::LengthVsPeriod => Some(Column::StdError),
            PlotKind::SqrtLengthVsPeriod => None,
        }
    }

    fn title_suffix(self) -> &'static str {
        match self {
            PlotKind::LengthVsPeriod => "Length vs Period",
            PlotKind::SqrtLengthVsPeriod => "sqrt[Length] vs Period",
        }
    }
}

/// Data and labels for one scatter plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_error: Option<Vec<f64>>,
}

impl PlotSeries {
    pub fn from_records(set: &RecordSet, kind: PlotKind) -> Self {
        let x_column = kind.x_column();
        Self {
            title: format!("{}: {}", set.name(), kind.title_suffix()),
            x_label: x_column.label(),
            y_label: Column::AvgPeriod.label(),
            x: set.column(x_column),
            y: set.column(Column::AvgPeriod),
            y_error: kind.error_column().map(|c| set.column(c)),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Render the series as a plain-text table
    pub fn to_table_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n", self.title));

        let header = match &self.y_error {
            Some(_) => format!("{:>22} {:>14} {:>14}\n", self.x_label, self.y_label, "±"),
            None => format!("{:>22} {:>14}\n", self.x_label, self.y_label),
        };
        out.push_str(&header);

        for i in 0..self.len() {
            let line = match &self.y_error {
                Some(errors) => format!(
                    "{:>22.5} {:>14.5} {:>14.5}\n",
                    self.x[i], self.y[i], errors[i]
                ),
                None => format!("{:>22.5} {:>14.5}\n", self.x[i], self.y[i]),
            };
            out.push_str(&line);
        }

        out
    }
}
