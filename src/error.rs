//! Error taxonomy shared by the statistics core, the record layer and the
//! table adapter.

use thiserror::Error;

/// Errors produced while summarizing, fitting or persisting pendulum data
#[derive(Error, Debug)]
pub enum LabError {
    #[error("No data to summarize")]
    EmptyInput,

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Mismatched sequence lengths: {left} vs {right}")]
    MismatchedLengths { left: usize, right: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A persisted row could not be parsed (row is 1-based, header excluded)
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for pendulum lab operations
pub type Result<T> = std::result::Result<T, LabError>;

impl LabError {
    /// True for failures the record layer replaces with a zero placeholder
    pub fn is_recoverable_per_record(&self) -> bool {
        matches!(
            self,
            LabError::EmptyInput | LabError::DivisionByZero(_) | LabError::InsufficientData(_)
        )
    }
}
