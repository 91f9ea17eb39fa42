//! Pendulab - pendulum lab data recorder and analyzer
//!
//! This library records pendulum measurements (length, timed trials, period
//! counts), persists them to a CSV table, and derives period statistics, a
//! least-squares fit of period against sqrt(length), chi-squared goodness of
//! fit and a confidence interval for the gravitational acceleration.

pub mod cli;
pub mod config;
pub mod error;
pub mod plot;
pub mod record;
pub mod record_set;
pub mod report;
pub mod session;
pub mod statistics;
pub mod table;

pub use error::{LabError, Result};
