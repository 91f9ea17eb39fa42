//! CLI argument parsing for pendulab

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pendulab")]
#[command(version)]
#[command(about = "Pendulum lab data recorder with period statistics and g estimation", long_about = None)]
pub struct Cli {
    /// Create a new data set with this name
    #[arg(short = 'n', long = "new", value_name = "NAME", conflicts_with = "open")]
    pub new: Option<String>,

    /// Open an existing data set by name (<DATA_DIR>/<NAME>.csv)
    #[arg(short = 'o', long = "open", value_name = "NAME")]
    pub open: Option<String>,

    /// Directory holding data set files
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Analysis configuration file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Confidence level for the g interval (overrides the config file)
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<f64>,

    /// Print a report for the opened data set and exit (requires --open)
    #[arg(long = "report", requires = "open")]
    pub report: bool,

    /// Report format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
