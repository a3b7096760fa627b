//! CLI argument definitions for the cohort preparation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vf-cohort",
    version,
    about = "Prepare a visual-field cohort export for labeling",
    long_about = "Prepare a visual-field cohort export for the labeling interface.\n\n\
                  Filters the clinical export to one test pattern, derives patient age,\n\
                  numbers each subject's tests per eye by exam date, and writes a\n\
                  reduced-column CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a cohort export and write the prepared CSV.
    Prepare(PrepareArgs),

    /// List the output columns of the prepared CSV.
    Columns,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Path to the cohort CSV export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination for the prepared CSV
    /// (default: <INPUT dir>/opv_<PATTERN>_prepared.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Test pattern to keep; exact, case-sensitive match.
    #[arg(long = "pattern", value_name = "PATTERN", default_value = "24-2")]
    pub pattern: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
