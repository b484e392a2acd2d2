//! CLI argument definitions for placement data preparation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use placement_model::FitScope;

#[derive(Parser)]
#[command(
    name = "placement-prep",
    version,
    about = "Prepare student placement records for modeling",
    long_about = "Clean, normalize and one-hot encode student placement records,\n\
                  derive the placement target, and write stratified train, tune\n\
                  and test partitions with the fitted preprocessing parameters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Prepare a placement CSV and write train, tune and test partitions.
    Prepare(PrepareArgs),

    /// List the expected input columns and their kinds.
    Schema,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Placement records CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Output directory (default: <CSV directory>/prepared).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with preparation options.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Fraction of rows assigned to training.
    #[arg(long = "train-fraction", value_name = "FRACTION")]
    pub train_fraction: Option<f64>,

    /// Fraction of the non-training rows assigned to tuning.
    #[arg(long = "tune-fraction", value_name = "FRACTION")]
    pub tune_fraction: Option<f64>,

    /// Seed for a reproducible split.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Where the normalizer and encoder are fitted.
    #[arg(long = "fit-scope", value_enum)]
    pub fit_scope: Option<FitScopeArg>,

    /// Prepare and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FitScopeArg {
    /// Fit on the training partition only.
    Training,
    /// Fit on the full table before splitting.
    Full,
}

impl From<FitScopeArg> for FitScope {
    fn from(arg: FitScopeArg) -> Self {
        match arg {
            FitScopeArg::Training => FitScope::TrainingPartition,
            FitScopeArg::Full => FitScope::FullTable,
        }
    }
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
