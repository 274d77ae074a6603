//! Command-line parsing for the poll moving-average tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! date parsing and smoothing code. Settings can also come from the
//! environment (or a `.env` file) via the `POLLS_*` variables.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{InputFormat, RepresentativeDate, UndatedPolicy};
use crate::smoothing::DEFAULT_WINDOW_DAYS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "polls", version, about = "Opinion poll moving averages")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute per-candidate moving averages, print a summary, and optionally export JSON.
    Smooth(SmoothArgs),
    /// Show how each record's date text is parsed.
    Dates(InputArgs),
    /// Print the latest smoothed values from a previously exported trend JSON.
    Show(ShowArgs),
}

/// Where to read polls from.
#[derive(Debug, Parser, Clone)]
pub struct InputArgs {
    /// Poll table (JSON array or wide CSV).
    #[arg(short, long, value_name = "FILE", env = "POLLS_INPUT")]
    pub input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,
}

/// Options for `polls smooth`.
#[derive(Debug, Parser, Clone)]
pub struct SmoothArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the trend JSON here.
    #[arg(short, long, value_name = "FILE", env = "POLLS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Candidate to include (repeatable or comma-separated). Default: every candidate found.
    #[arg(short = 'c', long = "candidate", value_name = "NAME", value_delimiter = ',')]
    pub candidates: Vec<String>,

    /// Half-width of the averaging window, in days.
    #[arg(short = 'w', long, default_value_t = DEFAULT_WINDOW_DAYS, env = "POLLS_WINDOW_DAYS")]
    pub window_days: u32,

    /// Which day of the fieldwork window represents a poll.
    #[arg(long, value_enum, default_value_t = RepresentativeDate::End)]
    pub representative: RepresentativeDate,

    /// What to do with records whose date cannot be parsed.
    #[arg(long, value_enum, default_value_t = UndatedPolicy::Drop)]
    pub undated: UndatedPolicy,
}

/// Options for `polls show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Trend JSON produced by `polls smooth --output`.
    #[arg(long, value_name = "JSON")]
    pub trend: PathBuf,
}
