//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the tracing subscriber
//! - runs ingest + trend assembly
//! - prints reports
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, InputArgs, ShowArgs, SmoothArgs};
use crate::domain::TrendConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `polls` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; explicit flags and the real environment still apply.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    crate::telemetry::init_tracing(cli.log_json, crate::telemetry::level_from_verbosity(cli.verbose));

    match cli.command {
        Command::Smooth(args) => handle_smooth(args),
        Command::Dates(args) => handle_dates(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_smooth(args: SmoothArgs) -> Result<(), AppError> {
    let config = trend_config_from_args(&args);
    let run = pipeline::run_smooth(&args.input.input, args.input.format, &args.candidates, &config)?;

    println!("{}", crate::report::format_run_summary(&run.ingest, &run.output, &config));
    println!("{}", crate::report::format_candidate_table(&run.stats));

    let dropped = crate::report::format_dropped(&run.output.dropped);
    if !dropped.is_empty() {
        println!("{dropped}");
    }
    let row_errors = crate::report::format_row_errors(&run.ingest.row_errors);
    if !row_errors.is_empty() {
        println!("{row_errors}");
    }

    if let Some(path) = &args.output {
        crate::io::export::write_trend_json(path, &run.output.trend)?;
        println!("Trend written to {}", path.display());
    }

    Ok(())
}

fn handle_dates(args: InputArgs) -> Result<(), AppError> {
    let ingest = crate::io::ingest::load_polls(&args.input, args.format)?;
    println!("{}", crate::report::format_date_table(&ingest.records));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let trend = crate::io::export::read_trend_json(&args.trend)?;
    info!(rows = trend.len(), candidates = trend.candidates.len(), "loaded trend");

    match trend.dates.last() {
        Some(last) => println!("Latest: {last} ({} polls)", trend.len()),
        None => println!("Latest: (empty trend)"),
    }
    let stats = crate::report::trend_file_stats(&trend);
    println!("{}", crate::report::format_candidate_table(&stats));
    Ok(())
}

pub fn trend_config_from_args(args: &SmoothArgs) -> TrendConfig {
    TrendConfig {
        window_days: args.window_days,
        representative: args.representative,
        undated: args.undated,
    }
}
