//! `poll-trend` library crate.
//!
//! The binary (`polls`) is a thin wrapper around this library so that:
//!
//! - the date parser and smoothing engine are testable without spawning processes
//! - the engine can be reused by other front-ends (e.g. a web exporter)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod dates;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod smoothing;
pub mod telemetry;
pub mod trend;
