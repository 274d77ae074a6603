//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`RepresentativeDate`, `UndatedPolicy`, `InputFormat`)
//! - normalized poll records (`PollRecord`)
//! - the exported trend artifact (`TrendFile`, `CandidateTrend`)

pub mod types;

pub use types::*;
