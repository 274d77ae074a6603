//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built in-memory by ingest
//! - threaded through trend assembly
//! - exported to JSON and reloaded later for display

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::smoothing::DEFAULT_WINDOW_DAYS;

/// Which day of a collection window stands in for the whole poll.
///
/// Pollsters report inclusive field periods ("15–19 Oct 2025"). Sorting and
/// windowing need one calendar day per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeDate {
    /// Last day of fieldwork.
    #[default]
    End,
    /// First day of fieldwork.
    Start,
    /// Middle day of fieldwork (rounded down).
    Midpoint,
}

/// What to do with records whose date text matches none of the known shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UndatedPolicy {
    /// Exclude the record from the output and report it.
    #[default]
    Drop,
    /// Abort the run on the first undated record.
    Fail,
}

/// Input file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension (`.csv` is CSV, anything else JSON).
    #[default]
    Auto,
    Json,
    Csv,
}

/// One poll as delivered by ingest: institute, raw date text, and normalized values.
///
/// Values are already numbers or absent; text cleanup happens at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRecord {
    pub institute: String,
    pub raw_date: String,
    pub values: BTreeMap<String, Option<f64>>,
}

impl PollRecord {
    /// Value for a candidate; absent when the candidate was not polled.
    pub fn value(&self, candidate: &str) -> Option<f64> {
        self.values.get(candidate).copied().flatten()
    }
}

/// A record excluded from the trend because its date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position in the input sequence (0-based).
    pub index: usize,
    pub institute: String,
    pub raw_date: String,
}

/// Settings for one trend computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendConfig {
    /// Half-width of the averaging window, in whole days.
    pub window_days: u32,
    pub representative: RepresentativeDate,
    pub undated: UndatedPolicy,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            representative: RepresentativeDate::default(),
            undated: UndatedPolicy::default(),
        }
    }
}

/// Smoothed and raw values of one candidate, index-aligned with `TrendFile::dates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateTrend {
    pub smoothed: Vec<Option<f64>>,
    pub raw: Vec<Option<f64>>,
}

/// The exported trend artifact (JSON).
///
/// Absent values serialize as explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendFile {
    pub dates: Vec<NaiveDate>,
    pub institutes: Vec<String>,
    pub candidates: BTreeMap<String, CandidateTrend>,
}

impl TrendFile {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
