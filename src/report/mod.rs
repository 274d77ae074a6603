//! Reporting utilities: per-candidate statistics and terminal output.

use crate::domain::TrendFile;
use crate::trend::CandidateSet;

pub mod format;

pub use format::*;

/// Summary of one candidate's raw polls and latest smoothed value.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStats {
    pub name: String,
    /// Number of polls with a value for this candidate.
    pub polls: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Smoothed value at the most recent date.
    pub latest_smoothed: Option<f64>,
}

/// Compute stats for every candidate in the set, in set order.
pub fn candidate_stats(trend: &TrendFile, candidates: &CandidateSet) -> Vec<CandidateStats> {
    candidates
        .iter()
        .map(|name| {
            let Some(series) = trend.candidates.get(name) else {
                return empty_stats(name);
            };
            let values: Vec<f64> = series.raw.iter().flatten().copied().collect();
            let polls = values.len();
            let (mean, min, max) = if polls == 0 {
                (None, None, None)
            } else {
                let sum: f64 = values.iter().sum();
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (Some(sum / polls as f64), Some(min), Some(max))
            };
            CandidateStats {
                name: name.to_string(),
                polls,
                mean,
                min,
                max,
                latest_smoothed: series.smoothed.last().copied().flatten(),
            }
        })
        .collect()
}

/// Stats for every candidate in an exported trend file, in name order.
pub fn trend_file_stats(trend: &TrendFile) -> Vec<CandidateStats> {
    let set = CandidateSet::new(trend.candidates.keys()).unwrap_or_default();
    candidate_stats(trend, &set)
}

fn empty_stats(name: &str) -> CandidateStats {
    CandidateStats {
        name: name.to_string(),
        polls: 0,
        mean: None,
        min: None,
        max: None,
        latest_smoothed: None,
    }
}
