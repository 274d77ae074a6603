//! Shared "smooth pipeline" logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> candidate resolution -> trend assembly -> stats
//!
//! The command handlers can then focus on presentation (printing vs exporting).

use std::path::Path;

use crate::domain::{InputFormat, TrendConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedPolls, load_polls};
use crate::report::{CandidateStats, candidate_stats};
use crate::trend::{CandidateSet, TrendOutput, build_trend};

/// All computed outputs of a single `polls smooth` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPolls,
    pub candidates: CandidateSet,
    pub output: TrendOutput,
    pub stats: Vec<CandidateStats>,
}

/// Load polls from `input` and run the pipeline.
pub fn run_smooth(
    input: &Path,
    format: InputFormat,
    requested: &[String],
    config: &TrendConfig,
) -> Result<RunOutput, AppError> {
    let ingest = load_polls(input, format)?;
    run_smooth_with_polls(ingest, requested, config)
}

/// Run the pipeline on already-ingested polls.
///
/// An empty `requested` list means "every candidate found in the records".
pub fn run_smooth_with_polls(
    ingest: IngestedPolls,
    requested: &[String],
    config: &TrendConfig,
) -> Result<RunOutput, AppError> {
    let candidates = if requested.is_empty() {
        CandidateSet::discover(&ingest.records)
    } else {
        CandidateSet::new(requested)?
    };

    let output = build_trend(&ingest.records, &candidates, config)?;
    let stats = candidate_stats(&output.trend, &candidates);

    Ok(RunOutput {
        ingest,
        candidates,
        output,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_polls_json;

    #[test]
    fn discovers_candidates_when_none_requested() {
        let json = r#"[
            {"institute": "A", "date": "1 Oct 2025", "candidates": {"Lula": 40, "Zema": 5}},
            {"institute": "B", "date": "5 Oct 2025", "candidates": {"Lula": 42}}
        ]"#;
        let ingest = parse_polls_json(json.as_bytes()).unwrap();
        let run = run_smooth_with_polls(ingest, &[], &TrendConfig::default()).unwrap();

        assert_eq!(run.candidates.len(), 2);
        assert_eq!(run.output.trend.candidates["Lula"].smoothed, vec![Some(41.0), Some(41.0)]);
        assert_eq!(run.output.trend.candidates["Zema"].smoothed, vec![Some(5.0), Some(5.0)]);
        assert_eq!(run.stats.len(), 2);
    }

    #[test]
    fn duplicate_requested_candidates_are_rejected() {
        let requested = vec!["Lula".to_string(), "Lula".to_string()];
        let err = run_smooth_with_polls(IngestedPolls::default(), &requested, &TrendConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
