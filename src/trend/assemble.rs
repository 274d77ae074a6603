//! Series assembly: records in, `TrendFile` out.
//!
//! raw records -> representative date per record -> stable sort by date
//! -> one series per candidate -> moving average -> combined artifact

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::dates::parse_representative;
use crate::domain::{CandidateTrend, DroppedRecord, PollRecord, TrendConfig, TrendFile, UndatedPolicy};
use crate::error::AppError;
use crate::smoothing::{SeriesPoint, smooth};
use crate::trend::CandidateSet;

/// Result of one assembly run.
#[derive(Debug, Clone)]
pub struct TrendOutput {
    pub trend: TrendFile,
    /// Records excluded because their date text could not be parsed.
    pub dropped: Vec<DroppedRecord>,
    /// Number of records handed in.
    pub records_in: usize,
}

/// Build the smoothed trend for every candidate in `candidates`.
pub fn build_trend(
    records: &[PollRecord],
    candidates: &CandidateSet,
    config: &TrendConfig,
) -> Result<TrendOutput, AppError> {
    let (dated, dropped) = date_records(records, config)?;

    let dates: Vec<NaiveDate> = dated.iter().map(|(d, _)| *d).collect();
    let institutes: Vec<String> = dated.iter().map(|(_, r)| r.institute.clone()).collect();

    for name in candidates.iter() {
        if !records.iter().any(|r| r.values.contains_key(name)) {
            warn!(candidate = name, "candidate does not appear in any record");
        }
    }

    let candidate_trends: BTreeMap<String, CandidateTrend> = candidates
        .names()
        .par_iter()
        .map(|name| {
            let raw: Vec<Option<f64>> = dated.iter().map(|(_, r)| r.value(name)).collect();
            let series: Vec<SeriesPoint> = dates
                .iter()
                .zip(&raw)
                .map(|(d, v)| SeriesPoint::new(Some(*d), *v))
                .collect();
            let smoothed = smooth(&series, config.window_days).into_values();
            debug!(
                candidate = name.as_str(),
                polls = raw.iter().flatten().count(),
                "smoothed candidate series"
            );
            (name.clone(), CandidateTrend { smoothed, raw })
        })
        .collect();

    info!(
        records = records.len(),
        dated = dates.len(),
        dropped = dropped.len(),
        candidates = candidates.len(),
        window_days = config.window_days,
        "built trend"
    );

    Ok(TrendOutput {
        trend: TrendFile {
            dates,
            institutes,
            candidates: candidate_trends,
        },
        dropped,
        records_in: records.len(),
    })
}

/// Attach a representative date to each record and sort by it.
///
/// Ties keep input order.
fn date_records<'a>(
    records: &'a [PollRecord],
    config: &TrendConfig,
) -> Result<(Vec<(NaiveDate, &'a PollRecord)>, Vec<DroppedRecord>), AppError> {
    let mut dated = Vec::with_capacity(records.len());
    let mut dropped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match parse_representative(&record.raw_date, config.representative) {
            Some(date) => dated.push((date, record)),
            None => match config.undated {
                UndatedPolicy::Fail => {
                    return Err(AppError::policy(format!(
                        "Record {} ({}) has an unrecognized date: '{}'.",
                        index + 1,
                        record.institute,
                        record.raw_date
                    )));
                }
                UndatedPolicy::Drop => {
                    warn!(
                        index,
                        institute = record.institute.as_str(),
                        raw_date = record.raw_date.as_str(),
                        "dropping record with unrecognized date"
                    );
                    dropped.push(DroppedRecord {
                        index,
                        institute: record.institute.clone(),
                        raw_date: record.raw_date.clone(),
                    });
                }
            },
        }
    }

    dated.sort_by_key(|(date, _)| *date);
    Ok((dated, dropped))
}
