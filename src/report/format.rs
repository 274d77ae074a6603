//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engine stays free of printing
//! and output changes stay localized.

use crate::dates::{format_label, parse_date_range};
use crate::domain::{DroppedRecord, PollRecord, TrendConfig};
use crate::io::ingest::{IngestedPolls, RowError};
use crate::report::CandidateStats;
use crate::trend::TrendOutput;

/// Format the run summary (records in/out, date span, settings).
pub fn format_run_summary(ingest: &IngestedPolls, output: &TrendOutput, config: &TrendConfig) -> String {
    let mut out = String::new();
    let trend = &output.trend;

    out.push_str("=== polls - moving average ===\n");
    out.push_str(&format!(
        "Rows: read={} | records={} | row errors={}\n",
        ingest.rows_read,
        ingest.records.len(),
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Records: used={} | dropped (undated)={}\n",
        trend.len(),
        output.dropped.len()
    ));
    match (trend.dates.first(), trend.dates.last()) {
        (Some(first), Some(last)) => out.push_str(&format!("Period: {first} .. {last}\n")),
        _ => out.push_str("Period: (no dated records)\n"),
    }
    out.push_str(&format!(
        "Window: ±{} days | date: {:?} | undated: {:?}\n",
        config.window_days, config.representative, config.undated
    ));

    out
}

/// Format the per-candidate statistics table.
pub fn format_candidate_table(stats: &[CandidateStats]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<20} {:>6} {:>8} {:>8} {:>8} {:>10}\n",
        "candidate", "polls", "mean", "min", "max", "smoothed"
    ));
    for s in stats {
        out.push_str(&format!(
            "{:<20} {:>6} {:>8} {:>8} {:>8} {:>10}\n",
            truncate(&s.name, 20),
            s.polls,
            fmt_pct(s.mean),
            fmt_pct(s.min),
            fmt_pct(s.max),
            fmt_pct(s.latest_smoothed),
        ));
    }

    out
}

/// Format the list of records excluded for unrecognized dates.
pub fn format_dropped(dropped: &[DroppedRecord]) -> String {
    let mut out = String::new();
    if dropped.is_empty() {
        return out;
    }
    out.push_str("Dropped (unrecognized date):\n");
    for d in dropped {
        out.push_str(&format!("  #{:<4} {:<24} '{}'\n", d.index + 1, truncate(&d.institute, 24), d.raw_date));
    }
    out
}

/// Format ingest row errors.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        return out;
    }
    out.push_str("Row errors:\n");
    for e in errors {
        out.push_str(&format!("  row {}: {}\n", e.row, e.message));
    }
    out
}

/// One line per record: raw text, parsed window, normalized label.
pub fn format_date_table(records: &[PollRecord]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<24} {:<28} {:<12} {:<12} {}\n",
        "institute", "raw date", "start", "end", "label"
    ));
    for r in records {
        let (start, end, label) = match parse_date_range(&r.raw_date) {
            Some(range) => (range.start.to_string(), range.end.to_string(), format_label(range.end)),
            None => ("-".to_string(), "-".to_string(), "(unrecognized)".to_string()),
        };
        out.push_str(&format!(
            "{:<24} {:<28} {:<12} {:<12} {}\n",
            truncate(&r.institute, 24),
            truncate(&r.raw_date, 28),
            start,
            end,
            label
        ));
    }

    out
}

fn fmt_pct(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
    t.push('…');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn date_table_marks_unrecognized_text() {
        let records = vec![
            PollRecord {
                institute: "Quaest".to_string(),
                raw_date: "29 Sep – 6 Oct 2025".to_string(),
                values: BTreeMap::new(),
            },
            PollRecord {
                institute: "Futura".to_string(),
                raw_date: "TBD".to_string(),
                values: BTreeMap::new(),
            },
        ];
        let table = format_date_table(&records);
        assert!(table.contains("2025-09-29"));
        assert!(table.contains("6 Oct 2025"));
        assert!(table.contains("(unrecognized)"));
    }

    #[test]
    fn candidate_table_prints_dashes_for_missing() {
        let stats = vec![CandidateStats {
            name: "Zema".to_string(),
            polls: 0,
            mean: None,
            min: None,
            max: None,
            latest_smoothed: None,
        }];
        let table = format_candidate_table(&stats);
        assert!(table.lines().nth(1).unwrap().contains(" - "));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
