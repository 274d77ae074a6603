//! Poll table ingest and normalization.
//!
//! This module is responsible for turning scraped poll tables into clean
//! `PollRecord`s the trend builder can consume.
//!
//! Two input shapes are accepted:
//!
//! - JSON: an array of `{ "institute", "date", "candidates": { name: value } }`
//!   objects (the Portuguese keys `instituto`, `data`, `candidatos` also work)
//! - CSV: a wide table `institute,date,<candidate>,<candidate>,...`
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Values normalized here**: text like `"35,5%"` becomes `35.5`, anything
//!   unparseable becomes absent
//! - **No date handling**: date text is passed through untouched

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domain::{InputFormat, PollRecord};
use crate::error::AppError;
use crate::trend::clean_candidate_name;

const INSTITUTE_HEADERS: [&str; 3] = ["institute", "instituto", "pollster"];
const DATE_HEADERS: [&str; 3] = ["date", "data", "fieldwork date"];

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// CSV line number, or 1-based record position for JSON.
    pub row: usize,
    pub message: String,
}

/// Ingest output: normalized records + row errors.
#[derive(Debug, Clone, Default)]
pub struct IngestedPolls {
    pub records: Vec<PollRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

#[derive(Debug, Deserialize)]
struct RawPoll {
    #[serde(alias = "instituto")]
    institute: Option<String>,
    #[serde(alias = "data")]
    date: Option<String>,
    #[serde(alias = "candidatos", default)]
    candidates: BTreeMap<String, Value>,
}

/// Load poll records from a file.
pub fn load_polls(path: &Path, format: InputFormat) -> Result<IngestedPolls, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open input '{}': {e}", path.display())))?;

    let ingested = match resolve_format(path, format) {
        InputFormat::Csv => parse_polls_csv(file)?,
        _ => parse_polls_json(file)?,
    };

    info!(
        path = %path.display(),
        rows = ingested.rows_read,
        records = ingested.records.len(),
        row_errors = ingested.row_errors.len(),
        "loaded polls"
    );
    Ok(ingested)
}

fn resolve_format(path: &Path, format: InputFormat) -> InputFormat {
    match format {
        InputFormat::Auto => {
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if is_csv { InputFormat::Csv } else { InputFormat::Json }
        }
        other => other,
    }
}

/// Parse a JSON array of poll objects.
pub fn parse_polls_json<R: Read>(reader: R) -> Result<IngestedPolls, AppError> {
    let rows: Vec<Value> = serde_json::from_reader(reader)
        .map_err(|e| AppError::input(format!("Invalid poll JSON (expected an array of objects): {e}")))?;

    let mut out = IngestedPolls {
        rows_read: rows.len(),
        ..IngestedPolls::default()
    };

    for (idx, row) in rows.into_iter().enumerate() {
        let position = idx + 1;
        let raw: RawPoll = match serde_json::from_value(row) {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    row: position,
                    message: format!("Malformed poll object: {e}"),
                });
                continue;
            }
        };

        let Some(institute) = raw.institute.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
            out.row_errors.push(RowError {
                row: position,
                message: "Missing `institute` value.".to_string(),
            });
            continue;
        };

        let mut values = BTreeMap::new();
        for (name, value) in &raw.candidates {
            insert_value(&mut values, name, normalize_value(value));
        }

        out.records.push(PollRecord {
            institute,
            raw_date: raw.date.unwrap_or_default().trim().to_string(),
            values,
        });
    }

    Ok(out)
}

/// Parse a wide CSV poll table.
pub fn parse_polls_csv<R: Read>(reader: R) -> Result<IngestedPolls, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let institute_idx = find_column(&header_map, &INSTITUTE_HEADERS)
        .ok_or_else(|| AppError::input("Missing required column: `institute` (or `instituto`)"))?;
    let date_idx = find_column(&header_map, &DATE_HEADERS)
        .ok_or_else(|| AppError::input("Missing required column: `date` (or `data`)"))?;

    let candidate_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != institute_idx && *idx != date_idx)
        .map(|(idx, name)| (idx, clean_candidate_name(strip_bom(name))))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let mut out = IngestedPolls::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    row: line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let Some(institute) = record.get(institute_idx).filter(|s| !s.is_empty()) else {
            out.row_errors.push(RowError {
                row: line,
                message: "Missing `institute` value.".to_string(),
            });
            continue;
        };

        let mut values = BTreeMap::new();
        for (col, name) in &candidate_columns {
            let value = record.get(*col).and_then(parse_percentage);
            insert_value(&mut values, name, value);
        }

        out.records.push(PollRecord {
            institute: institute.to_string(),
            raw_date: record.get(date_idx).unwrap_or_default().to_string(),
            values,
        });
    }

    Ok(out)
}

/// Normalize a JSON cell to a percentage.
pub fn normalize_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_percentage(s),
        _ => None,
    }
}

/// Parse percentage text: `"35"`, `"35.5"`, `"35,5%"`.
///
/// Placeholders (`"–"`, `"?"`, `"n/a"`) and non-finite numbers are absent.
pub fn parse_percentage(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_end_matches('%').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Two columns can clean to the same name ("Lula" and "Lula[a]"); the first
/// present value wins.
fn insert_value(values: &mut BTreeMap<String, Option<f64>>, name: &str, value: Option<f64>) {
    let name = clean_candidate_name(name);
    if name.is_empty() {
        return;
    }
    let slot = values.entry(name).or_insert(None);
    if slot.is_none() {
        *slot = value;
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (strip_bom(name).trim().to_ascii_lowercase(), idx))
        .collect()
}

fn strip_bom(name: &str) -> &str {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim_start_matches('\u{feff}')
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|a| header_map.get(*a).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percentage_text() {
        assert_eq!(parse_percentage("35"), Some(35.0));
        assert_eq!(parse_percentage(" 35,5% "), Some(35.5));
        assert_eq!(parse_percentage("–"), None);
        assert_eq!(parse_percentage("n/a"), None);
        assert_eq!(parse_percentage("NaN"), None);
        assert_eq!(parse_percentage(""), None);
    }

    #[test]
    fn json_accepts_portuguese_keys_and_mixed_values() {
        let json = r#"[
            {"instituto": "Quaest", "data": "15–19 Oct 2025",
             "candidatos": {"Lula": 41.0, "Freitas[a]": "33,5", "Gomes": null, "Zema": "-"}},
            {"institute": "Datafolha", "date": "2 Sep 2025", "candidates": {"Lula": 39}}
        ]"#;
        let out = parse_polls_json(json.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 2);
        assert!(out.row_errors.is_empty());

        let first = &out.records[0];
        assert_eq!(first.institute, "Quaest");
        assert_eq!(first.raw_date, "15–19 Oct 2025");
        assert_eq!(first.value("Lula"), Some(41.0));
        assert_eq!(first.value("Freitas"), Some(33.5));
        assert!(first.values.contains_key("Gomes"));
        assert_eq!(first.value("Gomes"), None);
        assert_eq!(first.value("Zema"), None);

        assert_eq!(out.records[1].value("Lula"), Some(39.0));
    }

    #[test]
    fn json_rows_without_institute_are_reported() {
        let json = r#"[{"date": "2 Sep 2025", "candidates": {}}, 7]"#;
        let out = parse_polls_json(json.as_bytes()).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.row_errors.len(), 2);
        assert_eq!(out.row_errors[0].row, 1);
        assert_eq!(out.row_errors[1].row, 2);
    }

    #[test]
    fn json_that_is_not_an_array_is_fatal() {
        let err = parse_polls_json(r#"{"a": 1}"#.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn csv_wide_table() {
        let csv = "\u{feff}Instituto,Data,Lula,Caiado (PSD)\n\
                   Quaest,15–19 Oct 2025,41%,\n\
                   ,1 Oct 2025,40,5\n\
                   AtlasIntel,TBD,39.5,6\n";
        let out = parse_polls_csv(csv.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.row_errors.len(), 1);
        assert_eq!(out.row_errors[0].row, 3);

        assert_eq!(out.records[0].value("Lula"), Some(41.0));
        assert_eq!(out.records[0].value("Caiado"), None);
        assert_eq!(out.records[1].raw_date, "TBD");
        assert_eq!(out.records[1].value("Caiado"), Some(6.0));
    }

    #[test]
    fn csv_requires_institute_and_date_columns() {
        let err = parse_polls_csv("name,Lula\nx,1\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn auto_format_uses_extension() {
        assert_eq!(resolve_format(Path::new("polls.CSV"), InputFormat::Auto), InputFormat::Csv);
        assert_eq!(resolve_format(Path::new("polls.json"), InputFormat::Auto), InputFormat::Json);
        assert_eq!(resolve_format(Path::new("polls.csv"), InputFormat::Json), InputFormat::Json);
    }
}
