//! Read/write trend JSON files.
//!
//! Trend JSON is the artifact handed to the charting front-end:
//! - `dates`: ISO calendar dates, ascending
//! - `institutes`: index-aligned with `dates`
//! - `candidates`: `{ name: { smoothed, raw } }`, absent values as `null`
//!
//! The schema is defined by `domain::TrendFile`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::TrendFile;
use crate::error::AppError;

/// Write a trend JSON file.
pub fn write_trend_json(path: &Path, trend: &TrendFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create trend JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, trend)
        .map_err(|e| AppError::output(format!("Failed to write trend JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to write trend JSON: {e}")))?;

    info!(path = %path.display(), rows = trend.len(), "wrote trend");
    Ok(())
}

/// Read a trend JSON file.
pub fn read_trend_json(path: &Path) -> Result<TrendFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open trend JSON '{}': {e}", path.display())))?;
    let trend: TrendFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid trend JSON: {e}")))?;

    for (name, series) in &trend.candidates {
        if series.smoothed.len() != trend.len() || series.raw.len() != trend.len() {
            return Err(AppError::input(format!(
                "Trend JSON series for '{name}' is not aligned with `dates`."
            )));
        }
    }
    if trend.institutes.len() != trend.len() {
        return Err(AppError::input("Trend JSON `institutes` is not aligned with `dates`."));
    }

    Ok(trend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateTrend;
    use chrono::NaiveDate;

    fn sample() -> TrendFile {
        let mut trend = TrendFile {
            dates: vec![NaiveDate::from_ymd_opt(2025, 10, 19).unwrap()],
            institutes: vec!["Quaest".to_string()],
            ..TrendFile::default()
        };
        trend.candidates.insert(
            "Lula".to_string(),
            CandidateTrend {
                smoothed: vec![None],
                raw: vec![None],
            },
        );
        trend
    }

    #[test]
    fn absent_values_serialize_as_null() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dates"][0], "2025-10-19");
        assert!(json["candidates"]["Lula"]["smoothed"][0].is_null());
        assert!(json["candidates"]["Lula"]["raw"][0].is_null());
    }

    #[test]
    fn rejects_misaligned_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.json");
        let mut trend = sample();
        trend.institutes.push("extra".to_string());
        write_trend_json(&path, &trend).unwrap();

        let err = read_trend_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
