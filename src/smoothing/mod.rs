//! Moving-average engine for sparse, irregularly spaced poll series.
//!
//! Two passes, always in this order:
//!
//! 1. `window_means`: for each dated observation, the mean of every observation
//!    of the same series within `±window_days` calendar days.
//! 2. `interpolate_gaps`: positions the first pass left absent are filled by
//!    index-based linear interpolation over the first pass's output.
//!
//! The second pass sees the first pass's absences, not the raw data's. Both
//! passes are pure and allocate their own output, so independent series can be
//! smoothed concurrently.

use chrono::NaiveDate;

pub mod interpolate;
pub mod window;

pub use interpolate::*;
pub use window::*;

/// Default half-width of the averaging window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 31;

/// One position of a candidate's series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(date: Option<NaiveDate>, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// Smoothed output, index-aligned with the input series.
///
/// An entry is absent only when the whole series had no computable mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothedSeries {
    values: Vec<Option<f64>>,
}

impl SmoothedSeries {
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Window then interpolate.
pub fn smooth(series: &[SeriesPoint], window_days: u32) -> SmoothedSeries {
    let means = window_means(series, window_days);
    SmoothedSeries {
        values: interpolate_gaps(&means),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dated(offsets_and_values: &[(i64, Option<f64>)]) -> Vec<SeriesPoint> {
        let base = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        offsets_and_values
            .iter()
            .map(|&(o, v)| SeriesPoint::new(Some(base + Duration::days(o)), v))
            .collect()
    }

    #[test]
    fn three_polls_ten_days_apart() {
        let series = dated(&[(0, Some(40.0)), (10, None), (20, Some(44.0))]);
        let out = smooth(&series, DEFAULT_WINDOW_DAYS);
        assert_eq!(out.values(), &[Some(42.0), Some(42.0), Some(42.0)]);
    }

    #[test]
    fn empty_series_gives_empty_output() {
        assert!(smooth(&[], DEFAULT_WINDOW_DAYS).is_empty());
    }

    #[test]
    fn series_without_values_is_all_absent() {
        let series = dated(&[(0, None), (5, None), (9, None)]);
        assert_eq!(smooth(&series, DEFAULT_WINDOW_DAYS).into_values(), vec![None, None, None]);
    }

    #[test]
    fn gaps_are_filled_from_window_output_not_raw_values() {
        // Windows do not overlap, so each mean equals its own raw value; the
        // missing middle position is interpolated between those means.
        let series = dated(&[(0, Some(10.0)), (50, None), (100, Some(30.0))]);
        let out = smooth(&series, 31);
        assert_eq!(out.values(), &[Some(10.0), Some(20.0), Some(30.0)]);
    }

    #[test]
    fn undated_value_is_filled_by_interpolation() {
        let base = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let series = vec![
            SeriesPoint::new(Some(base), Some(10.0)),
            SeriesPoint::new(None, Some(1000.0)),
            SeriesPoint::new(Some(base + Duration::days(100)), Some(20.0)),
        ];
        let out = smooth(&series, 31);
        assert_eq!(out.values(), &[Some(10.0), Some(15.0), Some(20.0)]);
    }

    #[test]
    fn every_output_defined_when_any_value_present() {
        let series = dated(&[(0, None), (3, None), (60, Some(51.0)), (61, None), (200, None)]);
        let out = smooth(&series, 31);
        assert_eq!(out.len(), series.len());
        assert!(out.values().iter().all(|v| v == &Some(51.0)));
    }
}
