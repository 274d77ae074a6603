//! First pass: calendar-window means.

use super::SeriesPoint;

/// Compute the windowed mean at every position of a series.
///
/// For a position with both a date and a value, the mean covers every dated,
/// valued position of the series whose date lies within `window_days` whole
/// days of it (inclusive, both sides), itself included. Positions missing
/// either the date or the value come out absent.
///
/// Dates need not be sorted or unique. Cost is quadratic in the series length.
pub fn window_means(series: &[SeriesPoint], window_days: u32) -> Vec<Option<f64>> {
    let window = i64::from(window_days);

    series
        .iter()
        .map(|anchor| {
            let (Some(base), Some(_)) = (anchor.date, anchor.value) else {
                return None;
            };

            let (sum, count) = series
                .iter()
                .filter_map(|p| Some((p.date?, p.value?)))
                .filter(|(date, _)| (*date - base).num_days().abs() <= window)
                .fold((0.0_f64, 0usize), |(sum, count), (_, v)| (sum + v, count + 1));

            if count > 0 { Some(sum / count as f64) } else { None }
        })
        .collect()
}
