//! Second pass: fill gaps left by the window pass.
//!
//! Interpolation is by position index, not by date: output slots are treated as
//! equally spaced. Gaps at either end copy the nearest computed value.

/// Fill every absent entry from its nearest computed neighbours.
///
/// - both neighbours present: `prev + (next - prev) * (i - i_prev) / (i_next - i_prev)`
/// - one neighbour present: copy it
/// - none present (all-absent input): stays absent
pub fn interpolate_gaps(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = values.len();

    let mut prev: Vec<Option<usize>> = Vec::with_capacity(n);
    let mut last = None;
    for (i, v) in values.iter().enumerate() {
        if v.is_some() {
            last = Some(i);
        }
        prev.push(last);
    }

    let mut next: Vec<Option<usize>> = vec![None; n];
    let mut upcoming = None;
    for i in (0..n).rev() {
        if values[i].is_some() {
            upcoming = Some(i);
        }
        next[i] = upcoming;
    }

    (0..n)
        .map(|i| {
            if let Some(v) = values[i] {
                return Some(v);
            }
            match (prev[i], next[i]) {
                (Some(p), Some(q)) => {
                    let (a, b) = (values[p]?, values[q]?);
                    let ratio = (i - p) as f64 / (q - p) as f64;
                    Some(a + (b - a) * ratio)
                }
                (Some(p), None) => values[p],
                (None, Some(q)) => values[q],
                (None, None) => None,
            }
        })
        .collect()
}
