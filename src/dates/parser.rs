//! Free-text fieldwork date parsing.
//!
//! Poll tables report collection windows in a handful of loose shapes:
//!
//! - `15–19 Oct 2025`       (day range inside one month)
//! - `29 Sep – 6 Oct 2025`  (range spanning two months)
//! - `28 Aug 2025`          (single day)
//!
//! Shapes are tried in that order and the first match wins. Matching is anchored
//! at the start of the text, so trailing footnote markers (`"28 Aug 2025[a]"`) are
//! ignored. Anything else is "date unknown" (`None`), never an error.

use chrono::{Duration, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::RepresentativeDate;

/// Dash-like characters accepted as range separators.
///
/// Figure dash, en dash, em dash, and minus sign all collapse to `-`.
const DASH_VARIANTS: [char; 4] = ['\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'];

static DAY_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s*-\s*(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})").expect("valid day-range regex")
});

static MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\s*-\s*(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})")
        .expect("valid month-range regex")
});

static SINGLE_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})").expect("valid single-day regex"));

/// An inclusive fieldwork window.
///
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    fn new(start: Option<NaiveDate>, end: NaiveDate) -> Self {
        // An unresolvable or inverted start collapses onto the end day.
        let start = start.filter(|s| *s <= end).unwrap_or(end);
        Self { start, end }
    }

    /// Number of days between start and end (0 for single-day polls).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The single calendar day standing in for this window.
    pub fn representative(&self, policy: RepresentativeDate) -> NaiveDate {
        match policy {
            RepresentativeDate::End => self.end,
            RepresentativeDate::Start => self.start,
            RepresentativeDate::Midpoint => self.start + Duration::days(self.span_days() / 2),
        }
    }
}

/// Parse a fieldwork window from free text.
pub fn parse_date_range(text: &str) -> Option<DateRange> {
    let normalized = normalize_dashes(text.trim());
    let s = normalized.as_str();

    if let Some(caps) = DAY_RANGE.captures(s) {
        let month = parse_month(&caps[3])?;
        let year = parse_year(&caps[4])?;
        let end = ymd(year, month, &caps[2])?;
        let start = ymd(year, month, &caps[1]);
        return Some(DateRange::new(start, end));
    }

    if let Some(caps) = MONTH_RANGE.captures(s) {
        let start_month = parse_month(&caps[2])?;
        let end_month = parse_month(&caps[4])?;
        let year = parse_year(&caps[5])?;
        let end = ymd(year, end_month, &caps[3])?;
        // "29 Dec – 3 Jan 2026": the first month belongs to the previous year.
        let start_year = if start_month > end_month { year - 1 } else { year };
        let start = ymd(start_year, start_month, &caps[1]);
        return Some(DateRange::new(start, end));
    }

    if let Some(caps) = SINGLE_DAY.captures(s) {
        let month = parse_month(&caps[2])?;
        let year = parse_year(&caps[3])?;
        let day = ymd(year, month, &caps[1])?;
        return Some(DateRange::new(Some(day), day));
    }

    None
}

/// Parse the representative (end) date of a fieldwork window.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_date_range(text).map(|r| r.end)
}

/// Parse a fieldwork window and pick its representative day per `policy`.
pub fn parse_representative(text: &str, policy: RepresentativeDate) -> Option<NaiveDate> {
    parse_date_range(text).map(|r| r.representative(policy))
}

/// Rewrite a date text into the canonical single-day form (`"19 Oct 2025"`).
///
/// Uses the end of the window, matching [`parse_date`].
pub fn normalize_label(text: &str) -> Option<String> {
    parse_date(text).map(format_label)
}

/// Format a date as `D Mon YYYY`.
pub fn format_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn normalize_dashes(s: &str) -> String {
    s.chars()
        .map(|c| if DASH_VARIANTS.contains(&c) { '-' } else { c })
        .collect()
}

fn parse_month(s: &str) -> Option<u32> {
    s.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn parse_year(s: &str) -> Option<i32> {
    s.parse().ok()
}

fn ymd(year: i32, month: u32, day: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
