//! Candidate name resolution.
//!
//! The set of candidates is fixed once, before any smoothing runs. Records then
//! get looked up by name; candidates a record does not mention are absent there.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::PollRecord;
use crate::error::AppError;

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket regex"));
static PARENTHESISED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid paren regex"));

/// Strip footnote markers (`[a]`) and qualifiers (`(PT)`) from a column name.
pub fn clean_candidate_name(raw: &str) -> String {
    let without_notes = BRACKETED.replace_all(raw, "");
    let without_quals = PARENTHESISED.replace_all(&without_notes, "");
    without_quals.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered, duplicate-free list of candidate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    names: Vec<String>,
}

impl CandidateSet {
    /// Build from an explicit list. Names are trimmed; empty names and
    /// duplicates are rejected.
    pub fn new<I, S>(names: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(AppError::input("Candidate names must not be empty."));
            }
            if !seen.insert(name.to_string()) {
                return Err(AppError::input(format!("Candidate '{name}' listed more than once.")));
            }
            out.push(name.to_string());
        }
        Ok(Self { names: out })
    }

    /// Every candidate mentioned by any record, in order of first appearance.
    pub fn discover(records: &[PollRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in records.iter().flat_map(|r| r.values.keys()) {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(values: &[(&str, Option<f64>)]) -> PollRecord {
        PollRecord {
            institute: "Quaest".to_string(),
            raw_date: "1 Oct 2025".to_string(),
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn cleans_footnotes_and_qualifiers() {
        assert_eq!(clean_candidate_name("Lula[a]"), "Lula");
        assert_eq!(clean_candidate_name(" Tarcísio (Republicanos) [12]"), "Tarcísio");
        assert_eq!(clean_candidate_name("Ciro  Gomes"), "Ciro Gomes");
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert!(CandidateSet::new(["Lula", " Lula "]).is_err());
        assert!(CandidateSet::new(["Lula", ""]).is_err());
        let set = CandidateSet::new(["Lula", "Caiado"]).unwrap();
        assert_eq!(set.names(), &["Lula".to_string(), "Caiado".to_string()]);
    }

    #[test]
    fn discovers_in_first_appearance_order() {
        let records = vec![
            record(&[("Zema", Some(5.0))]),
            record(&[("Caiado", None), ("Zema", Some(6.0))]),
            record(&[("Lula", Some(40.0))]),
        ];
        let set = CandidateSet::discover(&records);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Zema", "Caiado", "Lula"]);
    }
}
