//! Resolve a short name to candidate long names.

use crate::parser::ShortName;
use crate::shortname::{checksum_stem, stem_budget};
use crate::wordlist::RainbowRecord;
use serde::Serialize;

/// How a candidate matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The 8.3 base of the word is the short name base (`INDEX~1`).
    Prefix,
    /// The short name carries one of the word's checksums (`IN2EF5~1`).
    Checksum,
}

/// A word that could be the long name behind a short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub filename: String,
    pub kind: MatchKind,
}

/// How `record` matches `short`, if at all. Checksum matches win over prefix matches.
#[must_use]
pub fn match_record(short: &ShortName, record: &RainbowRecord) -> Option<MatchKind> {
    if short.extension != record.extension83 {
        return None;
    }

    let checksum_hit = record
        .checksums
        .iter()
        .any(|hex| checksum_stem(&record.filename83, hex, short.index) == short.base);
    if checksum_hit {
        return Some(MatchKind::Checksum);
    }

    let stem: String = record
        .filename83
        .chars()
        .take(stem_budget(short.index))
        .collect();
    (stem == short.base).then_some(MatchKind::Prefix)
}

/// Every record that could have produced `short`, in wordlist order.
#[must_use]
pub fn find_candidates(short: &ShortName, records: &[RainbowRecord]) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = records
        .iter()
        .filter_map(|record| {
            match_record(short, record).map(|kind| Candidate {
                filename: record.full_name(),
                kind,
            })
        })
        .collect();

    tracing::debug!(
        short_name = %short,
        searched = records.len(),
        found = candidates.len(),
        "lookup finished"
    );
    candidates
}
