//! Per-character comparison of records against a reference.
//!
//! Two display modes exist:
//!
//! - **marker**: residues identical to the reference become a marker
//!   character (`.` by default); differences are shown upper-cased.
//! - **case highlight**: residues identical to the reference are shown
//!   upper-case and differences lower-case. Gaps equal to reference gaps
//!   count as matches in this mode, unlike in marker mode.

use std::fmt;

use crate::model::{SequenceRecord, GAP_CHAR};
use crate::reformat::{ReformatError, ReformatResult};
use crate::selector::SequenceSelector;

/// Default character marking identity with the reference.
pub const DEFAULT_SIMILARITY_CHAR: char = '.';
/// Prefix added to the name of the reference record.
pub const REFERENCE_PREFIX: &str = "==REF==> ";

/// How identity with the reference is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityMarker {
    /// Replace identical residues with this character
    Char(char),
    /// Upper-case identical residues, lower-case the others
    CaseHighlight,
}

impl SimilarityMarker {
    /// Parses a marker from user input.
    ///
    /// An empty or absent value selects case highlighting. More than one
    /// character is rejected.
    pub fn parse(value: Option<&str>) -> ReformatResult<Self> {
        let value = value.unwrap_or("");
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(SimilarityMarker::CaseHighlight),
            (Some(c), None) => Ok(SimilarityMarker::Char(c)),
            _ => Err(ReformatError::InvalidSimilarityMarker(value.to_string())),
        }
    }
}

impl Default for SimilarityMarker {
    fn default() -> Self {
        SimilarityMarker::Char(DEFAULT_SIMILARITY_CHAR)
    }
}

impl fmt::Display for SimilarityMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityMarker::Char(c) => write!(f, "{}", c),
            SimilarityMarker::CaseHighlight => write!(f, "<case>"),
        }
    }
}

/// Where the comparison baseline comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReferenceSource {
    /// The consensus of all records
    #[default]
    Consensus,
    /// A record of the alignment
    Named(SequenceSelector),
}

/// Compares `record` against `reference` character by character.
///
/// The result has the length of the shorter of the two.
pub fn diff(record: &SequenceRecord, reference: &str, marker: SimilarityMarker) -> SequenceRecord {
    let data: String = match marker {
        SimilarityMarker::Char(sim) => record
            .data
            .chars()
            .zip(reference.chars())
            .map(|(s, t)| {
                let (s, t) = (s.to_ascii_uppercase(), t.to_ascii_uppercase());
                if s == t && s != GAP_CHAR {
                    sim
                } else {
                    s
                }
            })
            .collect(),
        SimilarityMarker::CaseHighlight => record
            .data
            .chars()
            .zip(reference.chars())
            .map(|(s, t)| {
                let (s, t) = (s.to_ascii_lowercase(), t.to_ascii_lowercase());
                if s == t {
                    s.to_ascii_uppercase()
                } else {
                    s
                }
            })
            .collect(),
    };
    record.with_data(data)
}

/// Returns a copy of `record` flagged and renamed as the reference.
pub fn mark_reference(record: &SequenceRecord) -> SequenceRecord {
    SequenceRecord {
        name: format!("{}{}", REFERENCE_PREFIX, record.name),
        data: record.data.clone(),
        is_reference: true,
    }
}
