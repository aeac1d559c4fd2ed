//! Selection of a single record by position or by name.
//!
//! Used for the comparison reference and for the trim target. The kind of
//! selector is decided once, when it is parsed; resolution never guesses.
//!
//! ## Index convention
//!
//! - positive values are 1-based from the start (`1` is the first record)
//! - zero and negative values are 0-based offsets from the end
//!   (`0` is the last record, `-1` the one before it)

use std::fmt;
use std::str::FromStr;

use crate::model::SequenceRecord;
use crate::reformat::{ReformatError, ReformatResult};

/// Prefix forcing a selector to be read as a name, even if it is numeric.
pub const NAME_PREFIX: &str = "name:";

/// Identifies exactly one record of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceSelector {
    /// Position in the record list
    ByIndex(i64),
    /// Case-sensitive substring of exactly one record name
    ByName(String),
}

impl SequenceSelector {
    /// Resolves the selector to an index into `records`.
    ///
    /// An index outside the record list is retried as a name, so a record
    /// named e.g. `"12"` can still be found in a short alignment.
    pub fn resolve_index(&self, records: &[SequenceRecord]) -> ReformatResult<usize> {
        match self {
            SequenceSelector::ByIndex(index) => match position(*index, records.len()) {
                Some(ix) => Ok(ix),
                None => unique_name_match(&index.to_string(), records)
                    .ok_or_else(|| self.ambiguous()),
            },
            SequenceSelector::ByName(pattern) => {
                unique_name_match(pattern, records).ok_or_else(|| self.ambiguous())
            }
        }
    }

    /// Resolves the selector to the record it designates.
    pub fn resolve<'a>(&self, records: &'a [SequenceRecord]) -> ReformatResult<&'a SequenceRecord> {
        let ix = self.resolve_index(records)?;
        Ok(&records[ix])
    }

    fn ambiguous(&self) -> ReformatError {
        ReformatError::AmbiguousReference {
            selector: self.to_string(),
        }
    }
}

/// Converts a user-facing index to a 0-based position, if in range.
fn position(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let ix = if index > 0 { index - 1 } else { len + index - 1 };
    (0..len).contains(&ix).then(|| ix as usize)
}

/// Returns the index of the only record whose name contains `pattern`.
///
/// When several names contain it, a single record named exactly `pattern`
/// is taken instead.
fn unique_name_match(pattern: &str, records: &[SequenceRecord]) -> Option<usize> {
    let matches: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.name.contains(pattern))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [ix] => Some(*ix),
        [] => None,
        _ => {
            let mut exact = matches.iter().filter(|&&i| records[i].name == pattern);
            match (exact.next(), exact.next()) {
                (Some(&ix), None) => Some(ix),
                _ => None,
            }
        }
    }
}

impl FromStr for SequenceSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(NAME_PREFIX) {
            return Ok(SequenceSelector::ByName(name.to_string()));
        }
        Ok(match s.trim().parse::<i64>() {
            Ok(index) => SequenceSelector::ByIndex(index),
            Err(_) => SequenceSelector::ByName(s.to_string()),
        })
    }
}

impl fmt::Display for SequenceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceSelector::ByIndex(index) => write!(f, "{}", index),
            SequenceSelector::ByName(name) => write!(f, "{}", name),
        }
    }
}
