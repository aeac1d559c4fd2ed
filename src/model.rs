//! Data model for the alignment reformatter.
//!
//! This module contains the data structures shared by every stage:
//! - Sequence records (name + aligned characters)
//! - Alignments (ordered records, padded to a common length)
//!
//! Records are values: every stage of the pipeline produces new records and
//! never rewrites the ones it was given.

use std::ops::Range;

use log::warn;

/// The character used for alignment gaps.
pub const GAP_CHAR: char = '-';

/// Represents a single aligned sequence with its name and characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// The sequence name (from the FASTA header, without '>')
    pub name: String,
    /// The aligned characters (nucleotides, amino acids and gaps)
    pub data: String,
    /// Whether this record is the comparison baseline for the others
    pub is_reference: bool,
}

impl SequenceRecord {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            is_reference: false,
        }
    }

    /// Returns the number of characters in the record.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the record has no characters.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the characters within a column range.
    ///
    /// The range is clamped to the record length.
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.max(range.start);
        self.data
            .chars()
            .skip(range.start)
            .take(end - range.start)
            .collect()
    }

    /// Returns a copy with the same name and new characters.
    pub fn with_data(&self, data: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            data: data.into(),
            is_reference: self.is_reference,
        }
    }

    /// Returns a copy padded with gaps up to `length` characters.
    pub fn padded(&self, length: usize) -> Self {
        let missing = length.saturating_sub(self.len());
        if missing == 0 {
            return self.clone();
        }
        let mut data = String::with_capacity(self.data.len() + missing);
        data.push_str(&self.data);
        data.extend(std::iter::repeat(GAP_CHAR).take(missing));
        self.with_data(data)
    }
}

/// Represents an alignment of multiple sequence records.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// All records in the alignment
    pub records: Vec<SequenceRecord>,
}

impl Alignment {
    /// Creates an alignment, padding shorter records with gaps.
    ///
    /// The input records are left untouched; the alignment owns padded copies.
    pub fn new(records: &[SequenceRecord]) -> Self {
        let max_len = records.iter().map(SequenceRecord::len).max().unwrap_or(0);
        let was_ragged = records.iter().any(|r| r.len() != max_len);

        if was_ragged {
            let min_len = records.iter().map(SequenceRecord::len).min().unwrap_or(0);
            warn!(
                "Records have different lengths (min: {}, max: {}); padding with '{}'",
                min_len, max_len, GAP_CHAR
            );
        }

        Self {
            records: records.iter().map(|r| r.padded(max_len)).collect(),
        }
    }

    /// Returns the number of records.
    pub fn sequence_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let rec = SequenceRecord::new("seq1", "ACGT");
        assert_eq!(rec.name, "seq1");
        assert_eq!(rec.data, "ACGT");
        assert_eq!(rec.len(), 4);
        assert!(!rec.is_reference);
    }

    #[test]
    fn test_record_slice_clamps() {
        let rec = SequenceRecord::new("seq1", "ACGTAC");
        assert_eq!(rec.slice(1..3), "CG");
        assert_eq!(rec.slice(4..10), "AC");
        assert_eq!(rec.slice(8..10), "");
    }

    #[test]
    fn test_padding_leaves_original() {
        let rec = SequenceRecord::new("seq1", "AC");
        let padded = rec.padded(5);
        assert_eq!(padded.data, "AC---");
        assert_eq!(rec.data, "AC");
    }

    #[test]
    fn test_alignment_equal_lengths() {
        let recs = vec![
            SequenceRecord::new("seq1", "ACGT"),
            SequenceRecord::new("seq2", "TGCA"),
        ];
        let alignment = Alignment::new(&recs);
        assert_eq!(alignment.sequence_count(), 2);
        assert!(alignment.records.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn test_alignment_ragged_is_padded() {
        let recs = vec![
            SequenceRecord::new("seq1", "ACGT"),
            SequenceRecord::new("longer_name", "TG"),
        ];
        let alignment = Alignment::new(&recs);
        assert_eq!(alignment.records[0].data, "ACGT");
        assert_eq!(alignment.records[1].data, "TG--");
        assert_eq!(recs[1].data, "TG");
    }
}
