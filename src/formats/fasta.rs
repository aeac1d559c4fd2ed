//! FASTA file reader.
//!
//! This module handles reading aligned FASTA files into sequence records.
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGT--ACGTACGT...
//! >another_sequence
//! TGCA--TGCATGCA...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::model::{SequenceRecord, GAP_CHAR};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// How a record name is taken from its header line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameSplit {
    /// Everything before the first whitespace
    #[default]
    Whitespace,
    /// Everything before the first occurrence of a delimiter
    Delimiter(String),
    /// The whole header line
    Keep,
}

/// Options of the FASTA reader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaOptions {
    /// Remove gap characters from sequence lines
    pub degap: bool,
    /// How names are cut from headers
    pub name_split: NameSplit,
}

/// Parses a FASTA file into records.
///
/// # Examples
///
/// ```no_run
/// use alnpage::formats::fasta::{parse_fasta_file, FastaOptions};
///
/// let records = parse_fasta_file("alignment.fasta", &FastaOptions::default()).unwrap();
/// println!("Loaded {} sequences", records.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(
    path: P,
    options: &FastaOptions,
) -> FastaResult<Vec<SequenceRecord>> {
    let file = File::open(&path)?;
    let records = parse_fasta(BufReader::new(file), options)?;
    info!(
        "Read {} sequences from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Extracts the record name from a header line (without '>').
fn header_name(header: &str, split: &NameSplit) -> String {
    let header = header.trim_start_matches(|c: char| c == '>' || c == ' ');
    match split {
        NameSplit::Whitespace => header.split_whitespace().next().unwrap_or(""),
        NameSplit::Delimiter(delimiter) => header.split(delimiter.as_str()).next().unwrap_or(""),
        NameSplit::Keep => header,
    }
    .to_string()
}

/// Parses FASTA content from a reader.
///
/// Records keep their order. A header followed by no sequence line yields an
/// empty record.
pub fn parse_fasta<R: BufRead>(reader: R, options: &FastaOptions) -> FastaResult<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current: Option<(String, String)> = None;

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some((name, data)) = current.take() {
                records.push(SequenceRecord::new(name, data));
            }

            let name = header_name(header, &options.name_split);
            if name.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            current = Some((name, String::new()));
        } else {
            let (_, data) = current
                .as_mut()
                .ok_or(FastaError::SequenceWithoutHeader(line_number))?;
            data.extend(
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .filter(|&c| !(options.degap && c == GAP_CHAR)),
            );
        }
    }

    // Don't forget the last sequence
    if let Some((name, data)) = current {
        records.push(SequenceRecord::new(name, data));
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(records)
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str, options: &FastaOptions) -> FastaResult<Vec<SequenceRecord>> {
    parse_fasta(content.as_bytes(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(content: &str) -> FastaResult<Vec<SequenceRecord>> {
        parse_fasta_str(content, &FastaOptions::default())
    }

    #[test]
    fn test_parse_simple_fasta() {
        let records = parse(">seq1\nAC-T\n>seq2\nTGCA\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "seq1");
        assert_eq!(records[0].data, "AC-T");
        assert_eq!(records[1].name, "seq2");
        assert_eq!(records[1].data, "TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let records = parse(">seq1\nACGT\nTG-A\nAAAA\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, "ACGTTG-AAAAA");
    }

    #[test]
    fn test_name_split_modes() {
        let content = "> seq1|gb|X123 some description\nACGT\n";

        let records = parse(content).unwrap();
        assert_eq!(records[0].name, "seq1|gb|X123");

        let options = FastaOptions {
            name_split: NameSplit::Delimiter("|".to_string()),
            ..Default::default()
        };
        let records = parse_fasta_str(content, &options).unwrap();
        assert_eq!(records[0].name, "seq1");

        let options = FastaOptions {
            name_split: NameSplit::Keep,
            ..Default::default()
        };
        let records = parse_fasta_str(content, &options).unwrap();
        assert_eq!(records[0].name, "seq1|gb|X123 some description");
    }

    #[test]
    fn test_degap() {
        let options = FastaOptions {
            degap: true,
            ..Default::default()
        };
        let records = parse_fasta_str(">seq1\n--AC-GT--\n>gaps\n----\n", &options).unwrap();
        assert_eq!(records[0].data, "ACGT");
        assert_eq!(records[1].data, "");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_with_empty_lines() {
        let records = parse(">seq1\nACGT\n\n>seq2\n\nTGCA\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].data, "TGCA");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse(""), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        assert!(matches!(
            parse("ACGT\n>seq1\nTGCA\n"),
            Err(FastaError::SequenceWithoutHeader(1))
        ));
    }

    #[test]
    fn test_empty_identifier() {
        assert!(matches!(parse(">\nACGT\n"), Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_case_preservation() {
        let records = parse(">seq1\nacgt\n").unwrap();
        assert_eq!(records[0].data, "acgt");
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">a\nAC--\n>b\nACGT").unwrap();
        let records = parse_fasta_file(file.path(), &FastaOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, "AC--");
    }
}
