//! Input readers.
//!
//! - FASTA alignments (`fasta`)
//! - Newick trees, used only to order records (`newick`)
//!
//! Readers produce plain `SequenceRecord`s; nothing here knows about
//! consensus, masking or layout.

pub mod fasta;
pub mod newick;

use std::path::Path;

use thiserror::Error;

use crate::model::SequenceRecord;
use fasta::{parse_fasta_file, FastaOptions};
use newick::{order_records, tree_order};

/// Errors that can occur while loading inputs.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),

    #[error("Newick error: {0}")]
    NewickError(#[from] newick::NewickError),
}

/// Result type for loading operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Reads an alignment, ordered after the leaves of `tree` when given.
pub fn load_records<P: AsRef<Path>>(
    alignment: P,
    options: &FastaOptions,
    tree: Option<&Path>,
) -> ParseResult<Vec<SequenceRecord>> {
    let records = parse_fasta_file(alignment, options)?;
    match tree {
        Some(tree) => Ok(order_records(&records, &tree_order(tree)?)),
        None => Ok(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_with_tree_order() {
        let mut fasta = tempfile::NamedTempFile::new().unwrap();
        writeln!(fasta, ">a\nACGT\n>b\nACGA\n>c\nACGC").unwrap();
        let mut tree = tempfile::NamedTempFile::new().unwrap();
        writeln!(tree, "((a,b),c);").unwrap();

        let records = load_records(fasta.path(), &FastaOptions::default(), Some(tree.path())).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);

        let records = load_records(fasta.path(), &FastaOptions::default(), None).unwrap();
        assert_eq!(records[0].name, "a");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_records("does/not/exist.fa", &FastaOptions::default(), None);
        assert!(matches!(result, Err(ParseError::FastaError(_))));
    }
}
