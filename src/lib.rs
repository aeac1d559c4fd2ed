//! # alnpage - Alignment Page Formatter
//!
//! Turns a multiple sequence alignment into paginated plain text: a
//! consensus line, differences against a reference, uninteresting columns
//! masked out, and vertical column numbers above every block.
//!
//! ## Architecture
//!
//! The pipeline is a chain of pure stages:
//! - `model`: Sequence records and padded alignments
//! - `stats`: Column tabulation, consensus calls, substitution counts
//! - `selector`: Picking one record by index or name
//! - `compare`: Per-character diffs against a reference
//! - `mask`: Column masks (range, trim, gap and invariant columns)
//! - `ruler`: Vertical column numbering
//! - `reformat`: The pipeline tying the stages together
//! - `layout`: Tiling the result into page blocks
//! - `formats`: FASTA and Newick readers
//!
//! ## Example
//!
//! ```
//! use alnpage::layout::{pagify, LayoutConfig};
//! use alnpage::model::SequenceRecord;
//! use alnpage::reformat::{reformat, ReformatConfig};
//!
//! let records = vec![
//!     SequenceRecord::new("human", "ACGT-A"),
//!     SequenceRecord::new("mouse", "ACTT-A"),
//!     SequenceRecord::new("rat", "ACTT-A"),
//! ];
//! let out = reformat(&records, &ReformatConfig::default()).unwrap();
//! let pages = pagify(&out.records, &out.ruler, &LayoutConfig::default()).unwrap();
//! assert_eq!(pages.len(), 1);
//! ```

pub mod compare;
pub mod formats;
pub mod layout;
pub mod mask;
pub mod model;
pub mod reformat;
pub mod ruler;
pub mod selector;
pub mod stats;
