//! The alignment reformatting pipeline.
//!
//! Records flow through the stages in order:
//!
//! 1. tabulation and consensus (`stats`)
//! 2. comparison against a reference (`compare`)
//! 3. column masking (`mask`)
//! 4. numbering (`ruler`)
//!
//! The result is ready for `layout::pagify`. Each call works on copies of
//! its input and either returns a complete result or an error.

use log::debug;
use thiserror::Error;

use crate::compare::{diff, mark_reference, ReferenceSource, SimilarityMarker};
use crate::mask::{extent, ColumnMask};
use crate::model::{Alignment, SequenceRecord};
use crate::ruler::{NumberingRuler, RulerOptions};
use crate::selector::SequenceSelector;
use crate::stats::{consensus_string, tabulate, ConsensusParams};

/// Name of the consensus record.
pub const CONSENSUS_NAME: &str = "CONSENSUS";

/// Errors that can occur while reformatting an alignment.
#[derive(Error, Debug)]
pub enum ReformatError {
    #[error("Cannot reformat an empty alignment")]
    EmptyAlignment,

    #[error("\"{selector}\" must be either a string matching the name of a *single* sequence, or the index of a sequence")]
    AmbiguousReference { selector: String },

    #[error("Similarity marker must be a single character (got \"{0}\")")]
    InvalidSimilarityMarker(String),

    #[error("Invalid column range {start}-{stop}: positions are 1-based and start must not exceed stop")]
    InvalidRange { start: usize, stop: usize },
}

/// Result type for reformatting operations.
pub type ReformatResult<T> = Result<T, ReformatError>;

/// Options of the reformatting pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReformatConfig {
    /// Include the consensus as a displayed record
    pub add_consensus: bool,
    /// Compare every record against the reference
    pub compare: bool,
    /// The comparison baseline
    pub compare_to: ReferenceSource,
    /// Drop columns in which every record has a gap
    pub exclude_gapcols: bool,
    /// Drop columns with fewer than `min_subs` substitutions
    pub exclude_invariant: bool,
    /// Substitution threshold for `exclude_invariant`
    pub min_subs: usize,
    /// How identity with the reference is shown
    pub simchar: SimilarityMarker,
    /// Let gaps take part in consensus calls and substitution counts
    pub count_gaps: bool,
    /// Inclusive 1-based column range to display
    pub seqrange: Option<(usize, usize)>,
    /// Trim columns to the extent of this record (ignored with `seqrange`)
    pub trim_to: Option<SequenceSelector>,
    /// Put the consensus first instead of last
    pub reference_top: bool,
    /// Column numbering options
    pub ruler: RulerOptions,
}

impl Default for ReformatConfig {
    fn default() -> Self {
        Self {
            add_consensus: true,
            compare: true,
            compare_to: ReferenceSource::Consensus,
            exclude_gapcols: true,
            exclude_invariant: false,
            min_subs: 1,
            simchar: SimilarityMarker::default(),
            count_gaps: false,
            seqrange: None,
            trim_to: None,
            reference_top: false,
            ruler: RulerOptions::default(),
        }
    }
}

impl ReformatConfig {
    /// Checks the options that can be checked without an alignment.
    pub fn validate(&self) -> ReformatResult<()> {
        if let Some((start, stop)) = self.seqrange {
            if start == 0 || start > stop {
                return Err(ReformatError::InvalidRange { start, stop });
            }
        }
        Ok(())
    }
}

/// A reformatted alignment, ready for layout.
#[derive(Debug, Clone)]
pub struct Reformatted {
    /// Displayed records, masked and compared
    pub records: Vec<SequenceRecord>,
    /// Column numbers, masked like the records
    pub ruler: NumberingRuler,
    /// The composed mask over the original columns
    pub mask: ColumnMask,
    /// The unmasked consensus string
    pub consensus: String,
}

/// Reformats `records` for display.
///
/// The caller's records are not modified.
pub fn reformat(records: &[SequenceRecord], config: &ReformatConfig) -> ReformatResult<Reformatted> {
    config.validate()?;

    let tables = tabulate(records)?;
    let alignment = Alignment::new(records);
    let ncol = tables.len();

    let params = ConsensusParams {
        count_gaps: config.count_gaps,
        ..Default::default()
    };
    let consensus = consensus_string(&tables, &params);
    debug!(
        "Tabulated {} columns over {} sequences",
        ncol,
        alignment.sequence_count()
    );

    let mut seqlist = alignment.records;
    let consensus_index = if config.add_consensus {
        let record = SequenceRecord::new(CONSENSUS_NAME, consensus.clone());
        if config.reference_top {
            seqlist.insert(0, record);
            Some(0)
        } else {
            seqlist.push(record);
            Some(seqlist.len() - 1)
        }
    } else {
        None
    };

    // Selectors address the records as listed before comparison.
    let trim_span = match (&config.seqrange, &config.trim_to) {
        (None, Some(selector)) => Some(extent(&selector.resolve(&seqlist)?.data)),
        _ => None,
    };

    let displayed: Vec<SequenceRecord> = if config.compare {
        let (reference_index, reference) = match &config.compare_to {
            ReferenceSource::Consensus => (consensus_index, consensus.clone()),
            ReferenceSource::Named(selector) => {
                let ix = selector.resolve_index(&seqlist)?;
                (Some(ix), seqlist[ix].data.clone())
            }
        };
        debug!("Comparing against {:?}", reference_index.map(|ix| &seqlist[ix].name));

        seqlist
            .iter()
            .enumerate()
            .map(|(ix, record)| {
                if Some(ix) == reference_index {
                    mark_reference(record)
                } else {
                    diff(record, &reference, config.simchar)
                }
            })
            .collect()
    } else {
        seqlist
    };

    let mut mask = match (config.seqrange, trim_span) {
        (Some((start, stop)), _) => ColumnMask::from_range(ncol, start, stop),
        (None, Some(span)) => ColumnMask::from_extent(ncol, span),
        (None, None) => ColumnMask::all(ncol),
    };
    if config.exclude_gapcols {
        mask = mask.and(&ColumnMask::non_gap_columns(&tables));
    }
    if config.exclude_invariant {
        mask = mask.and(&ColumnMask::variable_columns(
            &tables,
            config.min_subs,
            config.count_gaps,
        ));
    }
    debug!("Keeping {} of {} columns", mask.kept_count(), ncol);

    let ruler = NumberingRuler::new(&consensus, config.ruler).masked(&mask);
    let records = displayed
        .iter()
        .map(|record| record.with_data(mask.apply(&record.data)))
        .collect();

    Ok(Reformatted {
        records,
        ruler,
        mask,
        consensus,
    })
}
