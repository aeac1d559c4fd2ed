//! Per-column statistics over an alignment.
//!
//! Column tables count how often each character occurs at a position.
//! They drive the consensus call, substitution counts for invariant
//! column masking, and gap-column detection.

use std::collections::BTreeMap;

use crate::model::{SequenceRecord, GAP_CHAR};
use crate::reformat::{ReformatError, ReformatResult};

/// Default minimum count difference between the two most frequent characters.
pub const DEFAULT_TIE_MARGIN: usize = 2;
/// Character emitted where no consensus can be called.
pub const CONSENSUS_ERROR_CHAR: char = 'X';

/// Character frequencies at a single alignment column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTable {
    counts: BTreeMap<char, usize>,
}

impl ColumnTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from explicit `(char, count)` pairs.
    pub fn from_counts(counts: impl IntoIterator<Item = (char, usize)>) -> Self {
        Self {
            counts: counts.into_iter().filter(|&(_, n)| n > 0).collect(),
        }
    }

    /// Records one more occurrence of `c`.
    pub fn add(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
    }

    /// Returns how often `c` occurs in this column.
    pub fn count(&self, c: char) -> usize {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Returns the number of characters tallied (the record count).
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns true if every tallied character is a gap.
    pub fn is_all_gap(&self, gap: char) -> bool {
        self.count(gap) == self.total()
    }

    /// Iterates over the counts, dropping `gap` unless `count_gaps` is set.
    fn considered(&self, count_gaps: bool, gap: char) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts
            .iter()
            .filter(move |&(&c, _)| count_gaps || c != gap)
            .map(|(&c, &n)| (c, n))
    }
}

/// Tabulates character frequencies for each column of `records`.
///
/// Shorter records are treated as if padded with gaps up to the longest one.
pub fn tabulate(records: &[SequenceRecord]) -> ReformatResult<Vec<ColumnTable>> {
    let max_len = records
        .iter()
        .map(SequenceRecord::len)
        .max()
        .ok_or(ReformatError::EmptyAlignment)?;

    let mut tables = vec![ColumnTable::new(); max_len];
    for record in records {
        let padding = std::iter::repeat(GAP_CHAR).take(max_len - record.len());
        for (table, c) in tables.iter_mut().zip(record.data.chars().chain(padding)) {
            table.add(c);
        }
    }

    Ok(tables)
}

/// Parameters of the consensus call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusParams {
    /// Whether gaps compete with residues for the consensus
    pub count_gaps: bool,
    /// Minimum lead of the top character over the runner-up
    pub tie_margin: usize,
    /// The gap character
    pub gap: char,
    /// Character emitted when no consensus can be called
    pub error_char: char,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            count_gaps: false,
            tie_margin: DEFAULT_TIE_MARGIN,
            gap: GAP_CHAR,
            error_char: CONSENSUS_ERROR_CHAR,
        }
    }
}

/// Calls the consensus character of one column.
///
/// Returns `params.error_char` when nothing is left after dropping gaps, or
/// when the two most frequent characters are within `tie_margin` of each
/// other. A single remaining character is returned unconditionally.
pub fn consensus(table: &ColumnTable, params: &ConsensusParams) -> char {
    let mut best: Option<(char, usize)> = None;
    let mut runner_up = 0;
    let mut distinct = 0;

    for (c, n) in table.considered(params.count_gaps, params.gap) {
        distinct += 1;
        match best {
            Some((_, top)) if n <= top => runner_up = runner_up.max(n),
            Some((_, top)) => {
                runner_up = top;
                best = Some((c, n));
            }
            None => best = Some((c, n)),
        }
    }

    match best {
        None => params.error_char,
        Some((c, _)) if distinct == 1 => c,
        Some((c, top)) if top - runner_up >= params.tie_margin => c,
        Some(_) => params.error_char,
    }
}

/// Builds the consensus string for a whole alignment, upper-cased.
pub fn consensus_string(tables: &[ColumnTable], params: &ConsensusParams) -> String {
    tables
        .iter()
        .map(|t| consensus(t, params).to_ascii_uppercase())
        .collect()
}

/// Counts substitutions in one column: characters differing from the most
/// frequent one.
///
/// Returns 0 when at most one distinct character remains after dropping gaps.
pub fn count_substitutions(table: &ColumnTable, count_gaps: bool, gap: char) -> usize {
    let (distinct, total, majority) = table
        .considered(count_gaps, gap)
        .fold((0, 0, 0), |(d, t, m), (_, n)| (d + 1, t + n, m.max(n)));

    if distinct <= 1 {
        0
    } else {
        total - majority
    }
}
