//! Column masks.
//!
//! A mask has one entry per original alignment column; `true` keeps the
//! column. Every criterion is computed over the unmasked columns and the
//! results are intersected, so criteria can be combined in any order.

use crate::model::GAP_CHAR;
use crate::stats::{count_substitutions, ColumnTable};

/// Boolean keep-vector over alignment columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMask {
    keep: Vec<bool>,
}

impl ColumnMask {
    /// Keeps every one of `len` columns.
    pub fn all(len: usize) -> Self {
        Self {
            keep: vec![true; len],
        }
    }

    /// Keeps the columns of an inclusive, 1-based `[start, stop]` range.
    pub fn from_range(len: usize, start: usize, stop: usize) -> Self {
        Self {
            keep: (1..=len).map(|pos| start <= pos && pos <= stop).collect(),
        }
    }

    /// Keeps the columns of a half-open, 0-based `[start, stop)` extent.
    pub fn from_extent(len: usize, extent: Option<(usize, usize)>) -> Self {
        Self {
            keep: (0..len)
                .map(|i| extent.is_some_and(|(start, stop)| start <= i && i < stop))
                .collect(),
        }
    }

    /// Keeps columns holding at least one non-gap character.
    pub fn non_gap_columns(tables: &[ColumnTable]) -> Self {
        Self {
            keep: tables.iter().map(|t| !t.is_all_gap(GAP_CHAR)).collect(),
        }
    }

    /// Keeps columns with at least `min_subs` substitutions.
    pub fn variable_columns(tables: &[ColumnTable], min_subs: usize, count_gaps: bool) -> Self {
        Self {
            keep: tables
                .iter()
                .map(|t| count_substitutions(t, count_gaps, GAP_CHAR) >= min_subs)
                .collect(),
        }
    }

    /// Intersects two masks.
    pub fn and(&self, other: &ColumnMask) -> Self {
        Self {
            keep: self
                .keep
                .iter()
                .zip(&other.keep)
                .map(|(&a, &b)| a && b)
                .collect(),
        }
    }

    /// Returns the number of kept columns.
    pub fn kept_count(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Returns the number of columns the mask covers.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Keeps the characters of `s` at retained columns.
    pub fn apply(&self, s: &str) -> String {
        s.chars()
            .zip(&self.keep)
            .filter(|(_, &k)| k)
            .map(|(c, _)| c)
            .collect()
    }
}

/// Returns the 0-based, half-open column range of `seq` without its leading
/// and trailing gap runs.
///
/// Internal gaps are part of the extent. Returns `None` for an all-gap
/// sequence.
pub fn extent(seq: &str) -> Option<(usize, usize)> {
    let mut non_gap = seq
        .chars()
        .enumerate()
        .filter(|&(_, c)| c != GAP_CHAR)
        .map(|(i, _)| i);
    let start = non_gap.next()?;
    let stop = non_gap.last().unwrap_or(start) + 1;
    Some((start, stop))
}
