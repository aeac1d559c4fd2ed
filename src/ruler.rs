//! Vertical column numbering.
//!
//! Column numbers are written top-down, one line per decimal digit, so that
//! every alignment column gets a number without widening the display:
//!
//! ```text
//! 0000000001
//! 0000000000
//! 1234567890
//! ```

use crate::mask::ColumnMask;
use crate::model::GAP_CHAR;

/// How column numbers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulerOptions {
    /// Skip numbering (and print dashes) where the reference holds a gap
    pub gap_aware: bool,
    /// Pad numbers with zeros instead of spaces
    pub leading_zeros: bool,
}

impl Default for RulerOptions {
    fn default() -> Self {
        Self {
            gap_aware: false,
            leading_zeros: true,
        }
    }
}

/// One string per digit position, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingRuler {
    rows: Vec<String>,
}

impl NumberingRuler {
    /// Numbers the columns of `reference`.
    pub fn new(reference: &str, options: RulerOptions) -> Self {
        let length = reference.chars().count();
        let digits = decimal_digits(length + 1);

        let mut next = 1;
        let numbers: Vec<String> = reference
            .chars()
            .map(|c| {
                if options.gap_aware && c == GAP_CHAR {
                    GAP_CHAR.to_string().repeat(digits)
                } else {
                    let label = if options.leading_zeros {
                        format!("{:0width$}", next, width = digits)
                    } else {
                        format!("{:>width$}", next, width = digits)
                    };
                    next += 1;
                    label
                }
            })
            .collect();

        debug_assert!(options.gap_aware || next == length + 1);

        let rows = (0..digits)
            .map(|d| numbers.iter().map(|n| n.as_bytes()[d] as char).collect())
            .collect();

        Self { rows }
    }

    /// Returns the ruler restricted to the kept columns of `mask`.
    pub fn masked(&self, mask: &ColumnMask) -> Self {
        Self {
            rows: self.rows.iter().map(|r| mask.apply(r)).collect(),
        }
    }

    /// Returns the digit strings, most significant first.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Number of decimal digits needed to print `n`.
pub fn decimal_digits(n: usize) -> usize {
    n.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads the label of column `i` top-down.
    fn label_at(ruler: &NumberingRuler, i: usize) -> Option<String> {
        ruler.rows().iter().map(|r| r.chars().nth(i)).collect()
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(1000), 4);
    }

    #[test]
    fn test_small_ruler() {
        let ruler = NumberingRuler::new("ACGTACGTAC", RulerOptions::default());
        // 11 needs two digits
        assert_eq!(ruler.rows(), &["0000000001".to_string(), "1234567890".to_string()]);
    }

    #[test]
    fn test_digit_count_grows_with_length_plus_one() {
        let ruler = NumberingRuler::new(&"A".repeat(9), RulerOptions::default());
        assert_eq!(ruler.rows().len(), 2);
        let ruler = NumberingRuler::new(&"A".repeat(8), RulerOptions::default());
        assert_eq!(ruler.rows().len(), 1);
    }

    #[test]
    fn test_labels_round_trip() {
        let n = 150;
        let ruler = NumberingRuler::new(&"A".repeat(n), RulerOptions::default());
        assert_eq!(ruler.rows().len(), 3);
        for i in 0..n {
            let label = label_at(&ruler, i).unwrap();
            assert_eq!(label.parse::<usize>().unwrap(), i + 1);
        }
        assert_eq!(label_at(&ruler, n), None);
    }

    #[test]
    fn test_gaps_numbered_when_not_gap_aware() {
        let ruler = NumberingRuler::new("A--C", RulerOptions::default());
        assert_eq!(ruler.rows(), &["1234".to_string()]);
    }

    #[test]
    fn test_gap_aware_ruler() {
        let options = RulerOptions {
            gap_aware: true,
            leading_zeros: true,
        };
        let ruler = NumberingRuler::new("AC--GTACGTAC", options);
        assert_eq!(label_at(&ruler, 1).unwrap(), "02");
        assert_eq!(label_at(&ruler, 2).unwrap(), "--");
        assert_eq!(label_at(&ruler, 4).unwrap(), "03");
        assert_eq!(label_at(&ruler, 11).unwrap(), "10");
    }

    #[test]
    fn test_space_padding() {
        let options = RulerOptions {
            gap_aware: false,
            leading_zeros: false,
        };
        let ruler = NumberingRuler::new(&"A".repeat(12), options);
        assert_eq!(ruler.rows()[0], "         111");
        assert_eq!(ruler.rows()[1], "123456789012");
    }

    #[test]
    fn test_masked_ruler() {
        let ruler = NumberingRuler::new("ACGTAC", RulerOptions::default());
        let masked = ruler.masked(&ColumnMask::from_range(6, 2, 3));
        assert_eq!(masked.rows(), &["23".to_string()]);
    }
}
