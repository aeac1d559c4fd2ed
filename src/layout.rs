//! Page layout.
//!
//! Tiles reformatted records into blocks of at most `nrow` records by
//! `ncol` columns. Blocks are emitted column block by column block; within
//! a column block, row blocks follow each other top to bottom.
//!
//! ## Block layout
//!
//! ```text
//! sequences 1 to 65 of 130          <- only when records exceed nrow
//!          # 0000000001             <- one line per ruler digit
//!          # 1234567890
//!      alpha ..C.......
//!  CONSENSUS ACGTACGTAC
//! ```

use std::io::{self, Write};

use thiserror::Error;

use crate::model::SequenceRecord;
use crate::ruler::{decimal_digits, NumberingRuler};

/// Name shown in front of ruler lines.
const RULER_LABEL: &str = "#";

/// Errors that can occur during layout.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Block size must be positive (rows: {nrow}, columns: {ncol})")]
    ZeroBlockSize { nrow: usize, ncol: usize },
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Options of the page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Minimum width of the name column
    pub name_min: usize,
    /// Maximum width of the name column; longer names are truncated
    pub name_max: usize,
    /// Records per block
    pub nrow: usize,
    /// Alignment columns per block
    pub ncol: usize,
    /// Print every ruler digit line instead of start/stop positions
    pub all_numstrs: bool,
    /// Prefix each record with its 1-based position
    pub seqnums: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name_min: 10,
            name_max: 35,
            nrow: 65,
            ncol: 70,
            all_numstrs: true,
            seqnums: false,
        }
    }
}

impl LayoutConfig {
    /// Rejects block sizes that would never advance.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.nrow == 0 || self.ncol == 0 {
            return Err(LayoutError::ZeroBlockSize {
                nrow: self.nrow,
                ncol: self.ncol,
            });
        }
        Ok(())
    }
}

/// One tile of the display: a row range by column range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageBlock {
    pub lines: Vec<String>,
}

/// Formats records and labels with fixed column widths.
struct LineFormatter {
    name_width: usize,
    num_width: Option<usize>,
    ncol: usize,
}

impl LineFormatter {
    fn line(&self, count: Option<usize>, name: &str, seqstr: &str) -> String {
        let name: String = name.chars().take(self.name_width).collect();
        let body = format!(
            "{:>nw$} {:<ncol$}",
            name,
            seqstr,
            nw = self.name_width,
            ncol = self.ncol
        );
        match self.num_width {
            Some(width) => {
                let count = count.map(|c| c.to_string()).unwrap_or_default();
                format!("{:>width$} {}", count, body, width = width)
            }
            None => body,
        }
    }

    /// Start and stop positions of a column block, under the names.
    ///
    /// Narrow blocks get a space between the two numbers.
    fn positions(&self, start: usize, stop: usize) -> String {
        let indent = self.name_width + self.num_width.map_or(0, |w| w + 1);
        let half = (stop - start) / 2;
        if half < decimal_digits(stop) {
            return format!("{:indent$} {} {}", "", start + 1, stop, indent = indent);
        }
        format!(
            "{:indent$} {:<half$}{:>half$}",
            "",
            start + 1,
            stop,
            indent = indent,
            half = half
        )
    }
}

/// Lays out `records` and their column numbers into page blocks.
///
/// Returns no blocks for an empty record list.
pub fn pagify(
    records: &[SequenceRecord],
    ruler: &NumberingRuler,
    config: &LayoutConfig,
) -> LayoutResult<Vec<PageBlock>> {
    config.validate()?;

    let seqcount = records.len();
    if seqcount == 0 {
        return Ok(Vec::new());
    }

    let longest_name = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    let formatter = LineFormatter {
        name_width: config.name_min.max(longest_name.min(config.name_max)),
        num_width: config.seqnums.then(|| decimal_digits(seqcount)),
        ncol: config.ncol,
    };

    let colstop = records.iter().map(SequenceRecord::len).max().unwrap_or(0);

    let mut out = Vec::new();
    for start in (0..colstop).step_by(config.ncol) {
        let stop = (start + config.ncol).min(colstop);

        for first in (0..seqcount).step_by(config.nrow) {
            let last = (first + config.nrow).min(seqcount);
            let mut block = PageBlock::default();

            if seqcount > config.nrow {
                block
                    .lines
                    .push(format!("sequences {} to {} of {}", first + 1, last, seqcount));
            }

            if config.all_numstrs {
                for digits in ruler.rows() {
                    let slice: String = digits.chars().skip(start).take(stop - start).collect();
                    block.lines.push(formatter.line(None, RULER_LABEL, &slice));
                }
            } else {
                block.lines.push(formatter.positions(start, stop));
            }

            for (offset, record) in records[first..last].iter().enumerate() {
                let count = first + offset + 1;
                block
                    .lines
                    .push(formatter.line(Some(count), &record.name, &record.slice(start..stop)));
            }

            out.push(block);
        }
    }

    Ok(out)
}

/// Writes pages as plain text, separated by blank lines.
pub fn write_pages<W: Write>(writer: &mut W, pages: &[PageBlock]) -> io::Result<()> {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        for line in &page.lines {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruler::RulerOptions;

    fn alignment(nseq: usize, ncol: usize) -> (Vec<SequenceRecord>, NumberingRuler) {
        let data = "ACGT".repeat(ncol / 4 + 1)[..ncol].to_string();
        let records = (1..=nseq)
            .map(|i| SequenceRecord::new(format!("seq{}", i), data.clone()))
            .collect();
        (records, NumberingRuler::new(&data, RulerOptions::default()))
    }

    #[test]
    fn test_row_blocks() {
        let (records, ruler) = alignment(130, 50);
        let pages = pagify(&records, &ruler, &LayoutConfig::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines[0], "sequences 1 to 65 of 130");
        assert_eq!(pages[1].lines[0], "sequences 66 to 130 of 130");
        // status + 2 ruler lines + 65 records
        assert_eq!(pages[0].lines.len(), 68);
        assert_eq!(pages[1].lines.len(), 68);
    }

    #[test]
    fn test_column_blocks() {
        let (records, ruler) = alignment(3, 150);
        let pages = pagify(&records, &ruler, &LayoutConfig::default()).unwrap();
        assert_eq!(pages.len(), 3);

        let widths: Vec<usize> = pages
            .iter()
            .map(|p| p.lines[0].trim_end().len() - "         # ".len())
            .collect();
        assert_eq!(widths, vec![70, 70, 10]);

        // no status line when every record fits in one block
        assert!(pages.iter().all(|p| !p.lines[0].starts_with("sequences")));
        assert_eq!(pages[2].lines[2][11..].trim_end(), "1234567890");
    }

    #[test]
    fn test_record_line_format() {
        let records = vec![
            SequenceRecord::new("a", "ACGT"),
            SequenceRecord::new("bb", "A.GT"),
        ];
        let ruler = NumberingRuler::new("ACGT", RulerOptions::default());
        let config = LayoutConfig {
            ncol: 6,
            ..Default::default()
        };
        let pages = pagify(&records, &ruler, &config).unwrap();
        assert_eq!(
            pages[0].lines,
            vec![
                "         # 1234  ".to_string(),
                "         a ACGT  ".to_string(),
                "        bb A.GT  ".to_string(),
            ]
        );
    }

    #[test]
    fn test_name_width_clamped_and_truncated() {
        let records = vec![SequenceRecord::new("a_rather_long_sequence_name", "AC")];
        let ruler = NumberingRuler::new("AC", RulerOptions::default());
        let config = LayoutConfig {
            name_min: 4,
            name_max: 8,
            ncol: 2,
            ..Default::default()
        };
        let pages = pagify(&records, &ruler, &config).unwrap();
        assert_eq!(pages[0].lines[1], "a_rather AC");
        assert_eq!(pages[0].lines[0], "       # 12");
    }

    #[test]
    fn test_seqnums() {
        let (records, ruler) = alignment(12, 4);
        let config = LayoutConfig {
            nrow: 10,
            ncol: 4,
            seqnums: true,
            ..Default::default()
        };
        let pages = pagify(&records, &ruler, &config).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines[1], "            # 1234");
        assert_eq!(pages[0].lines[2], " 1       seq1 ACGT");
        // counting continues across row blocks
        assert_eq!(pages[1].lines[2], "11      seq11 ACGT");
    }

    #[test]
    fn test_compact_positions() {
        let (records, ruler) = alignment(2, 25);
        let config = LayoutConfig {
            ncol: 20,
            all_numstrs: false,
            ..Default::default()
        };
        let pages = pagify(&records, &ruler, &config).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines[0], format!("{} 1{}20", " ".repeat(10), " ".repeat(17)));
        assert_eq!(pages[1].lines[0], format!("{} 2125", " ".repeat(10)));
        assert_eq!(pages[1].lines.len(), 3);
    }

    #[test]
    fn test_compact_positions_narrow_block() {
        let (records, ruler) = alignment(2, 141);
        let config = LayoutConfig {
            all_numstrs: false,
            ..Default::default()
        };
        let pages = pagify(&records, &ruler, &config).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].lines[0], format!("{} 71{}140", " ".repeat(10), " ".repeat(65)));
        assert_eq!(pages[2].lines[0], format!("{} 141 141", " ".repeat(10)));
    }

    #[test]
    fn test_empty_and_invalid() {
        let ruler = NumberingRuler::new("", RulerOptions::default());
        assert!(pagify(&[], &ruler, &LayoutConfig::default()).unwrap().is_empty());

        let config = LayoutConfig {
            nrow: 0,
            ..Default::default()
        };
        assert_eq!(
            pagify(&[], &ruler, &config),
            Err(LayoutError::ZeroBlockSize { nrow: 0, ncol: 70 })
        );
    }

    #[test]
    fn test_write_pages() {
        let pages = vec![
            PageBlock {
                lines: vec!["a".to_string(), "b".to_string()],
            },
            PageBlock {
                lines: vec!["c".to_string()],
            },
        ];
        let mut buffer = Vec::new();
        write_pages(&mut buffer, &pages).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "a\nb\n\nc\n");
    }
}
