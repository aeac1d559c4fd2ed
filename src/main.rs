//! alnpage - Alignment Page Formatter
//!
//! Prints an aligned FASTA file as blocks of numbered, diffed text.
//!
//! ## Usage
//!
//! ```bash
//! alnpage alignment.fasta
//! alnpage -x -c human alignment.fasta      # variable columns, diffed against "human"
//! alnpage --tree species.nwk -o pages.txt alignment.fasta
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use alnpage::compare::{ReferenceSource, SimilarityMarker};
use alnpage::formats::fasta::{FastaOptions, NameSplit};
use alnpage::formats::load_records;
use alnpage::layout::{pagify, write_pages, LayoutConfig};
use alnpage::reformat::{reformat, ReformatConfig};
use alnpage::ruler::RulerOptions;
use alnpage::selector::SequenceSelector;

/// Parses a column range written as "START,STOP" or "START-STOP".
fn parse_range(value: &str) -> Result<(usize, usize), String> {
    let (start, stop) = value
        .split_once(|c: char| c == ',' || c == '-')
        .ok_or_else(|| format!("expected START,STOP (got '{}')", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a column position", s))
    };
    Ok((parse(start)?, parse(stop)?))
}

/// alnpage - Reformat a multiple sequence alignment into text pages
///
/// Records are compared against the consensus (or a chosen reference),
/// identical residues are replaced by a marker and all-gap columns are hidden.
/// Selectors (-c, -t) are either a 1-based index (0 or negative count from
/// the end) or a substring of exactly one sequence name; prefix with "name:"
/// to force a name match.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Aligned FASTA file
    file: PathBuf,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Newick tree whose ladderized leaf order sets the record order
    #[arg(long = "tree")]
    tree: Option<PathBuf>,

    /// Cut sequence names at the first occurrence of this string
    /// (default: first whitespace)
    #[arg(long = "name-split", conflicts_with = "full_names")]
    name_split: Option<String>,

    /// Use the whole header line as sequence name
    #[arg(long = "full-names")]
    full_names: bool,

    /// Remove gaps while reading (for unaligned input)
    #[arg(long = "degap")]
    degap: bool,

    /// Do not show the consensus sequence
    #[arg(long = "no-consensus")]
    no_consensus: bool,

    /// Show residues as they are instead of comparing them to the reference
    #[arg(long = "no-compare")]
    no_compare: bool,

    /// Reference sequence for the comparison (default: consensus)
    #[arg(short = 'c', long = "compare-to", allow_hyphen_values = true)]
    compare_to: Option<String>,

    /// Keep columns in which every sequence has a gap
    #[arg(long = "keep-gapcols")]
    keep_gapcols: bool,

    /// Hide columns with fewer than --min-subs substitutions
    #[arg(short = 'x', long = "exclude-invariant")]
    exclude_invariant: bool,

    /// Substitutions needed for a column to count as variable
    #[arg(long = "min-subs", default_value = "1")]
    min_subs: usize,

    /// Marker for residues identical to the reference; empty string
    /// upper-cases matches and lower-cases differences instead
    #[arg(long = "simchar", default_value = ".")]
    simchar: String,

    /// Let gaps count in consensus calls and substitution counts
    #[arg(short = 'g', long = "count-gaps")]
    count_gaps: bool,

    /// Only show columns START to STOP (1-based, inclusive)
    #[arg(short = 'r', long = "range", value_parser = parse_range)]
    range: Option<(usize, usize)>,

    /// Trim columns to the extent of this sequence (ignored with --range)
    #[arg(short = 't', long = "trim-to", allow_hyphen_values = true)]
    trim_to: Option<String>,

    /// Put the consensus at the top instead of the bottom
    #[arg(long = "reference-top")]
    reference_top: bool,

    /// Print dashes instead of numbers where the consensus has a gap
    #[arg(long = "gap-aware-numbers")]
    gap_aware_numbers: bool,

    /// Pad column numbers with spaces instead of zeros
    #[arg(long = "no-leading-zeros")]
    no_leading_zeros: bool,

    /// Minimum width of the name column
    #[arg(long = "name-min", default_value = "10")]
    name_min: usize,

    /// Maximum width of the name column
    #[arg(long = "name-max", default_value = "35")]
    name_max: usize,

    /// Sequences per block
    #[arg(long = "rows", default_value = "65")]
    rows: usize,

    /// Alignment columns per block
    #[arg(long = "cols", default_value = "70")]
    cols: usize,

    /// Only label the first and last column of each block
    #[arg(long = "compact-ruler")]
    compact_ruler: bool,

    /// Number the sequences
    #[arg(short = 'n', long = "seqnums")]
    seqnums: bool,
}

impl Args {
    fn fasta_options(&self) -> FastaOptions {
        let name_split = match (&self.name_split, self.full_names) {
            (_, true) => NameSplit::Keep,
            (Some(delimiter), false) => NameSplit::Delimiter(delimiter.clone()),
            (None, false) => NameSplit::Whitespace,
        };
        FastaOptions {
            degap: self.degap,
            name_split,
        }
    }

    fn reformat_config(&self) -> Result<ReformatConfig> {
        let selector = |s: &String| s.parse::<SequenceSelector>().unwrap_or_else(|e| match e {});
        Ok(ReformatConfig {
            add_consensus: !self.no_consensus,
            compare: !self.no_compare,
            compare_to: match &self.compare_to {
                Some(s) => ReferenceSource::Named(selector(s)),
                None => ReferenceSource::Consensus,
            },
            exclude_gapcols: !self.keep_gapcols,
            exclude_invariant: self.exclude_invariant,
            min_subs: self.min_subs,
            simchar: SimilarityMarker::parse(Some(self.simchar.as_str()))?,
            count_gaps: self.count_gaps,
            seqrange: self.range,
            trim_to: self.trim_to.as_ref().map(selector),
            reference_top: self.reference_top,
            ruler: RulerOptions {
                gap_aware: self.gap_aware_numbers,
                leading_zeros: !self.no_leading_zeros,
            },
        })
    }

    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            name_min: self.name_min,
            name_max: self.name_max,
            nrow: self.rows,
            ncol: self.cols,
            all_numstrs: !self.compact_ruler,
            seqnums: self.seqnums,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    TermLogger::init(
        args.log_level,
        Default::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    // Validate everything that does not need the alignment first
    let reformat_config = args.reformat_config()?;
    reformat_config.validate()?;
    let layout_config = args.layout_config();
    layout_config.validate()?;

    let records = load_records(&args.file, &args.fasta_options(), args.tree.as_deref())
        .with_context(|| format!("Cannot load {}", args.file.display()))?;

    let reformatted = reformat(&records, &reformat_config)?;
    let pages = pagify(&reformatted.records, &reformatted.ruler, &layout_config)?;
    info!(
        "{} sequences, {} of {} columns shown on {} pages",
        reformatted.records.len(),
        reformatted.mask.kept_count(),
        reformatted.mask.len(),
        pages.len()
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_pages(&mut writer, &pages)?;
            writer.flush()?;
            info!("Wrote {} pages to {}", pages.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_pages(&mut handle, &pages)?;
        }
    }

    Ok(())
}
