//! Newick tree reader.
//!
//! Only the tree topology and leaf names are kept; the tree is used to pick
//! a display order for the records of an alignment.
//!
//! ## Newick Format
//!
//! ```text
//! ((human:0.1,chimp:0.12)primates:0.3,'mus musculus':0.8);
//! ```
//!
//! Branch lengths, internal node labels and `[...]` comments are accepted
//! and ignored.

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::model::SequenceRecord;

/// Errors that can occur during Newick parsing.
#[derive(Error, Debug)]
pub enum NewickError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty Newick file")]
    EmptyFile,

    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Unexpected end of input (missing '{0}')")]
    UnexpectedEnd(char),
}

/// Result type for Newick operations.
pub type NewickResult<T> = Result<T, NewickError>;

/// A node of a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeNode {
    /// Node label, if any
    pub name: Option<String>,
    /// Child clades, left to right
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Returns true for nodes without children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts the leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }

    /// Sorts every clade's children by increasing leaf count.
    ///
    /// The sort is stable, so clades of equal size keep their order.
    pub fn ladderize(&mut self) {
        for child in &mut self.children {
            child.ladderize();
        }
        self.children.sort_by_key(TreeNode::leaf_count);
    }

    /// Returns the names of the leaves, left to right.
    ///
    /// Unnamed leaves are skipped.
    pub fn leaf_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_leaf_names(&mut names);
        names
    }

    fn collect_leaf_names(&self, names: &mut Vec<String>) {
        if self.is_leaf() {
            names.extend(self.name.clone());
        }
        for child in &self.children {
            child.collect_leaf_names(names);
        }
    }
}

/// Recursive-descent parser over the characters of a Newick string.
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
        }
    }

    /// Skips whitespace and bracketed comments.
    fn skip_blank(&mut self) -> NewickResult<()> {
        while let Some(&c) = self.chars.get(self.pos) {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '[' {
                let close = self.chars[self.pos..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or(NewickError::UnexpectedEnd(']'))?;
                self.pos += close + 1;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn peek(&mut self) -> NewickResult<Option<char>> {
        self.skip_blank()?;
        Ok(self.chars.get(self.pos).copied())
    }

    fn expect(&mut self, expected: char) -> NewickResult<()> {
        match self.peek()? {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(NewickError::UnexpectedChar {
                found,
                position: self.pos,
            }),
            None => Err(NewickError::UnexpectedEnd(expected)),
        }
    }

    /// Reads one tree; anything after its closing ';' is left unread.
    fn tree(&mut self) -> NewickResult<TreeNode> {
        let root = self.subtree()?;
        self.expect(';')?;
        Ok(root)
    }

    fn subtree(&mut self) -> NewickResult<TreeNode> {
        let mut node = TreeNode::default();

        if self.peek()? == Some('(') {
            self.pos += 1;
            node.children.push(self.subtree()?);
            while self.peek()? == Some(',') {
                self.pos += 1;
                node.children.push(self.subtree()?);
            }
            self.expect(')')?;
        }

        node.name = self.label()?;

        if self.peek()? == Some(':') {
            self.pos += 1;
            self.skip_blank()?;
            // branch length, unused
            self.unquoted();
        }

        Ok(node)
    }

    fn label(&mut self) -> NewickResult<Option<String>> {
        let label = if self.peek()? == Some('\'') {
            self.quoted()?
        } else {
            self.unquoted()
        };
        Ok(Some(label).filter(|l| !l.is_empty()))
    }

    fn unquoted(&mut self) -> String {
        let start = self.pos;
        while let Some(&c) = self.chars.get(self.pos) {
            if c.is_whitespace() || "()[]',:;".contains(c) {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Reads a single-quoted label; `''` stands for one quote.
    fn quoted(&mut self) -> NewickResult<String> {
        self.pos += 1;
        let mut label = String::new();
        loop {
            match self.chars.get(self.pos) {
                Some('\'') if self.chars.get(self.pos + 1) == Some(&'\'') => {
                    label.push('\'');
                    self.pos += 2;
                }
                Some('\'') => {
                    self.pos += 1;
                    return Ok(label);
                }
                Some(&c) => {
                    label.push(c);
                    self.pos += 1;
                }
                None => return Err(NewickError::UnexpectedEnd('\'')),
            }
        }
    }
}

/// Parses the first tree of a Newick string.
pub fn parse_newick_str(content: &str) -> NewickResult<TreeNode> {
    if content.trim().is_empty() {
        return Err(NewickError::EmptyFile);
    }
    Parser::new(content).tree()
}

/// Reads a Newick file and returns its leaf names in ladderized order.
pub fn tree_order<P: AsRef<Path>>(path: P) -> NewickResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut tree = parse_newick_str(&content)?;
    tree.ladderize();
    let names = tree.leaf_names();
    debug!("Tree defines the order of {} leaves", names.len());
    Ok(names)
}

/// Reorders records to follow `names`.
///
/// Records named in `names` come first, in that order; the others follow in
/// their original order.
pub fn order_records(records: &[SequenceRecord], names: &[String]) -> Vec<SequenceRecord> {
    let rank = |record: &SequenceRecord| {
        names
            .iter()
            .position(|n| *n == record.name)
            .unwrap_or(names.len())
    };
    let mut ordered = records.to_vec();
    ordered.sort_by_key(rank);
    ordered
}
