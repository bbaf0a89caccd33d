//! Reader for the `tree`-mode slot layout.
//!
//! Parses the stream written by [`convert_ensemble`](crate::convert_ensemble) in
//! [`Mode::Tree`](crate::Mode::Tree) back into records, the way array-backed
//! evaluators load it: a tree count, then per tree a depth line, a `root` record,
//! `node`/`leaf` records and a closing `end`.

use crate::trees::Branch;

// =============================================================================
// Error types
// =============================================================================

/// Error type for slot layout parsing.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unexpected end of input while parsing {context}")]
    UnexpectedEnd { context: &'static str },
    #[error("line {line}: {message}")]
    InvalidLine { line: usize, message: String },
    #[error("trailing content after {trees} trees at line {line}")]
    TrailingContent { trees: usize, line: usize },
}

// =============================================================================
// Records
// =============================================================================

/// One `node` or `leaf` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRecord {
    Node {
        id: usize,
        parent: usize,
        feature: String,
        branch: Branch,
        threshold: String,
    },
    Leaf {
        id: usize,
        parent: usize,
        branch: Branch,
        value: String,
    },
}

impl SlotRecord {
    pub fn id(&self) -> usize {
        match self {
            SlotRecord::Node { id, .. } | SlotRecord::Leaf { id, .. } => *id,
        }
    }

    pub fn parent(&self) -> usize {
        match self {
            SlotRecord::Node { parent, .. } | SlotRecord::Leaf { parent, .. } => *parent,
        }
    }

    pub fn branch(&self) -> Branch {
        match self {
            SlotRecord::Node { branch, .. } | SlotRecord::Leaf { branch, .. } => *branch,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SlotRecord::Leaf { .. })
    }
}

/// Slot layout of one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLayout {
    pub depth: u32,
    pub root_feature: String,
    pub root_threshold: String,
    pub slots: Vec<SlotRecord>,
}

impl TreeLayout {
    /// Capacity of the complete tree this layout targets.
    pub fn capacity(&self) -> usize {
        1usize
            .checked_shl(self.depth)
            .map_or(usize::MAX, |slots| slots - 1)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a full `tree`-mode stream. Empty input is an empty ensemble.
pub fn read_layouts(text: &str) -> Result<Vec<TreeLayout>, LayoutError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((line, count)) = lines.next() else {
        return Ok(Vec::new());
    };
    let count: usize = parse_field(count, line, "tree count")?;

    let mut trees = Vec::new();
    for _ in 0..count {
        trees.push(read_tree(&mut lines)?);
    }

    if let Some((line, _)) = lines.next() {
        return Err(LayoutError::TrailingContent {
            trees: count,
            line,
        });
    }
    Ok(trees)
}

fn read_tree<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<TreeLayout, LayoutError> {
    let (line, depth) = lines
        .next()
        .ok_or(LayoutError::UnexpectedEnd { context: "depth" })?;
    let depth = parse_field(depth, line, "depth")?;

    let (line, root) = lines
        .next()
        .ok_or(LayoutError::UnexpectedEnd { context: "root" })?;
    let (root_feature, root_threshold) = match root.split_whitespace().collect::<Vec<_>>()[..] {
        ["root", "0", feature, threshold] => (feature.to_string(), threshold.to_string()),
        _ => return Err(invalid(line, format!("expected root record, got {root:?}"))),
    };

    let mut slots = Vec::new();
    loop {
        let (line, record) = lines
            .next()
            .ok_or(LayoutError::UnexpectedEnd { context: "slot records" })?;
        let tokens: Vec<&str> = record.split_whitespace().collect();
        let slot = match tokens[..] {
            ["end"] => break,
            ["node", id, parent, feature, branch, threshold] => SlotRecord::Node {
                id: parse_field(id, line, "id")?,
                parent: parse_field(parent, line, "parent id")?,
                feature: feature.to_string(),
                branch: parse_branch(branch, line)?,
                threshold: threshold.to_string(),
            },
            ["leaf", id, parent, branch, value] => SlotRecord::Leaf {
                id: parse_field(id, line, "id")?,
                parent: parse_field(parent, line, "parent id")?,
                branch: parse_branch(branch, line)?,
                value: value.to_string(),
            },
            _ => return Err(invalid(line, format!("unrecognized record {record:?}"))),
        };
        slots.push(slot);
    }

    Ok(TreeLayout {
        depth,
        root_feature,
        root_threshold,
        slots,
    })
}

fn parse_field<T: std::str::FromStr>(
    token: &str,
    line: usize,
    what: &str,
) -> Result<T, LayoutError> {
    token
        .parse()
        .map_err(|_| invalid(line, format!("invalid {what}: {token:?}")))
}

fn parse_branch(token: &str, line: usize) -> Result<Branch, LayoutError> {
    token
        .parse::<u8>()
        .ok()
        .and_then(Branch::from_tag)
        .ok_or_else(|| invalid(line, format!("invalid branch tag: {token:?}")))
}

fn invalid(line: usize, message: String) -> LayoutError {
    LayoutError::InvalidLine { line, message }
}
