//! Loading `Tree` elements from an ensemble XML document.

use std::path::Path;

use crate::error::{ConvertError, Result};

// =============================================================================
// Field names
// =============================================================================

const TREE: &str = "Tree";
const SPLIT_FEATURES: &str = "SplitFeatures";
const LEAF_OUTPUTS: &str = "LeafOutputs";
const THRESHOLDS: &str = "OriginalThresholds";
const LEFT_CHILDREN: &str = "LeftChildren";
const RIGHT_CHILDREN: &str = "RightChildren";

// =============================================================================
// Parsed tree
// =============================================================================

/// Per-tree field arrays exactly as stored in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTree {
    /// Feature id per internal node.
    pub split_features: Vec<String>,
    /// Threshold per internal node.
    pub thresholds: Vec<String>,
    /// Output value per leaf.
    pub leaf_outputs: Vec<String>,
    /// Left child per internal node (negative = leaf).
    pub left_children: Vec<i32>,
    /// Right child per internal node (negative = leaf).
    pub right_children: Vec<i32>,
}

impl RawTree {
    /// Number of internal nodes described by the child arrays.
    pub fn num_internal(&self) -> usize {
        self.left_children.len()
    }
}

// =============================================================================
// Ensemble
// =============================================================================

/// All trees of an ensemble document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ensemble {
    pub trees: Vec<RawTree>,
}

impl Ensemble {
    /// Load an ensemble from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_xml(&content)
    }

    /// Parse an ensemble document.
    ///
    /// `Tree` elements are collected from anywhere below the document element. A
    /// document without trees is a valid, empty ensemble.
    pub fn from_xml(content: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(content)?;
        let root = doc.root_element();

        let trees = root
            .descendants()
            .filter(|node| *node != root && node.has_tag_name(TREE))
            .enumerate()
            .map(|(idx, node)| parse_tree(node, idx))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(trees = trees.len(), "parsed ensemble document");
        Ok(Ensemble { trees })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

// =============================================================================
// Parsing helpers
// =============================================================================

fn parse_tree(node: roxmltree::Node<'_, '_>, tree: usize) -> Result<RawTree> {
    let split_features = field_tokens(node, tree, SPLIT_FEATURES)?;
    let leaf_outputs = field_tokens(node, tree, LEAF_OUTPUTS)?;
    let thresholds = field_tokens(node, tree, THRESHOLDS)?;
    let left_children = field_tokens(node, tree, LEFT_CHILDREN)?;
    let right_children = field_tokens(node, tree, RIGHT_CHILDREN)?;

    Ok(RawTree {
        split_features,
        thresholds,
        leaf_outputs,
        left_children: parse_int_tokens(&left_children, tree, LEFT_CHILDREN)?,
        right_children: parse_int_tokens(&right_children, tree, RIGHT_CHILDREN)?,
    })
}

/// Tokens of the first `field` element below `node`.
///
/// An element with no text yields an empty list; a missing element is an error.
fn field_tokens(
    node: roxmltree::Node<'_, '_>,
    tree: usize,
    field: &'static str,
) -> Result<Vec<String>> {
    let element = node
        .descendants()
        .find(|n| *n != node && n.has_tag_name(field))
        .ok_or(ConvertError::MissingField { tree, field })?;

    Ok(element
        .text()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

fn parse_int_tokens(tokens: &[String], tree: usize, field: &'static str) -> Result<Vec<i32>> {
    tokens
        .iter()
        .map(|token| {
            token.parse().map_err(|_| ConvertError::MalformedToken {
                tree,
                field,
                token: token.clone(),
            })
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
