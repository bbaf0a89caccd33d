//! Validated, decoded tree.
//!
//! [`DecodedTree`] is built once per [`RawTree`]. Child references are decoded into
//! [`ChildRef`]s and every index is checked, so the emitters can walk the structure
//! without re-testing signs or bounds.

use crate::compat::RawTree;
use crate::error::{ConvertError, Result};

use super::child::{Branch, ChildRef};

/// Split test of an internal node, kept as source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub feature: &'a str,
    pub threshold: &'a str,
}

/// Internal node with decoded children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalNode<'a> {
    pub split: Split<'a>,
    pub left: ChildRef,
    pub right: ChildRef,
}

impl InternalNode<'_> {
    #[inline]
    pub fn child(&self, branch: Branch) -> ChildRef {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }
}

/// Arena of internal nodes plus leaf outputs, borrowed from a [`RawTree`].
///
/// Node `0` is the root. The root split is always present, even when the tree has
/// no child entries at all.
#[derive(Debug, Clone)]
pub struct DecodedTree<'a> {
    root: Split<'a>,
    nodes: Vec<InternalNode<'a>>,
    leaves: Vec<&'a str>,
    depth: u32,
}

impl<'a> DecodedTree<'a> {
    /// Decode and validate the tree at position `tree` of its ensemble.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::ArraySizeMismatch`] if the child arrays differ in length, or
    ///   the split arrays do not cover every internal node (and at least the root).
    /// - [`ConvertError::InvalidChildIndex`] if a child points outside its array, back
    ///   at the root, or at a node that already has a parent.
    pub fn decode(raw: &'a RawTree, tree: usize) -> Result<Self> {
        let num_internal = raw.left_children.len();
        check_len(tree, "RightChildren", num_internal, raw.right_children.len())?;

        let num_splits = num_internal.max(1);
        check_min_len(tree, "SplitFeatures", num_splits, raw.split_features.len())?;
        check_min_len(tree, "OriginalThresholds", num_splits, raw.thresholds.len())?;

        let split = |idx: usize| Split {
            feature: raw.split_features[idx].as_str(),
            threshold: raw.thresholds[idx].as_str(),
        };

        // Each internal node may have at most one parent, and the root none.
        let mut has_parent = vec![false; num_internal];
        if let Some(root) = has_parent.first_mut() {
            *root = true;
        }

        let mut nodes = Vec::with_capacity(num_internal);
        for node in 0..num_internal {
            let mut decode_child = |value: i32| -> Result<ChildRef> {
                let child = ChildRef::decode(value);
                let valid = match child {
                    ChildRef::Internal(idx) => {
                        idx < num_internal && !std::mem::replace(&mut has_parent[idx], true)
                    }
                    ChildRef::Leaf(idx) => idx < raw.leaf_outputs.len(),
                };
                if !valid {
                    return Err(ConvertError::InvalidChildIndex {
                        tree,
                        node,
                        child: value,
                    });
                }
                Ok(child)
            };

            let left = decode_child(raw.left_children[node])?;
            let right = decode_child(raw.right_children[node])?;
            nodes.push(InternalNode {
                split: split(node),
                left,
                right,
            });
        }

        let mut decoded = DecodedTree {
            root: split(0),
            nodes,
            leaves: raw.leaf_outputs.iter().map(String::as_str).collect(),
            depth: 1,
        };
        if decoded.num_internal() > 0 {
            decoded.depth = decoded.depth_from(0);
        }

        tracing::debug!(
            tree,
            internal = decoded.num_internal(),
            leaves = decoded.num_leaves(),
            depth = decoded.depth,
            capacity = decoded.capacity(),
            "decoded tree"
        );
        Ok(decoded)
    }

    /// Depth of the subtree rooted at internal node `node`.
    ///
    /// `depth(n) = 1 + max(depth(left), depth(right))`, with a leaf side counting `0`.
    /// Walks an explicit stack, so chains of any length are fine. Termination relies
    /// on the single-parent check done in [`decode`](Self::decode).
    pub fn depth_from(&self, node: usize) -> u32 {
        let mut depth = 0;
        let mut stack: Vec<(usize, u32)> = vec![(node, 1)];
        while let Some((idx, level)) = stack.pop() {
            depth = depth.max(level);
            let n = &self.nodes[idx];
            for child in [n.left, n.right] {
                if let ChildRef::Internal(next) = child {
                    stack.push((next, level + 1));
                }
            }
        }
        depth
    }

    /// Tree depth; `1` for a tree without child entries.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Slot count of a complete binary tree of this depth: `2^depth - 1`.
    ///
    /// Saturates at `usize::MAX` for depths that do not fit.
    #[inline]
    pub fn capacity(&self) -> usize {
        1usize
            .checked_shl(self.depth)
            .map_or(usize::MAX, |slots| slots - 1)
    }

    #[inline]
    pub fn root(&self) -> Split<'a> {
        self.root
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &InternalNode<'a> {
        &self.nodes[idx]
    }

    #[inline]
    pub fn nodes(&self) -> &[InternalNode<'a>] {
        &self.nodes
    }

    #[inline]
    pub fn leaf(&self, idx: usize) -> &'a str {
        self.leaves[idx]
    }

    #[inline]
    pub fn num_internal(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }
}

fn check_len(tree: usize, field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(ConvertError::ArraySizeMismatch {
            tree,
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_min_len(tree: usize, field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(ConvertError::ArraySizeMismatch {
            tree,
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
