//! Breadth-first relinearization into complete-binary-tree slots.
//!
//! Output block for one tree:
//!
//! ```text
//! <depth>
//! root 0 <feature> <threshold>
//! node <id> <parentId> <feature> <branch> <threshold>
//! leaf <id> <parentId> <branch> <leafValue>
//! ...
//! end
//! ```
//!
//! Slot ids are handed out in level order starting at `1` for the root's left child.
//! A slot whose id reaches the capacity `2^depth - 1` of the complete tree is always
//! written as a `leaf` record, whatever kind of node occupies it.

use std::collections::VecDeque;
use std::io::Write;

use crate::error::Result;
use crate::trees::{Branch, ChildRef, DecodedTree, Split};

/// Record form used for a leaf whose slot id is below capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShallowLeafStyle {
    /// `leaf <id> <parentId> <branch> <leafValue>`.
    #[default]
    Leaf,
    /// `node <id> <parentId> <parentFeature> <branch> <leafValue>`: a padded node
    /// carrying the leaf value as its threshold, as written by the jforest tooling.
    Node,
}

/// A queued slot: the node to place plus what it inherits from its parent.
#[derive(Debug, Clone, Copy)]
struct PendingSlot<'a> {
    child: ChildRef,
    parent: usize,
    branch: Branch,
    /// Own split for internal nodes, the parent's split for leaves.
    split: Split<'a>,
    /// Own value for leaves, inherited fallback for internal nodes.
    leaf_value: &'a str,
}

impl<'a> PendingSlot<'a> {
    fn new(
        tree: &DecodedTree<'a>,
        child: ChildRef,
        parent: usize,
        branch: Branch,
        parent_split: Split<'a>,
        parent_leaf_value: &'a str,
    ) -> Self {
        let (split, leaf_value) = match child {
            ChildRef::Internal(idx) => (tree.node(idx).split, parent_leaf_value),
            ChildRef::Leaf(idx) => (parent_split, tree.leaf(idx)),
        };
        PendingSlot {
            child,
            parent,
            branch,
            split,
            leaf_value,
        }
    }
}

/// Leaf fallback value carried by the root's internal children.
const ROOT_LEAF_FALLBACK: &str = "0";

/// Write the slot layout of one tree. Returns the number of `node`/`leaf` records.
pub fn relinearize<W: Write>(
    tree: &DecodedTree<'_>,
    style: ShallowLeafStyle,
    out: &mut W,
) -> Result<usize> {
    let root = tree.root();
    writeln!(out, "{}", tree.depth())?;
    writeln!(out, "root 0 {} {}", root.feature, root.threshold)?;

    let mut queue = VecDeque::new();
    if let Some(node) = tree.nodes().first() {
        for branch in [Branch::Left, Branch::Right] {
            queue.push_back(PendingSlot::new(
                tree,
                node.child(branch),
                0,
                branch,
                root,
                ROOT_LEAF_FALLBACK,
            ));
        }
    }

    let capacity = tree.capacity();
    let mut id = 1usize;
    while let Some(slot) = queue.pop_front() {
        if id >= capacity {
            write_leaf(out, id, &slot)?;
        } else {
            match slot.child {
                ChildRef::Internal(idx) => {
                    writeln!(
                        out,
                        "node {} {} {} {} {}",
                        id, slot.parent, slot.split.feature, slot.branch, slot.split.threshold
                    )?;
                    let node = tree.node(idx);
                    for branch in [Branch::Left, Branch::Right] {
                        queue.push_back(PendingSlot::new(
                            tree,
                            node.child(branch),
                            id,
                            branch,
                            slot.split,
                            slot.leaf_value,
                        ));
                    }
                }
                ChildRef::Leaf(_) => match style {
                    ShallowLeafStyle::Leaf => write_leaf(out, id, &slot)?,
                    ShallowLeafStyle::Node => writeln!(
                        out,
                        "node {} {} {} {} {}",
                        id, slot.parent, slot.split.feature, slot.branch, slot.leaf_value
                    )?,
                },
            }
        }
        id += 1;
    }

    writeln!(out, "end")?;
    Ok(id - 1)
}

fn write_leaf<W: Write>(out: &mut W, id: usize, slot: &PendingSlot<'_>) -> Result<()> {
    writeln!(
        out,
        "leaf {} {} {} {}",
        id, slot.parent, slot.branch, slot.leaf_value
    )?;
    Ok(())
}
