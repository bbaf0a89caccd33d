//! Direct-evaluation C source for a single tree.
//!
//! Each tree becomes one function of the form
//!
//! ```text
//! float findLeaf0(float* features) {
//!   if(features[f0] <= 0.5) {
//!   return 1.0;
//!   } else {
//!   return 2.0;
//!   }
//! }
//! ```
//!
//! Every statement is written with the same two-space indent regardless of nesting,
//! which keeps the output byte-compatible with previously generated evaluators.

use std::io::Write;

use crate::error::Result;
use crate::trees::{ChildRef, DecodedTree};

/// Pending output while walking a tree depth-first.
enum Step {
    Child(ChildRef),
    Else,
    Close,
}

/// Write `float <name>(float* <parameter>) { ... }` evaluating `tree`.
///
/// `<=` sends a row left. The walk keeps its own stack, so deep chains are fine.
pub fn write_tree_function<W: Write>(
    tree: &DecodedTree<'_>,
    name: &str,
    parameter: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "float {}(float* {}) {{", name, parameter)?;

    let mut stack = Vec::new();
    if tree.num_internal() > 0 {
        stack.push(Step::Child(ChildRef::Internal(0)));
    }
    while let Some(step) = stack.pop() {
        match step {
            Step::Child(ChildRef::Internal(idx)) => {
                let n = tree.node(idx);
                writeln!(
                    out,
                    "  if({}[{}] <= {}) {{",
                    parameter, n.split.feature, n.split.threshold
                )?;
                stack.extend([
                    Step::Close,
                    Step::Child(n.right),
                    Step::Else,
                    Step::Child(n.left),
                ]);
            }
            Step::Child(ChildRef::Leaf(idx)) => writeln!(out, "  return {};", tree.leaf(idx))?,
            Step::Else => writeln!(out, "  }} else {{")?,
            Step::Close => writeln!(out, "  }}")?,
        }
    }

    writeln!(out, "}}")?;
    Ok(())
}
