//! Tree data structures.

pub mod child;
pub mod decoded;

pub use child::{Branch, ChildRef};
pub use decoded::{DecodedTree, InternalNode, Split};
