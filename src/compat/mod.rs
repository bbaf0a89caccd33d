//! External format compatibility loaders.
//!
//! Each loader reads a foreign ensemble format into plain per-tree field arrays
//! that the [`trees`](crate::trees) module decodes.

pub mod jforest;

pub use jforest::{Ensemble, RawTree};
