//! forest-convert: re-layouts of XML tree ensembles.
//!
//! Loads an ensemble of binary decision trees stored in the jforest-style XML format
//! (parallel split / threshold / leaf / child arrays per tree) and converts every tree
//! into either:
//!
//! - a breadth-first slot layout for fixed-capacity array-backed tree evaluators
//!   ([`Mode::Tree`]), or
//! - generated C source that evaluates each tree as nested conditionals, followed by a
//!   benchmarking driver program ([`Mode::Codegen`]).

pub mod cli;
pub mod compat;
pub mod convert;
pub mod emit;
pub mod error;
pub mod layout;
pub mod trees;

pub use convert::{convert_ensemble, ConfigError, ConvertConfig, ConvertSummary, Mode};
pub use error::ConvertError;
pub use emit::ShallowLeafStyle;
pub use trees::{Branch, ChildRef, DecodedTree};
