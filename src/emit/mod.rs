//! Writers for the two output representations.
//!
//! - [`relinearize`]: breadth-first slot layout (`tree` mode)
//! - [`codegen`] + [`driver`]: C evaluators plus benchmark driver (`codegen` mode)
//!
//! All writers stream into any [`std::io::Write`] sink, one line at a time.

pub mod codegen;
pub mod driver;
pub mod relinearize;

pub use codegen::write_tree_function;
pub use driver::write_driver;
pub use relinearize::{relinearize, ShallowLeafStyle};
