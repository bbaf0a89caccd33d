//! Ensemble conversion driver.
//!
//! [`convert_ensemble`] decodes every tree of an [`Ensemble`] up front, then streams
//! the chosen representation:
//!
//! - [`Mode::Tree`]: tree count, then one slot-layout block per tree
//! - [`Mode::Codegen`]: one C function per tree, then the benchmark driver
//!
//! Decoding finishes before the first write, so a malformed tree anywhere in the
//! ensemble fails the run without emitting a partial result.
//!
//! # Example
//!
//! ```
//! use forest_convert::compat::Ensemble;
//! use forest_convert::{convert_ensemble, ConvertConfig, Mode};
//!
//! let xml = "<Ensemble><Tree>\
//!     <SplitFeatures>f0</SplitFeatures><LeafOutputs>1.0 2.0</LeafOutputs>\
//!     <OriginalThresholds>0.5</OriginalThresholds>\
//!     <LeftChildren>-1</LeftChildren><RightChildren>-2</RightChildren>\
//!     </Tree></Ensemble>";
//! let ensemble = Ensemble::from_xml(xml).unwrap();
//! let config = ConvertConfig::builder().mode(Mode::Tree).build().unwrap();
//!
//! let mut out = Vec::new();
//! convert_ensemble(&ensemble, &config, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "1\n1\nroot 0 f0 0.5\nleaf 1 0 1 1.0\nleaf 2 0 0 2.0\nend\n"
//! );
//! ```

use std::fmt;
use std::io::Write;

use bon::Builder;

use crate::compat::Ensemble;
use crate::emit::{relinearize, write_driver, write_tree_function, ShallowLeafStyle};
use crate::error::Result;
use crate::trees::DecodedTree;

// =============================================================================
// Mode
// =============================================================================

/// Output representation, fixed for a whole ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Breadth-first slot layout.
    #[default]
    Tree,
    /// C evaluator functions plus benchmark driver.
    Codegen,
}

impl Mode {
    /// Parse a mode name; anything other than `codegen` selects [`Mode::Tree`].
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "tree" => Mode::Tree,
            "codegen" => Mode::Codegen,
            other => {
                tracing::debug!(mode = other, "unrecognized mode, using tree");
                Mode::Tree
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Tree => write!(f, "tree"),
            Mode::Codegen => write!(f, "codegen"),
        }
    }
}

// =============================================================================
// ConvertConfig
// =============================================================================

/// Errors found while validating a [`ConvertConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a C identifier, got {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Conversion settings.
///
/// ```
/// use forest_convert::{ConvertConfig, Mode, ShallowLeafStyle};
///
/// let config = ConvertConfig::builder()
///     .mode(Mode::Codegen)
///     .function_prefix("score_tree")
///     .build()
///     .unwrap();
/// assert_eq!(config.parameter, "features");
/// assert_eq!(config.shallow_leaves, ShallowLeafStyle::Leaf);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
pub struct ConvertConfig {
    /// Output representation. Default: [`Mode::Tree`].
    #[builder(default)]
    pub mode: Mode,

    /// Name prefix of generated functions; tree `i` becomes `<prefix><i>`.
    /// Default: `findLeaf`.
    #[builder(into, default = String::from("findLeaf"))]
    pub function_prefix: String,

    /// Name of the feature-array parameter of generated functions.
    /// Default: `features`.
    #[builder(into, default = String::from("features"))]
    pub parameter: String,

    /// Record form for leaves that land below capacity in `tree` mode.
    #[builder(default)]
    pub shallow_leaves: ShallowLeafStyle,
}

impl<S: convert_config_builder::IsComplete> ConvertConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIdentifier`] if the function prefix or the
    /// parameter name cannot be used as a C identifier.
    pub fn build(self) -> std::result::Result<ConvertConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig::builder().__build_internal()
    }
}

impl ConvertConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("function_prefix", &self.function_prefix),
            ("parameter", &self.parameter),
        ] {
            if !is_c_identifier(value) {
                return Err(ConfigError::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Totals of one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertSummary {
    /// Trees converted.
    pub trees: usize,
    /// Largest tree depth in the ensemble (0 when empty).
    pub max_depth: u32,
    /// `node`/`leaf` records written; always 0 in codegen mode.
    pub slots: usize,
}

/// Convert every tree of `ensemble` and write the result to `out`.
///
/// An ensemble without trees writes nothing in either mode.
pub fn convert_ensemble<W: Write>(
    ensemble: &Ensemble,
    config: &ConvertConfig,
    out: &mut W,
) -> Result<ConvertSummary> {
    let trees = ensemble
        .trees
        .iter()
        .enumerate()
        .map(|(idx, raw)| DecodedTree::decode(raw, idx))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = ConvertSummary {
        trees: trees.len(),
        max_depth: trees.iter().map(|t| t.depth()).max().unwrap_or(0),
        slots: 0,
    };
    tracing::info!(mode = %config.mode, trees = summary.trees, "converting ensemble");

    if trees.is_empty() {
        return Ok(summary);
    }

    match config.mode {
        Mode::Tree => {
            writeln!(out, "{}", trees.len())?;
            for tree in &trees {
                summary.slots += relinearize(tree, config.shallow_leaves, out)?;
            }
        }
        Mode::Codegen => {
            for (func_id, tree) in trees.iter().enumerate() {
                let name = format!("{}{}", config.function_prefix, func_id);
                write_tree_function(tree, &name, &config.parameter, out)?;
            }
            write_driver(&config.function_prefix, trees.len(), out)?;
        }
    }

    Ok(summary)
}
