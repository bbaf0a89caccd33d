//! Command-line options.
//!
//! ```text
//! forest-convert -input <ensemble.xml> -mode <tree|codegen> [-shallowLeaves <leaf|node>]
//! ```
//!
//! Options use single-dash names and are looked up by scanning for the flag and
//! taking the token after it, so their order is free and unknown tokens are ignored.

use std::path::PathBuf;

use crate::convert::{ConvertConfig, Mode};
use crate::emit::ShallowLeafStyle;
use crate::error::{ConvertError, Result};

/// Printed when fewer than four arguments are given.
pub const USAGE: &str = "usage:\n -input jforest-ensemble-xml -mode [tree|codegen]";

const INPUT: &str = "-input";
const MODE: &str = "-mode";
const SHALLOW_LEAVES: &str = "-shallowLeaves";

/// Parsed command line.
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub input: PathBuf,
    pub config: ConvertConfig,
}

impl CliOptions {
    /// Parse arguments, program name excluded.
    ///
    /// Returns `Ok(None)` when fewer than four arguments are given; the caller
    /// prints [`USAGE`] and exits successfully.
    ///
    /// # Errors
    ///
    /// [`ConvertError::MissingOption`] if `-input` or `-mode` is absent or is the
    /// last argument.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Option<Self>> {
        if args.len() < 4 {
            return Ok(None);
        }

        let input = option_value(args, INPUT).ok_or(ConvertError::MissingOption(INPUT))?;
        let mode = option_value(args, MODE).ok_or(ConvertError::MissingOption(MODE))?;
        let shallow_leaves = match option_value(args, SHALLOW_LEAVES) {
            Some("node") => ShallowLeafStyle::Node,
            _ => ShallowLeafStyle::Leaf,
        };

        let config = ConvertConfig {
            mode: Mode::parse_lenient(mode),
            shallow_leaves,
            ..ConvertConfig::default()
        };

        Ok(Some(CliOptions {
            input: PathBuf::from(input),
            config,
        }))
    }
}

/// Token following the first occurrence of `option`.
fn option_value<'a, S: AsRef<str>>(args: &'a [S], option: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|pair| pair[0].as_ref() == option)
        .map(|pair| pair[1].as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_and_mode() {
        let opts = CliOptions::parse(&["-input", "model.xml", "-mode", "codegen"])
            .unwrap()
            .unwrap();
        assert_eq!(opts.input, PathBuf::from("model.xml"));
        assert_eq!(opts.config.mode, Mode::Codegen);
        assert_eq!(opts.config.shallow_leaves, ShallowLeafStyle::Leaf);
    }

    #[test]
    fn option_order_is_free() {
        let opts = CliOptions::parse(&["-mode", "tree", "-input", "a.xml", "-shallowLeaves", "node"])
            .unwrap()
            .unwrap();
        assert_eq!(opts.input, PathBuf::from("a.xml"));
        assert_eq!(opts.config.mode, Mode::Tree);
        assert_eq!(opts.config.shallow_leaves, ShallowLeafStyle::Node);
    }

    #[test]
    fn too_few_arguments_means_usage() {
        assert!(CliOptions::parse::<&str>(&[]).unwrap().is_none());
        assert!(CliOptions::parse(&["-input", "a.xml", "-mode"]).unwrap().is_none());
    }

    #[test]
    fn unknown_mode_falls_back_to_tree() {
        let opts = CliOptions::parse(&["-input", "a.xml", "-mode", "json"])
            .unwrap()
            .unwrap();
        assert_eq!(opts.config.mode, Mode::Tree);
    }

    #[test]
    fn missing_options_are_errors() {
        let err = CliOptions::parse(&["-in", "a.xml", "-mode", "tree"]).unwrap_err();
        assert!(matches!(err, ConvertError::MissingOption("-input")));

        // A flag in last position has no value.
        let err = CliOptions::parse(&["-input", "a.xml", "tree", "-mode"]).unwrap_err();
        assert!(matches!(err, ConvertError::MissingOption("-mode")));
    }
}
