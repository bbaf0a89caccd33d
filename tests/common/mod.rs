//! Fixture loading utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use forest_convert::compat::Ensemble;
use forest_convert::{convert_ensemble, ConvertConfig, ConvertError, ConvertSummary, Mode};

/// Directory holding the XML ensemble fixtures.
pub fn jforest_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases/jforest")
}

/// Load a fixture ensemble by file stem.
pub fn load_ensemble(name: &str) -> Result<Ensemble, ConvertError> {
    Ensemble::from_file(jforest_cases_dir().join(format!("{name}.xml")))
}

/// Convert `ensemble` with `config`, returning the written text.
pub fn convert_to_string(
    ensemble: &Ensemble,
    config: &ConvertConfig,
) -> Result<(String, ConvertSummary), ConvertError> {
    let mut out = Vec::new();
    let summary = convert_ensemble(ensemble, config, &mut out)?;
    Ok((String::from_utf8(out).expect("output is UTF-8"), summary))
}

/// Load and convert a fixture in the given mode with default settings.
pub fn convert_case(name: &str, mode: Mode) -> String {
    let ensemble =
        load_ensemble(name).unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"));
    let config = ConvertConfig::builder().mode(mode).build().unwrap();
    convert_to_string(&ensemble, &config)
        .unwrap_or_else(|e| panic!("failed to convert fixture {name}: {e}"))
        .0
}
