//! End-to-end conversion of XML fixtures.

mod common;

use rstest::rstest;

use common::{convert_case, convert_to_string, load_ensemble};
use forest_convert::{ConvertConfig, ConvertError, Mode, ShallowLeafStyle};

// =============================================================================
// Tree mode
// =============================================================================

#[test]
fn single_split_tree_layout() {
    let text = convert_case("single_split", Mode::Tree);
    assert_eq!(text, "1\n1\nroot 0 f0 0.5\nleaf 1 0 1 1.0\nleaf 2 0 0 2.0\nend\n");
}

#[test]
fn two_trees_are_independent_blocks() {
    let text = convert_case("two_trees", Mode::Tree);
    let expected = "\
2
1
root 0 f0 0.5
leaf 1 0 1 1.0
leaf 2 0 0 2.0
end
2
root 0 4 12.5
leaf 1 0 1 -0.125
node 2 0 2 0 0.003
leaf 3 2 1 0.75
leaf 4 2 0 0.0625
end
";
    assert_eq!(text, expected);
}

#[test]
fn root_only_tree_layout() {
    let text = convert_case("root_only", Mode::Tree);
    assert_eq!(text, "1\n1\nroot 0 7 1.25\nend\n");
}

#[test]
fn wide_tree_layout_leaf_style() {
    let text = convert_case("wide", Mode::Tree);
    let expected = "\
1
3
root 0 0 10
node 1 0 1 1 11
node 2 0 2 0 12
node 3 1 3 1 13
leaf 4 1 0 0.1
leaf 5 2 1 0.2
node 6 2 4 0 14
leaf 7 3 1 0.3
leaf 8 3 0 0.4
leaf 9 6 1 0.5
leaf 10 6 0 0.6
end
";
    assert_eq!(text, expected);
}

/// Shallow leaves in node form carry the parent's feature and the leaf value as
/// threshold. Slots at or past capacity (`2^3 - 1 = 7`) stay `leaf` records.
#[test]
fn wide_tree_layout_node_style() {
    let ensemble = load_ensemble("wide").unwrap();
    let config = ConvertConfig::builder()
        .shallow_leaves(ShallowLeafStyle::Node)
        .build()
        .unwrap();
    let (text, summary) = convert_to_string(&ensemble, &config).unwrap();

    let records: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(
        records,
        [
            "node 1 0 1 1 11",
            "node 2 0 2 0 12",
            "node 3 1 3 1 13",
            "node 4 1 1 0 0.1",
            "node 5 2 2 1 0.2",
            "node 6 2 4 0 14",
            "leaf 7 3 1 0.3",
            "leaf 8 3 0 0.4",
            "leaf 9 6 1 0.5",
            "leaf 10 6 0 0.6",
            "end",
        ]
    );
    assert_eq!(summary.trees, 1);
    assert_eq!(summary.max_depth, 3);
    assert_eq!(summary.slots, 10);
}

// =============================================================================
// Codegen mode
// =============================================================================

#[test]
fn single_split_function_and_driver() {
    let text = convert_case("single_split", Mode::Codegen);
    let function = "\
float findLeaf0(float* features) {
  if(features[f0] <= 0.5) {
  return 1.0;
  } else {
  return 2.0;
  }
}
#include <stdio.h>
";
    assert!(text.starts_with(function), "unexpected output:\n{text}");
    assert!(text.contains("    score += findLeaf0(features[iIndex]);\n"));
    assert!(!text.contains("findLeaf1"));
    assert!(text.ends_with("  return 0;\n}\n"));
}

#[test]
fn two_trees_get_sequential_function_names() {
    let text = convert_case("two_trees", Mode::Codegen);
    let second = "\
float findLeaf1(float* features) {
  if(features[4] <= 12.5) {
  return -0.125;
  } else {
  if(features[2] <= 0.003) {
  return 0.75;
  } else {
  return 0.0625;
  }
  }
}
";
    assert!(text.contains(second), "unexpected output:\n{text}");
    assert!(text.contains(
        "    score += findLeaf0(features[iIndex]);\n    score += findLeaf1(features[iIndex]);\n"
    ));
    // No tree count line in codegen mode.
    assert!(text.starts_with("float findLeaf0("));
}

#[test]
fn codegen_honours_custom_names() {
    let ensemble = load_ensemble("single_split").unwrap();
    let config = ConvertConfig::builder()
        .mode(Mode::Codegen)
        .function_prefix("tree_")
        .parameter("x")
        .build()
        .unwrap();
    let (text, summary) = convert_to_string(&ensemble, &config).unwrap();

    assert!(text.starts_with("float tree_0(float* x) {\n  if(x[f0] <= 0.5) {\n"));
    assert!(text.contains("    score += tree_0(features[iIndex]);\n"));
    assert_eq!(summary.slots, 0);
}

// =============================================================================
// Empty ensembles and failures
// =============================================================================

#[rstest]
#[case(Mode::Tree)]
#[case(Mode::Codegen)]
fn empty_ensemble_produces_no_output(#[case] mode: Mode) {
    assert_eq!(convert_case("empty", mode), "");
}

#[test]
fn missing_field_fails_the_whole_run() {
    let err = load_ensemble("missing_field").unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MissingField {
            tree: 1,
            field: "LeafOutputs"
        }
    ));
}

#[test]
fn malformed_child_token_fails_the_whole_run() {
    let err = load_ensemble("bad_token").unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MalformedToken { tree: 0, field: "LeftChildren", ref token } if token == "-1.0"
    ));
}

#[rstest]
#[case(Mode::Tree)]
#[case(Mode::Codegen)]
fn invalid_tree_writes_nothing(#[case] mode: Mode) {
    let ensemble = load_ensemble("bad_structure").unwrap();
    let config = ConvertConfig::builder().mode(mode).build().unwrap();

    let mut out = Vec::new();
    let err = forest_convert::convert_ensemble(&ensemble, &config, &mut out).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::InvalidChildIndex {
            tree: 1,
            node: 1,
            child: 0
        }
    ));
    assert!(out.is_empty());
}

#[test]
fn unreadable_document_is_malformed() {
    let err = forest_convert::compat::Ensemble::from_xml("<Ensemble><Tree>").unwrap_err();
    assert!(matches!(err, ConvertError::MalformedDocument(_)));
}
