//! Error type shared by loading, decoding and emitting.

/// Error type for ensemble conversion.
///
/// Every variant is fatal: the converter never recovers per tree.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("option not found: {0}")]
    MissingOption(&'static str),
    #[error("malformed ensemble document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),
    #[error("tree {tree}: missing required field {field}")]
    MissingField { tree: usize, field: &'static str },
    #[error("tree {tree}: invalid integer in {field}: {token:?}")]
    MalformedToken {
        tree: usize,
        field: &'static str,
        token: String,
    },
    #[error("tree {tree}: array size mismatch for {field}: expected {expected}, got {actual}")]
    ArraySizeMismatch {
        tree: usize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("tree {tree}: invalid child reference {child} at node {node}")]
    InvalidChildIndex { tree: usize, node: usize, child: i32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
