//! Error types for metadata composition and parsing.

/// Errors that can occur while composing, serializing, or parsing metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The number of digests does not match `data + parity`.
    #[error("shard count mismatch: expected {expected} digests, got {got}")]
    ShardCountMismatch {
        /// `data + parity` from the codec parameters.
        expected: usize,
        /// Digests supplied.
        got: usize,
    },

    /// A sidecar was written by a format or version we do not read.
    #[error("unsupported metadata {field} {found:?}, expected {expected:?}")]
    Unsupported {
        /// `"version"` or `"format"`.
        field: &'static str,
        /// Value found in the document.
        found: String,
        /// Value this crate writes.
        expected: &'static str,
    },

    /// The document is well-formed JSON but internally inconsistent.
    #[error("inconsistent metadata: {0}")]
    Inconsistent(String),
}
