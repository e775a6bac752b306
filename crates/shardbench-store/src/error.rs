//! Error types for shard storage operations.

use std::path::PathBuf;

use shardbench_types::ShardDigest;

/// Errors that can occur while writing or reading shards.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred on the given path.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No shard exists at the given location.
    #[error("shard not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Shard bytes on disk do not hash to the recorded digest.
    #[error("shard corruption detected at {}: expected {expected}, actual {actual}", .path.display())]
    CorruptShard {
        /// Shard file path.
        path: PathBuf,
        /// Digest recorded at write time.
        expected: ShardDigest,
        /// Digest of the bytes actually read back.
        actual: ShardDigest,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
