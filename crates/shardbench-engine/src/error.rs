//! Error types for the engine.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while encoding and placing objects.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Codec configuration or encoding failed.
    #[error("erasure error: {0}")]
    Codec(#[from] shardbench_erasure::CodecError),

    /// The disk pool is unusable.
    #[error("placement error: {0}")]
    Placement(#[from] shardbench_placement::PlacementError),

    /// Metadata composition or serialization failed.
    #[error("metadata error: {0}")]
    Meta(#[from] shardbench_meta::MetaError),

    /// Writing or verifying a shard failed.
    #[error("store error: {0}")]
    Store(#[from] shardbench_store::StoreError),

    /// The source object could not be read.
    #[error("failed to read input {}: {source}", .path.display())]
    InputRead {
        /// Path of the source object.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Harness parameters are unusable.
    #[error("invalid harness configuration: {0}")]
    InvalidHarness(String),

    /// A shard-writer or worker task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad shard counts, disk pool, or worker count. Detected before any I/O.
    InvalidParameters,
    /// The source object is missing or unreadable.
    InputReadFailure,
    /// The codec could not build a code or encode the object.
    EncodeFailure,
    /// Directory creation, shard write, or verification failed.
    PlacementIoFailure,
}

impl EngineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use shardbench_erasure::CodecError;

        match self {
            Self::Codec(CodecError::InvalidParameters { .. })
            | Self::Placement(_)
            | Self::InvalidHarness(_) => ErrorKind::InvalidParameters,
            Self::Codec(_) | Self::Meta(_) => ErrorKind::EncodeFailure,
            Self::InputRead { .. } => ErrorKind::InputReadFailure,
            Self::Store(_) | Self::Task(_) => ErrorKind::PlacementIoFailure,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidParameters => "invalid parameters",
            Self::InputReadFailure => "input read failure",
            Self::EncodeFailure => "encode failure",
            Self::PlacementIoFailure => "placement i/o failure",
        };
        f.write_str(name)
    }
}
