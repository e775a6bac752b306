//! Error types for erasure coding operations.

/// Errors that can occur while configuring the codec or encoding an object.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The requested shard counts are outside the supported range.
    #[error("invalid erasure parameters: data={data}, parity={parity}: {reason}")]
    InvalidParameters {
        /// Requested data shard count.
        data: i64,
        /// Requested parity shard count.
        parity: i64,
        /// Which bound was violated.
        reason: &'static str,
    },

    /// The Reed-Solomon library could not build or apply the coding matrix.
    #[error("reed-solomon error: {0}")]
    ReedSolomon(#[from] reed_solomon_erasure::Error),

    /// The input object was empty.
    #[error("cannot encode empty object")]
    EmptyObject,
}
