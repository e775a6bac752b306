//! Erasure coding parameters.

use shardbench_types::MAX_DATA_SHARDS;

use crate::error::CodecError;

/// Validated data/parity shard counts.
///
/// `data` is always in `1..=256`. `parity` may be zero, in which case the
/// codec only splits the object. Whether `data + parity` fits the field is
/// decided when the coding matrix is built (see
/// [`ErasureCodec::new`](crate::ErasureCodec::new)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErasureParams {
    data: usize,
    parity: usize,
}

impl ErasureParams {
    /// Validate unsigned shard counts.
    pub fn new(data: usize, parity: usize) -> Result<Self, CodecError> {
        Self::from_signed(
            i64::try_from(data).unwrap_or(i64::MAX),
            i64::try_from(parity).unwrap_or(i64::MAX),
        )
    }

    /// Validate shard counts as given by a user, where negative values are
    /// representable and must be rejected.
    pub fn from_signed(data: i64, parity: i64) -> Result<Self, CodecError> {
        let invalid = |reason| CodecError::InvalidParameters {
            data,
            parity,
            reason,
        };

        if data < 1 {
            return Err(invalid("data shard count must be at least 1"));
        }
        if data > MAX_DATA_SHARDS as i64 {
            return Err(invalid("data shard count must not exceed 256"));
        }
        if parity < 0 {
            return Err(invalid("parity shard count must not be negative"));
        }
        let parity = usize::try_from(parity).map_err(|_| invalid("parity shard count too large"))?;

        Ok(Self {
            data: data as usize,
            parity,
        })
    }

    /// Number of data shards.
    pub fn data(&self) -> usize {
        self.data
    }

    /// Number of parity shards.
    pub fn parity(&self) -> usize {
        self.parity
    }

    /// Total shard count (`data + parity`).
    pub fn total(&self) -> usize {
        self.data + self.parity
    }
}

impl Default for ErasureParams {
    /// Four data shards and two parity shards.
    fn default() -> Self {
        Self { data: 4, parity: 2 }
    }
}
