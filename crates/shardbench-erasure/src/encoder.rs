//! Reed-Solomon erasure encoder.
//!
//! Splits an object into `data` shards and generates `parity` shards.

use bytes::Bytes;
use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::debug;

use crate::config::ErasureParams;
use crate::error::CodecError;

/// Algorithm name recorded in sidecar documents.
pub const ALGORITHM: &str = "klauspost/reedsolomon/vandermonde";

/// One erasure-coded shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// Position in the coding scheme (0..data for data, data..data+parity for parity).
    pub index: u8,
    /// The raw shard bytes.
    pub data: Bytes,
}

/// The result of encoding one object.
#[derive(Debug, Clone)]
pub struct EncodedObject {
    /// All shards, data first, ordered by index.
    pub shards: Vec<Shard>,
    /// Length of the object before padding.
    pub original_size: usize,
    /// Length of every shard.
    pub shard_size: usize,
}

impl EncodedObject {
    /// The data shards (indices `0..data`).
    pub fn data_shards(&self, params: &ErasureParams) -> &[Shard] {
        &self.shards[..params.data()]
    }

    /// The parity shards (indices `data..data+parity`).
    pub fn parity_shards(&self, params: &ErasureParams) -> &[Shard] {
        &self.shards[params.data()..]
    }
}

/// Reed-Solomon erasure encoder.
///
/// The coding matrix is built once in [`ErasureCodec::new`] and reused for
/// every object, so a single codec can be shared across worker tasks.
pub struct ErasureCodec {
    params: ErasureParams,
    /// `None` when `parity == 0`: there is nothing to compute.
    rs: Option<ReedSolomon>,
}

impl ErasureCodec {
    /// Build the coding matrix for the given shard counts.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ReedSolomon`] if the field cannot hold a valid
    /// code for `data + parity` shards (more than 256 in total).
    pub fn new(params: ErasureParams) -> Result<Self, CodecError> {
        let rs = if params.parity() == 0 {
            None
        } else {
            Some(ReedSolomon::new(params.data(), params.parity())?)
        };
        debug!(
            data = params.data(),
            parity = params.parity(),
            "built erasure codec"
        );
        Ok(Self { params, rs })
    }

    /// The shard counts this codec was built for.
    pub fn params(&self) -> &ErasureParams {
        &self.params
    }

    /// Encode an object into `data + parity` shards.
    ///
    /// The object is zero-padded to `shard_size * data` where
    /// `shard_size = ceil(len / data)`.
    pub fn encode(&self, object: &[u8]) -> Result<EncodedObject, CodecError> {
        if object.is_empty() {
            return Err(CodecError::EmptyObject);
        }

        let data = self.params.data();
        let original_size = object.len();
        let shard_size = shard_size(original_size, data);

        let mut buffers: Vec<Vec<u8>> = Vec::with_capacity(self.params.total());
        for piece in object.chunks(shard_size) {
            let mut buf = Vec::with_capacity(shard_size);
            buf.extend_from_slice(piece);
            buf.resize(shard_size, 0);
            buffers.push(buf);
        }
        // Objects shorter than `data` bytes leave whole shards of padding.
        buffers.resize_with(data, || vec![0u8; shard_size]);
        buffers.resize_with(self.params.total(), || vec![0u8; shard_size]);

        if let Some(rs) = &self.rs {
            rs.encode(&mut buffers)?;
        }

        let shards = buffers
            .into_iter()
            .enumerate()
            .map(|(i, buf)| Shard {
                index: i as u8,
                data: Bytes::from(buf),
            })
            .collect();

        debug!(
            data,
            parity = self.params.parity(),
            original_size,
            shard_size,
            "encoded object into shards"
        );

        Ok(EncodedObject {
            shards,
            original_size,
            shard_size,
        })
    }
}

/// `ceil(len / data)`: the smallest shard size that holds the whole object.
fn shard_size(len: usize, data: usize) -> usize {
    len.div_ceil(data)
}
