//! Reed-Solomon erasure codec.
//!
//! This crate provides:
//! - [`ErasureParams`]: validated data/parity shard counts.
//! - [`ErasureCodec`]: splits an object into `data` equally sized shards and
//!   computes `parity` shards with a systematic Vandermonde code over GF(2^8).
//!
//! Padding is the minimum needed to make the object divisible by the data
//! shard count, so a decoder can recover the original length from
//! `shard_size * data` and the recorded object size.

mod config;
mod encoder;
mod error;

pub use config::ErasureParams;
pub use encoder::{ALGORITHM, EncodedObject, ErasureCodec, Shard};
pub use error::CodecError;
