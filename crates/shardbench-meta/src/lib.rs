//! Object metadata records and their `xl.json` sidecar encoding.
//!
//! One [`ObjectMetadata`] is composed per encoded object, after every shard
//! has been hashed and placed. It records the codec parameters, the
//! distribution of shards, and the digest of every shard, which is enough to
//! drive a later reconstruction. The same record is written next to each
//! shard as a sidecar; sidecars differ only in `erasure.index`.

mod error;
mod record;

pub use error::MetaError;
pub use record::{
    ChecksumInfo, ErasureInfo, META_FORMAT, META_VERSION, ObjectMetadata, PartInfo, compose,
};
