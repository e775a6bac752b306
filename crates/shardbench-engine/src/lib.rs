//! Write pipeline and concurrency harness.
//!
//! The [`Pipeline`] takes one [`SourceObject`] through the full write path:
//! erasure-encode, hash every shard, place every shard, compose the
//! metadata record, and write shards with their sidecars concurrently.
//! [`run_harness`] drives many such encodes across a pool of workers and
//! reports aggregate throughput.

pub mod error;
pub mod harness;
pub mod object;
pub mod pipeline;

pub use error::{EngineError, ErrorKind};
pub use harness::{HarnessConfig, HarnessReport, run_harness};
pub use object::SourceObject;
pub use pipeline::{DEFAULT_BLOCK_SIZE, EncodeReport, Pipeline, PipelineConfig};

#[cfg(test)]
mod tests;
