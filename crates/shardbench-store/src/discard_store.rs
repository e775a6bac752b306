//! Backend that discards every write.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use shardbench_placement::ShardLocation;
use shardbench_types::ShardDigest;

use crate::error::StoreError;
use crate::traits::VolumeStore;

/// A store that performs no I/O.
///
/// Backs the skip-disk mode: the pipeline still encodes, hashes, places and
/// composes metadata for every shard, and this store only counts what it
/// would have written.
#[derive(Debug, Default)]
pub struct DiscardStore {
    shards: AtomicU64,
    bytes: AtomicU64,
}

impl DiscardStore {
    /// Create a new discarding store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shards handed to [`VolumeStore::put`] so far.
    pub fn shards_discarded(&self) -> u64 {
        self.shards.load(Ordering::Relaxed)
    }

    /// Shard and sidecar bytes handed to [`VolumeStore::put`] so far.
    pub fn bytes_discarded(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl VolumeStore for DiscardStore {
    async fn put(
        &self,
        _location: &ShardLocation,
        shard: Bytes,
        sidecar: Bytes,
    ) -> Result<(), StoreError> {
        self.shards.fetch_add(1, Ordering::Relaxed);
        self.bytes
            .fetch_add((shard.len() + sidecar.len()) as u64, Ordering::Relaxed);
        Ok(())
    }

    async fn get(&self, _location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        Ok(None)
    }

    async fn get_sidecar(&self, _location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        Ok(None)
    }

    async fn verify(
        &self,
        location: &ShardLocation,
        _expected: ShardDigest,
    ) -> Result<(), StoreError> {
        Err(StoreError::NotFound(location.dir.clone()))
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
