//! Core trait for shard storage.

use bytes::Bytes;
use shardbench_placement::ShardLocation;
use shardbench_types::ShardDigest;

use crate::error::StoreError;

/// Trait for persisting erasure-coded shards at their placement locations.
///
/// All implementations must be `Send + Sync`: one store is shared by every
/// worker, and the shards of one object are written concurrently. Writes to
/// distinct locations never interfere; creating a directory that already
/// exists is not an error.
#[async_trait::async_trait]
pub trait VolumeStore: Send + Sync {
    /// Write a shard and its sidecar document at `location`.
    async fn put(
        &self,
        location: &ShardLocation,
        shard: Bytes,
        sidecar: Bytes,
    ) -> Result<(), StoreError>;

    /// Read the shard at `location`. Returns `None` if nothing is stored there.
    async fn get(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError>;

    /// Read the sidecar at `location`. Returns `None` if nothing is stored there.
    async fn get_sidecar(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError>;

    /// Re-read the shard at `location` and compare it to `expected`.
    ///
    /// Returns [`StoreError::NotFound`] if the shard is missing and
    /// [`StoreError::CorruptShard`] if the bytes do not match.
    async fn verify(&self, location: &ShardLocation, expected: ShardDigest)
    -> Result<(), StoreError>;

    /// Whether written data can be read back. `false` for [`DiscardStore`](crate::DiscardStore).
    fn is_persistent(&self) -> bool {
        true
    }
}
