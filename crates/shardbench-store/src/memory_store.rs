//! In-memory shard storage backend.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use bytes::Bytes;
use shardbench_placement::ShardLocation;
use shardbench_types::ShardDigest;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::VolumeStore;

#[derive(Debug, Clone)]
struct StoredShard {
    shard: Bytes,
    sidecar: Bytes,
}

/// In-memory shard store backed by a `RwLock<HashMap>`.
///
/// Keyed by location directory, so writing the same location twice
/// replaces the earlier shard. Useful for tests and benches that need to
/// inspect what the pipeline produced without touching a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    shards: RwLock<HashMap<PathBuf, StoredShard>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shard locations written.
    pub fn len(&self) -> usize {
        self.shards.read().expect("lock poisoned").len()
    }

    /// `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All location directories written so far.
    pub fn locations(&self) -> Vec<PathBuf> {
        self.shards
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    fn lookup(&self, location: &ShardLocation) -> Option<StoredShard> {
        self.shards
            .read()
            .expect("lock poisoned")
            .get(&location.dir)
            .cloned()
    }
}

#[async_trait::async_trait]
impl VolumeStore for MemoryStore {
    async fn put(
        &self,
        location: &ShardLocation,
        shard: Bytes,
        sidecar: Bytes,
    ) -> Result<(), StoreError> {
        debug!(index = location.index, dir = %location.dir.display(), size = shard.len(), "storing shard in memory");
        let mut map = self.shards.write().expect("lock poisoned");
        map.insert(location.dir.clone(), StoredShard { shard, sidecar });
        Ok(())
    }

    async fn get(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        Ok(self.lookup(location).map(|s| s.shard))
    }

    async fn get_sidecar(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        Ok(self.lookup(location).map(|s| s.sidecar))
    }

    async fn verify(
        &self,
        location: &ShardLocation,
        expected: ShardDigest,
    ) -> Result<(), StoreError> {
        let stored = self
            .lookup(location)
            .ok_or_else(|| StoreError::NotFound(location.dir.clone()))?;
        let actual = ShardDigest::from_data(&stored.shard);
        if actual != expected {
            return Err(StoreError::CorruptShard {
                path: location.dir.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}
