//! Shared test utilities for shardbench-engine tests.

use std::sync::Arc;

use bytes::Bytes;
use shardbench_erasure::{ErasureCodec, ErasureParams};
use shardbench_placement::{DiskPool, Placement, ShardLocation};
use shardbench_store::{MemoryStore, StoreError, VolumeStore};
use shardbench_types::ShardDigest;

use crate::pipeline::{Pipeline, PipelineConfig};

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

pub fn codec(data: usize, parity: usize) -> ErasureCodec {
    ErasureCodec::new(ErasureParams::new(data, parity).unwrap()).unwrap()
}

/// Pipeline over the default disk pool writing into a fresh [`MemoryStore`].
pub fn memory_pipeline(data: usize, parity: usize) -> (Arc<Pipeline>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(
        codec(data, parity),
        Placement::default(),
        store.clone(),
        PipelineConfig::default(),
    );
    (Arc::new(pipeline), store)
}

/// Pipeline with an arbitrary store and disk pool.
pub fn pipeline_with(
    store: Arc<dyn VolumeStore>,
    disks: &[&str],
    data: usize,
    parity: usize,
    verify: bool,
) -> Arc<Pipeline> {
    Arc::new(Pipeline::new(
        codec(data, parity),
        Placement::new(DiskPool::new(disks.iter().copied()).unwrap()),
        store,
        PipelineConfig {
            verify,
            ..PipelineConfig::default()
        },
    ))
}

/// Store that fails every write of one shard index and accepts the rest.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_index: u8,
}

impl FailingStore {
    pub fn new(fail_index: u8) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_index,
        }
    }
}

#[async_trait::async_trait]
impl VolumeStore for FailingStore {
    async fn put(
        &self,
        location: &ShardLocation,
        shard: Bytes,
        sidecar: Bytes,
    ) -> Result<(), StoreError> {
        if location.index == self.fail_index {
            return Err(StoreError::Io {
                path: location.dir.clone(),
                source: std::io::Error::other("injected write failure"),
            });
        }
        self.inner.put(location, shard, sidecar).await
    }

    async fn get(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        self.inner.get(location).await
    }

    async fn get_sidecar(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        self.inner.get_sidecar(location).await
    }

    async fn verify(
        &self,
        location: &ShardLocation,
        expected: ShardDigest,
    ) -> Result<(), StoreError> {
        self.inner.verify(location, expected).await
    }
}
