//! Single-object write path.

use std::sync::Arc;

use bytes::Bytes;
use shardbench_erasure::ErasureCodec;
use shardbench_meta::{ObjectMetadata, compose};
use shardbench_placement::{Placement, Salt, ShardLocation};
use shardbench_store::VolumeStore;
use shardbench_types::ShardDigest;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::object::SourceObject;

/// Block size recorded in metadata when none is configured: 10 MiB.
pub const DEFAULT_BLOCK_SIZE: u64 = 10 * 1024 * 1024;

/// Knobs of the write path that are not codec or placement parameters.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Block size recorded in `erasure.blockSize`.
    pub block_size: u64,
    /// Re-read and re-hash every shard after writing it.
    pub verify: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            verify: false,
        }
    }
}

/// Outcome of encoding one object.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    /// Object name used in the placement path.
    pub name: String,
    /// Salt drawn for this encode.
    pub salt: Salt,
    /// Where every shard went, indexed by shard.
    pub locations: Vec<ShardLocation>,
    /// The composed metadata record (with `erasure.index = 0`).
    pub metadata: ObjectMetadata,
}

impl EncodeReport {
    /// Length of every shard of the object.
    pub fn shard_size(&self) -> u64 {
        self.metadata.erasure.shard_size
    }

    /// Number of shards written.
    pub fn shard_count(&self) -> usize {
        self.locations.len()
    }
}

/// Encodes objects and writes their shards through a [`VolumeStore`].
///
/// Holds only immutable state; share it between workers behind an `Arc`.
pub struct Pipeline {
    codec: Arc<ErasureCodec>,
    placement: Placement,
    store: Arc<dyn VolumeStore>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Assemble a pipeline from its parts.
    pub fn new(
        codec: ErasureCodec,
        placement: Placement,
        store: Arc<dyn VolumeStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            codec: Arc::new(codec),
            placement,
            store,
            config,
        }
    }

    /// The shared erasure codec.
    pub fn codec(&self) -> &ErasureCodec {
        &self.codec
    }

    /// The shard placement over the disk pool.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// The store every shard is written to.
    pub fn store(&self) -> &Arc<dyn VolumeStore> {
        &self.store
    }

    /// Block size and verify settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Encode `object` under `name` with a freshly drawn salt.
    pub async fn encode_object(
        &self,
        object: &SourceObject,
        name: &str,
    ) -> Result<EncodeReport, EngineError> {
        self.encode_object_with_salt(object, name, Salt::now()).await
    }

    /// Encode `object` under `name` using the given salt.
    ///
    /// Every shard and its sidecar are written concurrently. The first write
    /// failure is returned and the remaining writes are cancelled; shards
    /// already on disk are left in place.
    pub async fn encode_object_with_salt(
        &self,
        object: &SourceObject,
        name: &str,
        salt: Salt,
    ) -> Result<EncodeReport, EngineError> {
        let params = *self.codec.params();
        let encoded = self.codec.encode(object.data())?;

        let digests: Vec<ShardDigest> = encoded
            .shards
            .iter()
            .map(|shard| ShardDigest::from_data(&shard.data))
            .collect();

        let locations = self.placement.locate_all(params.total(), &salt, name);

        let metadata = compose(
            &params,
            self.config.block_size,
            encoded.shard_size,
            object.stat(),
            &digests,
        )?;

        let verify = self.config.verify && self.store.is_persistent();
        if self.config.verify && !verify {
            debug!(object = name, "store is not persistent, skipping verify");
        }

        let mut writes = JoinSet::new();
        for ((shard, location), digest) in encoded.shards.into_iter().zip(&locations).zip(digests)
        {
            let sidecar = Bytes::from(metadata.sidecar(shard.index)?);
            let store = Arc::clone(&self.store);
            let location = location.clone();
            writes.spawn(async move {
                store.put(&location, shard.data, sidecar).await?;
                if verify {
                    store.verify(&location, digest).await?;
                }
                Ok::<_, EngineError>(())
            });
        }

        while let Some(joined) = writes.join_next().await {
            if let Err(e) = joined? {
                warn!(object = name, error = %e, "shard write failed");
                return Err(e);
            }
        }

        debug!(
            object = name,
            %salt,
            shards = locations.len(),
            shard_size = encoded.shard_size,
            "object encoded and placed"
        );

        Ok(EncodeReport {
            name: name.to_string(),
            salt,
            locations,
            metadata,
        })
    }
}
