//! File-based shard storage backend.
//!
//! Stores each shard as `{mount_root}/{location.dir}/part.1` with its
//! sidecar alongside as `xl.json`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use shardbench_placement::ShardLocation;
use shardbench_types::{PART_FILE, SIDECAR_FILE, ShardDigest};
use tracing::{debug, error};

use crate::error::StoreError;
use crate::traits::VolumeStore;

/// File-based shard store rooted at a mount directory.
///
/// Writes are atomic: data is written to a temporary file first, then
/// renamed into place, so a reader never sees a half-written shard.
pub struct FileStore {
    mount_root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `mount_root`.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(mount_root: impl AsRef<Path>) -> Self {
        Self {
            mount_root: mount_root.as_ref().to_path_buf(),
        }
    }

    /// The mount root all locations are resolved against.
    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Absolute directory for a location.
    pub fn location_dir(&self, location: &ShardLocation) -> PathBuf {
        self.mount_root.join(&location.dir)
    }

    fn part_path(&self, location: &ShardLocation) -> PathBuf {
        self.location_dir(location).join(PART_FILE)
    }

    fn sidecar_path(&self, location: &ShardLocation) -> PathBuf {
        self.location_dir(location).join(SIDECAR_FILE)
    }
}

/// Write `data` to `path` through a temporary file in the same directory.
async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, data)
        .await
        .map_err(StoreError::io(&tmp_path))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(StoreError::io(path))?;
    Ok(())
}

/// Read a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<Bytes>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(Some(Bytes::from(data))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path)(e)),
    }
}

#[async_trait::async_trait]
impl VolumeStore for FileStore {
    async fn put(
        &self,
        location: &ShardLocation,
        shard: Bytes,
        sidecar: Bytes,
    ) -> Result<(), StoreError> {
        let dir = self.location_dir(location);
        // Idempotent: many workers create overlapping disk/salt prefixes.
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(StoreError::io(&dir))?;

        let part = dir.join(PART_FILE);
        write_atomic(&part, &shard).await?;
        write_atomic(&dir.join(SIDECAR_FILE), &sidecar).await?;

        debug!(
            index = location.index,
            path = %part.display(),
            size = shard.len(),
            "stored shard to file"
        );
        Ok(())
    }

    async fn get(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        read_optional(&self.part_path(location)).await
    }

    async fn get_sidecar(&self, location: &ShardLocation) -> Result<Option<Bytes>, StoreError> {
        read_optional(&self.sidecar_path(location)).await
    }

    async fn verify(
        &self,
        location: &ShardLocation,
        expected: ShardDigest,
    ) -> Result<(), StoreError> {
        let path = self.part_path(location);
        let data = read_optional(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(path.clone()))?;

        let actual = ShardDigest::from_data(&data);
        if actual != expected {
            error!(%expected, %actual, path = %path.display(), "shard corruption detected on verify");
            return Err(StoreError::CorruptShard {
                path,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
