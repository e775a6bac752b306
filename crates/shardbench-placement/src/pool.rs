//! Disk pool and the shard → location mapping.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use crate::error::PlacementError;
use crate::salt::Salt;

/// Disk names used when no pool is configured.
pub const DEFAULT_DISKS: [&str; 8] = [
    "sde1", "sdf1", "sdg1", "sdh1", "sdi1", "sdj1", "sdk1", "sdl1",
];

/// Ordered, non-empty list of simulated disk names.
///
/// Order matters: shard `i` is assigned to the disk at position
/// `i mod len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskPool {
    disks: Vec<String>,
}

impl DiskPool {
    /// Build a pool from disk names.
    ///
    /// Each name must be a single, non-empty path segment and appear once.
    pub fn new<I, S>(disks: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let disks: Vec<String> = disks.into_iter().map(Into::into).collect();
        if disks.is_empty() {
            return Err(PlacementError::EmptyPool);
        }

        let mut seen = HashSet::with_capacity(disks.len());
        for name in &disks {
            if !is_single_segment(name) {
                return Err(PlacementError::InvalidDiskName(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(PlacementError::DuplicateDisk(name.clone()));
            }
        }

        Ok(Self { disks })
    }

    /// Select the disk for a shard index: `pool[index mod len]`.
    pub fn select(&self, index: usize) -> &str {
        &self.disks[index % self.disks.len()]
    }

    /// Number of disks in the pool.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Always `false`: a pool cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Disk names in pool order.
    pub fn disks(&self) -> &[String] {
        &self.disks
    }
}

impl Default for DiskPool {
    fn default() -> Self {
        Self {
            disks: DEFAULT_DISKS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Where one shard of one object is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardLocation {
    /// Shard index within the object.
    pub index: u8,
    /// The disk chosen for this shard.
    pub disk: String,
    /// Directory holding the shard and its sidecar, relative to the mount root.
    pub dir: PathBuf,
}

/// Maps shard indices of one object to locations on the disk pool.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pool: DiskPool,
}

impl Placement {
    /// Create a placement over the given pool.
    pub fn new(pool: DiskPool) -> Self {
        Self { pool }
    }

    /// The underlying disk pool.
    pub fn pool(&self) -> &DiskPool {
        &self.pool
    }

    /// Locate shard `index` of the object named `object`.
    ///
    /// The directory is
    /// `<disk>/disk<index+1>/<salt-prefix>/<salt-suffix>/<object>`. The
    /// `disk<index+1>` level keeps two shards of one object apart when the
    /// pool is smaller than the shard count, and the object name keeps two
    /// objects apart when they draw the same salt.
    ///
    /// `object` must be a single path segment.
    pub fn locate(&self, index: u8, salt: &Salt, object: &str) -> ShardLocation {
        debug_assert!(is_single_segment(object), "object name {object:?}");

        let disk = self.pool.select(index as usize).to_string();
        let dir = PathBuf::from(&disk)
            .join(format!("disk{}", index as usize + 1))
            .join(salt.prefix())
            .join(salt.suffix())
            .join(object);

        ShardLocation { index, disk, dir }
    }

    /// Locate every shard of an object with `total` shards.
    pub fn locate_all(&self, total: usize, salt: &Salt, object: &str) -> Vec<ShardLocation> {
        let locations: Vec<ShardLocation> = (0..total)
            .map(|i| self.locate(i as u8, salt, object))
            .collect();
        debug!(object, %salt, shards = total, disks = self.pool.len(), "placed shards");
        locations
    }
}

/// `true` if `name` can be used as exactly one path component.
fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
