//! Shared harness for shardbench integration tests.
//!
//! Provides [`DiskBench`]: a scratch mount root in a temporary directory
//! with helpers to build pipelines over it and to inspect what landed on
//! disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shardbench_engine::{Pipeline, PipelineConfig};
use shardbench_erasure::{ErasureCodec, ErasureParams};
use shardbench_placement::{DiskPool, Placement};
use shardbench_store::{DiscardStore, FileStore, VolumeStore};
use tempfile::TempDir;

/// A temporary mount root holding the simulated disks of one test.
pub struct DiskBench {
    dir: TempDir,
}

impl DiskBench {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// The mount root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Pipeline writing through a [`FileStore`] rooted at this bench.
    pub fn file_pipeline(
        &self,
        disks: &[&str],
        data: usize,
        parity: usize,
        verify: bool,
    ) -> Arc<Pipeline> {
        let store = Arc::new(FileStore::new(self.root()));
        build_pipeline(store, disks, data, parity, verify)
    }

    /// Pipeline that discards every write. The bench root stays empty.
    pub fn discard_pipeline(
        &self,
        disks: &[&str],
        data: usize,
        parity: usize,
    ) -> (Arc<Pipeline>, Arc<DiscardStore>) {
        let store = Arc::new(DiscardStore::new());
        (build_pipeline(store.clone(), disks, data, parity, true), store)
    }

    /// Every file named `name` below the mount root, sorted.
    pub fn files_named(&self, name: &str) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut stack = vec![self.root().to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.file_name().is_some_and(|n| n == name) {
                    found.push(path);
                }
            }
        }
        found.sort();
        found
    }

    /// Number of entries directly under the mount root.
    pub fn top_level_entries(&self) -> usize {
        std::fs::read_dir(self.root()).unwrap().count()
    }
}

impl Default for DiskBench {
    fn default() -> Self {
        Self::new()
    }
}

fn build_pipeline(
    store: Arc<dyn VolumeStore>,
    disks: &[&str],
    data: usize,
    parity: usize,
    verify: bool,
) -> Arc<Pipeline> {
    let codec = ErasureCodec::new(ErasureParams::new(data, parity).unwrap()).unwrap();
    let pool = DiskPool::new(disks.iter().copied()).unwrap();
    Arc::new(Pipeline::new(
        codec,
        Placement::new(pool),
        store,
        PipelineConfig {
            verify,
            ..PipelineConfig::default()
        },
    ))
}

/// The eight default disk names.
pub const DISKS: [&str; 8] = shardbench_placement::DEFAULT_DISKS;

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Vec<u8> {
    test_data_seeded(size, 0xDEAD_BEEF)
}

/// Like [`test_data`] with a caller-chosen seed.
pub fn test_data_seeded(size: usize, seed: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}
