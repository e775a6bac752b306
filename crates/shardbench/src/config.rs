//! TOML configuration and the resolved per-run configuration.
//!
//! Every section is optional. Command-line flags override file values, and
//! the merged result is validated into an immutable [`RunConfig`] before
//! any I/O happens.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use shardbench_engine::{DEFAULT_BLOCK_SIZE, EngineError, HarnessConfig, PipelineConfig};
use shardbench_erasure::ErasureParams;
use shardbench_placement::{DEFAULT_DISKS, DiskPool};

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Erasure coding parameters.
    pub erasure: ErasureSection,
    /// Simulated disks and where they are mounted.
    pub placement: PlacementSection,
    /// Worker pool and run count.
    pub harness: HarnessSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[erasure]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ErasureSection {
    /// Number of data shards.
    pub data: i64,
    /// Number of parity shards.
    pub parity: i64,
    /// Block size recorded in every sidecar.
    pub block_size: u64,
}

impl Default for ErasureSection {
    fn default() -> Self {
        Self {
            data: 4,
            parity: 2,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// `[placement]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlacementSection {
    /// Directory the disk names are resolved against.
    pub mount_root: PathBuf,
    /// Disk names, in placement order.
    pub disks: Vec<String>,
}

impl Default for PlacementSection {
    fn default() -> Self {
        Self {
            mount_root: PathBuf::from("/mnt"),
            disks: DEFAULT_DISKS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// `[harness]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HarnessSection {
    pub workers: usize,
    pub runs: usize,
    /// Run the full pipeline but discard every write.
    pub skip_disk: bool,
    /// Re-read and re-hash every shard after writing it.
    pub verify: bool,
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            workers: 1,
            runs: 1000,
            skip_disk: false,
            verify: false,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data: Option<i64>,
    pub parity: Option<i64>,
    pub out: Option<PathBuf>,
    pub workers: Option<usize>,
    pub runs: Option<usize>,
    pub skip_disk: bool,
    pub verify: bool,
}

/// Fully resolved and validated configuration of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub params: ErasureParams,
    pub mount_root: PathBuf,
    pub pool: DiskPool,
    pub harness: HarnessConfig,
    pub pipeline: PipelineConfig,
    pub skip_disk: bool,
}

impl RunConfig {
    /// Merge `file` with `overrides` and validate the result.
    ///
    /// Fails with an [`ErrorKind::InvalidParameters`](shardbench_engine::ErrorKind)
    /// error for unusable shard counts, disk pools, or worker counts.
    pub fn build(
        input: PathBuf,
        file: CliConfig,
        overrides: Overrides,
    ) -> Result<Self, EngineError> {
        let params = ErasureParams::from_signed(
            overrides.data.unwrap_or(file.erasure.data),
            overrides.parity.unwrap_or(file.erasure.parity),
        )?;
        let pool = DiskPool::new(file.placement.disks)?;

        let harness = HarnessConfig {
            runs: overrides.runs.unwrap_or(file.harness.runs),
            workers: overrides.workers.unwrap_or(file.harness.workers),
        };
        harness.validate()?;

        Ok(Self {
            input,
            params,
            mount_root: overrides.out.unwrap_or(file.placement.mount_root),
            pool,
            harness,
            pipeline: PipelineConfig {
                block_size: file.erasure.block_size,
                verify: overrides.verify || file.harness.verify,
            },
            skip_disk: overrides.skip_disk || file.harness.skip_disk,
        })
    }
}
