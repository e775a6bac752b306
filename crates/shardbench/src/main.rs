//! `shardbench`: erasure-coding write benchmark.
//!
//! Reads one input object, then encodes it over and over across a pool of
//! workers. Every encode splits the object into data and parity shards,
//! hashes each shard, spreads the shards over a pool of simulated disks, and
//! writes each shard next to an `xl.json` metadata sidecar.
//!
//! # Usage
//!
//! ```text
//! shardbench object.bin                          # 1000 encodes, 4+2, one worker
//! shardbench object.bin -w 8 -r 8000             # eight workers
//! shardbench object.bin --data 8 --parity 4      # different shard counts
//! shardbench object.bin --out /tmp/disks --verify
//! shardbench object.bin --no-disk                # encode only, write nothing
//! shardbench object.bin -c shardbench.toml
//! ```

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shardbench_engine::{
    EngineError, ErrorKind, HarnessReport, Pipeline, SourceObject, run_harness,
};
use shardbench_erasure::ErasureCodec;
use shardbench_placement::Placement;
use shardbench_store::{DiscardStore, FileStore, VolumeStore};
use tracing::{debug, info};

use config::{CliConfig, Overrides, RunConfig};

/// Exit status for a malformed invocation or unusable parameters.
const EXIT_INVALID: u8 = 1;
/// Exit status for a failure while reading, encoding, or writing.
const EXIT_FAILURE: u8 = 2;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "shardbench",
    version,
    about = "Erasure-code an object repeatedly and write its shards across simulated disks"
)]
struct Cli {
    /// Object to encode.
    input: PathBuf,

    /// Path to TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of data shards (1-256).
    #[arg(long, allow_negative_numbers = true)]
    data: Option<i64>,

    /// Number of parity shards.
    #[arg(long, visible_alias = "par", allow_negative_numbers = true)]
    parity: Option<i64>,

    /// Mount root the disk directories are created under.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of concurrent workers.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Total number of encodes, split evenly across workers.
    #[arg(short, long)]
    runs: Option<usize>,

    /// Run the whole pipeline but skip every disk write.
    #[arg(long, visible_alias = "nodisk")]
    no_disk: bool,

    /// Re-read and re-hash every shard after writing it.
    #[arg(long)]
    verify: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            data: self.data,
            parity: self.parity,
            out: self.out.clone(),
            workers: self.workers,
            runs: self.runs,
            skip_disk: self.no_disk,
            verify: self.verify,
        }
    }
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also come through here.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_INVALID)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let file = match CliConfig::load(cli.config.as_deref()).context("failed to load config") {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(EXIT_INVALID);
        }
    };

    setup_tracing(&file.log.level);

    let overrides = cli.overrides();
    let config = match RunConfig::build(cli.input, file, overrides) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    match run(config).await {
        Ok(report) => {
            println!("Total objects: {}", report.objects);
            println!("Elapsed time : {:?}", report.elapsed);
            println!("Speed        : {:4.0} objs/sec", report.throughput());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(e: &EngineError) -> ExitCode {
    let kind = e.kind();
    debug!(%kind, error = %e, "run failed");
    eprintln!("Error: {e}");
    match kind {
        ErrorKind::InvalidParameters => ExitCode::from(EXIT_INVALID),
        _ => ExitCode::from(EXIT_FAILURE),
    }
}

// -----------------------------------------------------------------------
// Run
// -----------------------------------------------------------------------

async fn run(config: RunConfig) -> Result<HarnessReport, EngineError> {
    // Build the coding matrix before touching the filesystem.
    let codec = ErasureCodec::new(config.params)?;

    let store: Arc<dyn VolumeStore> = if config.skip_disk {
        Arc::new(DiscardStore::new())
    } else {
        Arc::new(FileStore::new(&config.mount_root))
    };

    info!(
        input = %config.input.display(),
        data = config.params.data(),
        parity = config.params.parity(),
        disks = config.pool.len(),
        mount_root = %config.mount_root.display(),
        skip_disk = config.skip_disk,
        verify = config.pipeline.verify,
        "run configuration"
    );

    let object = SourceObject::read(&config.input).await?;
    let pipeline = Pipeline::new(codec, Placement::new(config.pool), store, config.pipeline);

    println!("Number of worker routines: {}", config.harness.workers);
    run_harness(Arc::new(pipeline), Arc::new(object), config.harness).await
}
