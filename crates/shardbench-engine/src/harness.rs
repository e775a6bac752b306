//! Concurrent encode harness.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::object::SourceObject;
use crate::pipeline::Pipeline;

/// How many encodes to run and across how many workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Requested number of encodes.
    pub runs: usize,
    /// Number of concurrent workers.
    pub workers: usize,
}

impl HarnessConfig {
    /// Fail unless there is at least one worker.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.workers == 0 {
            return Err(EngineError::InvalidHarness(
                "worker count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Encodes performed by each worker: `runs / workers`.
    pub fn per_worker(&self) -> usize {
        self.runs.checked_div(self.workers).unwrap_or(0)
    }

    /// Encodes actually performed: `workers * (runs / workers)`.
    pub fn total_objects(&self) -> usize {
        self.workers * self.per_worker()
    }

    /// Requested runs that do not divide evenly and are not executed.
    pub fn dropped(&self) -> usize {
        self.runs - self.total_objects()
    }
}

/// Aggregate result of a harness run.
#[derive(Debug, Clone, Copy)]
pub struct HarnessReport {
    /// Number of worker tasks that ran.
    pub workers: usize,
    /// Objects encoded and written.
    pub objects: usize,
    /// Wall time from the first spawn to the last join.
    pub elapsed: Duration,
}

impl HarnessReport {
    /// Objects per second over the whole run.
    pub fn throughput(&self) -> f64 {
        self.objects as f64 / self.elapsed.as_secs_f64().max(1e-9)
    }
}

/// Encode `object` `workers * (runs / workers)` times across `workers` tasks.
///
/// Worker `w` encodes objects named `output-{w}-{r}` sequentially for
/// `r in 0..runs/workers`. The first failure from any worker aborts the
/// others and is returned.
pub async fn run_harness(
    pipeline: Arc<Pipeline>,
    object: Arc<SourceObject>,
    config: HarnessConfig,
) -> Result<HarnessReport, EngineError> {
    config.validate()?;

    let per_worker = config.per_worker();
    if config.dropped() > 0 {
        warn!(
            runs = config.runs,
            workers = config.workers,
            dropped = config.dropped(),
            "runs not divisible by workers, remainder is skipped"
        );
    }

    info!(
        workers = config.workers,
        per_worker,
        size = object.len(),
        "starting encode workers"
    );

    let started = Instant::now();
    let mut workers = JoinSet::new();
    for worker in 0..config.workers {
        let pipeline = Arc::clone(&pipeline);
        let object = Arc::clone(&object);
        workers.spawn(async move {
            for run in 0..per_worker {
                let name = format!("output-{worker}-{run}");
                pipeline.encode_object(&object, &name).await?;
            }
            Ok::<_, EngineError>(per_worker)
        });
    }

    let mut objects = 0;
    while let Some(joined) = workers.join_next().await {
        match joined? {
            Ok(done) => objects += done,
            Err(e) => {
                workers.abort_all();
                return Err(e);
            }
        }
    }

    let report = HarnessReport {
        workers: config.workers,
        objects,
        elapsed: started.elapsed(),
    };
    info!(
        objects = report.objects,
        elapsed_ms = report.elapsed.as_millis() as u64,
        throughput = report.throughput(),
        "harness finished"
    );
    Ok(report)
}
