//! Harness runs over real and discarded storage.

use std::collections::HashSet;
use std::sync::Arc;

use shardbench_engine::{ErrorKind, HarnessConfig, SourceObject, run_harness};
use shardbench_erasure::ErasureParams;
use shardbench_integration_tests::{DISKS, DiskBench, test_data};
use shardbench_meta::ObjectMetadata;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ten_runs_two_workers_on_disk() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&DISKS, 4, 2, true);
    let object = Arc::new(SourceObject::from_bytes(test_data(32_768)));

    let report = run_harness(pipeline, object, HarnessConfig { runs: 10, workers: 2 })
        .await
        .unwrap();

    assert_eq!(report.objects, 10);
    assert!(report.throughput() > 0.0);

    let parts = bench.files_named("part.1");
    let sidecars = bench.files_named("xl.json");
    assert_eq!(parts.len(), 60);
    assert_eq!(sidecars.len(), 60);

    let objects: HashSet<String> = parts
        .iter()
        .map(|p| {
            p.parent()
                .and_then(|d| d.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap()
        })
        .collect();
    assert_eq!(objects.len(), 10);

    for sidecar in &sidecars {
        let doc = ObjectMetadata::from_json(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(doc.total_shards(), 6);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_skip_disk_completes_without_writes() {
    let bench = DiskBench::new();
    let (pipeline, store) = bench.discard_pipeline(&DISKS, 4, 2);
    let object = Arc::new(SourceObject::from_bytes(test_data(32_768)));

    let report = run_harness(pipeline, object, HarnessConfig { runs: 10, workers: 2 })
        .await
        .unwrap();

    assert_eq!(report.objects, 10);
    assert!(report.throughput() > 0.0);
    assert_eq!(store.shards_discarded(), 60);
    assert_eq!(bench.top_level_entries(), 0);
}

#[tokio::test]
async fn test_small_pool_wraps_disks() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&["left", "right"], 4, 2, false);
    let object = Arc::new(SourceObject::from_bytes(test_data(600)));

    run_harness(pipeline, object, HarnessConfig { runs: 3, workers: 1 })
        .await
        .unwrap();

    assert_eq!(bench.top_level_entries(), 2);
    assert_eq!(bench.files_named("part.1").len(), 18);
    for disk in ["left", "right"] {
        let shard_dirs = std::fs::read_dir(bench.root().join(disk)).unwrap().count();
        assert_eq!(shard_dirs, 3, "{disk} should hold disk1/3/5 or disk2/4/6");
    }
}

#[test]
fn test_data_300_rejected_before_io() {
    let bench = DiskBench::new();
    let err = ErasureParams::from_signed(300, 2).unwrap_err();
    let err = shardbench_engine::EngineError::from(err);
    assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    assert_eq!(bench.top_level_entries(), 0);
}
