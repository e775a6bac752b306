//! High-concurrency runs: many workers, many objects, one shared pipeline.

use std::collections::HashSet;
use std::sync::Arc;

use shardbench_engine::{HarnessConfig, SourceObject, run_harness};
use shardbench_integration_tests::{DISKS, DiskBench, test_data};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_workers_no_path_collisions() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&DISKS[..3], 6, 3, true);
    let object = Arc::new(SourceObject::from_bytes(test_data(20_000)));

    let report = run_harness(pipeline, object, HarnessConfig { runs: 96, workers: 16 })
        .await
        .unwrap();
    assert_eq!(report.objects, 96);

    let parts = bench.files_named("part.1");
    assert_eq!(parts.len(), 96 * 9);
    let dirs: HashSet<_> = parts.iter().filter_map(|p| p.parent()).collect();
    assert_eq!(dirs.len(), parts.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_harnesses_share_mount_root() {
    let bench = DiskBench::new();
    let object = Arc::new(SourceObject::from_bytes(test_data(4_096)));

    // Same object names in both runs; different disk pools keep them apart.
    let a = run_harness(
        bench.file_pipeline(&["a1", "a2"], 2, 1, false),
        Arc::clone(&object),
        HarnessConfig { runs: 8, workers: 4 },
    );
    let b = run_harness(
        bench.file_pipeline(&["b1", "b2"], 2, 1, false),
        Arc::clone(&object),
        HarnessConfig { runs: 8, workers: 4 },
    );
    let (a, b) = tokio::join!(a, b);

    assert_eq!(a.unwrap().objects, 8);
    assert_eq!(b.unwrap().objects, 8);
    assert_eq!(bench.files_named("part.1").len(), 2 * 8 * 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_large_shard_counts() {
    let bench = DiskBench::new();
    let (pipeline, store) = bench.discard_pipeline(&DISKS, 200, 56);
    let object = Arc::new(SourceObject::from_bytes(test_data(100_000)));

    let report = run_harness(pipeline, object, HarnessConfig { runs: 4, workers: 2 })
        .await
        .unwrap();
    assert_eq!(report.objects, 4);
    assert_eq!(store.shards_discarded(), 4 * 256);
}
