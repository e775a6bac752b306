//! Full single-object write path against real files.
//!
//! Connects shardbench-erasure + shardbench-placement + shardbench-meta +
//! shardbench-store through the engine pipeline and checks what lands on
//! disk.

use shardbench_engine::SourceObject;
use shardbench_erasure::{ErasureCodec, ErasureParams};
use shardbench_integration_tests::{DISKS, DiskBench, test_data, test_data_seeded};
use shardbench_meta::ObjectMetadata;
use shardbench_placement::Salt;
use shardbench_types::ShardDigest;

#[tokio::test]
async fn test_shard_files_match_sidecar_checksums() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&DISKS, 4, 2, true);
    let object = SourceObject::from_bytes(test_data(525_968));

    let report = pipeline.encode_object(&object, "output-0-0").await.unwrap();

    for location in &report.locations {
        let leaf = bench.root().join(&location.dir);
        let shard = std::fs::read(leaf.join("part.1")).unwrap();
        let sidecar = ObjectMetadata::from_json(&std::fs::read(leaf.join("xl.json")).unwrap()).unwrap();

        assert_eq!(shard.len(), 131_492);
        assert_eq!(sidecar.erasure.index, location.index);
        assert_eq!(sidecar.erasure.shard_size, 131_492);
        assert_eq!(sidecar.stat.size, 525_968);
        assert_eq!(
            sidecar.checksum_for(location.index),
            Some(ShardDigest::from_data(&shard))
        );
    }
}

#[tokio::test]
async fn test_sidecar_document_shape() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&DISKS, 4, 2, false);
    let object = SourceObject::from_bytes(test_data(1_000));

    let report = pipeline.encode_object(&object, "shape").await.unwrap();
    let leaf = bench.root().join(&report.locations[5].dir);
    let raw = std::fs::read(leaf.join("xl.json")).unwrap();
    let text = String::from_utf8(raw).unwrap();

    for key in [
        "\"version\":\"1.0.0\"",
        "\"format\":\"xl\"",
        "\"modTime\"",
        "\"algorithm\":\"klauspost/reedsolomon/vandermonde\"",
        "\"blockSize\":10485760",
        "\"shardSize\":250",
        "\"index\":5",
        "\"distribution\":[0,1,2,3,4,5]",
        "\"algorithm\":\"blake3\"",
        "\"name\":\"part.1\"",
    ] {
        assert!(text.contains(key), "missing {key} in {text}");
    }
}

#[tokio::test]
async fn test_layout_uses_salt_and_object_name() {
    let bench = DiskBench::new();
    let pipeline = bench.file_pipeline(&DISKS, 4, 2, false);
    let object = SourceObject::from_bytes(test_data(64));
    let salt = Salt::from_nanos(1_493_082_579_173_066_169);

    pipeline
        .encode_object_with_salt(&object, "output-3-9", salt)
        .await
        .unwrap();

    for (i, disk) in DISKS.iter().take(6).enumerate() {
        let leaf = bench
            .root()
            .join(disk)
            .join(format!("disk{}", i + 1))
            .join("9b")
            .join("54fefe1be78b41")
            .join("output-3-9");
        assert!(leaf.join("part.1").is_file(), "missing {}", leaf.display());
    }
    // Disks seven and eight are unused by a 6-shard object.
    assert!(!bench.root().join("sdk1").exists());
    assert!(!bench.root().join("sdl1").exists());
}

#[tokio::test]
async fn test_determinism_525968_bytes() {
    let data = test_data_seeded(525_968, 42);
    let codec = ErasureCodec::new(ErasureParams::new(4, 2).unwrap()).unwrap();

    let first = codec.encode(&data).unwrap();
    let second = codec.encode(&data).unwrap();
    assert_eq!(first.shards.len(), 6);
    assert_eq!(first.shards, second.shards);

    // Data shards are the object itself, in order.
    let joined: Vec<u8> = first.shards[..4]
        .iter()
        .flat_map(|s| s.data.iter().copied())
        .collect();
    assert_eq!(&joined[..data.len()], &data[..]);
}

#[tokio::test]
async fn test_read_source_from_disk() {
    let bench = DiskBench::new();
    let input = bench.root().join("input.bin");
    std::fs::write(&input, test_data(9_999)).unwrap();

    let object = SourceObject::read(&input).await.unwrap();
    let pipeline = bench.file_pipeline(&["d1", "d2", "d3"], 3, 1, true);
    let report = pipeline.encode_object(&object, "from-file").await.unwrap();

    assert_eq!(report.metadata.stat, object.stat());
    assert_eq!(report.metadata.erasure.shard_size, 3_333);
    assert_eq!(bench.files_named("part.1").len(), 4);
}
