//! The per-object metadata record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shardbench_erasure::{ALGORITHM, ErasureParams};
use shardbench_types::{DIGEST_ALGORITHM, MAX_TOTAL_SHARDS, ObjectStat, PART_FILE, ShardDigest};
use tracing::debug;

use crate::error::MetaError;

/// Document version written into every sidecar.
pub const META_VERSION: &str = "1.0.0";

/// Document format tag written into every sidecar.
pub const META_FORMAT: &str = "xl";

/// Self-describing metadata for one erasure-coded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Document version ([`META_VERSION`]).
    pub version: String,
    /// Document format ([`META_FORMAT`]).
    pub format: String,
    /// Size and modification time of the source object.
    pub stat: ObjectStat,
    /// Codec parameters, distribution, and per-shard checksums.
    pub erasure: ErasureInfo,
    /// Object parts. Always a single part covering the whole object.
    pub parts: Vec<PartInfo>,
}

/// The `erasure` block of a sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErasureInfo {
    /// Erasure code identifier ([`shardbench_erasure::ALGORITHM`]).
    pub algorithm: String,
    /// Number of data shards.
    pub data: usize,
    /// Number of parity shards.
    pub parity: usize,
    /// Configured erasure block size in bytes.
    pub block_size: u64,
    /// Actual length of every shard of this object.
    pub shard_size: u64,
    /// Index of the shard this sidecar sits next to.
    pub index: u8,
    /// Position → shard index.
    pub distribution: Vec<u8>,
    /// Digest of every shard, ordered by shard index.
    pub checksum: Vec<ChecksumInfo>,
}

/// Digest entry for one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumInfo {
    /// File name of the shard inside its directory.
    pub name: String,
    /// Shard index this digest belongs to.
    pub index: u8,
    /// Hash algorithm ([`shardbench_types::DIGEST_ALGORITHM`]).
    pub algorithm: String,
    /// Hex-encoded digest.
    pub hash: String,
}

/// One object part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// 1-based part number.
    pub number: u32,
    /// Part file name.
    pub name: String,
    /// Entity tag; empty, nothing computes one.
    pub etag: String,
    /// Part size in bytes.
    pub size: u64,
}

/// Compose the metadata record of one object.
///
/// `digests[i]` must be the digest of shard `i`; there must be exactly
/// `data + parity` of them. The distribution is the full enumeration of
/// shard indices, matching the sequential per-index placement. The record
/// is created with `erasure.index = 0`; [`ObjectMetadata::sidecar`] sets
/// the index per shard.
pub fn compose(
    params: &ErasureParams,
    block_size: u64,
    shard_size: usize,
    stat: ObjectStat,
    digests: &[ShardDigest],
) -> Result<ObjectMetadata, MetaError> {
    if digests.len() != params.total() {
        return Err(MetaError::ShardCountMismatch {
            expected: params.total(),
            got: digests.len(),
        });
    }

    let checksum = digests
        .iter()
        .enumerate()
        .map(|(i, digest)| ChecksumInfo {
            name: PART_FILE.to_string(),
            index: i as u8,
            algorithm: DIGEST_ALGORITHM.to_string(),
            hash: digest.to_string(),
        })
        .collect();

    let metadata = ObjectMetadata {
        version: META_VERSION.to_string(),
        format: META_FORMAT.to_string(),
        stat,
        erasure: ErasureInfo {
            algorithm: ALGORITHM.to_string(),
            data: params.data(),
            parity: params.parity(),
            block_size,
            shard_size: shard_size as u64,
            index: 0,
            distribution: (0..params.total()).map(|i| i as u8).collect(),
            checksum,
        },
        parts: vec![PartInfo {
            number: 1,
            name: PART_FILE.to_string(),
            etag: String::new(),
            size: stat.size,
        }],
    };

    debug!(
        data = params.data(),
        parity = params.parity(),
        size = stat.size,
        "composed object metadata"
    );

    Ok(metadata)
}

impl ObjectMetadata {
    /// Serialize the sidecar document for shard `index`.
    pub fn sidecar(&self, index: u8) -> Result<Vec<u8>, MetaError> {
        let mut doc = self.clone();
        doc.erasure.index = index;
        Ok(serde_json::to_vec(&doc)?)
    }

    /// Parse and validate a sidecar document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, MetaError> {
        let metadata: ObjectMetadata = serde_json::from_slice(bytes)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Total shard count recorded in the document.
    ///
    /// Saturates instead of overflowing on hostile counts; [`validate`](Self::validate)
    /// rejects anything above the field limit.
    pub fn total_shards(&self) -> usize {
        self.erasure.data.saturating_add(self.erasure.parity)
    }

    /// The recorded digest of shard `index`, if present and well formed.
    pub fn checksum_for(&self, index: u8) -> Option<ShardDigest> {
        self.erasure
            .checksum
            .iter()
            .find(|c| c.index == index)
            .and_then(|c| ShardDigest::from_hex(&c.hash))
    }

    /// Check that the document is internally consistent.
    ///
    /// The version and format must be the ones this crate writes, the
    /// distribution must be a permutation of `0..data+parity`, and there must
    /// be exactly one well-formed checksum per shard.
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.version != META_VERSION {
            return Err(MetaError::Unsupported {
                field: "version",
                found: self.version.clone(),
                expected: META_VERSION,
            });
        }
        if self.format != META_FORMAT {
            return Err(MetaError::Unsupported {
                field: "format",
                found: self.format.clone(),
                expected: META_FORMAT,
            });
        }

        let erasure = &self.erasure;
        let total = self.total_shards();
        if erasure.data == 0 || total > MAX_TOTAL_SHARDS {
            return Err(MetaError::Inconsistent(format!(
                "unsupported shard counts data={} parity={}",
                erasure.data, erasure.parity
            )));
        }
        if erasure.index as usize >= total {
            return Err(MetaError::Inconsistent(format!(
                "shard index {} out of range for {total} shards",
                erasure.index
            )));
        }

        if erasure.distribution.len() != total {
            return Err(MetaError::Inconsistent(format!(
                "distribution has {} entries, expected {total}",
                erasure.distribution.len()
            )));
        }
        if !is_permutation(&erasure.distribution, total) {
            return Err(MetaError::Inconsistent(
                "distribution is not a permutation of shard indices".to_string(),
            ));
        }

        if erasure.checksum.len() != total {
            return Err(MetaError::Inconsistent(format!(
                "{} checksums for {total} shards",
                erasure.checksum.len()
            )));
        }
        let indices: Vec<u8> = erasure.checksum.iter().map(|c| c.index).collect();
        if !is_permutation(&indices, total) {
            return Err(MetaError::Inconsistent(
                "checksums do not cover every shard exactly once".to_string(),
            ));
        }
        if let Some(bad) = erasure
            .checksum
            .iter()
            .find(|c| ShardDigest::from_hex(&c.hash).is_none())
        {
            return Err(MetaError::Inconsistent(format!(
                "malformed checksum for shard {}",
                bad.index
            )));
        }

        Ok(())
    }
}

/// `true` if `values` contains every integer in `0..total` exactly once.
fn is_permutation(values: &[u8], total: usize) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.len() == total
        && values
            .iter()
            .all(|&v| (v as usize) < total && seen.insert(v))
}
