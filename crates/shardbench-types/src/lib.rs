//! Shared types and identifiers for shardbench.
//!
//! This crate defines the small vocabulary used across the workspace:
//! the per-shard integrity digest ([`ShardDigest`]), the stat block of a
//! source object ([`ObjectStat`]), and the shard-count limits of the
//! GF(2^8) erasure code.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest number of data shards a single object may be split into.
pub const MAX_DATA_SHARDS: usize = 256;

/// Largest total shard count (data + parity) the GF(2^8) code supports.
pub const MAX_TOTAL_SHARDS: usize = 256;

/// Name of the hash algorithm recorded in sidecar checksums.
pub const DIGEST_ALGORITHM: &str = "blake3";

/// File name of a shard inside its location directory.
pub const PART_FILE: &str = "part.1";

/// File name of the metadata sidecar written next to every shard.
pub const SIDECAR_FILE: &str = "xl.json";

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Content digest of a single shard: `blake3(shard_data)`.
///
/// Used for post-write integrity verification only. Two shards of the same
/// object are hashed independently and never deduplicated against each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ShardDigest([u8; 32]);

impl ShardDigest {
    /// Hash arbitrary shard bytes with BLAKE3.
    pub fn from_data(data: &[u8]) -> Self {
        Self(blake3::hash(data).into())
    }

    /// Parse a 64-character hex string as produced by [`Display`](fmt::Display).
    ///
    /// Returns `None` for anything that is not exactly 32 hex-encoded bytes.
    pub fn from_hex(hex: &str) -> Option<Self> {
        blake3::Hash::from_hex(hex)
            .ok()
            .map(|hash| Self(*hash.as_bytes()))
    }

    /// Return the raw 32-byte representation.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for ShardDigest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ShardDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ShardDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ShardDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShardDigest({self})")
    }
}

// ---------------------------------------------------------------------------
// Source object stat
// ---------------------------------------------------------------------------

/// Size and modification time of the object being encoded.
///
/// Serialized as the `stat` block of every sidecar document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStat {
    /// Original (unpadded) object size in bytes.
    pub size: u64,
    /// Last modification time of the source.
    #[serde(rename = "modTime")]
    pub mod_time: DateTime<Utc>,
}

impl ObjectStat {
    /// Stat block for an in-memory object modified "now".
    pub fn now(size: u64) -> Self {
        Self {
            size,
            mod_time: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
