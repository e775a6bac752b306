//! The source object being encoded.

use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use shardbench_types::ObjectStat;
use tracing::debug;

use crate::error::EngineError;

/// An immutable object to encode, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct SourceObject {
    data: Bytes,
    stat: ObjectStat,
}

impl SourceObject {
    /// Read an object and its modification time from a file.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let input_err = |source| EngineError::InputRead {
            path: path.to_path_buf(),
            source,
        };

        let data = tokio::fs::read(path).await.map_err(input_err)?;
        let metadata = tokio::fs::metadata(path).await.map_err(input_err)?;
        let mod_time = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        debug!(path = %path.display(), size = data.len(), "read source object");

        Ok(Self {
            stat: ObjectStat {
                size: data.len() as u64,
                mod_time,
            },
            data: Bytes::from(data),
        })
    }

    /// Wrap bytes with an explicit stat block.
    pub fn new(data: impl Into<Bytes>, stat: ObjectStat) -> Self {
        Self {
            data: data.into(),
            stat,
        }
    }

    /// Wrap in-memory bytes, stamped with the current time.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let stat = ObjectStat::now(data.len() as u64);
        Self { data, stat }
    }

    /// The object bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The object's stat block.
    pub fn stat(&self) -> ObjectStat {
        self.stat
    }

    /// Object size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` for an empty object.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
