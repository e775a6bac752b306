//! Error types for placement configuration.

/// Errors raised while building a disk pool.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// The pool has no disks.
    #[error("disk pool is empty")]
    EmptyPool,

    /// A disk name is not usable as a single path segment.
    #[error("invalid disk name {0:?}: must be a non-empty single path segment")]
    InvalidDiskName(String),

    /// The same disk name appears twice in the pool.
    #[error("duplicate disk name {0:?} in pool")]
    DuplicateDisk(String),
}
