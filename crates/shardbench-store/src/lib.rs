//! Shard storage trait and backend implementations.
//!
//! This crate defines the [`VolumeStore`] trait for persisting a shard and
//! its metadata sidecar at a placement location, along with three backends:
//!
//! - [`FileStore`]: writes `part.1` and `xl.json` under a mount root.
//! - [`MemoryStore`]: keeps every written file in a `RwLock<HashMap>`.
//! - [`DiscardStore`]: drops everything; backs the skip-disk mode.

mod discard_store;
mod error;
mod file_store;
mod memory_store;
mod traits;

pub use discard_store::DiscardStore;
pub use error::StoreError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::VolumeStore;
