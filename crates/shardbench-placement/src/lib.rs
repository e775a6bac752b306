//! Deterministic shard placement across a fixed pool of simulated disks.
//!
//! Shard `i` of every object lands on `pool[i mod len(pool)]`. This is a
//! plain modulo rule, not a load-aware or consistent-hash assignment: every
//! object puts its shard 0 on the first disk. Spreading across the
//! namespace comes from the per-object [`Salt`], which picks a two-level
//! subdirectory under each disk.
//!
//! Everything here is pure. The only clock read is [`Salt::now`]; the
//! placement functions take the salt as an argument.

mod error;
mod pool;
mod salt;

pub use error::PlacementError;
pub use pool::{DEFAULT_DISKS, DiskPool, Placement, ShardLocation};
pub use salt::Salt;
