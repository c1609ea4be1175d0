// Path: crates/api/src/snapshot/mod.rs
//! Read-only access to the voting snapshot.
//!
//! Snapshot construction, signer-queue computation and persistence live outside
//! this workspace. The interpreter only needs two queries against the snapshot
//! of the parent block.

use dpos_types::app::{Address, Hash};
use dpos_types::error::StateError;
use std::sync::Arc;

/// Queries against a loaded snapshot.
pub trait SnapshotView: Send + Sync {
    /// Whether `address` currently holds a registered vote.
    fn is_voter(&self, address: &Address) -> bool;

    /// Whether a side chain with id `hash` is registered.
    fn is_side_chain_exist(&self, hash: &Hash) -> bool;
}

/// Loads the snapshot of a block.
pub trait SnapshotSource: Send + Sync {
    /// Loads the snapshot at block `number` with hash `hash`.
    ///
    /// Failure is fatal for the block being processed.
    fn snapshot(&self, number: u64, hash: &Hash) -> Result<Arc<dyn SnapshotView>, StateError>;
}
