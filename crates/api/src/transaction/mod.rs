// Path: crates/api/src/transaction/mod.rs
//! Defines the `SenderRecovery` trait.

use dpos_types::app::{Address, Transaction};
use dpos_types::error::ConsensusError;

/// Recovers the sending account of a signed transaction.
///
/// Implementations wrap the chain's signer scheme. A failure only skips the
/// transaction; it never aborts the block.
pub trait SenderRecovery: Send + Sync {
    /// Returns the sender of `tx`.
    fn sender(&self, tx: &Transaction) -> Result<Address, ConsensusError>;
}
