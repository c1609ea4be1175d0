// Path: crates/api/src/state/overlay.rs

//! A copy-on-write balance overlay for block processing.

use super::{read_balance, SharedBalances};
use dpos_types::app::{Address, U256};
use dpos_types::error::StateError;
use std::collections::BTreeMap;

/// A batch of balance updates, ordered by address.
pub type BalanceChangeSet = Vec<(Address, U256)>;

/// An in-memory, copy-on-write overlay over [`SharedBalances`].
///
/// Reads are first checked against the local `writes` cache. If an account is
/// not found, the read is passed through to the shared state under a read lock.
/// Writes are captured locally and do not touch the shared state until
/// [`BalanceOverlay::commit`].
#[derive(Clone)]
pub struct BalanceOverlay<'a> {
    base: &'a SharedBalances,
    writes: BTreeMap<Address, U256>, // BTreeMap for deterministic commit order.
}

impl<'a> BalanceOverlay<'a> {
    /// Creates a new, empty overlay on top of the shared state.
    pub fn new(base: &'a SharedBalances) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Returns the balance of `address` as seen by this block so far.
    pub fn balance(&self, address: &Address) -> Result<U256, StateError> {
        match self.writes.get(address) {
            Some(value) => Ok(*value),
            None => read_balance(self.base, address),
        }
    }

    /// Stages a new balance for `address`.
    pub fn set_balance(&mut self, address: Address, value: U256) {
        self.writes.insert(address, value);
    }

    /// Whether any write is staged.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay and returns its writes in a deterministic order.
    pub fn into_ordered_batch(self) -> BalanceChangeSet {
        self.writes.into_iter().collect()
    }

    /// Writes every staged balance to the shared state under one write lock.
    pub fn commit(self) -> Result<(), StateError> {
        if self.is_empty() {
            return Ok(());
        }
        let base = self.base;
        let batch = self.into_ordered_batch();
        let mut guard = base
            .write()
            .map_err(|e| StateError::LockPoisoned(e.to_string()))?;
        guard.batch_set_balances(&batch)?;
        log::debug!("Committed {} staged balance updates", batch.len());
        Ok(())
    }
}
