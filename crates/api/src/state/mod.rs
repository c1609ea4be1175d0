// Path: crates/api/src/state/mod.rs
//! Account balances behind the engine.
//!
//! - `BalanceState`: the world-state operations the interpreter needs.
//! - `SharedBalances`: the handle through which a block reads and finally writes
//!   balances. Each query takes its own read lock.
//! - `BalanceOverlay`: stages debits made while a block is processed so they can
//!   be committed under a single write lock, or dropped.

use dpos_types::app::{Address, U256};
use dpos_types::error::StateError;
use std::sync::{Arc, RwLock};

mod overlay;

pub use overlay::*;

/// World-state balance operations.
pub trait BalanceState: Send + Sync {
    /// Returns the balance of `address`. Unknown accounts have a zero balance.
    fn balance(&self, address: &Address) -> Result<U256, StateError>;

    /// Sets the balance of `address`.
    fn set_balance(&mut self, address: Address, value: U256) -> Result<(), StateError>;

    /// Sets several balances in one batch.
    fn batch_set_balances(&mut self, updates: &[(Address, U256)]) -> Result<(), StateError> {
        for (address, value) in updates {
            self.set_balance(*address, *value)?;
        }
        Ok(())
    }
}

// Blanket implementation to allow `BalanceState` to be used behind a `Box` trait object.
impl<T: BalanceState + ?Sized> BalanceState for Box<T> {
    fn balance(&self, address: &Address) -> Result<U256, StateError> {
        (**self).balance(address)
    }

    fn set_balance(&mut self, address: Address, value: U256) -> Result<(), StateError> {
        (**self).set_balance(address, value)
    }

    fn batch_set_balances(&mut self, updates: &[(Address, U256)]) -> Result<(), StateError> {
        (**self).batch_set_balances(updates)
    }
}

/// A shared, lock-guarded handle to the world state.
pub type SharedBalances = Arc<RwLock<dyn BalanceState>>;

/// Reads one balance under its own read lock.
pub fn read_balance(state: &SharedBalances, address: &Address) -> Result<U256, StateError> {
    let guard = state
        .read()
        .map_err(|e| StateError::LockPoisoned(e.to_string()))?;
    guard.balance(address)
}
