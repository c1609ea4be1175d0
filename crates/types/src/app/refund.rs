// Path: crates/types/src/app/refund.rs

//! Gas refund bookkeeping.
//!
//! Confirmation transactions (main-chain and side-chain) have their gas refunded.
//! While a block is processed only the transaction identity is recorded in a
//! [`RefundHash`]; the amounts land in a [`RefundGas`] once receipts are known.

use super::{Address, Hash, U256};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated refund per account. Inserting an existing key adds to it.
pub type RefundGas = BTreeMap<Address, U256>;

/// Refund-eligible transactions, keyed by transaction hash.
pub type RefundHash = BTreeMap<Hash, RefundPair>;

/// Who gets refunded for a transaction, and at what gas price.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefundPair {
    /// The transaction sender.
    pub sender: Address,
    /// The gas price the sender paid.
    pub gas_price: U256,
}

/// Adds `value` to the refund owed to `address`.
pub fn refund_add_gas(refund_gas: &mut RefundGas, address: Address, value: U256) {
    let entry = refund_gas.entry(address).or_default();
    *entry = entry.saturating_add(value);
}
