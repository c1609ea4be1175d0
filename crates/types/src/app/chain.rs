// Path: crates/types/src/app/chain.rs

//! The subset of chain data the custom-transaction interpreter reads.

use super::{Address, Hash, U256};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A block header. Only the fields the engine consults are modelled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode, Default)]
pub struct Header {
    /// The block height.
    pub number: u64,
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Block timestamp in seconds.
    pub time: u64,
    /// Raw extra-data: vanity, encoded `HeaderExtra`, seal.
    pub extra: Vec<u8>,
}

/// A signed transaction as included in a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode, Default)]
pub struct Transaction {
    /// Transaction hash, also used as proposal id and refund key.
    pub hash: Hash,
    /// Recipient. `None` for contract creation.
    pub to: Option<Address>,
    /// Transferred value.
    pub value: U256,
    /// Gas price offered by the sender.
    pub gas_price: U256,
    /// Call data. Governance commands are carried here as ASCII text.
    pub data: Vec<u8>,
    /// Opaque signature bytes, interpreted by a `SenderRecovery` implementation.
    pub signature: Vec<u8>,
}

impl Transaction {
    /// Returns the payload as text, or `None` when it is not valid UTF-8.
    pub fn payload_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// The execution receipt of a transaction, used for refund settlement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode, Default)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub tx_hash: Hash,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
}
