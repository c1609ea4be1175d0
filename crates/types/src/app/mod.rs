// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

/// Headers, transactions and receipts as seen by the engine.
pub mod chain;
/// The records accumulated into a block's header extra-data.
pub mod extra;
/// Gas refund bookkeeping for confirmation transactions.
pub mod refund;

pub use chain::*;
pub use extra::*;
pub use refund::*;

pub use primitive_types::{H160, H256, U256};

/// A 20-byte account address.
pub type Address = H160;

/// A 32-byte hash (transaction hash, block hash, side-chain id).
pub type Hash = H256;

/// Parses a `0x`-prefixed, fixed-width hex string into an [`Address`].
///
/// Returns `None` when the prefix is missing, the width is not exactly 40 hex
/// digits, or a digit is not hexadecimal.
pub fn parse_address(s: &str) -> Option<Address> {
    decode_fixed_hex::<20>(s).map(Address::from)
}

/// Parses a `0x`-prefixed, fixed-width hex string into a [`Hash`].
pub fn parse_hash(s: &str) -> Option<Hash> {
    decode_fixed_hex::<32>(s).map(Hash::from)
}

/// Formats a hash the way it appears inside command payloads: `0x` followed by
/// 64 lowercase hex digits.
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}

fn decode_fixed_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    if digits.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).ok()?;
    Some(out)
}
