// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all consensus-critical state.
//!
//! This module provides thin wrappers around `parity-scale-codec` (SCALE). Every
//! validator must produce byte-identical header extra-data for the same block, so
//! all components go through these two functions instead of calling the codec
//! directly.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
///
/// This function should be used for all data that is written into a block header
/// or otherwise replicated between validators.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from its canonical SCALE byte representation.
///
/// Decoding fails on truncated input and on trailing bytes, so a blob either maps
/// to exactly one value or to an error.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
