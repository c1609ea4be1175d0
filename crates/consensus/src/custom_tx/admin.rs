// Path: crates/consensus/src/custom_tx/admin.rs

//! Signer-admin operations on the candidate signer set and reward parameters.

use dpos_types::app::{Address, U256};
use tracing::{trace, warn};

/// Direction of a candidate-signer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerOp {
    /// `adds`
    Add,
    /// `dels`
    Del,
}

/// Returns the candidate signer set after applying `op` for `target`.
///
/// Deleting keeps the set non-empty. Adding a present signer is a warned no-op,
/// and adding to a set that already holds `max_signers` entries is refused.
pub fn process_admin_signer(
    signers: &[Address],
    op: SignerOp,
    target: Address,
    max_signers: u64,
) -> Vec<Address> {
    let mut next = Vec::with_capacity(signers.len() + 1);
    let mut repeated = false;

    for signer in signers {
        if *signer == target {
            if op == SignerOp::Del && signers.len() > 1 {
                trace!(target: "consensus", "Delete signer {:?}", target);
                continue;
            }
            if op == SignerOp::Add {
                warn!(target: "consensus", "Repeated signer {:?}", target);
                repeated = true;
            }
        }
        next.push(*signer);
    }

    if !repeated && op == SignerOp::Add && (next.len() as u64) < max_signers {
        trace!(target: "consensus", "Add signer {:?}", target);
        next.push(target);
    }
    next
}

/// Parses a per-block reward written as a base-10 integer.
pub fn parse_block_reward(text: &str) -> Option<U256> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        warn!(target: "consensus", "Invalid per-block reward {:?}", text);
        return None;
    }
    U256::from_dec_str(text).ok()
}

/// Parses a miner reward ratio written as a non-negative integer.
pub fn parse_miner_ratio(text: &str) -> Option<u64> {
    match text.parse() {
        Ok(ratio) => Some(ratio),
        Err(e) => {
            warn!(target: "consensus", "Invalid miner ratio {:?}: {}", text, e);
            None
        }
    }
}
