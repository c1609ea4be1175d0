// Path: crates/consensus/src/custom_tx/sc.rs

//! Side-chain commands: loop confirmations and coinbase assignments.

use super::command::{DPOS_PREFIX, DPOS_VERSION};
use super::confirm::parse_block_number;
use dpos_types::app::{hash_to_hex, parse_hash, Address, Hash, SCConfirmation, SCSetCoinbase, Transaction};
use dpos_types::config::DposConfig;
use tracing::trace;

const LOOP_INFO_SEPARATOR: char = '#';

/// Builds the payload a side-chain signer submits to the main chain to confirm
/// side-chain block `number`.
pub fn build_sc_event_confirm_data(
    sc_hash: &Hash,
    number: u64,
    time: u64,
    loop_info: &str,
    charging_info: &str,
) -> String {
    format!(
        "{}:{}:sc:confirm:{}:{}:{}:{}:{}",
        DPOS_PREFIX,
        DPOS_VERSION,
        hash_to_hex(sc_hash),
        number,
        time,
        loop_info,
        charging_info
    )
}

/// A validated side-chain confirmation, plus the notice confirmation carried by
/// a non-empty charging info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScConfirm {
    /// The loop confirmation.
    pub confirmation: SCConfirmation,
    /// The charging notice confirmation, if any.
    pub notice: Option<SCConfirmation>,
}

/// Validates an `sc:confirm` command sent by `coinbase`.
pub fn check_sc_confirmation(
    hash: &str,
    number: &str,
    loop_info: &str,
    charging_info: &str,
    coinbase: Address,
) -> Option<ScConfirm> {
    let hash = parse_hash(hash)?;
    let number = parse_block_number(number)?;
    let confirmation = SCConfirmation {
        hash,
        coinbase,
        number,
        loop_info: split_info(loop_info),
    };
    let notice = (!charging_info.is_empty()).then(|| SCConfirmation {
        hash,
        coinbase,
        number,
        loop_info: split_info(charging_info),
    });
    Some(ScConfirm {
        confirmation,
        notice,
    })
}

fn split_info(info: &str) -> Vec<String> {
    info.split(LOOP_INFO_SEPARATOR).map(str::to_owned).collect()
}

/// Validates an `event:setcb` command. The recipient becomes the signer's
/// coinbase on the side chain; the value sent must reach
/// `min_sc_set_coinbase_value`.
pub fn check_set_coinbase(
    config: &DposConfig,
    sc_hash: &str,
    tx: &Transaction,
    signer: Address,
) -> Option<SCSetCoinbase> {
    let coinbase = tx.to?;
    if tx.value < config.min_sc_set_coinbase_value {
        trace!(target: "consensus", "Set coinbase value {} below minimum", tx.value);
        return None;
    }
    Some(SCSetCoinbase {
        hash: parse_hash(sc_hash)?,
        signer,
        coinbase,
    })
}
