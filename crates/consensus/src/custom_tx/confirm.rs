// Path: crates/consensus/src/custom_tx/confirm.rs

//! Cross-references `confirm` commands against the confirmed block's header.

use crate::extra::decode_from_header;
use dpos_api::chain::ChainReader;
use dpos_types::app::{Address, Confirmation};
use dpos_types::config::DposConfig;
use dpos_types::error::CodecError;
use tracing::{debug, info};

/// Parses a block number written in decimal or as `0x`-prefixed hex.
pub fn parse_block_number(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u64::from_str_radix(digits, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Validates a confirmation of block `confirmed` by `confirmer`, submitted in
/// block `number`.
///
/// Returns `None` if the number does not parse, the confirmed block is in the
/// future or older than `max_signer_count` blocks, its header is unknown or
/// undecodable, or `confirmer` is not in its recorded signer queue.
pub fn check_confirmation(
    config: &DposConfig,
    chain: &dyn ChainReader,
    number: u64,
    confirmed: &str,
    confirmer: Address,
) -> Option<Confirmation> {
    let block_number = parse_block_number(confirmed)?;
    let age = number.checked_sub(block_number)?;
    if age > config.max_signer_count {
        return None;
    }

    let header = chain.header_by_number(block_number)?;
    let recorded = match decode_from_header(config, &header) {
        Ok(extra) => extra,
        Err(err @ CodecError::ExtraTooShort { .. }) => {
            debug!(target: "consensus", "Confirmed header {} has no extra payload: {}", block_number, err);
            return None;
        }
        Err(err) => {
            info!(target: "consensus", "Fail to decode confirmed header {}: {}", block_number, err);
            return None;
        }
    };

    recorded
        .signer_queue
        .contains(&confirmer)
        .then_some(Confirmation {
            signer: confirmer,
            block_number,
        })
}
