// Path: crates/consensus/src/util.rs
use crate::DposEngine;
use anyhow::{bail, Result};
use dpos_types::config::DposConfig;

/// Checks `config` for values the engine cannot run with and builds the engine.
pub fn engine_from_config(config: &DposConfig) -> Result<DposEngine> {
    if config.max_signer_count == 0 {
        bail!("max_signer_count must be at least 1");
    }
    if config.coin_unit.is_zero() {
        bail!("coin_unit must be non-zero");
    }
    if config.scaled_proposal_deposit().is_none() {
        bail!(
            "proposal_deposit of {} coins overflows when scaled by coin_unit",
            config.proposal_deposit
        );
    }
    log::info!(
        "Initializing DPoS engine (max signers {}, side chain {}, pbft {}).",
        config.max_signer_count,
        config.side_chain,
        config.pbft
    );
    Ok(DposEngine::new(config.clone()))
}
