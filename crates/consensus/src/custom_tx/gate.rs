// Path: crates/consensus/src/custom_tx/gate.rs

//! Deposit and fee check for proposals.

use dpos_api::snapshot::SnapshotView;
use dpos_api::state::BalanceOverlay;
use dpos_types::app::{Address, Proposal, ProposalType, U256};
use dpos_types::config::DposConfig;
use dpos_types::error::StateError;
use tracing::trace;

/// A balance debit decided for a proposal, applied when the proposal is folded
/// into the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debit {
    /// The paying account.
    pub account: Address,
    /// Its balance after paying.
    pub remaining: U256,
}

/// The total a proposal costs its proposer, or `None` if the proposal is not
/// admissible at any price.
///
/// Every proposal pays the scaled deposit. Renting a side chain additionally
/// requires a registered side chain and a non-zero gas target, and pays the
/// rent fee.
pub fn proposal_cost(
    config: &DposConfig,
    proposal: &Proposal,
    snapshot: Option<&dyn SnapshotView>,
) -> Option<U256> {
    let deposit = config.scaled_proposal_deposit()?;
    if proposal.proposal_type != ProposalType::RentSideChain {
        return Some(deposit);
    }
    if !snapshot.is_some_and(|snap| snap.is_side_chain_exist(&proposal.sc_hash)) {
        trace!(target: "consensus", "Rent proposal for unknown side chain {:?}", proposal.sc_hash);
        return None;
    }
    if proposal.target_address.is_zero() {
        return None;
    }
    let fee = config.to_base_units(proposal.sc_rent_fee)?;
    deposit.checked_add(fee)
}

/// Checks the proposer can pay and returns the resulting debit.
///
/// `Ok(None)` drops the proposal. Errors only come from reading the balance.
pub fn charge(
    config: &DposConfig,
    proposal: &Proposal,
    snapshot: Option<&dyn SnapshotView>,
    overlay: &BalanceOverlay<'_>,
) -> Result<Option<Debit>, StateError> {
    let Some(cost) = proposal_cost(config, proposal, snapshot) else {
        return Ok(None);
    };
    let balance = overlay.balance(&proposal.proposer)?;
    Ok(balance.checked_sub(cost).map(|remaining| Debit {
        account: proposal.proposer,
        remaining,
    }))
}
