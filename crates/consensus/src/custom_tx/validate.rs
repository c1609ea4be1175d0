// Path: crates/consensus/src/custom_tx/validate.rs

//! Per-key validators for `proposal` and `declare` commands.
//!
//! Each validator writes into a local draft. A single failing known key rejects
//! the whole command; unknown keys are skipped.

use dpos_types::app::{
    parse_address, parse_hash, Address, Declare, Hash, Proposal, ProposalType,
};
use dpos_types::config::DposConfig;
use tracing::trace;

/// Smallest accepted `vlcnt`.
pub const MIN_VALIDATION_LOOP_CNT: u64 = 4;
/// Largest accepted `vlcnt`.
pub const MAX_VALIDATION_LOOP_CNT: u64 = 50_000;
/// `vlcnt` when the key is absent.
pub const DEFAULT_VALIDATION_LOOP_CNT: u64 = 10_000;
/// Largest accepted `mpd`, in whole coins.
pub const MAX_PROPOSAL_DEPOSIT: u64 = 100_000;
/// Smallest accepted `scrf`, in whole coins.
pub const MIN_SC_RENT_FEE: u64 = 100;
/// Smallest accepted `scrl`, in blocks.
pub const MIN_SC_RENT_LENGTH: u64 = 850_000;
/// `scrl` when the key is absent.
pub const DEFAULT_SC_RENT_LENGTH: u64 = MIN_SC_RENT_LENGTH * 3;
/// Largest accepted `scrl`, in blocks.
pub const MAX_SC_RENT_LENGTH: u64 = DEFAULT_SC_RENT_LENGTH * 4;

/// A proposal with every field at its default, before any key is applied.
///
/// Returns `None` if the configured deposit cannot be scaled to base units.
pub fn proposal_draft(
    config: &DposConfig,
    hash: Hash,
    proposer: Address,
    number: u64,
) -> Option<Proposal> {
    Some(Proposal {
        hash,
        received_number: number,
        current_deposit: config.scaled_proposal_deposit()?,
        validation_loop_cnt: DEFAULT_VALIDATION_LOOP_CNT,
        proposal_type: ProposalType::CandidateAdd,
        proposer,
        target_address: Address::zero(),
        miner_reward_per_thousand: config.miner_reward_per_thousand,
        sc_hash: Hash::zero(),
        sc_block_count_per_period: 1,
        sc_block_reward_per_period: 0,
        declares: Vec::new(),
        min_voter_balance: config.min_voter_balance,
        proposal_deposit: config.proposal_deposit,
        sc_rent_fee: 0,
        sc_rent_rate: 1,
        sc_rent_length: DEFAULT_SC_RENT_LENGTH,
    })
}

/// Applies every key/value pair to a fresh draft. `None` rejects the command.
pub fn build_proposal(
    config: &DposConfig,
    hash: Hash,
    proposer: Address,
    number: u64,
    pairs: &[(&str, &str)],
) -> Option<Proposal> {
    let mut proposal = proposal_draft(config, hash, proposer, number)?;
    for (key, value) in pairs {
        if apply_proposal_field(&mut proposal, key, value).is_none() {
            trace!(target: "consensus", "Rejected proposal field {}={}", key, value);
            return None;
        }
    }
    Some(proposal)
}

fn apply_proposal_field(proposal: &mut Proposal, key: &str, value: &str) -> Option<()> {
    match key {
        "vlcnt" => {
            proposal.validation_loop_cnt =
                parse_in_range(value, MIN_VALIDATION_LOOP_CNT, MAX_VALIDATION_LOOP_CNT)?;
        }
        "schash" => proposal.sc_hash = parse_hash(value)?,
        "sccount" => proposal.sc_block_count_per_period = parse_u64(value)?,
        "screward" => proposal.sc_block_reward_per_period = parse_u64(value)?,
        "proposal_type" => {
            proposal.proposal_type = ProposalType::from_code(parse_u64(value)?)?;
        }
        "candidate" | "scrt" => proposal.target_address = parse_address(value)?,
        "mrpt" => proposal.miner_reward_per_thousand = parse_in_range(value, 1, 1000)?,
        "mvb" => proposal.min_voter_balance = parse_in_range(value, 1, u64::MAX)?,
        "mpd" => proposal.proposal_deposit = parse_in_range(value, 1, MAX_PROPOSAL_DEPOSIT)?,
        "scrf" => proposal.sc_rent_fee = parse_in_range(value, MIN_SC_RENT_FEE, u64::MAX)?,
        "scrr" => proposal.sc_rent_rate = parse_in_range(value, 1, u64::MAX)?,
        "scrl" => {
            proposal.sc_rent_length =
                parse_in_range(value, MIN_SC_RENT_LENGTH, MAX_SC_RENT_LENGTH)?;
        }
        _ => {}
    }
    Some(())
}

/// Builds a declaration, defaulting to a yes decision. `None` rejects the command.
pub fn build_declare(declarer: Address, pairs: &[(&str, &str)]) -> Option<Declare> {
    let mut declare = Declare {
        proposal_hash: Hash::zero(),
        declarer,
        decision: true,
    };
    for (key, value) in pairs {
        match *key {
            "hash" => declare.proposal_hash = parse_hash(value)?,
            "decision" => {
                declare.decision = match *value {
                    "yes" => true,
                    "no" => false,
                    _ => return None,
                }
            }
            _ => {}
        }
    }
    Some(declare)
}

/// Parses a non-negative decimal integer.
pub fn parse_u64(value: &str) -> Option<u64> {
    value.parse().ok()
}

fn parse_in_range(value: &str, min: u64, max: u64) -> Option<u64> {
    parse_u64(value).filter(|v| (min..=max).contains(v))
}
