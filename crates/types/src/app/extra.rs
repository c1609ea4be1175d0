// Path: crates/types/src/app/extra.rs

//! Records carried in a block header's extra-data.
//!
//! Everything in this module is part of replicated consensus state. Field order
//! matters: it fixes the canonical SCALE encoding, so fields may only ever be
//! appended through a new codec version.

use super::{Address, Hash, U256};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A vote for a candidate block producer.
///
/// Created from `dpos:1:event:vote`. The sender is the voter and the recipient
/// is the candidate. `stake` is the voter's balance when the vote was processed.
/// Predecessor re-assertions carry a zero candidate.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Vote {
    /// The voting account.
    pub voter: Address,
    /// The candidate voted for, zero for a stake re-assertion.
    pub candidate: Address,
    /// Balance of the voter at processing time.
    pub stake: U256,
}

/// A signer confirming an earlier block, from `dpos:1:event:confirm:<number>`.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Confirmation {
    /// The confirming signer.
    pub signer: Address,
    /// Number of the confirmed block.
    pub block_number: u64,
}

/// The kind of change a proposal asks for.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalType {
    /// Add a candidate to the candidate set.
    #[default]
    #[codec(index = 1)]
    CandidateAdd,
    /// Remove a candidate from the candidate set.
    #[codec(index = 2)]
    CandidateRemove,
    /// Change the miner share of the block reward (per thousand).
    #[codec(index = 3)]
    MinerRewardDistributionModify,
    /// Register a side chain.
    #[codec(index = 4)]
    SideChainAdd,
    /// Deregister a side chain.
    #[codec(index = 5)]
    SideChainRemove,
    /// Change the minimum balance a voter must hold.
    #[codec(index = 6)]
    MinVoterBalanceModify,
    /// Change the deposit required to submit a proposal.
    #[codec(index = 7)]
    ProposalDepositModify,
    /// Pay main-chain coin for gas on a side chain.
    #[codec(index = 8)]
    RentSideChain,
}

impl ProposalType {
    /// Maps the numeric code used on the wire to a proposal type.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::CandidateAdd),
            2 => Some(Self::CandidateRemove),
            3 => Some(Self::MinerRewardDistributionModify),
            4 => Some(Self::SideChainAdd),
            5 => Some(Self::SideChainRemove),
            6 => Some(Self::MinVoterBalanceModify),
            7 => Some(Self::ProposalDepositModify),
            8 => Some(Self::RentSideChain),
            _ => None,
        }
    }

    /// The numeric code used on the wire.
    pub fn code(self) -> u64 {
        match self {
            Self::CandidateAdd => 1,
            Self::CandidateRemove => 2,
            Self::MinerRewardDistributionModify => 3,
            Self::SideChainAdd => 4,
            Self::SideChainRemove => 5,
            Self::MinVoterBalanceModify => 6,
            Self::ProposalDepositModify => 7,
            Self::RentSideChain => 8,
        }
    }
}

/// A governance proposal, from `dpos:1:event:proposal:<key>:<value>...`.
///
/// The transaction hash doubles as the proposal id. Whole-coin fields
/// (`min_voter_balance`, `proposal_deposit`, `sc_rent_fee`) are not scaled by the
/// coin unit; `current_deposit` is.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Proposal {
    /// Hash of the submitting transaction.
    pub hash: Hash,
    /// Block number the proposal was received in.
    pub received_number: u64,
    /// Deposit locked for this proposal.
    pub current_deposit: U256,
    /// Number of signer loops the proposal stays open for.
    pub validation_loop_cnt: u64,
    /// What the proposal changes.
    pub proposal_type: ProposalType,
    /// The submitting account.
    pub proposer: Address,
    /// Candidate to add/remove, or the side-chain gas target for a rent.
    pub target_address: Address,
    /// Miner share of the block reward, per thousand.
    pub miner_reward_per_thousand: u64,
    /// Side chain the proposal refers to.
    pub sc_hash: Hash,
    /// Blocks a side chain seals per period.
    pub sc_block_count_per_period: u64,
    /// Side-chain reward per period, per thousand of the miner share.
    pub sc_block_reward_per_period: u64,
    /// Declarations received. Always empty in a block header.
    pub declares: Vec<Declare>,
    /// Minimum voter balance in whole coins.
    pub min_voter_balance: u64,
    /// Proposal deposit in whole coins.
    pub proposal_deposit: u64,
    /// Side-chain rent fee in whole coins.
    pub sc_rent_fee: u64,
    /// Side-chain coins granted per main-chain coin.
    pub sc_rent_rate: u64,
    /// Minimum number of main-chain blocks the rent covers.
    pub sc_rent_length: u64,
}

/// A candidate's decision on a proposal, from `dpos:1:event:declare:...`.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Declare {
    /// Hash of the proposal being decided on.
    pub proposal_hash: Hash,
    /// The declaring account.
    pub declarer: Address,
    /// `true` for yes.
    pub decision: bool,
}

/// Loop progress confirmed by a side-chain signer.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SCConfirmation {
    /// Side-chain id.
    pub hash: Hash,
    /// The side-chain signer, which may differ from its main-chain signer.
    pub coinbase: Address,
    /// Side-chain block number.
    pub number: u64,
    /// `#`-separated loop information, already split.
    pub loop_info: Vec<String>,
}

/// A main-chain signer assigning the coinbase it uses on a side chain.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SCSetCoinbase {
    /// Side-chain id.
    pub hash: Hash,
    /// The main-chain signer.
    pub signer: Address,
    /// Coinbase to use on the side chain.
    pub coinbase: Address,
}

/// A gas-charging notice for a target address on a side chain.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct GasCharging {
    /// Target address on the side chain.
    pub target: Address,
    /// Gas volume to charge, in whole coins.
    pub volume: u64,
    /// Hash of the rent proposal, used as id of the charge.
    pub hash: Hash,
}

/// The per-block accumulator stored between the vanity and seal regions of a
/// header's extra-data.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderExtra {
    /// Confirmations accepted in this block.
    pub current_block_confirmations: Vec<Confirmation>,
    /// Votes accepted in this block.
    pub current_block_votes: Vec<Vote>,
    /// Proposals accepted in this block.
    pub current_block_proposals: Vec<Proposal>,
    /// Declarations accepted in this block.
    pub current_block_declares: Vec<Declare>,
    /// Stake re-assertions for existing voters touched by plain transfers.
    pub modify_predecessor_votes: Vec<Vote>,
    /// Start time of the current signer loop.
    pub loop_start_time: u64,
    /// Signers allowed to seal in the current loop, in order.
    pub signer_queue: Vec<Address>,
    /// Candidate signers managed by the signer admin.
    pub candidate_signers: Vec<Address>,
    /// The account allowed to issue admin commands.
    pub signer_admin: Address,
    /// Block reward.
    pub per_block_reward: U256,
    /// Miner share of the reward; the rest goes to the lucky pool.
    pub miner_reward_ratio: u64,
    /// Signers that missed their slot.
    pub signer_missing: Vec<Address>,
    /// Highest block number known to be confirmed.
    pub confirmed_block_number: u64,
    /// Side-chain loop confirmations.
    pub side_chain_confirmations: Vec<SCConfirmation>,
    /// Side-chain coinbase assignments.
    pub side_chain_set_coinbases: Vec<SCSetCoinbase>,
    /// Side-chain confirmations that carried charging notices.
    pub side_chain_notice_confirmed: Vec<SCConfirmation>,
    /// Gas charging notices. Only populated in a side chain's headers.
    pub side_chain_charging: Vec<GasCharging>,
}
