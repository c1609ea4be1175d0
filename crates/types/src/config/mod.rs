// Path: crates/types/src/config/mod.rs

//! Engine configuration for the DPoS custom-transaction interpreter.
//!
//! Every field has a serde default, so an empty TOML document yields a working
//! main-chain configuration. Amounts named in "whole coins" are scaled by
//! [`DposConfig::coin_unit`] before they are compared with balances.

use crate::app::{Address, U256};
use serde::{Deserialize, Serialize};

/// Selects the binary layout of `HeaderExtra` for a given block.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ExtraCodecVersion {
    /// The canonical SCALE layout of every `HeaderExtra` field, in declaration order.
    V1,
}

/// Consensus engine parameters.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DposConfig {
    /// Seconds between blocks.
    #[serde(default = "default_period")]
    pub period: u64,
    /// Epoch length in blocks.
    #[serde(default = "default_epoch")]
    pub epoch: u64,
    /// Upper bound on the signer set; also the maximum age of a confirmation.
    #[serde(default = "default_max_signer_count")]
    pub max_signer_count: u64,
    /// Minimum voter balance in whole coins.
    #[serde(default = "default_min_voter_balance")]
    pub min_voter_balance: u64,
    /// Loop start time of the first block.
    #[serde(default)]
    pub genesis_timestamp: u64,
    /// Block reward written into the genesis header extra.
    #[serde(default)]
    pub per_block_reward: U256,
    /// Miner share written into the genesis header extra.
    #[serde(default = "default_miner_reward_ratio")]
    pub miner_reward_ratio: u64,
    /// Initial signer admin.
    #[serde(default)]
    pub admin_address: Address,
    /// Self-voting signers of the genesis block.
    #[serde(default)]
    pub signers: Vec<Address>,
    /// Whether this engine runs a side chain.
    #[serde(default)]
    pub side_chain: bool,
    /// Whether PBFT confirmations are enabled.
    #[serde(default)]
    pub pbft: bool,
    /// First block of the Trantor fork, if scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trantor_block: Option<u64>,
    /// First block of the Terminus fork, if scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminus_block: Option<u64>,
    /// Deposit for submitting a proposal, in whole coins.
    #[serde(default = "default_proposal_deposit")]
    pub proposal_deposit: u64,
    /// Default miner share of a block reward for new proposals, per thousand.
    #[serde(default = "default_miner_reward_per_thousand")]
    pub miner_reward_per_thousand: u64,
    /// Base units per whole coin.
    #[serde(default = "default_coin_unit")]
    pub coin_unit: U256,
    /// Minimum transaction value of a side-chain coinbase assignment, in base units.
    #[serde(default = "default_min_sc_set_coinbase_value")]
    pub min_sc_set_coinbase_value: U256,
}

fn default_period() -> u64 {
    3
}
fn default_epoch() -> u64 {
    201_600
}
fn default_max_signer_count() -> u64 {
    21
}
fn default_min_voter_balance() -> u64 {
    100
}
fn default_miner_reward_ratio() -> u64 {
    1000
}
fn default_proposal_deposit() -> u64 {
    1_000_000
}
fn default_miner_reward_per_thousand() -> u64 {
    618
}
fn default_coin_unit() -> U256 {
    U256::exp10(18)
}
fn default_min_sc_set_coinbase_value() -> U256 {
    U256::from(5u64) * U256::exp10(18)
}

impl Default for DposConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            epoch: default_epoch(),
            max_signer_count: default_max_signer_count(),
            min_voter_balance: default_min_voter_balance(),
            genesis_timestamp: 0,
            per_block_reward: U256::zero(),
            miner_reward_ratio: default_miner_reward_ratio(),
            admin_address: Address::zero(),
            signers: Vec::new(),
            side_chain: false,
            pbft: false,
            trantor_block: None,
            terminus_block: None,
            proposal_deposit: default_proposal_deposit(),
            miner_reward_per_thousand: default_miner_reward_per_thousand(),
            coin_unit: default_coin_unit(),
            min_sc_set_coinbase_value: default_min_sc_set_coinbase_value(),
        }
    }
}

impl DposConfig {
    /// Returns whether `number` is at or past the Trantor fork block.
    pub fn is_trantor(&self, number: u64) -> bool {
        is_forked(self.trantor_block, number)
    }

    /// Returns whether `number` is at or past the Terminus fork block.
    pub fn is_terminus(&self, number: u64) -> bool {
        is_forked(self.terminus_block, number)
    }

    /// The header extra layout used by block `number`.
    pub fn extra_codec_version(&self, _number: u64) -> ExtraCodecVersion {
        ExtraCodecVersion::V1
    }

    /// The proposal deposit in base units, or `None` on overflow.
    pub fn scaled_proposal_deposit(&self) -> Option<U256> {
        self.coin_unit.checked_mul(U256::from(self.proposal_deposit))
    }

    /// Scales a whole-coin amount to base units, or `None` on overflow.
    pub fn to_base_units(&self, whole_coins: u64) -> Option<U256> {
        self.coin_unit.checked_mul(U256::from(whole_coins))
    }
}

fn is_forked(fork: Option<u64>, number: u64) -> bool {
    fork.is_some_and(|block| block <= number)
}
