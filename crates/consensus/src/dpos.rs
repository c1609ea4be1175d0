// Path: crates/consensus/src/dpos.rs

use crate::custom_tx::{Collaborators, ExtraBuilder};
use crate::extra;
use crate::refund::settle_refunds;
use dpos_api::chain::ChainReader;
use dpos_api::snapshot::{SnapshotSource, SnapshotView};
use dpos_api::state::SharedBalances;
use dpos_api::transaction::SenderRecovery;
use dpos_types::app::{Address, Header, HeaderExtra, Receipt, RefundGas, RefundHash, Transaction};
use dpos_types::config::DposConfig;
use dpos_types::error::{CodecError, ConsensusError};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Everything block processing reads besides the transactions themselves.
#[derive(Clone, Copy)]
pub struct BlockContext<'a> {
    /// The header of the block being built or verified.
    pub header: &'a Header,
    /// Historical headers, for confirmations.
    pub chain: &'a dyn ChainReader,
    /// Loads the parent block's snapshot.
    pub snapshots: &'a dyn SnapshotSource,
    /// Recovers transaction senders.
    pub senders: &'a dyn SenderRecovery,
    /// World-state balances.
    pub state: &'a SharedBalances,
}

/// The result of processing one block's custom transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTxOutcome {
    /// The folded accumulator.
    pub header_extra: HeaderExtra,
    /// Refunds owed per sender.
    pub refund_gas: RefundGas,
    /// Refund-eligible transactions.
    pub refund_hash: RefundHash,
}

/// The DPoS engine's custom-transaction stage.
#[derive(Debug, Clone)]
pub struct DposEngine {
    config: Arc<DposConfig>,
}

impl DposEngine {
    /// Creates an engine for `config`. See `util::engine_from_config` for a
    /// validating constructor.
    pub fn new(config: DposConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &DposConfig {
        &self.config
    }

    /// Folds every governance command in `txs` into `header_extra`.
    ///
    /// Transactions are processed in order. A transaction whose sender cannot be
    /// recovered is skipped. Failing to load the parent snapshot, or to read or
    /// write balances, aborts the block; no balance change is written in that
    /// case. Proposal debits are committed to `ctx.state` only after every
    /// transaction was processed.
    pub fn process_custom_tx(
        &self,
        header_extra: HeaderExtra,
        ctx: &BlockContext<'_>,
        txs: &[Transaction],
        receipts: &[Receipt],
    ) -> Result<CustomTxOutcome, ConsensusError> {
        let number = ctx.header.number;
        let snapshot = self.parent_snapshot(ctx)?;
        let collaborators = Collaborators {
            chain: ctx.chain,
            snapshot: snapshot.as_deref(),
        };

        let mut builder = ExtraBuilder::new(&self.config, number, header_extra, ctx.state);
        for tx in txs {
            let sender = match ctx.senders.sender(tx) {
                Ok(sender) => sender,
                Err(e) => {
                    trace!(target: "consensus", "Skipping tx {:?}: {}", tx.hash, e);
                    continue;
                }
            };
            builder.process(tx, sender, collaborators)?;
        }

        let (header_extra, refund_hash, overlay) = builder.finish();
        overlay.commit()?;
        let refund_gas = settle_refunds(&refund_hash, receipts);

        debug!(target: "consensus",
            "Block {}: {} votes, {} confirmations, {} proposals, {} declares",
            number,
            header_extra.current_block_votes.len(),
            header_extra.current_block_confirmations.len(),
            header_extra.current_block_proposals.len(),
            header_extra.current_block_declares.len()
        );

        Ok(CustomTxOutcome {
            header_extra,
            refund_gas,
            refund_hash,
        })
    }

    fn parent_snapshot(
        &self,
        ctx: &BlockContext<'_>,
    ) -> Result<Option<Arc<dyn SnapshotView>>, ConsensusError> {
        let number = ctx.header.number;
        if number <= 1 {
            return Ok(None);
        }
        let parent = number - 1;
        ctx.snapshots
            .snapshot(parent, &ctx.header.parent_hash)
            .map(Some)
            .map_err(|e| {
                error!(target: "consensus", "Failed to load snapshot at block {}: {}", parent, e);
                ConsensusError::SnapshotUnavailable {
                    number: parent,
                    reason: e.to_string(),
                }
            })
    }

    /// The accumulator of the genesis block: configured signers queued in
    /// order, configured admin and rewards.
    pub fn genesis_header_extra(&self) -> HeaderExtra {
        let signers: Vec<Address> = self
            .config
            .signers
            .iter()
            .take(usize::try_from(self.config.max_signer_count).unwrap_or(usize::MAX))
            .copied()
            .collect();
        HeaderExtra {
            loop_start_time: self.config.genesis_timestamp,
            signer_queue: signers.clone(),
            candidate_signers: signers,
            signer_admin: self.config.admin_address,
            per_block_reward: self.config.per_block_reward,
            miner_reward_ratio: self.config.miner_reward_ratio,
            ..HeaderExtra::default()
        }
    }

    /// Encodes `header_extra` with the codec version of block `number`.
    pub fn encode_header_extra(
        &self,
        number: u64,
        header_extra: &HeaderExtra,
    ) -> Result<Vec<u8>, CodecError> {
        extra::encode_header_extra(&self.config, number, header_extra)
    }

    /// Decodes a bare `HeaderExtra` payload of block `number`.
    pub fn decode_header_extra(&self, number: u64, bytes: &[u8]) -> Result<HeaderExtra, CodecError> {
        extra::decode_header_extra(&self.config, number, bytes)
    }
}
