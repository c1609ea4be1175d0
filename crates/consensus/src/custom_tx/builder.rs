// Path: crates/consensus/src/custom_tx/builder.rs

//! Folds per-transaction decisions into a block's `HeaderExtra`.
//!
//! Processing a transaction is split in two steps. [`ExtraBuilder::decide`] reads
//! the accumulator, the balances and the collaborators and returns a list of
//! [`Effect`]s without changing anything. [`ExtraBuilder::apply`] folds those
//! effects in. Transactions are folded strictly in block order, so a command
//! always sees the effects of every earlier transaction in the block.

use super::admin::{parse_block_reward, parse_miner_ratio, process_admin_signer, SignerOp};
use super::command::{classify_str, AdminCommand, Command};
use super::confirm::check_confirmation;
use super::gate::{charge, Debit};
use super::sc::{check_sc_confirmation, check_set_coinbase};
use super::validate::{build_declare, build_proposal};
use dpos_api::chain::ChainReader;
use dpos_api::snapshot::SnapshotView;
use dpos_api::state::{BalanceOverlay, SharedBalances};
use dpos_types::app::{
    Address, Confirmation, Declare, Hash, HeaderExtra, Proposal, RefundHash, RefundPair,
    SCConfirmation, SCSetCoinbase, Transaction, Vote, U256,
};
use dpos_types::config::DposConfig;
use dpos_types::error::StateError;
use tracing::{debug, trace, warn};

/// A single accepted change to the block's accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append to `current_block_votes`.
    Vote(Vote),
    /// Append to `modify_predecessor_votes`.
    PredecessorVote(Vote),
    /// Append to `current_block_confirmations` and register a refund.
    Confirmation {
        /// The accepted confirmation.
        confirmation: Confirmation,
        /// Refund key and entry for the confirming transaction.
        refund: (Hash, RefundPair),
    },
    /// Append to `current_block_proposals` and debit the proposer.
    Proposal {
        /// The accepted proposal.
        proposal: Proposal,
        /// The proposer's debit.
        debit: Debit,
    },
    /// Append to `current_block_declares`.
    Declare(Declare),
    /// Replace `candidate_signers`.
    CandidateSigners(Vec<Address>),
    /// Replace `signer_admin`.
    SignerAdmin(Address),
    /// Replace `per_block_reward`.
    PerBlockReward(U256),
    /// Replace `miner_reward_ratio`.
    MinerRewardRatio(u64),
    /// Append a side-chain confirmation, its optional notice, and register a refund.
    ScConfirmation {
        /// The loop confirmation.
        confirmation: SCConfirmation,
        /// The charging notice, if any.
        notice: Option<SCConfirmation>,
        /// Refund key and entry for the confirming transaction.
        refund: (Hash, RefundPair),
    },
    /// Append to `side_chain_set_coinbases`.
    ScSetCoinbase(SCSetCoinbase),
}

/// Read-only collaborators for one block.
#[derive(Clone, Copy)]
pub struct Collaborators<'c> {
    /// Historical headers.
    pub chain: &'c dyn ChainReader,
    /// The parent snapshot; absent for the first two blocks.
    pub snapshot: Option<&'c dyn SnapshotView>,
}

/// Accumulates one block's `HeaderExtra`, refund entries and balance debits.
pub struct ExtraBuilder<'a> {
    config: &'a DposConfig,
    number: u64,
    extra: HeaderExtra,
    refund_hash: RefundHash,
    overlay: BalanceOverlay<'a>,
}

impl<'a> ExtraBuilder<'a> {
    /// Starts from `extra` for block `number`. Balance reads go through `state`.
    pub fn new(
        config: &'a DposConfig,
        number: u64,
        extra: HeaderExtra,
        state: &'a SharedBalances,
    ) -> Self {
        Self {
            config,
            number,
            extra,
            refund_hash: RefundHash::new(),
            overlay: BalanceOverlay::new(state),
        }
    }

    /// The accumulator as folded so far.
    pub fn header_extra(&self) -> &HeaderExtra {
        &self.extra
    }

    /// Decides the effects of `tx` sent by `sender`.
    ///
    /// A transaction whose payload yields no effect, either because it is not a
    /// command or because the command was dropped, is a plain value transfer and
    /// may re-assert the stake of the voters it touches.
    pub fn decide(
        &self,
        tx: &Transaction,
        sender: Address,
        ctx: Collaborators<'_>,
    ) -> Result<Vec<Effect>, StateError> {
        let effects = match tx.payload_text().and_then(classify_str) {
            Some(command) => {
                trace!(target: "consensus", "Block {}: {} from {:?}", self.number, command.name(), sender);
                self.decide_command(command, tx, sender, ctx)?
            }
            None => Vec::new(),
        };
        if effects.is_empty() {
            return self.predecessor_votes(tx, sender, ctx.snapshot);
        }
        Ok(effects)
    }

    fn decide_command(
        &self,
        command: Command<'_>,
        tx: &Transaction,
        sender: Address,
        ctx: Collaborators<'_>,
    ) -> Result<Vec<Effect>, StateError> {
        let effect = match command {
            Command::Admin(admin) => self.decide_admin(admin, tx, sender),
            Command::Vote => match tx.to {
                Some(candidate) => Some(Effect::Vote(Vote {
                    voter: sender,
                    candidate,
                    stake: self.overlay.balance(&sender)?,
                })),
                None => None,
            },
            Command::Confirm { confirmed } => {
                check_confirmation(self.config, ctx.chain, self.number, confirmed, sender).map(
                    |confirmation| Effect::Confirmation {
                        confirmation,
                        refund: refund_entry(tx, sender),
                    },
                )
            }
            Command::Proposal { pairs } => {
                match build_proposal(self.config, tx.hash, sender, self.number, &pairs) {
                    Some(proposal) => charge(self.config, &proposal, ctx.snapshot, &self.overlay)?
                        .map(|debit| Effect::Proposal { proposal, debit }),
                    None => None,
                }
            }
            Command::Declare { pairs } => build_declare(sender, &pairs).map(Effect::Declare),
            Command::SetCoinbase { sc_hash } => {
                check_set_coinbase(self.config, sc_hash, tx, sender).map(Effect::ScSetCoinbase)
            }
            Command::SideChainConfirm {
                hash,
                number,
                loop_info,
                charging_info,
            } => check_sc_confirmation(hash, number, loop_info, charging_info, sender).map(
                |checked| Effect::ScConfirmation {
                    confirmation: checked.confirmation,
                    notice: checked.notice,
                    refund: refund_entry(tx, sender),
                },
            ),
            Command::OpLog | Command::Inert => None,
        };
        Ok(effect.into_iter().collect())
    }

    fn decide_admin(
        &self,
        admin: AdminCommand<'_>,
        tx: &Transaction,
        sender: Address,
    ) -> Option<Effect> {
        let target = match tx.to {
            Some(to) if sender == self.extra.signer_admin => to,
            _ => {
                warn!(target: "consensus", "Illegal admin address: {:?}", sender);
                return None;
            }
        };
        match admin {
            AdminCommand::AddSigner => Some(self.signer_change(SignerOp::Add, target)),
            AdminCommand::DelSigner => Some(self.signer_change(SignerOp::Del, target)),
            AdminCommand::ModifyAdmin => {
                if target == self.extra.signer_admin {
                    warn!(target: "consensus", "New admin is the same as the old one, ignoring: {:?}", target);
                    None
                } else {
                    debug!(target: "consensus", "Modify admin to {:?}", target);
                    Some(Effect::SignerAdmin(target))
                }
            }
            AdminCommand::ModifyReward(text) => parse_block_reward(text).map(Effect::PerBlockReward),
            AdminCommand::ModifyRatio(text) => parse_miner_ratio(text).map(Effect::MinerRewardRatio),
            AdminCommand::Unknown(op) => {
                trace!(target: "consensus", "Unknown admin operation {:?}", op);
                None
            }
        }
    }

    fn signer_change(&self, op: SignerOp, target: Address) -> Effect {
        Effect::CandidateSigners(process_admin_signer(
            &self.extra.candidate_signers,
            op,
            target,
            self.config.max_signer_count,
        ))
    }

    /// Re-asserts the stake of registered voters touched by a plain transfer.
    fn predecessor_votes(
        &self,
        tx: &Transaction,
        sender: Address,
        snapshot: Option<&dyn SnapshotView>,
    ) -> Result<Vec<Effect>, StateError> {
        let (Some(snap), Some(to)) = (snapshot, tx.to) else {
            return Ok(Vec::new());
        };
        if tx.value.is_zero() {
            return Ok(Vec::new());
        }
        let mut effects = Vec::new();
        for voter in [sender, to] {
            if snap.is_voter(&voter) {
                effects.push(Effect::PredecessorVote(Vote {
                    voter,
                    candidate: Address::zero(),
                    stake: self.overlay.balance(&voter)?,
                }));
            }
        }
        Ok(effects)
    }

    /// Folds `effects` into the accumulator, in order.
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Vote(vote) => self.extra.current_block_votes.push(vote),
                Effect::PredecessorVote(vote) => self.extra.modify_predecessor_votes.push(vote),
                Effect::Confirmation {
                    confirmation,
                    refund: (hash, pair),
                } => {
                    self.extra.current_block_confirmations.push(confirmation);
                    self.refund_hash.insert(hash, pair);
                }
                Effect::Proposal { proposal, debit } => {
                    self.overlay.set_balance(debit.account, debit.remaining);
                    self.extra.current_block_proposals.push(proposal);
                }
                Effect::Declare(declare) => self.extra.current_block_declares.push(declare),
                Effect::CandidateSigners(signers) => self.extra.candidate_signers = signers,
                Effect::SignerAdmin(admin) => self.extra.signer_admin = admin,
                Effect::PerBlockReward(reward) => self.extra.per_block_reward = reward,
                Effect::MinerRewardRatio(ratio) => self.extra.miner_reward_ratio = ratio,
                Effect::ScConfirmation {
                    confirmation,
                    notice,
                    refund: (hash, pair),
                } => {
                    self.extra.side_chain_confirmations.push(confirmation);
                    self.extra.side_chain_notice_confirmed.extend(notice);
                    self.refund_hash.insert(hash, pair);
                }
                Effect::ScSetCoinbase(set) => self.extra.side_chain_set_coinbases.push(set),
            }
        }
    }

    /// Decides and folds one transaction.
    pub fn process(
        &mut self,
        tx: &Transaction,
        sender: Address,
        ctx: Collaborators<'_>,
    ) -> Result<(), StateError> {
        let effects = self.decide(tx, sender, ctx)?;
        self.apply(effects);
        Ok(())
    }

    /// Finishes the block, returning the accumulator, the refund entries and the
    /// staged balance changes.
    pub fn finish(self) -> (HeaderExtra, RefundHash, BalanceOverlay<'a>) {
        (self.extra, self.refund_hash, self.overlay)
    }
}

fn refund_entry(tx: &Transaction, sender: Address) -> (Hash, RefundPair) {
    (
        tx.hash,
        RefundPair {
            sender,
            gas_price: tx.gas_price,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_test_utils::{addr, coins, MemoryBalances, MemoryChain, StaticSnapshot, TxBuilder};

    #[test]
    fn decide_does_not_touch_the_accumulator() {
        let config = DposConfig::default();
        let (state, _) = MemoryBalances::new().with(addr(1), coins(5)).shared();
        let chain = MemoryChain::new();
        let builder = ExtraBuilder::new(&config, 10, HeaderExtra::default(), &state);
        let ctx = Collaborators {
            chain: &chain,
            snapshot: None,
        };

        let tx = TxBuilder::new(1).to(addr(2)).payload("dpos:1:event:vote").build();
        let effects = builder.decide(&tx, addr(1), ctx).unwrap();
        assert_eq!(
            effects,
            vec![Effect::Vote(Vote {
                voter: addr(1),
                candidate: addr(2),
                stake: coins(5),
            })]
        );
        assert!(builder.header_extra().current_block_votes.is_empty());
    }

    #[test]
    fn admin_change_applies_to_later_transactions() {
        let config = DposConfig::default();
        let (state, _) = MemoryBalances::new().shared();
        let chain = MemoryChain::new();
        let extra = HeaderExtra {
            signer_admin: addr(1),
            candidate_signers: vec![addr(1)],
            ..HeaderExtra::default()
        };
        let mut builder = ExtraBuilder::new(&config, 10, extra, &state);
        let ctx = Collaborators {
            chain: &chain,
            snapshot: None,
        };

        let handover = TxBuilder::new(1).to(addr(2)).payload("dpos:1:admin:modadmin").build();
        let stale = TxBuilder::new(2).to(addr(3)).payload("dpos:1:admin:adds").build();
        let fresh = TxBuilder::new(3).to(addr(4)).payload("dpos:1:admin:adds").build();
        builder.process(&handover, addr(1), ctx).unwrap();
        builder.process(&stale, addr(1), ctx).unwrap();
        builder.process(&fresh, addr(2), ctx).unwrap();

        let (extra, _, _) = builder.finish();
        assert_eq!(extra.signer_admin, addr(2));
        assert_eq!(extra.candidate_signers, vec![addr(1), addr(4)]);
    }

    #[test]
    fn unknown_admin_operation_is_checked_and_dropped() {
        let config = DposConfig::default();
        let (state, _) = MemoryBalances::new().shared();
        let chain = MemoryChain::new();
        let extra = HeaderExtra {
            signer_admin: addr(1),
            candidate_signers: vec![addr(1)],
            ..HeaderExtra::default()
        };
        let builder = ExtraBuilder::new(&config, 10, extra, &state);
        let ctx = Collaborators {
            chain: &chain,
            snapshot: None,
        };
        let tx = TxBuilder::new(1).to(addr(2)).payload("dpos:1:admin:grant").build();
        assert!(builder.decide(&tx, addr(1), ctx).unwrap().is_empty());
        assert!(builder.decide(&tx, addr(3), ctx).unwrap().is_empty());
    }

    #[test]
    fn dropped_command_with_value_reasserts_stake() {
        let config = DposConfig::default();
        let (state, _) = MemoryBalances::new().with(addr(1), coins(9)).shared();
        let chain = MemoryChain::new();
        let snap = StaticSnapshot::new().with_voter(addr(1));
        let view: &dyn SnapshotView = &snap;
        let builder = ExtraBuilder::new(&config, 10, HeaderExtra::default(), &state);
        let ctx = Collaborators {
            chain: &chain,
            snapshot: Some(view),
        };
        let tx = TxBuilder::new(1)
            .to(addr(2))
            .value(coins(1))
            .payload("dpos:1:admin:adds")
            .build();
        assert_eq!(
            builder.decide(&tx, addr(1), ctx).unwrap(),
            vec![Effect::PredecessorVote(Vote {
                voter: addr(1),
                candidate: Address::zero(),
                stake: coins(9),
            })]
        );
    }

    #[test]
    fn zero_value_transfer_is_not_a_predecessor_vote() {
        let config = DposConfig::default();
        let (state, _) = MemoryBalances::new().shared();
        let chain = MemoryChain::new();
        let snap = StaticSnapshot::new().with_voter(addr(1));
        let view: &dyn SnapshotView = &snap;
        let builder = ExtraBuilder::new(&config, 10, HeaderExtra::default(), &state);
        let ctx = Collaborators {
            chain: &chain,
            snapshot: Some(view),
        };
        let tx = TxBuilder::new(1).to(addr(2)).build();
        assert!(builder.decide(&tx, addr(1), ctx).unwrap().is_empty());
    }
}
