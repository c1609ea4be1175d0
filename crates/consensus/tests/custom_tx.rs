// Path: crates/consensus/tests/custom_tx.rs

use dpos_api::state::{read_balance, SharedBalances};
use dpos_consensus::extra::build_extra_data;
use dpos_consensus::{BlockContext, CustomTxOutcome, DposEngine};
use dpos_test_utils::{
    addr, coins, hash, header, receipt, MemoryBalances, MemoryChain, PlainSenders,
    StaticSnapshot, StaticSnapshots, TxBuilder,
};
use dpos_types::app::{
    hash_to_hex, Address, HeaderExtra, ProposalType, Receipt, RefundPair, Transaction, U256,
};
use dpos_types::config::DposConfig;
use dpos_types::error::{ConsensusError, ErrorCode};
use std::sync::{Arc, RwLock};

const ADMIN: u64 = 0xad;
const BLOCK: u64 = 100;

/// One block's worth of collaborators.
struct Harness {
    engine: DposEngine,
    chain: MemoryChain,
    snapshots: StaticSnapshots,
    senders: PlainSenders,
    state: SharedBalances,
    balances: Arc<RwLock<MemoryBalances>>,
    txs: Vec<Transaction>,
    receipts: Vec<Receipt>,
}

impl Harness {
    fn new(config: DposConfig, balances: MemoryBalances) -> Self {
        let (state, balances) = balances.shared();
        Self {
            engine: DposEngine::new(config),
            chain: MemoryChain::new(),
            snapshots: StaticSnapshots::new(StaticSnapshot::new()),
            senders: PlainSenders::new(),
            state,
            balances,
            txs: Vec::new(),
            receipts: Vec::new(),
        }
    }

    fn snapshot(mut self, snapshot: StaticSnapshot) -> Self {
        self.snapshots = StaticSnapshots::new(snapshot);
        self
    }

    fn tx(mut self, tx: Transaction, sender: Address) -> Self {
        self.senders = self.senders.with(&tx, sender);
        self.txs.push(tx);
        self
    }

    fn unsigned_tx(mut self, tx: Transaction) -> Self {
        self.txs.push(tx);
        self
    }

    fn recorded_block(mut self, number: u64, signer_queue: Vec<Address>) -> Self {
        let extra = HeaderExtra {
            signer_queue,
            ..HeaderExtra::default()
        };
        let data = build_extra_data(self.engine.config(), number, &extra).unwrap();
        self.chain.insert(header(number, data));
        self
    }

    fn run_at(&self, number: u64, extra: HeaderExtra) -> Result<CustomTxOutcome, ConsensusError> {
        let current = header(number, Vec::new());
        let ctx = BlockContext {
            header: &current,
            chain: &self.chain,
            snapshots: &self.snapshots,
            senders: &self.senders,
            state: &self.state,
        };
        self.engine
            .process_custom_tx(extra, &ctx, &self.txs, &self.receipts)
    }

    fn run(&self, extra: HeaderExtra) -> CustomTxOutcome {
        self.run_at(BLOCK, extra).unwrap()
    }

    fn balance(&self, who: Address) -> U256 {
        read_balance(&self.state, &who).unwrap()
    }
}

fn admin_extra(candidates: Vec<Address>) -> HeaderExtra {
    HeaderExtra {
        signer_admin: addr(ADMIN),
        candidate_signers: candidates,
        ..HeaderExtra::default()
    }
}

fn deposit_config(deposit: u64) -> DposConfig {
    DposConfig {
        proposal_deposit: deposit,
        ..DposConfig::default()
    }
}

#[test]
fn admin_adds_signer() {
    let x = addr(ADMIN);
    let y = addr(0xbb);
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(TxBuilder::new(1).to(y).payload("dpos:1:admin:adds").build(), x);

    let out = h.run(admin_extra(vec![x]));
    assert_eq!(out.header_extra.candidate_signers, vec![x, y]);
}

#[test]
fn admin_cannot_delete_last_signer() {
    let x = addr(ADMIN);
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(TxBuilder::new(1).to(x).payload("dpos:1:admin:dels").build(), x);

    let out = h.run(admin_extra(vec![x]));
    assert_eq!(out.header_extra.candidate_signers, vec![x]);
}

#[test]
fn admin_commands_from_other_senders_are_ignored() {
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(TxBuilder::new(1).to(addr(5)).payload("dpos:1:admin:adds").build(), addr(4))
        .tx(TxBuilder::new(2).payload("dpos:1:admin:adds").build(), addr(ADMIN));

    let out = h.run(admin_extra(vec![addr(ADMIN)]));
    assert_eq!(out.header_extra.candidate_signers, vec![addr(ADMIN)]);
}

#[test]
fn modadmin_to_current_admin_is_a_no_op() {
    let h = Harness::new(DposConfig::default(), MemoryBalances::new()).tx(
        TxBuilder::new(1).to(addr(ADMIN)).payload("dpos:1:admin:modadmin").build(),
        addr(ADMIN),
    );

    let before = admin_extra(vec![addr(ADMIN)]);
    let out = h.run(before.clone());
    assert_eq!(out.header_extra, before);
}

#[test]
fn modreward_and_modratio() {
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(
            TxBuilder::new(1)
                .to(addr(ADMIN))
                .payload("dpos:1:admin:modreward:8000000000000000000")
                .build(),
            addr(ADMIN),
        )
        .tx(
            TxBuilder::new(2).to(addr(ADMIN)).payload("dpos:1:admin:modratio:40").build(),
            addr(ADMIN),
        )
        .tx(
            TxBuilder::new(3).to(addr(ADMIN)).payload("dpos:1:admin:modratio:-3").build(),
            addr(ADMIN),
        )
        .tx(
            TxBuilder::new(4).to(addr(ADMIN)).payload("dpos:1:admin:modreward:lots").build(),
            addr(ADMIN),
        );

    let out = h.run(admin_extra(vec![addr(ADMIN)]));
    assert_eq!(out.header_extra.per_block_reward, coins(8));
    assert_eq!(out.header_extra.miner_reward_ratio, 40);
}

#[test]
fn vote_stake_is_current_balance() {
    let voter = addr(1);
    let h = Harness::new(
        DposConfig::default(),
        MemoryBalances::new().with(voter, coins(77)),
    )
    .tx(TxBuilder::new(1).to(addr(2)).payload("dpos:1:event:vote").build(), voter)
    .tx(TxBuilder::new(2).payload("dpos:1:event:vote").build(), voter);

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_votes.len(), 1);
    let vote = &out.header_extra.current_block_votes[0];
    assert_eq!(vote.voter, voter);
    assert_eq!(vote.candidate, addr(2));
    assert_eq!(vote.stake, coins(77));
}

#[test]
fn accepted_proposal_debits_the_deposit() {
    let proposer = addr(1);
    let tx = TxBuilder::new(1)
        .to(proposer)
        .payload("dpos:1:event:proposal:proposal_type:1:vlcnt:4")
        .build();
    let tx_hash = tx.hash;
    let h = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(50)))
        .tx(tx, proposer);

    let out = h.run(HeaderExtra::default());
    assert_eq!(h.balance(proposer), coins(30));
    assert_eq!(out.header_extra.current_block_proposals.len(), 1);
    let proposal = &out.header_extra.current_block_proposals[0];
    assert_eq!(proposal.hash, tx_hash);
    assert_eq!(proposal.proposer, proposer);
    assert_eq!(proposal.current_deposit, coins(20));
    assert_eq!(proposal.received_number, BLOCK);
    assert_eq!(proposal.validation_loop_cnt, 4);
    assert_eq!(proposal.proposal_type, ProposalType::CandidateAdd);
}

#[test]
fn out_of_range_field_drops_the_proposal() {
    let proposer = addr(1);
    let h = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(50)))
        .tx(
            TxBuilder::new(1)
                .to(proposer)
                .payload("dpos:1:event:proposal:proposal_type:3:mrpt:1500")
                .build(),
            proposer,
        );

    let out = h.run(HeaderExtra::default());
    assert!(out.header_extra.current_block_proposals.is_empty());
    assert_eq!(h.balance(proposer), coins(50));
    assert_eq!(h.balances.read().unwrap().write_count(), 0);
}

#[test]
fn rejected_proposals_leave_existing_records_untouched() {
    let proposer = addr(1);
    let earlier = TxBuilder::new(1)
        .payload("dpos:1:event:proposal:proposal_type:2")
        .build();
    let h = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(25)))
        .tx(earlier, proposer)
        .tx(
            TxBuilder::new(2).payload("dpos:1:event:proposal:vlcnt:2").build(),
            proposer,
        )
        .tx(
            TxBuilder::new(3)
                .payload("dpos:1:event:proposal:proposal_type:1")
                .build(),
            proposer,
        );

    let out = h.run(HeaderExtra::default());
    // The first proposal leaves 5 coins, too little for the third.
    assert_eq!(out.header_extra.current_block_proposals.len(), 1);
    assert_eq!(
        out.header_extra.current_block_proposals[0].proposal_type,
        ProposalType::CandidateRemove
    );
    assert_eq!(h.balance(proposer), coins(5));
}

#[test]
fn two_proposals_cannot_spend_the_same_balance() {
    let proposer = addr(1);
    let payload = "dpos:1:event:proposal:proposal_type:1";
    let h = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(30)))
        .tx(TxBuilder::new(1).payload(payload).build(), proposer)
        .tx(TxBuilder::new(2).payload(payload).build(), proposer);

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_proposals.len(), 1);
    assert_eq!(h.balance(proposer), coins(10));
}

#[test]
fn vote_after_proposal_sees_the_debit() {
    let who = addr(1);
    let h = Harness::new(deposit_config(20), MemoryBalances::new().with(who, coins(50)))
        .tx(
            TxBuilder::new(1).payload("dpos:1:event:proposal:proposal_type:1").build(),
            who,
        )
        .tx(TxBuilder::new(2).to(addr(2)).payload("dpos:1:event:vote").build(), who);

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_votes[0].stake, coins(30));
}

#[test]
fn rent_side_chain_requires_registered_chain() {
    let proposer = addr(1);
    let sc = hash(0x5c);
    let payload = format!(
        "dpos:1:event:proposal:proposal_type:8:schash:{}:scrt:0x{}:scrf:100",
        hash_to_hex(&sc),
        "22".repeat(20)
    );
    let tx = TxBuilder::new(1).payload(&payload).build();

    let unknown = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(500)))
        .tx(tx.clone(), proposer);
    let out = unknown.run(HeaderExtra::default());
    assert!(out.header_extra.current_block_proposals.is_empty());
    assert_eq!(unknown.balance(proposer), coins(500));

    let known = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(500)))
        .snapshot(StaticSnapshot::new().with_side_chain(sc))
        .tx(tx, proposer);
    let out = known.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_proposals.len(), 1);
    assert_eq!(out.header_extra.current_block_proposals[0].sc_rent_fee, 100);
    assert_eq!(known.balance(proposer), coins(380));
}

#[test]
fn confirmation_by_queued_signer_is_refunded() {
    let signer = addr(1);
    let tx = TxBuilder::new(1)
        .gas_price(7)
        .payload(&format!("dpos:1:event:confirm:{}", BLOCK - 3))
        .build();
    let mut h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .recorded_block(BLOCK - 3, vec![addr(9), signer])
        .tx(tx.clone(), signer);
    h.receipts.push(receipt(&tx, 21_000));

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_confirmations.len(), 1);
    assert_eq!(out.header_extra.current_block_confirmations[0].block_number, BLOCK - 3);
    assert_eq!(
        out.refund_hash.get(&tx.hash),
        Some(&RefundPair {
            sender: signer,
            gas_price: U256::from(7u64),
        })
    );
    assert_eq!(out.refund_gas.get(&signer), Some(&U256::from(147_000u64)));
}

#[test]
fn confirmation_by_signer_outside_queue_is_dropped() {
    let outsider = addr(3);
    let tx = TxBuilder::new(1)
        .payload(&format!("dpos:1:event:confirm:{}", BLOCK - 1))
        .build();
    let mut h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .recorded_block(BLOCK - 1, vec![addr(1), addr(2)])
        .tx(tx.clone(), outsider);
    h.receipts.push(receipt(&tx, 21_000));

    let out = h.run(HeaderExtra::default());
    assert!(out.header_extra.current_block_confirmations.is_empty());
    assert!(out.refund_hash.is_empty());
    assert!(out.refund_gas.get(&outsider).is_none());
}

#[test]
fn stale_and_future_confirmations_are_dropped() {
    let signer = addr(1);
    let max = DposConfig::default().max_signer_count;
    let stale = BLOCK - max - 1;
    let future = BLOCK + 1;
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .recorded_block(stale, vec![signer])
        .recorded_block(future, vec![signer])
        .tx(
            TxBuilder::new(1).payload(&format!("dpos:1:event:confirm:{stale}")).build(),
            signer,
        )
        .tx(
            TxBuilder::new(2).payload(&format!("dpos:1:event:confirm:{future}")).build(),
            signer,
        );

    let out = h.run(HeaderExtra::default());
    assert!(out.header_extra.current_block_confirmations.is_empty());
    assert!(out.refund_hash.is_empty());
}

#[test]
fn declares_default_to_yes_and_are_not_deduplicated() {
    let proposal = hash_to_hex(&hash(0x77));
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(
            TxBuilder::new(1)
                .payload(&format!("dpos:1:event:declare:hash:{proposal}"))
                .build(),
            addr(1),
        )
        .tx(
            TxBuilder::new(2)
                .payload(&format!("dpos:1:event:declare:hash:{proposal}:decision:no"))
                .build(),
            addr(1),
        )
        .tx(
            TxBuilder::new(3)
                .payload(&format!("dpos:1:event:declare:hash:{proposal}:decision:perhaps"))
                .build(),
            addr(1),
        );

    let out = h.run(HeaderExtra::default());
    let decisions: Vec<bool> = out
        .header_extra
        .current_block_declares
        .iter()
        .map(|d| d.decision)
        .collect();
    assert_eq!(decisions, vec![true, false]);
}

#[test]
fn transfers_touching_voters_reassert_stake() {
    let voter = addr(1);
    let other_voter = addr(2);
    let h = Harness::new(
        DposConfig::default(),
        MemoryBalances::new()
            .with(voter, coins(10))
            .with(other_voter, coins(4)),
    )
    .snapshot(StaticSnapshot::new().with_voter(voter).with_voter(other_voter))
    .tx(TxBuilder::new(1).to(other_voter).value(coins(1)).build(), voter)
    .tx(TxBuilder::new(2).to(addr(3)).value(coins(1)).build(), addr(4));

    let out = h.run(HeaderExtra::default());
    let votes = &out.header_extra.modify_predecessor_votes;
    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].voter, voter);
    assert_eq!(votes[0].stake, coins(10));
    assert!(votes[0].candidate.is_zero());
    assert_eq!(votes[1].voter, other_voter);
    assert_eq!(votes[1].stake, coins(4));
}

#[test]
fn rejected_commands_between_voters_reassert_stake() {
    let voter = addr(1);
    let other_voter = addr(2);
    let h = Harness::new(
        DposConfig::default(),
        MemoryBalances::new()
            .with(voter, coins(10))
            .with(other_voter, coins(4)),
    )
    .snapshot(StaticSnapshot::new().with_voter(voter).with_voter(other_voter))
    .tx(
        TxBuilder::new(1)
            .to(other_voter)
            .value(coins(1))
            .payload("dpos:1:event:declare:decision:maybe")
            .build(),
        voter,
    )
    .tx(
        TxBuilder::new(2)
            .to(voter)
            .value(coins(1))
            .payload("dpos:1:oplog:note:x")
            .build(),
        other_voter,
    );

    let out = h.run(HeaderExtra::default());
    assert!(out.header_extra.current_block_declares.is_empty());
    let votes = &out.header_extra.modify_predecessor_votes;
    let voters: Vec<Address> = votes.iter().map(|v| v.voter).collect();
    assert_eq!(voters, vec![voter, other_voter, other_voter, voter]);
    assert_eq!(votes[0].stake, coins(10));
    assert_eq!(votes[1].stake, coins(4));
}

#[test]
fn accepted_vote_does_not_reassert_stake() {
    let voter = addr(1);
    let h = Harness::new(DposConfig::default(), MemoryBalances::new().with(voter, coins(10)))
        .snapshot(StaticSnapshot::new().with_voter(voter))
        .tx(
            TxBuilder::new(1)
                .to(addr(2))
                .value(coins(1))
                .payload("dpos:1:event:vote")
                .build(),
            voter,
        );

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_votes.len(), 1);
    assert!(out.header_extra.modify_predecessor_votes.is_empty());
}

#[test]
fn early_blocks_skip_snapshot_and_predecessor_votes() {
    let voter = addr(1);
    let h = Harness::new(DposConfig::default(), MemoryBalances::new().with(voter, coins(3)))
        .snapshot(StaticSnapshot::new().with_voter(voter))
        .tx(TxBuilder::new(1).to(addr(2)).value(coins(1)).build(), voter);

    let out = h.run_at(1, HeaderExtra::default()).unwrap();
    assert!(out.header_extra.modify_predecessor_votes.is_empty());
    assert!(h.snapshots.requests().is_empty());

    h.run_at(2, HeaderExtra::default()).unwrap();
    assert_eq!(h.snapshots.requests(), vec![(1, hash(1))]);
}

#[test]
fn snapshot_failure_aborts_the_block() {
    let proposer = addr(1);
    let mut h = Harness::new(deposit_config(20), MemoryBalances::new().with(proposer, coins(50)))
        .tx(
            TxBuilder::new(1).payload("dpos:1:event:proposal:proposal_type:1").build(),
            proposer,
        );
    h.snapshots = StaticSnapshots::failing();

    let err = h.run_at(BLOCK, HeaderExtra::default()).unwrap_err();
    assert!(matches!(
        err,
        ConsensusError::SnapshotUnavailable { number, .. } if number == BLOCK - 1
    ));
    assert_eq!(err.code(), "CONSENSUS_SNAPSHOT_UNAVAILABLE");
    assert_eq!(h.balance(proposer), coins(50));
}

#[test]
fn failed_commit_surfaces_as_state_error() {
    let proposer = addr(1);
    let h = Harness::new(
        deposit_config(20),
        MemoryBalances::new().with(proposer, coins(50)).failing_writes(),
    )
    .tx(
        TxBuilder::new(1).payload("dpos:1:event:proposal:proposal_type:1").build(),
        proposer,
    );

    let err = h.run_at(BLOCK, HeaderExtra::default()).unwrap_err();
    assert_eq!(err.code(), "CONSENSUS_STATE_ACCESS_ERROR");
}

#[test]
fn unrecoverable_sender_is_skipped() {
    let h = Harness::new(DposConfig::default(), MemoryBalances::new().with(addr(1), coins(1)))
        .unsigned_tx(TxBuilder::new(1).to(addr(2)).payload("dpos:1:event:vote").build())
        .tx(TxBuilder::new(2).to(addr(3)).payload("dpos:1:event:vote").build(), addr(1));

    let out = h.run(HeaderExtra::default());
    assert_eq!(out.header_extra.current_block_votes.len(), 1);
    assert_eq!(out.header_extra.current_block_votes[0].candidate, addr(3));
}

#[test]
fn side_chain_confirm_and_set_coinbase() {
    let sc = hash(0x5c);
    let signer = addr(1);
    let confirm = TxBuilder::new(1)
        .payload(&dpos_consensus::custom_tx::build_sc_event_confirm_data(
            &sc, 42, 1_700_000_000, "1#2", "3#4",
        ))
        .build();
    let set_cb = TxBuilder::new(2)
        .to(addr(9))
        .value(coins(5))
        .payload(&format!("dpos:1:event:setcb:{}", hash_to_hex(&sc)))
        .build();
    let cheap_set_cb = TxBuilder::new(3)
        .to(addr(9))
        .value(coins(4))
        .payload(&format!("dpos:1:event:setcb:{}", hash_to_hex(&sc)))
        .build();
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(confirm.clone(), signer)
        .tx(set_cb, signer)
        .tx(cheap_set_cb, signer);

    let out = h.run(HeaderExtra::default());
    let extra = &out.header_extra;
    assert_eq!(extra.side_chain_confirmations.len(), 1);
    assert_eq!(extra.side_chain_confirmations[0].number, 42);
    assert_eq!(extra.side_chain_confirmations[0].loop_info, vec!["1", "2"]);
    assert_eq!(extra.side_chain_notice_confirmed.len(), 1);
    assert_eq!(extra.side_chain_notice_confirmed[0].loop_info, vec!["3", "4"]);
    assert!(out.refund_hash.contains_key(&confirm.hash));

    assert_eq!(extra.side_chain_set_coinbases.len(), 1);
    assert_eq!(extra.side_chain_set_coinbases[0].signer, signer);
    assert_eq!(extra.side_chain_set_coinbases[0].coinbase, addr(9));
}

#[test]
fn unrelated_payloads_change_nothing() {
    let h = Harness::new(DposConfig::default(), MemoryBalances::new())
        .tx(TxBuilder::new(1).payload("hello").build(), addr(1))
        .tx(TxBuilder::new(2).payload("dpos:2:event:vote").build(), addr(1))
        .tx(TxBuilder::new(3).payload("dpos:1:oplog:note:x").build(), addr(1))
        .tx(TxBuilder::new(4).data(vec![0xff, 0x00, 0x3a]).build(), addr(1));

    let before = admin_extra(vec![addr(ADMIN)]);
    let out = h.run(before.clone());
    assert_eq!(out.header_extra, before);
    assert!(out.refund_hash.is_empty());
    assert!(out.refund_gas.is_empty());
}

#[test]
fn processed_extra_roundtrips_through_the_codec() {
    let who = addr(1);
    let signer = addr(2);
    let h = Harness::new(deposit_config(1), MemoryBalances::new().with(who, coins(10)))
        .recorded_block(BLOCK - 1, vec![signer])
        .tx(TxBuilder::new(1).to(addr(5)).payload("dpos:1:event:vote").build(), who)
        .tx(
            TxBuilder::new(2).payload("dpos:1:event:proposal:proposal_type:6:mvb:5").build(),
            who,
        )
        .tx(
            TxBuilder::new(3)
                .payload(&format!("dpos:1:event:confirm:{}", BLOCK - 1))
                .build(),
            signer,
        );

    let out = h.run(admin_extra(vec![signer]));
    let bytes = h.engine.encode_header_extra(BLOCK, &out.header_extra).unwrap();
    let decoded = h.engine.decode_header_extra(BLOCK, &bytes).unwrap();
    assert_eq!(decoded, out.header_extra);
    assert_eq!(decoded.current_block_proposals[0].min_voter_balance, 5);
}
