// Path: crates/test_utils/src/mocks.rs
//! In-memory collaborators for the DPoS engine.

use dpos_api::chain::ChainReader;
use dpos_api::snapshot::{SnapshotSource, SnapshotView};
use dpos_api::state::{BalanceState, SharedBalances};
use dpos_api::transaction::SenderRecovery;
use dpos_types::app::{Address, Hash, Header, Transaction, U256};
use dpos_types::error::{ConsensusError, StateError};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

/// A chain of headers held in memory, keyed by number.
#[derive(Debug, Default, Clone)]
pub struct MemoryChain {
    headers: BTreeMap<u64, Header>,
}

impl MemoryChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the header at its number.
    pub fn insert(&mut self, header: Header) {
        self.headers.insert(header.number, header);
    }

    /// Builder-style [`MemoryChain::insert`].
    pub fn with(mut self, header: Header) -> Self {
        self.insert(header);
        self
    }
}

impl ChainReader for MemoryChain {
    fn header_by_number(&self, number: u64) -> Option<Header> {
        self.headers.get(&number).cloned()
    }
}

/// Balances held in a hash map. Unknown accounts have a zero balance.
#[derive(Debug, Default, Clone)]
pub struct MemoryBalances {
    balances: HashMap<Address, U256>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBalances {
    /// Creates an empty balance table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style balance assignment.
    pub fn with(mut self, address: Address, value: U256) -> Self {
        self.balances.insert(address, value);
        self
    }

    /// Makes every subsequent write fail with a `WriteError`.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of successful `set_balance` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Wraps the table in a shared handle, also returning the typed handle so
    /// tests can inspect it afterwards.
    pub fn shared(self) -> (SharedBalances, Arc<RwLock<MemoryBalances>>) {
        let typed = Arc::new(RwLock::new(self));
        let shared: SharedBalances = typed.clone();
        (shared, typed)
    }
}

impl BalanceState for MemoryBalances {
    fn balance(&self, address: &Address) -> Result<U256, StateError> {
        Ok(self.balances.get(address).copied().unwrap_or_default())
    }

    fn set_balance(&mut self, address: Address, value: U256) -> Result<(), StateError> {
        if self.fail_writes {
            return Err(StateError::WriteError(format!(
                "rejected write for {address:?}"
            )));
        }
        self.balances.insert(address, value);
        self.writes += 1;
        Ok(())
    }
}

/// A snapshot with fixed voter and side-chain sets.
#[derive(Debug, Default, Clone)]
pub struct StaticSnapshot {
    voters: HashSet<Address>,
    side_chains: HashSet<Hash>,
}

impl StaticSnapshot {
    /// Creates a snapshot with no voters and no side chains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a voter.
    pub fn with_voter(mut self, voter: Address) -> Self {
        self.voters.insert(voter);
        self
    }

    /// Registers a side chain.
    pub fn with_side_chain(mut self, hash: Hash) -> Self {
        self.side_chains.insert(hash);
        self
    }
}

impl SnapshotView for StaticSnapshot {
    fn is_voter(&self, address: &Address) -> bool {
        self.voters.contains(address)
    }

    fn is_side_chain_exist(&self, hash: &Hash) -> bool {
        self.side_chains.contains(hash)
    }
}

/// A snapshot source that serves one snapshot for every block and records the
/// requests it saw.
#[derive(Default)]
pub struct StaticSnapshots {
    snapshot: Option<Arc<StaticSnapshot>>,
    requests: Mutex<Vec<(u64, Hash)>>,
}

impl StaticSnapshots {
    /// Serves `snapshot` for every request.
    pub fn new(snapshot: StaticSnapshot) -> Self {
        Self {
            snapshot: Some(Arc::new(snapshot)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self::default()
    }

    /// The `(number, hash)` pairs requested so far.
    pub fn requests(&self) -> Vec<(u64, Hash)> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SnapshotSource for StaticSnapshots {
    fn snapshot(&self, number: u64, hash: &Hash) -> Result<Arc<dyn SnapshotView>, StateError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((number, *hash));
        }
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Err(StateError::Backend(format!(
                "no snapshot stored for block {number}"
            ))),
        }
    }
}

/// Sender recovery from a table keyed by transaction hash. Transactions not in
/// the table fail recovery.
#[derive(Debug, Default, Clone)]
pub struct PlainSenders {
    senders: HashMap<Hash, Address>,
}

impl PlainSenders {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sender` as the sender of `tx`.
    pub fn with(mut self, tx: &Transaction, sender: Address) -> Self {
        self.senders.insert(tx.hash, sender);
        self
    }
}

impl SenderRecovery for PlainSenders {
    fn sender(&self, tx: &Transaction) -> Result<Address, ConsensusError> {
        self.senders
            .get(&tx.hash)
            .copied()
            .ok_or_else(|| ConsensusError::SenderRecovery(format!("unknown tx {:?}", tx.hash)))
    }
}
