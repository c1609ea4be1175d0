// Path: crates/test_utils/src/fixtures/mod.rs
//! Builders for reproducible test data.

use dpos_types::app::{Address, Hash, Header, Receipt, Transaction, U256};

/// One whole coin in base units.
pub fn coin() -> U256 {
    U256::exp10(18)
}

/// `n` whole coins in base units.
pub fn coins(n: u64) -> U256 {
    U256::from(n) * coin()
}

/// A deterministic address whose low bytes encode `n`.
pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

/// A deterministic hash whose low bytes encode `n`.
pub fn hash(n: u64) -> Hash {
    Hash::from_low_u64_be(n)
}

/// Builder for a [`Transaction`].
#[derive(Debug, Clone)]
pub struct TxBuilder {
    tx: Transaction,
}

impl TxBuilder {
    /// Starts a transaction with hash `hash(id)`, no recipient, zero value and
    /// a gas price of 1.
    pub fn new(id: u64) -> Self {
        Self {
            tx: Transaction {
                hash: hash(id),
                gas_price: U256::one(),
                ..Transaction::default()
            },
        }
    }

    /// Sets the recipient.
    pub fn to(mut self, to: Address) -> Self {
        self.tx.to = Some(to);
        self
    }

    /// Sets the transferred value.
    pub fn value(mut self, value: U256) -> Self {
        self.tx.value = value;
        self
    }

    /// Sets the gas price.
    pub fn gas_price(mut self, price: u64) -> Self {
        self.tx.gas_price = U256::from(price);
        self
    }

    /// Sets a text payload.
    pub fn payload(mut self, text: &str) -> Self {
        self.tx.data = text.as_bytes().to_vec();
        self
    }

    /// Sets a raw payload.
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.tx.data = data;
        self
    }

    /// Finishes the transaction.
    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// A header at `number` whose parent hash is `hash(number - 1)`.
pub fn header(number: u64, extra: Vec<u8>) -> Header {
    Header {
        number,
        parent_hash: hash(number.saturating_sub(1)),
        time: number.saturating_mul(3),
        extra,
    }
}

/// A receipt for `tx` consuming `gas_used`.
pub fn receipt(tx: &Transaction, gas_used: u64) -> Receipt {
    Receipt {
        tx_hash: tx.hash,
        gas_used,
    }
}
