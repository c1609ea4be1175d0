// Path: crates/consensus/src/refund.rs

//! Settles gas refunds for confirmation transactions once receipts are known.

use dpos_types::app::{refund_add_gas, Receipt, RefundGas, RefundHash, U256};

/// Sums `gas_used * gas_price` per sender over every receipt whose transaction
/// is refund-eligible.
pub fn settle_refunds(refund_hash: &RefundHash, receipts: &[Receipt]) -> RefundGas {
    let mut refund_gas = RefundGas::new();
    for receipt in receipts {
        if let Some(pair) = refund_hash.get(&receipt.tx_hash) {
            let amount = pair.gas_price.saturating_mul(U256::from(receipt.gas_used));
            refund_add_gas(&mut refund_gas, pair.sender, amount);
        }
    }
    refund_gas
}
