// Path: crates/api/src/chain/mod.rs
//! Defines the `ChainReader` trait used to look up historical headers.

use dpos_types::app::Header;

/// Read access to the canonical chain.
///
/// Confirmations reference earlier blocks by number; the interpreter reads the
/// signer queue recorded in that block's extra-data through this trait.
pub trait ChainReader: Send + Sync {
    /// Returns the canonical header at `number`, or `None` if it is unknown.
    fn header_by_number(&self, number: u64) -> Option<Header>;
}

impl<T: ChainReader + ?Sized> ChainReader for std::sync::Arc<T> {
    fn header_by_number(&self, number: u64) -> Option<Header> {
        (**self).header_by_number(number)
    }
}
