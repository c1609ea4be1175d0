// Path: crates/consensus/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! Custom-transaction interpreter and header-extra accumulator of the DPoS engine.

pub mod custom_tx;
pub mod dpos;
pub mod extra;
pub mod refund;
pub mod util;

pub use dpos::{BlockContext, CustomTxOutcome, DposEngine};
pub use extra::{decode_header_extra, encode_header_extra};
pub use refund::settle_refunds;
