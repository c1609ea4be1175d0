// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # DPoS Engine Test Utilities
//!
//! In-memory implementations of the engine's collaborators plus builders for
//! addresses, transactions and headers.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
