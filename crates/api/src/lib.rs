// Path: crates/api/src/lib.rs

//! # DPoS Engine API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
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
//! # DPoS Engine API
//!
//! The interfaces the custom-transaction interpreter consumes. The engine never
//! owns chain storage, world state, snapshots or signature recovery; it reaches
//! them through the traits defined here.

/// Read access to historical block headers.
pub mod chain;
/// Re-exports all core error types from the central `dpos-types` crate.
pub mod error;
/// Read-only views of the voting snapshot of a parent block.
pub mod snapshot;
/// Account balances, the shared state handle and its copy-on-write overlay.
pub mod state;
/// Recovery of transaction senders.
pub mod transaction;
