// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
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
#![deny(missing_docs)]

//! # DPoS Engine Types
//!
//! This crate is the foundational library for the DPoS engine, containing the
//! records that make up a block's header extra-data, the chain primitives the
//! engine reads (headers, transactions, receipts), the engine configuration and
//! all error enums.
//!
//! ## Architectural Role
//!
//! As the base crate, `dpos-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This prevents circular
//! dependencies and gives a single canonical definition of consensus-critical
//! types such as `HeaderExtra`, `Proposal` and `Vote`.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ConsensusError> = std::result::Result<T, E>;

/// Core application-level data structures: addresses, headers, transactions and
/// the header extra-data records.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical state.
pub mod codec;
/// Engine configuration, fork gating and codec version selection.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
