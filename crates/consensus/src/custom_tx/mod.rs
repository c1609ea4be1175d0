// Path: crates/consensus/src/custom_tx/mod.rs
//! The custom-transaction interpreter.
//!
//! Governance commands ride in ordinary transaction payloads. This module
//! classifies them, validates their fields, runs the proposal deposit check and
//! folds the accepted effects into the block's `HeaderExtra`. Anything malformed
//! is dropped without an error; the transaction then stays a plain transfer.

pub mod admin;
pub mod builder;
pub mod command;
pub mod confirm;
pub mod gate;
pub mod sc;
pub mod validate;

pub use builder::{Collaborators, Effect, ExtraBuilder};
pub use command::{classify, classify_str, AdminCommand, Command};
pub use sc::build_sc_event_confirm_data;
