// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use dpos_types::error::{CodecError, ConsensusError, ErrorCode, StateError};
pub use dpos_types::Result;
