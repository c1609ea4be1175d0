// Path: crates/types/src/error/mod.rs
//! Core error types for the DPoS engine.
//!
//! Only failures that must abort block processing are modelled here. Malformed
//! governance commands are not errors: they are dropped by the interpreter and the
//! transaction stays a plain transfer.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the world state (account balances) behind the engine.
#[derive(Error, Debug)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// A lock guarding shared state was poisoned by a panicking writer.
    #[error("State lock poisoned: {0}")]
    LockPoisoned(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::LockPoisoned(_) => "STATE_LOCK_POISONED",
            Self::WriteError(_) => "STATE_WRITE_ERROR",
        }
    }
}

/// Errors produced while encoding or decoding header extra-data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value could not be encoded.
    #[error("Encode failed: {0}")]
    Encode(String),
    /// The bytes did not decode into the expected structure.
    #[error("Decode failed: {0}")]
    Decode(String),
    /// The header extra-data is too short to hold the vanity and seal regions.
    #[error("Extra-data too short: {len} bytes, need at least {min}")]
    ExtraTooShort {
        /// Length of the extra-data that was supplied.
        len: usize,
        /// Minimum length (vanity plus seal).
        min: usize,
    },
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "CODEC_ENCODE_FAILED",
            Self::Decode(_) => "CODEC_DECODE_FAILED",
            Self::ExtraTooShort { .. } => "CODEC_EXTRA_TOO_SHORT",
        }
    }
}

/// Errors related to the consensus engine.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// The snapshot of the parent block could not be loaded.
    #[error("Failed to load snapshot at block {number}: {reason}")]
    SnapshotUnavailable {
        /// Number of the block whose snapshot was requested.
        number: u64,
        /// Why the snapshot source failed.
        reason: String,
    },
    /// The sender of a transaction could not be recovered from its signature.
    #[error("Sender recovery failed: {0}")]
    SenderRecovery(String),
    /// An error occurred while accessing the state.
    #[error("State access error: {0}")]
    StateAccess(#[from] StateError),
    /// Header extra-data could not be encoded or decoded.
    #[error("Header extra codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ErrorCode for ConsensusError {
    fn code(&self) -> &'static str {
        match self {
            Self::SnapshotUnavailable { .. } => "CONSENSUS_SNAPSHOT_UNAVAILABLE",
            Self::SenderRecovery(_) => "CONSENSUS_SENDER_RECOVERY_FAILED",
            Self::StateAccess(_) => "CONSENSUS_STATE_ACCESS_ERROR",
            Self::Codec(_) => "CONSENSUS_CODEC_ERROR",
        }
    }
}
