//! Transfer error types.

use std::fmt;

use fluff_protocol::{ProtocolError, TransferStatus};
use thiserror::Error;

use crate::link::LinkError;

/// The waiting states of a transfer, used to report which deadline expired.
///
/// Distinguishing them lets a caller tell "the device never started" from
/// "the device stalled mid-transfer" from "the device went quiet at the
/// end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    /// Waiting for the device to accept the announced upload.
    Ready,
    /// Waiting for the ack of a written chunk.
    ChunkAck {
        /// Zero-based index of the chunk awaiting its ack.
        index: usize,
    },
    /// Waiting for the stored-file confirmation after the last chunk.
    Complete,
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferPhase::Ready => write!(f, "ready signal"),
            TransferPhase::ChunkAck { index } => write!(f, "ack for chunk {}", index),
            TransferPhase::Complete => write!(f, "completion confirmation"),
        }
    }
}

/// Errors surfaced by the transfer engine.
///
/// A session collapses every failure mode into exactly one of these,
/// performing its best-effort cleanup first and never masking the original
/// reason. No variant is retried automatically; whether a fresh upload is
/// worth attempting is the caller's call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Another transfer is already in flight on this link.
    #[error("a transfer is already in progress")]
    InProgress,

    /// A per-state deadline expired.
    #[error("timed out waiting for {phase}")]
    Timeout {
        /// The waiting state whose deadline expired.
        phase: TransferPhase,
    },

    /// The device reported an error instead of the expected status.
    #[error("device rejected transfer: {status}")]
    Protocol {
        /// Device-supplied status detail.
        status: TransferStatus,
    },

    /// The transport reported a write or subscribe failure.
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// The transfer was cancelled, or the link went away mid-transfer.
    #[error("transfer cancelled")]
    Cancelled,

    /// The upload request failed validation before any I/O.
    #[error("invalid upload request: {0}")]
    Invalid(#[from] ProtocolError),
}
