//! Abstract BLE link capability.
//!
//! The transfer engine never talks to a BLE stack directly; it requires only
//! the small capability surface below, implemented by whatever transport
//! layer owns the connection. Write failures must be reported, never
//! silently dropped, because the transfer state machine keys off them.

use async_trait::async_trait;
use fluff_protocol::Characteristic;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors reported by the transport layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// A characteristic write failed.
    #[error("write to {characteristic:?} failed: {reason}")]
    WriteFailed {
        /// The characteristic that was written.
        characteristic: Characteristic,
        /// Transport-supplied failure detail.
        reason: String,
    },

    /// A notification subscription could not be established.
    #[error("subscribe to {characteristic:?} failed: {reason}")]
    SubscribeFailed {
        /// The characteristic that was subscribed.
        characteristic: Characteristic,
        /// Transport-supplied failure detail.
        reason: String,
    },

    /// The link is not connected.
    #[error("link disconnected")]
    Disconnected,
}

/// Capability surface the transfer engine requires from the BLE transport.
///
/// Notifications are delivered through the channel returned by
/// [`subscribe`](FurbyLink::subscribe), one `Vec<u8>` per notification
/// frame. Implementations close the channel when the subscription dies with
/// the connection; the engine treats a closed channel as a disconnect.
#[async_trait]
pub trait FurbyLink: Send + Sync {
    /// Write a frame to a characteristic.
    async fn write(&self, characteristic: Characteristic, data: &[u8]) -> Result<(), LinkError>;

    /// Subscribe to notifications from a characteristic.
    async fn subscribe(
        &self,
        characteristic: Characteristic,
    ) -> Result<mpsc::Receiver<Vec<u8>>, LinkError>;

    /// Whether the underlying connection is currently up.
    fn is_connected(&self) -> bool;
}
