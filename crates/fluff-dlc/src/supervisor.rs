//! Supervision of DLC transfers.
//!
//! The supervisor enforces the single-active-transfer invariant for one
//! link: at most one session is non-terminal at a time, and a second upload
//! request is rejected synchronously without touching the link. It also
//! carries the single-frame slot management commands and the composite
//! flash-and-activate flow around uploads.

use fluff_protocol::Command;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::chunk::ChunkPlan;
use crate::config::TransferConfig;
use crate::error::TransferError;
use crate::link::FurbyLink;
use crate::session::{TransferReport, TransferSession};

/// Drives DLC uploads and slot management against one link.
pub struct DlcSupervisor<L: FurbyLink> {
    link: L,
    config: TransferConfig,
    /// Held for the lifetime of one session; `try_lock` failing is the
    /// overlapping-upload rejection.
    gate: tokio::sync::Mutex<()>,
    cancel_tx: Mutex<watch::Sender<bool>>,
}

impl<L: FurbyLink> DlcSupervisor<L> {
    /// Create a supervisor with default timeouts.
    pub fn new(link: L) -> Self {
        Self::with_config(link, TransferConfig::default())
    }

    /// Create a supervisor with explicit timeouts.
    pub fn with_config(link: L, config: TransferConfig) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        DlcSupervisor {
            link,
            config,
            gate: tokio::sync::Mutex::new(()),
            cancel_tx: Mutex::new(cancel_tx),
        }
    }

    /// The underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Upload a payload into a storage slot, driving one transfer session to
    /// a terminal state.
    ///
    /// Rejects with [`TransferError::InProgress`], without any link I/O,
    /// while another upload is still in flight.
    pub async fn upload(
        &self,
        payload: Vec<u8>,
        slot: u8,
        filename: &str,
    ) -> Result<TransferReport, TransferError> {
        let _active = self
            .gate
            .try_lock()
            .map_err(|_| TransferError::InProgress)?;

        let plan = ChunkPlan::new(payload, slot, filename);
        let cancel_rx = {
            let (tx, rx) = watch::channel(false);
            *self.cancel_tx.lock() = tx;
            rx
        };

        info!(
            slot,
            size = plan.total_len(),
            chunks = plan.chunk_count(),
            "starting DLC upload"
        );

        let mut session =
            TransferSession::new(&self.link, plan, self.config.clone(), cancel_rx).await?;
        let result = session.run().await;

        match &result {
            Ok(report) => info!(chunks = report.chunks_sent, "DLC upload complete"),
            Err(e) => debug!("DLC upload failed: {e}"),
        }
        result
    }

    /// Cancel the in-flight upload, if any. The session observes the cancel
    /// at its next suspension point and terminates as cancelled.
    pub fn cancel(&self) {
        self.cancel_tx.lock().send_replace(true);
    }

    /// Make the device load the DLC stored in a slot.
    pub async fn load(&self, slot: u8) -> Result<(), TransferError> {
        self.write_command(Command::LoadDlc { slot }).await
    }

    /// Activate the currently loaded DLC.
    pub async fn activate(&self) -> Result<(), TransferError> {
        self.write_command(Command::ActivateDlc).await
    }

    /// Deactivate a slot without deleting its content.
    pub async fn deactivate(&self, slot: u8) -> Result<(), TransferError> {
        self.write_command(Command::DeactivateDlc { slot }).await
    }

    /// Delete the DLC stored in a slot.
    pub async fn delete(&self, slot: u8) -> Result<(), TransferError> {
        self.write_command(Command::DeleteDlcSlot { slot }).await
    }

    /// Complete flash workflow: optionally delete the slot, upload, then
    /// load and activate, with the settle delays the device needs to finish
    /// its storage work between steps.
    pub async fn flash_and_activate(
        &self,
        payload: Vec<u8>,
        slot: u8,
        filename: &str,
        delete_first: bool,
    ) -> Result<TransferReport, TransferError> {
        if delete_first {
            self.delete(slot).await?;
            tokio::time::sleep(self.config.settle_delay).await;
        }

        let report = self.upload(payload, slot, filename).await?;
        tokio::time::sleep(self.config.settle_delay).await;

        self.load(slot).await?;
        tokio::time::sleep(self.config.load_delay).await;

        self.activate().await?;
        info!(slot, "DLC flashed and activated");

        Ok(report)
    }

    async fn write_command(&self, command: Command) -> Result<(), TransferError> {
        let frame = command.encode()?;
        self.link.write(command.target(), &frame).await?;
        Ok(())
    }
}
