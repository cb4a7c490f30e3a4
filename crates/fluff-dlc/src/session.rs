//! The DLC transfer session state machine.
//!
//! One session drives exactly one chunked upload, start to finish, through
//! the handshake the device enforces: enable per-chunk acks, announce the
//! upload, wait for the ready signal, then write one chunk and wait for its
//! ack before the next, and finally wait for the device to confirm the
//! stored file. The device buffers chunks into flash and paces the sender
//! through the acks; the protocol carries no sequence numbers, so an ack is
//! tied to the most recently written chunk by arrival order alone and writes
//! must stay strictly sequential.
//!
//! Each waiting state arms its own deadline on entry, so a stalled device is
//! detected at the earliest point. Notifications the current state does not
//! care about are ignored without re-arming the deadline.

use fluff_protocol::{Characteristic, Command, Message, TransferStatus};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::chunk::ChunkPlan;
use crate::config::TransferConfig;
use crate::error::{TransferError, TransferPhase};
use crate::link::{FurbyLink, LinkError};

/// Log a progress line every this many chunks.
const PROGRESS_CHUNK_INTERVAL: usize = 50;

/// Lifecycle of a transfer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferState {
    /// Created, nothing written yet.
    Idle,
    /// Enabling per-chunk acks and announcing the upload.
    AckEnabling,
    /// Waiting for the device to accept the upload.
    AwaitingReady,
    /// Writing the next chunk.
    Chunking,
    /// Waiting for the ack of the chunk just written.
    AwaitingChunkAck,
    /// All chunks written, waiting for the stored-file confirmation.
    AwaitingComplete,
    /// Terminal: the upload was confirmed.
    Succeeded,
    /// Terminal: the upload failed.
    Failed(TransferError),
}

impl TransferState {
    /// Whether the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Succeeded | TransferState::Failed(_))
    }
}

/// Summary of a finished upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
    /// Payload bytes written.
    pub bytes_sent: usize,
    /// Chunk frames written.
    pub chunks_sent: usize,
}

/// What woke a waiting state.
enum Wake {
    Deadline,
    Cancel { closed: bool },
    Notification(Option<Vec<u8>>),
}

/// What finished an in-flight write.
enum WriteWake {
    Done(Result<(), LinkError>),
    Cancel { closed: bool },
}

/// A single chunked upload, driven to a terminal state by
/// [`run`](TransferSession::run).
///
/// The session borrows the link for the duration of one transfer and never
/// retains it beyond that. It is single-use: one `run`, one terminal state.
pub struct TransferSession<'a, L: FurbyLink> {
    link: &'a L,
    config: TransferConfig,
    plan: ChunkPlan,
    state: TransferState,
    gp_rx: mpsc::Receiver<Vec<u8>>,
    nordic_rx: mpsc::Receiver<Vec<u8>>,
    cancel: watch::Receiver<bool>,
    cancel_closed: bool,
    chunks_sent: usize,
    bytes_sent: usize,
}

impl<'a, L: FurbyLink> TransferSession<'a, L> {
    /// Create a session and subscribe to the notification channels it needs.
    pub async fn new(
        link: &'a L,
        plan: ChunkPlan,
        config: TransferConfig,
        cancel: watch::Receiver<bool>,
    ) -> Result<Self, TransferError> {
        let gp_rx = link.subscribe(Characteristic::GeneralPlusListen).await?;
        let nordic_rx = link.subscribe(Characteristic::NordicListen).await?;

        Ok(TransferSession {
            link,
            config,
            plan,
            state: TransferState::Idle,
            gp_rx,
            nordic_rx,
            cancel,
            cancel_closed: false,
            chunks_sent: 0,
            bytes_sent: 0,
        })
    }

    /// The session's current state.
    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// Drive the session to a terminal state.
    ///
    /// Whatever the outcome, the per-chunk ack mode enabled at entry is
    /// disabled again on the way out, best effort; a failure of that cleanup
    /// write never replaces the transfer outcome.
    pub async fn run(&mut self) -> Result<TransferReport, TransferError> {
        if !matches!(self.state, TransferState::Idle) {
            return Err(TransferError::InProgress);
        }

        if self.plan.is_empty() {
            debug!("empty payload, nothing to transfer");
            self.state = TransferState::Succeeded;
            return Ok(TransferReport {
                bytes_sent: 0,
                chunks_sent: 0,
            });
        }

        let result = self.drive().await;
        self.disable_packet_acks().await;

        match result {
            Ok(report) => {
                self.state = TransferState::Succeeded;
                Ok(report)
            }
            Err(e) => {
                self.state = TransferState::Failed(e.clone());
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<TransferReport, TransferError> {
        self.enter(TransferState::AckEnabling);
        self.checked_write(Command::SetPacketAck { enabled: true })
            .await?;
        self.checked_write(Command::AnnounceDlcUpload {
            size: self.plan.total_len() as u32,
            slot: self.plan.slot(),
            filename: self.plan.filename().to_string(),
        })
        .await?;

        self.enter(TransferState::AwaitingReady);
        self.await_event(TransferPhase::Ready, self.config.ready_timeout, |message| {
            matches!(
                message,
                Message::Transfer(TransferStatus::ReadyToReceive | TransferStatus::ReadyToAppend)
            )
        })
        .await?;

        let total = self.plan.chunk_count();
        debug!(total, "device ready, writing chunks");

        for index in 0..total {
            self.enter(TransferState::Chunking);
            let data = self.plan.chunk(index).to_vec();
            let len = data.len();
            self.checked_write(Command::DlcChunk { data }).await?;
            self.chunks_sent += 1;
            self.bytes_sent += len;

            self.enter(TransferState::AwaitingChunkAck);
            self.await_event(
                TransferPhase::ChunkAck { index },
                self.config.chunk_timeout,
                |message| matches!(message, Message::ChunkAck),
            )
            .await?;

            if self.chunks_sent % PROGRESS_CHUNK_INTERVAL == 0 {
                debug!(chunks = self.chunks_sent, total, "upload progress");
            }
        }

        self.enter(TransferState::AwaitingComplete);
        self.await_event(
            TransferPhase::Complete,
            self.config.complete_timeout,
            |message| matches!(message, Message::Transfer(TransferStatus::FileReceivedOk)),
        )
        .await?;

        Ok(TransferReport {
            bytes_sent: self.bytes_sent,
            chunks_sent: self.chunks_sent,
        })
    }

    fn enter(&mut self, state: TransferState) {
        trace!(?state, "transfer state");
        self.state = state;
    }

    fn cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Write a command frame, mapping transport trouble per the state
    /// machine: a dead link or a cancel is a cancellation, a reported write
    /// failure is a link error. A cancel arriving mid-write abandons the
    /// write without awaiting it further.
    async fn checked_write(&mut self, command: Command) -> Result<(), TransferError> {
        if self.cancelled() || !self.link.is_connected() {
            return Err(TransferError::Cancelled);
        }

        let target = command.target();
        let frame = command.encode()?;
        let link = self.link;
        let mut write = link.write(target, &frame);

        loop {
            let wake = tokio::select! {
                result = &mut write => WriteWake::Done(result),
                changed = self.cancel.changed(), if !self.cancel_closed => WriteWake::Cancel {
                    closed: changed.is_err(),
                },
            };

            match wake {
                WriteWake::Done(Ok(())) => return Ok(()),
                WriteWake::Done(Err(LinkError::Disconnected)) => {
                    return Err(TransferError::Cancelled)
                }
                WriteWake::Done(Err(e)) => return Err(TransferError::Link(e)),
                WriteWake::Cancel { closed: true } => self.cancel_closed = true,
                WriteWake::Cancel { closed: false } => {
                    if self.cancelled() {
                        return Err(TransferError::Cancelled);
                    }
                }
            }
        }
    }

    /// Wait until `accept` matches a decoded notification or the deadline
    /// expires. The deadline is armed once, on entry; irrelevant
    /// notifications are ignored without re-arming it. A device-reported
    /// transfer error short-circuits the wait.
    async fn await_event(
        &mut self,
        phase: TransferPhase,
        timeout: std::time::Duration,
        accept: impl Fn(&Message) -> bool,
    ) -> Result<(), TransferError> {
        let deadline = Instant::now() + timeout;

        loop {
            let wake = tokio::select! {
                _ = tokio::time::sleep_until(deadline) => Wake::Deadline,
                changed = self.cancel.changed(), if !self.cancel_closed => Wake::Cancel {
                    closed: changed.is_err(),
                },
                notification = self.gp_rx.recv() => Wake::Notification(notification),
                notification = self.nordic_rx.recv() => Wake::Notification(notification),
            };

            match wake {
                Wake::Deadline => return Err(TransferError::Timeout { phase }),

                Wake::Cancel { closed: true } => self.cancel_closed = true,
                Wake::Cancel { closed: false } => {
                    if self.cancelled() {
                        return Err(TransferError::Cancelled);
                    }
                }

                // Closed channel: the link dropped the subscription.
                Wake::Notification(None) => return Err(TransferError::Cancelled),

                Wake::Notification(Some(raw)) => {
                    let message = Message::decode(&raw);
                    if accept(&message) {
                        return Ok(());
                    }
                    match message {
                        Message::Transfer(status) if status.is_error() => {
                            return Err(TransferError::Protocol { status });
                        }
                        other => trace!(?other, "ignoring notification while waiting"),
                    }
                }
            }
        }
    }

    /// Leave the device as it was found: ack mode off. Best effort; the
    /// transfer outcome stands regardless.
    async fn disable_packet_acks(&self) {
        let frame = match (Command::SetPacketAck { enabled: false }).encode() {
            Ok(frame) => frame,
            Err(_) => return,
        };
        if let Err(e) = self
            .link
            .write(Characteristic::NordicWrite, &frame)
            .await
        {
            warn!("failed to disable packet acks after transfer: {e}");
        }
    }
}
