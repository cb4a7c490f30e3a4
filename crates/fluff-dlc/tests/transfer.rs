//! End-to-end transfer tests against a scripted mock link.
//!
//! The mock plays the device side of the handshake: it answers the announce
//! with a ready signal, acks each chunk, and confirms the stored file, with
//! scripted deviations for the failure paths. Tests run under tokio's
//! paused clock so timeout paths complete immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fluff_dlc::{DlcSupervisor, FurbyLink, LinkError, TransferError, TransferPhase};
use fluff_protocol::{Characteristic, TransferStatus, FILE_CHUNK_SIZE};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// How the scripted device responds to writes.
#[derive(Debug, Clone, Copy)]
enum DeviceScript {
    /// Full handshake: ready after announce, ack per chunk, ok after last.
    Happy,
    /// Never respond to the announce.
    Silent,
    /// Emit a transfer error instead of the ack for the given chunk
    /// (0-based).
    FailAtChunk(usize),
    /// Handshake and ack normally but never confirm completion.
    NeverComplete,
}

struct MockInner {
    script: DeviceScript,
    writes: Mutex<Vec<(Characteristic, Vec<u8>)>>,
    gp_tx: mpsc::Sender<Vec<u8>>,
    nordic_tx: mpsc::Sender<Vec<u8>>,
    gp_rx: Mutex<Option<mpsc::Receiver<Vec<u8>>>>,
    nordic_rx: Mutex<Option<mpsc::Receiver<Vec<u8>>>>,
    total_chunks: Mutex<usize>,
    chunks_seen: Mutex<usize>,
    connected: AtomicBool,
}

#[derive(Clone)]
struct MockLink {
    inner: Arc<MockInner>,
}

impl MockLink {
    fn new(script: DeviceScript) -> Self {
        let (gp_tx, gp_rx) = mpsc::channel(64);
        let (nordic_tx, nordic_rx) = mpsc::channel(64);

        MockLink {
            inner: Arc::new(MockInner {
                script,
                writes: Mutex::new(Vec::new()),
                gp_tx,
                nordic_tx,
                gp_rx: Mutex::new(Some(gp_rx)),
                nordic_rx: Mutex::new(Some(nordic_rx)),
                total_chunks: Mutex::new(0),
                chunks_seen: Mutex::new(0),
                connected: AtomicBool::new(true),
            }),
        }
    }

    fn disconnect(&self) {
        self.inner.connected.store(false, Ordering::SeqCst);
    }

    fn writes(&self) -> Vec<(Characteristic, Vec<u8>)> {
        self.inner.writes.lock().clone()
    }

    fn chunk_writes(&self) -> Vec<Vec<u8>> {
        self.writes()
            .into_iter()
            .filter(|(c, _)| *c == Characteristic::FileWrite)
            .map(|(_, data)| data)
            .collect()
    }
}

#[async_trait]
impl FurbyLink for MockLink {
    async fn write(&self, characteristic: Characteristic, data: &[u8]) -> Result<(), LinkError> {
        if !self.inner.connected.load(Ordering::SeqCst) {
            return Err(LinkError::Disconnected);
        }
        self.inner
            .writes
            .lock()
            .push((characteristic, data.to_vec()));

        match characteristic {
            // Announce elicits the ready signal (unless scripted silent).
            Characteristic::GeneralPlusWrite if data.first() == Some(&0x50) => {
                let size = u32::from_be_bytes([0, data[2], data[3], data[4]]) as usize;
                *self.inner.total_chunks.lock() = size.div_ceil(FILE_CHUNK_SIZE);

                if !matches!(self.inner.script, DeviceScript::Silent) {
                    let _ = self.inner.gp_tx.send(vec![0x24, 0x02]).await;
                }
            }

            Characteristic::FileWrite => {
                let seen = {
                    let mut chunks_seen = self.inner.chunks_seen.lock();
                    *chunks_seen += 1;
                    *chunks_seen
                };

                match self.inner.script {
                    DeviceScript::FailAtChunk(fail_at) if seen == fail_at + 1 => {
                        let _ = self.inner.gp_tx.send(vec![0x24, 0x06]).await;
                    }
                    _ => {
                        let _ = self.inner.nordic_tx.send(vec![0x09]).await;
                        let done = seen == *self.inner.total_chunks.lock();
                        if done && matches!(self.inner.script, DeviceScript::Happy) {
                            let _ = self.inner.gp_tx.send(vec![0x24, 0x05]).await;
                        }
                    }
                }
            }

            _ => {}
        }

        Ok(())
    }

    async fn subscribe(
        &self,
        characteristic: Characteristic,
    ) -> Result<mpsc::Receiver<Vec<u8>>, LinkError> {
        let slot = match characteristic {
            Characteristic::GeneralPlusListen => &self.inner.gp_rx,
            Characteristic::NordicListen => &self.inner.nordic_rx,
            other => {
                return Err(LinkError::SubscribeFailed {
                    characteristic: other,
                    reason: "characteristic does not notify".to_string(),
                })
            }
        };
        slot.lock().take().ok_or(LinkError::SubscribeFailed {
            characteristic,
            reason: "already subscribed".to_string(),
        })
    }

    fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

#[tokio::test(start_paused = true)]
async fn upload_45_bytes_chunks_and_succeeds() {
    let link = MockLink::new(DeviceScript::Happy);
    let supervisor = DlcSupervisor::new(link.clone());

    let report = supervisor
        .upload(payload(45), 2, "TEST.DLC")
        .await
        .expect("upload should succeed");
    assert_eq!(report.bytes_sent, 45);
    assert_eq!(report.chunks_sent, 3);

    // Chunks written in order, 20/20/5, reassembling the payload.
    let chunks = link.chunk_writes();
    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, [20, 20, 5]);
    assert_eq!(chunks.concat(), payload(45));

    // Full write sequence: ack enable, announce, chunks, ack disable.
    let writes = link.writes();
    assert_eq!(writes.len(), 6);
    assert_eq!(
        writes[0],
        (Characteristic::NordicWrite, vec![0x09, 0x01, 0x00])
    );
    assert_eq!(writes[1].0, Characteristic::GeneralPlusWrite);
    assert_eq!(writes[1].1[0], 0x50);
    assert_eq!(writes[1].1[5], 2); // slot
    assert_eq!(
        writes[5],
        (Characteristic::NordicWrite, vec![0x09, 0x00, 0x00])
    );
}

#[tokio::test(start_paused = true)]
async fn empty_payload_succeeds_without_writes() {
    let link = MockLink::new(DeviceScript::Happy);
    let supervisor = DlcSupervisor::new(link.clone());

    let report = supervisor
        .upload(Vec::new(), 2, "TEST.DLC")
        .await
        .expect("empty upload should succeed");
    assert_eq!(report.bytes_sent, 0);
    assert_eq!(report.chunks_sent, 0);
    assert!(link.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn ready_timeout_before_any_chunk() {
    let link = MockLink::new(DeviceScript::Silent);
    let supervisor = DlcSupervisor::new(link.clone());

    let err = supervisor
        .upload(payload(45), 2, "TEST.DLC")
        .await
        .expect_err("silent device should time out");
    assert_eq!(
        err,
        TransferError::Timeout {
            phase: TransferPhase::Ready
        }
    );

    // No chunk ever went out, and ack mode was still switched back off.
    assert!(link.chunk_writes().is_empty());
    let writes = link.writes();
    assert_eq!(
        writes.last(),
        Some(&(Characteristic::NordicWrite, vec![0x09, 0x00, 0x00]))
    );
}

#[tokio::test(start_paused = true)]
async fn protocol_error_mid_transfer_stops_chunking() {
    // Device rejects the second of three chunks.
    let link = MockLink::new(DeviceScript::FailAtChunk(1));
    let supervisor = DlcSupervisor::new(link.clone());

    let err = supervisor
        .upload(payload(45), 2, "TEST.DLC")
        .await
        .expect_err("rejected chunk should fail the transfer");
    assert_eq!(
        err,
        TransferError::Protocol {
            status: TransferStatus::FileReceivedError
        }
    );
    assert_eq!(link.chunk_writes().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn overlapping_upload_rejected_without_link_io() {
    let link = MockLink::new(DeviceScript::Silent);
    let supervisor = Arc::new(DlcSupervisor::new(link.clone()));

    let first = {
        let supervisor = supervisor.clone();
        tokio::spawn(async move { supervisor.upload(payload(45), 2, "TEST.DLC").await })
    };

    // Let the first upload reach its ready wait.
    tokio::time::sleep(Duration::from_millis(1)).await;
    let writes_before = link.writes().len();

    let err = supervisor
        .upload(payload(10), 3, "OTHER.DLC")
        .await
        .expect_err("second upload must be rejected");
    assert_eq!(err, TransferError::InProgress);
    assert_eq!(link.writes().len(), writes_before);

    // The first session is still live and cancellable.
    supervisor.cancel();
    let first_result = first.await.expect("task should not panic");
    assert_eq!(first_result, Err(TransferError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn cancel_during_completion_wait() {
    let link = MockLink::new(DeviceScript::NeverComplete);
    let supervisor = Arc::new(DlcSupervisor::new(link.clone()));

    let upload = {
        let supervisor = supervisor.clone();
        tokio::spawn(async move { supervisor.upload(payload(30), 2, "TEST.DLC").await })
    };

    // All chunks go out and get acked; the session then sits in its
    // completion wait until the cancel lands.
    tokio::time::sleep(Duration::from_millis(10)).await;
    supervisor.cancel();

    let result = upload.await.expect("task should not panic");
    assert_eq!(result, Err(TransferError::Cancelled));
    assert_eq!(link.chunk_writes().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn disconnected_link_cancels_before_io() {
    let link = MockLink::new(DeviceScript::Happy);
    link.disconnect();
    let supervisor = DlcSupervisor::new(link.clone());

    let err = supervisor
        .upload(payload(45), 2, "TEST.DLC")
        .await
        .expect_err("dead link cannot transfer");
    assert_eq!(err, TransferError::Cancelled);
    assert!(link.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn slot_commands_write_single_frames() {
    let link = MockLink::new(DeviceScript::Happy);
    let supervisor = DlcSupervisor::new(link.clone());

    supervisor.delete(2).await.expect("delete");
    supervisor.load(2).await.expect("load");
    supervisor.activate().await.expect("activate");
    supervisor.deactivate(2).await.expect("deactivate");

    let writes = link.writes();
    let frames: Vec<&[u8]> = writes.iter().map(|(_, data)| data.as_slice()).collect();
    assert_eq!(
        frames,
        [&[0x74, 2][..], &[0x60, 2][..], &[0x61][..], &[0x62, 2][..]]
    );
    assert!(writes
        .iter()
        .all(|(c, _)| *c == Characteristic::GeneralPlusWrite));
}
