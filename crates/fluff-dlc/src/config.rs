//! Transfer timing configuration.

use std::time::Duration;

/// Timeouts and pacing for DLC transfers.
///
/// The ready and completion timeouts match the stock device's observed
/// behavior: it answers an announce within seconds but can spend minutes
/// committing a large file to storage. The per-chunk ack timeout may need
/// calibration for slower BLE stacks.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// How long to wait for the device to accept an announced upload.
    pub ready_timeout: Duration,
    /// How long to wait for the ack of each written chunk.
    pub chunk_timeout: Duration,
    /// How long to wait for the stored-file confirmation after the last
    /// chunk.
    pub complete_timeout: Duration,
    /// Settle time after a slot delete and after an upload, before the next
    /// step of a composite flash.
    pub settle_delay: Duration,
    /// Settle time after loading a slot, before activation.
    pub load_delay: Duration,
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig {
            ready_timeout: Duration::from_secs(10),
            chunk_timeout: Duration::from_secs(5),
            complete_timeout: Duration::from_secs(300),
            settle_delay: Duration::from_secs(2),
            load_delay: Duration::from_millis(500),
        }
    }
}
