//! Notifications received from the Furby.

use log::trace;

use crate::constants::*;
use crate::types::{StatusEvent, TransferStatus};

/// A parsed notification frame.
///
/// Decoding is total: a frame with an unrecognized leading byte becomes
/// [`Message::Unknown`], and a recognized frame with a payload too short for
/// its layout becomes [`Message::Malformed`], both carrying the raw bytes.
/// The device emits plenty of traffic a host does not need to act on, so
/// callers decide whether either case matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// General status event from the GeneralPlus.
    Status(StatusEvent),

    /// Sensor state snapshot.
    SensorStatus {
        /// Raw sensor payload.
        raw: Vec<u8>,
    },

    /// Periodic presence signal.
    ImHere,

    /// Current device mode report.
    CurrentMode {
        /// Raw mode payload.
        raw: Vec<u8>,
    },

    /// DLC transfer status.
    Transfer(TransferStatus),

    /// Per-chunk acknowledgment from the Nordic, emitted while packet-ack
    /// mode is enabled.
    ChunkAck,

    /// DLC slot report.
    DlcReport {
        /// Raw report payload.
        raw: Vec<u8>,
    },

    /// GeneralPlus firmware version.
    FirmwareVersion {
        /// Raw version payload.
        raw: Vec<u8>,
    },

    /// Recognized opcode with a payload too short for its layout.
    Malformed {
        /// The complete raw frame.
        raw: Vec<u8>,
    },

    /// Opcode this crate does not know about.
    Unknown {
        /// The complete raw frame.
        raw: Vec<u8>,
    },
}

impl Message {
    /// Decode a notification frame. Total over all inputs; never panics or
    /// errors.
    pub fn decode(frame: &[u8]) -> Self {
        let Some(&opcode) = frame.first() else {
            return Message::Malformed { raw: Vec::new() };
        };

        match opcode {
            RESP_FURBY_MESSAGE => {
                if frame.len() < 2 {
                    return Message::Malformed { raw: frame.to_vec() };
                }
                Message::Status(StatusEvent::from(frame[1]))
            }

            RESP_SENSOR_STATUS => Message::SensorStatus {
                raw: frame[1..].to_vec(),
            },

            RESP_IM_HERE => Message::ImHere,

            RESP_CURRENT_MODE => Message::CurrentMode {
                raw: frame[1..].to_vec(),
            },

            RESP_FILE_TRANSFER_MODE => {
                if frame.len() < 2 {
                    return Message::Malformed { raw: frame.to_vec() };
                }
                Message::Transfer(TransferStatus::from(frame[1]))
            }

            NORDIC_PACKET_ACK => Message::ChunkAck,

            RESP_REPORT_DLC => Message::DlcReport {
                raw: frame[1..].to_vec(),
            },

            RESP_GPL_FIRMWARE_VERSION => Message::FirmwareVersion {
                raw: frame[1..].to_vec(),
            },

            _ => {
                trace!("unrecognized notification opcode 0x{:02X}", opcode);
                Message::Unknown { raw: frame.to_vec() }
            }
        }
    }
}
