//! Protocol error types.

use thiserror::Error;

/// Errors raised when encoding a command.
///
/// Only encoding validates: a field outside its protocol range must never
/// reach the device, where it could trigger an unintended physical action.
/// Decoding never errors; unparseable notifications surface as
/// [`Message::Unknown`] or [`Message::Malformed`] instead.
///
/// [`Message::Unknown`]: crate::Message::Unknown
/// [`Message::Malformed`]: crate::Message::Malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A field value is outside its protocol range.
    #[error("{field} out of range: {value} (max {max})")]
    ValueOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Highest accepted value.
        max: u32,
    },

    /// DLC filename does not fit the announce frame's 12-byte field.
    #[error("DLC filename too long: {actual} bytes (max {max})")]
    FilenameTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length supplied.
        actual: usize,
    },

    /// DLC filename contains non-ASCII characters.
    #[error("DLC filename must be ASCII")]
    FilenameNotAscii,

    /// Chunk payload exceeds the BLE write size.
    #[error("chunk too large: {actual} bytes (max {max})")]
    ChunkTooLarge {
        /// Maximum allowed length.
        max: usize,
        /// Actual length supplied.
        actual: usize,
    },
}
