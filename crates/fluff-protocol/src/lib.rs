//! Furby Connect BLE Protocol
//!
//! This crate provides types and pure codec functions for the vendor binary
//! protocol spoken by Furby Connect toys over BLE. The protocol splits
//! across a handful of GATT characteristics:
//!
//! - **GeneralPlus write/listen**: commands to and notifications from the
//!   GeneralPlus audio/motion controller. Frames start with an opcode byte
//!   followed by a fixed, opcode-determined payload.
//! - **Nordic write/listen**: commands to the Nordic BLE controller, most
//!   importantly the per-chunk acknowledgment mode used during DLC uploads.
//! - **File write**: raw DLC chunk bytes, no opcode.
//!
//! Everything here is stateless and side-effect free; encoding validates
//! field ranges up front and decoding is total over arbitrary input.
//!
//! # Example
//!
//! ```
//! use fluff_protocol::{Command, Message, TransferStatus};
//!
//! let frame = Command::SetAntennaColor { red: 255, green: 128, blue: 0 }.encode()?;
//! assert_eq!(frame, [0x14, 255, 128, 0]);
//!
//! let message = Message::decode(&[0x24, 0x02]);
//! assert_eq!(message, Message::Transfer(TransferStatus::ReadyToReceive));
//! # Ok::<(), fluff_protocol::ProtocolError>(())
//! ```

mod commands;
mod constants;
mod error;
mod messages;
pub mod names;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use messages::*;
pub use types::*;
