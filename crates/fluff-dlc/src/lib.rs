//! Chunked DLC upload engine for Furby Connect.
//!
//! This crate drives "downloadable content" uploads onto a Furby Connect's
//! internal storage over the acknowledgment-gated transfer protocol the
//! device enforces:
//!
//! 1. enable per-chunk acks on the Nordic controller,
//! 2. announce the upload (size, slot, filename) and wait for the device to
//!    signal it is ready,
//! 3. write the payload in 20-byte chunks, waiting for the ack of each
//!    chunk before the next,
//! 4. wait for the device to confirm the stored file.
//!
//! Frames come from the [`fluff_protocol`] codec; the BLE transport is
//! abstracted behind the [`FurbyLink`] capability trait, so the engine runs
//! against any stack that can write characteristics and deliver
//! notifications. [`DlcSupervisor`] enforces the single-active-transfer
//! invariant and carries the slot management commands.
//!
//! # Example
//!
//! ```rust,ignore
//! use fluff_dlc::DlcSupervisor;
//!
//! let supervisor = DlcSupervisor::new(link);
//! let report = supervisor.upload(payload, 2, "TU003410.DLC").await?;
//! println!("sent {} chunks", report.chunks_sent);
//! ```

mod chunk;
mod config;
mod error;
mod link;
mod session;
mod supervisor;

pub use chunk::*;
pub use config::*;
pub use error::*;
pub use link::*;
pub use session::*;
pub use supervisor::*;
