//! Common types used in the protocol.

use std::fmt;

use crate::constants::*;

/// GATT characteristics of the Fluff service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Command channel to the GeneralPlus audio/motion controller.
    GeneralPlusWrite,
    /// Notification channel from the GeneralPlus controller.
    GeneralPlusListen,
    /// Command channel to the Nordic BLE controller.
    NordicWrite,
    /// Notification channel from the Nordic controller.
    NordicListen,
    /// Signal strength notification channel.
    RssiListen,
    /// Raw chunk channel used during DLC uploads.
    FileWrite,
}

impl Characteristic {
    /// The 128-bit GATT UUID of this characteristic.
    pub fn uuid(&self) -> &'static str {
        match self {
            Characteristic::GeneralPlusWrite => CHAR_GENERALPLUS_WRITE,
            Characteristic::GeneralPlusListen => CHAR_GENERALPLUS_LISTEN,
            Characteristic::NordicWrite => CHAR_NORDIC_WRITE,
            Characteristic::NordicListen => CHAR_NORDIC_LISTEN,
            Characteristic::RssiListen => CHAR_RSSI_LISTEN,
            Characteristic::FileWrite => CHAR_FILE_WRITE,
        }
    }
}

/// How a mood meter write is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodAction {
    /// Add the value to the current level.
    Increase,
    /// Replace the current level with the value.
    Set,
}

impl From<MoodAction> for u8 {
    fn from(action: MoodAction) -> Self {
        match action {
            MoodAction::Increase => 0,
            MoodAction::Set => 1,
        }
    }
}

/// The five mood meters the device keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodMeterType {
    /// How excited the Furby is.
    Excitedness,
    /// How displeased the Furby is.
    Displeasedness,
    /// How tired the Furby is.
    Tiredness,
    /// How full the Furby is.
    Fullness,
    /// General wellness.
    Wellness,
}

impl MoodMeterType {
    /// The wire code for this mood meter.
    pub fn code(&self) -> u8 {
        match self {
            MoodMeterType::Excitedness => 0x00,
            MoodMeterType::Displeasedness => 0x01,
            MoodMeterType::Tiredness => 0x02,
            MoodMeterType::Fullness => 0x03,
            MoodMeterType::Wellness => 0x04,
        }
    }

    /// Look up a mood meter by wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(MoodMeterType::Excitedness),
            0x01 => Some(MoodMeterType::Displeasedness),
            0x02 => Some(MoodMeterType::Tiredness),
            0x03 => Some(MoodMeterType::Fullness),
            0x04 => Some(MoodMeterType::Wellness),
            _ => None,
        }
    }
}

/// DLC transfer status codes, the second byte of a file-transfer
/// notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// The announced file already exists in the slot.
    FileAlreadyExists,
    /// The device accepted the upload and is ready for chunks.
    ReadyToReceive,
    /// The device gave up waiting for chunks.
    TransferTimeout,
    /// The device is ready to append to a partial file.
    ReadyToAppend,
    /// The file was stored successfully.
    FileReceivedOk,
    /// The file could not be stored.
    FileReceivedError,
    /// A status code outside the documented table.
    Other(u8),
}

impl TransferStatus {
    /// The wire code for this status.
    pub fn code(&self) -> u8 {
        match self {
            TransferStatus::FileAlreadyExists => 0x01,
            TransferStatus::ReadyToReceive => 0x02,
            TransferStatus::TransferTimeout => 0x03,
            TransferStatus::ReadyToAppend => 0x04,
            TransferStatus::FileReceivedOk => 0x05,
            TransferStatus::FileReceivedError => 0x06,
            TransferStatus::Other(code) => *code,
        }
    }

    /// Whether this status reports a failed or unstartable transfer.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TransferStatus::FileAlreadyExists
                | TransferStatus::TransferTimeout
                | TransferStatus::FileReceivedError
        )
    }
}

impl From<u8> for TransferStatus {
    fn from(code: u8) -> Self {
        match code {
            0x01 => TransferStatus::FileAlreadyExists,
            0x02 => TransferStatus::ReadyToReceive,
            0x03 => TransferStatus::TransferTimeout,
            0x04 => TransferStatus::ReadyToAppend,
            0x05 => TransferStatus::FileReceivedOk,
            0x06 => TransferStatus::FileReceivedError,
            _ => TransferStatus::Other(code),
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferStatus::FileAlreadyExists => write!(f, "file already exists"),
            TransferStatus::ReadyToReceive => write!(f, "ready to receive"),
            TransferStatus::TransferTimeout => write!(f, "device-side transfer timeout"),
            TransferStatus::ReadyToAppend => write!(f, "ready to append"),
            TransferStatus::FileReceivedOk => write!(f, "file received ok"),
            TransferStatus::FileReceivedError => write!(f, "file received with error"),
            TransferStatus::Other(code) => write!(f, "unknown status (0x{:02X})", code),
        }
    }
}

/// Status events carried in a Furby message notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Entered naming mode.
    EnteredNamingMode,
    /// Exited naming mode.
    ExitedNamingMode,
    /// The Furby was named.
    FurbyNamed,
    /// Entered app mode.
    EnteredAppMode,
    /// Exited app mode.
    ExitedAppMode,
    /// A response finished playing.
    ResponsePlayed,
    /// Speech is playing.
    SpeechPlaying,
    /// Slave acknowledgment.
    SlaveAck,
    /// An action mask was added.
    MaskAdded,
    /// An action mask was removed.
    MaskRemoved,
    /// A sequence started playing.
    SequencePlaying,
    /// A sequence was cancelled.
    SequenceCancelled,
    /// A sequence finished.
    SequenceEnded,
    /// The action `input` selector was out of range.
    InputOutOfRange,
    /// The action `index` was out of range.
    IndexOutOfRange,
    /// The action `subindex` was out of range.
    SubindexOutOfRange,
    /// The action `specific` id was out of range.
    SpecificOutOfRange,
    /// A sleep mask was added.
    SleepMaskAdded,
    /// A sleep mask was removed.
    SleepMaskRemoved,
    /// Body camera turned on.
    BodycamOn,
    /// Body camera turned off.
    BodycamOff,
    /// LCD turned on.
    LcdOn,
    /// LCD turned off.
    LcdOff,
    /// The addressed group is not active.
    GroupNotActive,
    /// A timed group was set.
    TimedGroupSet,
    /// A custom notification was set.
    CustomNotificationSet,
    /// An event code outside the documented table.
    Other(u8),
}

impl StatusEvent {
    /// The wire code for this event.
    pub fn code(&self) -> u8 {
        match self {
            StatusEvent::EnteredNamingMode => 0x01,
            StatusEvent::ExitedNamingMode => 0x02,
            StatusEvent::FurbyNamed => 0x03,
            StatusEvent::EnteredAppMode => 0x04,
            StatusEvent::ExitedAppMode => 0x05,
            StatusEvent::ResponsePlayed => 0x06,
            StatusEvent::SpeechPlaying => 0x07,
            StatusEvent::SlaveAck => 0x08,
            StatusEvent::MaskAdded => 0x0A,
            StatusEvent::MaskRemoved => 0x0B,
            StatusEvent::SequencePlaying => 0x0C,
            StatusEvent::SequenceCancelled => 0x0D,
            StatusEvent::SequenceEnded => 0x0E,
            StatusEvent::InputOutOfRange => 0x0F,
            StatusEvent::IndexOutOfRange => 0x10,
            StatusEvent::SubindexOutOfRange => 0x11,
            StatusEvent::SpecificOutOfRange => 0x12,
            StatusEvent::SleepMaskAdded => 0x13,
            StatusEvent::SleepMaskRemoved => 0x14,
            StatusEvent::BodycamOn => 0x15,
            StatusEvent::BodycamOff => 0x16,
            StatusEvent::LcdOn => 0x17,
            StatusEvent::LcdOff => 0x18,
            StatusEvent::GroupNotActive => 0x19,
            StatusEvent::TimedGroupSet => 0x1A,
            StatusEvent::CustomNotificationSet => 0x1B,
            StatusEvent::Other(code) => *code,
        }
    }
}

impl From<u8> for StatusEvent {
    fn from(code: u8) -> Self {
        match code {
            0x01 => StatusEvent::EnteredNamingMode,
            0x02 => StatusEvent::ExitedNamingMode,
            0x03 => StatusEvent::FurbyNamed,
            0x04 => StatusEvent::EnteredAppMode,
            0x05 => StatusEvent::ExitedAppMode,
            0x06 => StatusEvent::ResponsePlayed,
            0x07 => StatusEvent::SpeechPlaying,
            0x08 => StatusEvent::SlaveAck,
            0x0A => StatusEvent::MaskAdded,
            0x0B => StatusEvent::MaskRemoved,
            0x0C => StatusEvent::SequencePlaying,
            0x0D => StatusEvent::SequenceCancelled,
            0x0E => StatusEvent::SequenceEnded,
            0x0F => StatusEvent::InputOutOfRange,
            0x10 => StatusEvent::IndexOutOfRange,
            0x11 => StatusEvent::SubindexOutOfRange,
            0x12 => StatusEvent::SpecificOutOfRange,
            0x13 => StatusEvent::SleepMaskAdded,
            0x14 => StatusEvent::SleepMaskRemoved,
            0x15 => StatusEvent::BodycamOn,
            0x16 => StatusEvent::BodycamOff,
            0x17 => StatusEvent::LcdOn,
            0x18 => StatusEvent::LcdOff,
            0x19 => StatusEvent::GroupNotActive,
            0x1A => StatusEvent::TimedGroupSet,
            0x1B => StatusEvent::CustomNotificationSet,
            _ => StatusEvent::Other(code),
        }
    }
}
