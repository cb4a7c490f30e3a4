//! Commands that can be sent to the Furby.

use bytes::BufMut;

use crate::constants::*;
use crate::error::ProtocolError;
use crate::types::{Characteristic, MoodAction, MoodMeterType};

/// Commands that can be sent to the device.
///
/// Every command encodes to a fixed-layout frame whose leading byte is the
/// opcode; the frame length is fully determined by that opcode. Chunk frames
/// are the one exception: the File write characteristic carries raw chunk
/// bytes with no opcode, so routing is by characteristic alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the antenna LED color.
    SetAntennaColor {
        /// Red channel.
        red: u8,
        /// Green channel.
        green: u8,
        /// Blue channel.
        blue: u8,
    },

    /// Trigger a fully specified action from the sequence table.
    TriggerAction {
        /// Top-level action selector (0–75).
        input: u8,
        /// Action index within the input group.
        index: u8,
        /// Action subindex.
        subindex: u8,
        /// Specific action id.
        specific: u8,
    },

    /// Set the Furby's name by id into the name table.
    SetName {
        /// Name id (0–128), see [`crate::names`].
        name_id: u8,
    },

    /// Set or adjust one of the mood meters.
    SetMood {
        /// Whether the value replaces or adjusts the current level.
        action: MoodAction,
        /// Which mood meter to touch.
        mood: MoodMeterType,
        /// New value or delta (0–100).
        value: u8,
    },

    /// Turn the LCD eye backlight on or off.
    SetLcdBacklight {
        /// True to turn the backlight on.
        enabled: bool,
    },

    /// Cycle through the LCD debug menus.
    CycleDebugMenu,

    /// Idle keepalive, written periodically to keep the Furby quiet.
    Keepalive,

    /// Announce an upcoming DLC upload into a storage slot.
    AnnounceDlcUpload {
        /// Total payload size in bytes (3-byte field on the wire).
        size: u32,
        /// Target storage slot.
        slot: u8,
        /// Upload filename, ASCII, at most 12 bytes.
        filename: String,
    },

    /// Load the DLC stored in a slot so it can be activated.
    LoadDlc {
        /// Slot to load.
        slot: u8,
    },

    /// Activate the currently loaded DLC.
    ActivateDlc,

    /// Deactivate a DLC slot without deleting its content.
    DeactivateDlc {
        /// Slot to deactivate.
        slot: u8,
    },

    /// Delete the DLC stored in a slot.
    DeleteDlcSlot {
        /// Slot to delete.
        slot: u8,
    },

    /// Enable or disable per-chunk acknowledgments from the Nordic.
    SetPacketAck {
        /// True to enable acks.
        enabled: bool,
    },

    /// One chunk of DLC payload, at most [`FILE_CHUNK_SIZE`] bytes.
    DlcChunk {
        /// Raw chunk bytes.
        data: Vec<u8>,
    },
}

impl Command {
    /// The characteristic this command is written to.
    pub fn target(&self) -> Characteristic {
        match self {
            Command::SetPacketAck { .. } => Characteristic::NordicWrite,
            Command::DlcChunk { .. } => Characteristic::FileWrite,
            _ => Characteristic::GeneralPlusWrite,
        }
    }

    /// Encode the command to a frame.
    ///
    /// Field values outside their protocol range are rejected here, before
    /// anything reaches the device; they are never clamped or wrapped.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        self.validate()?;

        let mut buf = Vec::with_capacity(MAX_PACKET_SIZE);

        match self {
            Command::SetAntennaColor { red, green, blue } => {
                buf.put_u8(CMD_SET_ANTENNA_COLOR);
                buf.put_u8(*red);
                buf.put_u8(*green);
                buf.put_u8(*blue);
            }

            Command::TriggerAction {
                input,
                index,
                subindex,
                specific,
            } => {
                buf.put_u8(CMD_TRIGGER_SPECIFIC_ACTION);
                buf.put_u8(0x00);
                buf.put_u8(*input);
                buf.put_u8(*index);
                buf.put_u8(*subindex);
                buf.put_u8(*specific);
            }

            Command::SetName { name_id } => {
                buf.put_u8(CMD_SET_NAME);
                buf.put_u8(*name_id);
            }

            Command::SetMood { action, mood, value } => {
                buf.put_u8(CMD_SET_MOODMETER);
                buf.put_u8((*action).into());
                buf.put_u8(mood.code());
                buf.put_u8(*value);
            }

            Command::SetLcdBacklight { enabled } => {
                buf.put_u8(CMD_LCD_BACKLIGHT);
                buf.put_u8(if *enabled { 0x01 } else { 0x00 });
            }

            Command::CycleDebugMenu => {
                buf.put_u8(CMD_LCD_DEBUG_MENU);
            }

            Command::Keepalive => {
                buf.put_u8(CMD_KEEPALIVE);
            }

            Command::AnnounceDlcUpload { size, slot, filename } => {
                buf.put_u8(CMD_ANNOUNCE_DLC_UPLOAD);
                buf.put_u8(0x00);
                // Size is a 3-byte big-endian field.
                buf.put_u8((*size >> 16) as u8);
                buf.put_u8((*size >> 8) as u8);
                buf.put_u8(*size as u8);
                buf.put_u8(*slot);
                // Filename is 12 bytes, null-padded.
                let mut name_buf = [0u8; DLC_FILENAME_SIZE];
                let name_bytes = filename.as_bytes();
                name_buf[..name_bytes.len()].copy_from_slice(name_bytes);
                buf.put_slice(&name_buf);
                buf.put_u8(0x00);
                buf.put_u8(0x00);
            }

            Command::LoadDlc { slot } => {
                buf.put_u8(CMD_LOAD_DLC);
                buf.put_u8(*slot);
            }

            Command::ActivateDlc => {
                buf.put_u8(CMD_ACTIVATE_DLC);
            }

            Command::DeactivateDlc { slot } => {
                buf.put_u8(CMD_DEACTIVATE_DLC);
                buf.put_u8(*slot);
            }

            Command::DeleteDlcSlot { slot } => {
                buf.put_u8(CMD_DELETE_DLC_SLOT);
                buf.put_u8(*slot);
            }

            Command::SetPacketAck { enabled } => {
                buf.put_u8(NORDIC_PACKET_ACK);
                buf.put_u8(if *enabled { 0x01 } else { 0x00 });
                buf.put_u8(0x00);
            }

            Command::DlcChunk { data } => {
                buf.put_slice(data);
            }
        }

        Ok(buf)
    }

    fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Command::TriggerAction { input, .. } if *input > MAX_ACTION_INPUT => {
                Err(ProtocolError::ValueOutOfRange {
                    field: "input",
                    value: *input as u32,
                    max: MAX_ACTION_INPUT as u32,
                })
            }

            Command::SetName { name_id } if *name_id > MAX_NAME_ID => {
                Err(ProtocolError::ValueOutOfRange {
                    field: "name_id",
                    value: *name_id as u32,
                    max: MAX_NAME_ID as u32,
                })
            }

            Command::SetMood { value, .. } if *value > MAX_MOOD_VALUE => {
                Err(ProtocolError::ValueOutOfRange {
                    field: "value",
                    value: *value as u32,
                    max: MAX_MOOD_VALUE as u32,
                })
            }

            Command::AnnounceDlcUpload { size, filename, .. } => {
                if *size > MAX_DLC_SIZE {
                    return Err(ProtocolError::ValueOutOfRange {
                        field: "size",
                        value: *size,
                        max: MAX_DLC_SIZE,
                    });
                }
                if filename.len() > DLC_FILENAME_SIZE {
                    return Err(ProtocolError::FilenameTooLong {
                        max: DLC_FILENAME_SIZE,
                        actual: filename.len(),
                    });
                }
                if !filename.is_ascii() {
                    return Err(ProtocolError::FilenameNotAscii);
                }
                Ok(())
            }

            Command::DlcChunk { data } if data.len() > FILE_CHUNK_SIZE => {
                Err(ProtocolError::ChunkTooLarge {
                    max: FILE_CHUNK_SIZE,
                    actual: data.len(),
                })
            }

            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_antenna_color() {
        let frame = Command::SetAntennaColor {
            red: 255,
            green: 128,
            blue: 0,
        }
        .encode()
        .unwrap();
        assert_eq!(frame, [0x14, 255, 128, 0]);
    }

    #[test]
    fn test_encode_trigger_action() {
        let frame = Command::TriggerAction {
            input: 55,
            index: 2,
            subindex: 14,
            specific: 0,
        }
        .encode()
        .unwrap();
        assert_eq!(frame, [0x13, 0x00, 55, 2, 14, 0]);
    }

    #[test]
    fn test_encode_trigger_action_input_out_of_range() {
        let err = Command::TriggerAction {
            input: 76,
            index: 0,
            subindex: 0,
            specific: 0,
        }
        .encode()
        .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::ValueOutOfRange {
                field: "input",
                value: 76,
                max: 75,
            }
        );
    }

    #[test]
    fn test_encode_set_name() {
        let frame = Command::SetName { name_id: 42 }.encode().unwrap();
        assert_eq!(frame, [0x21, 42]);

        assert!(Command::SetName { name_id: 129 }.encode().is_err());
    }

    #[test]
    fn test_encode_set_mood() {
        let frame = Command::SetMood {
            action: MoodAction::Set,
            mood: MoodMeterType::Fullness,
            value: 75,
        }
        .encode()
        .unwrap();
        assert_eq!(frame, [0x23, 1, 0x03, 75]);
    }

    #[test]
    fn test_encode_set_mood_value_out_of_range() {
        let err = Command::SetMood {
            action: MoodAction::Increase,
            mood: MoodMeterType::Tiredness,
            value: 101,
        }
        .encode()
        .unwrap_err();
        assert!(matches!(err, ProtocolError::ValueOutOfRange { field: "value", .. }));
    }

    #[test]
    fn test_encode_lcd_backlight() {
        let on = Command::SetLcdBacklight { enabled: true }.encode().unwrap();
        assert_eq!(on, [0xCD, 0x01]);

        let off = Command::SetLcdBacklight { enabled: false }.encode().unwrap();
        assert_eq!(off, [0xCD, 0x00]);
    }

    #[test]
    fn test_encode_debug_menu_and_keepalive() {
        assert_eq!(Command::CycleDebugMenu.encode().unwrap(), [0xDB]);
        assert_eq!(Command::Keepalive.encode().unwrap(), [0x00]);
    }

    #[test]
    fn test_encode_dlc_announce() {
        let frame = Command::AnnounceDlcUpload {
            size: 12345,
            slot: 2,
            filename: "TEST.DLC".to_string(),
        }
        .encode()
        .unwrap();

        assert_eq!(frame[0], CMD_ANNOUNCE_DLC_UPLOAD);
        assert_eq!(frame[1], 0x00);
        // 3-byte big-endian size.
        assert_eq!(&frame[2..5], &[0x00, 0x30, 0x39]);
        assert_eq!(frame[5], 2);
        // Null-padded filename.
        assert_eq!(&frame[6..18], b"TEST.DLC\x00\x00\x00\x00");
        assert_eq!(&frame[18..20], &[0x00, 0x00]);
        assert_eq!(frame.len(), 20);
    }

    #[test]
    fn test_encode_dlc_announce_rejects_bad_filename() {
        let too_long = Command::AnnounceDlcUpload {
            size: 1,
            slot: 0,
            filename: "THIRTEEN.BYTE".to_string(),
        };
        assert!(matches!(
            too_long.encode(),
            Err(ProtocolError::FilenameTooLong { actual: 13, .. })
        ));

        let non_ascii = Command::AnnounceDlcUpload {
            size: 1,
            slot: 0,
            filename: "FÜR.DLC".to_string(),
        };
        assert_eq!(non_ascii.encode(), Err(ProtocolError::FilenameNotAscii));
    }

    #[test]
    fn test_encode_dlc_announce_rejects_oversize() {
        let cmd = Command::AnnounceDlcUpload {
            size: MAX_DLC_SIZE + 1,
            slot: 0,
            filename: "A.DLC".to_string(),
        };
        assert!(matches!(
            cmd.encode(),
            Err(ProtocolError::ValueOutOfRange { field: "size", .. })
        ));
    }

    #[test]
    fn test_encode_slot_commands() {
        assert_eq!(Command::LoadDlc { slot: 2 }.encode().unwrap(), [0x60, 2]);
        assert_eq!(Command::ActivateDlc.encode().unwrap(), [0x61]);
        assert_eq!(Command::DeactivateDlc { slot: 3 }.encode().unwrap(), [0x62, 3]);
        assert_eq!(Command::DeleteDlcSlot { slot: 1 }.encode().unwrap(), [0x74, 1]);
    }

    #[test]
    fn test_encode_packet_ack() {
        let on = Command::SetPacketAck { enabled: true }.encode().unwrap();
        assert_eq!(on, [0x09, 0x01, 0x00]);

        let off = Command::SetPacketAck { enabled: false }.encode().unwrap();
        assert_eq!(off, [0x09, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_dlc_chunk_is_raw() {
        let data = vec![0xAA; 20];
        let frame = Command::DlcChunk { data: data.clone() }.encode().unwrap();
        assert_eq!(frame, data);

        let oversize = Command::DlcChunk { data: vec![0; 21] };
        assert!(matches!(
            oversize.encode(),
            Err(ProtocolError::ChunkTooLarge { actual: 21, .. })
        ));
    }

    #[test]
    fn test_command_targets() {
        let gp = Command::SetAntennaColor { red: 0, green: 0, blue: 0 };
        assert_eq!(gp.target(), Characteristic::GeneralPlusWrite);

        let nordic = Command::SetPacketAck { enabled: true };
        assert_eq!(nordic.target(), Characteristic::NordicWrite);

        let chunk = Command::DlcChunk { data: vec![1, 2, 3] };
        assert_eq!(chunk.target(), Characteristic::FileWrite);
    }
}
