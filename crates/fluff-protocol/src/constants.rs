//! Protocol constants
//!
//! Opcodes, GATT UUIDs, and field limits for the Furby Connect BLE protocol.
//! These values are a wire contract with the device firmware and come from
//! the bluefluff reverse engineering effort; they must be preserved
//! byte-for-byte.

// ============================================================================
// GATT Service UUIDs
// ============================================================================

/// The Fluff service carrying all control characteristics.
pub const SERVICE_FLUFF: &str = "dab91435b5a1e29cb041bcd562613bde";
/// Nordic DFU service (firmware update, not used by this crate).
pub const SERVICE_NORDIC_DFU: &str = "000015301212efde1523785feabcd123";

// ============================================================================
// GATT Characteristic UUIDs (Fluff service)
// ============================================================================

/// Command channel to the GeneralPlus audio/motion controller.
pub const CHAR_GENERALPLUS_WRITE: &str = "dab91383b5a1e29cb041bcd562613bde";
/// Notification channel from the GeneralPlus controller.
pub const CHAR_GENERALPLUS_LISTEN: &str = "dab91382b5a1e29cb041bcd562613bde";
/// Command channel to the Nordic BLE controller.
pub const CHAR_NORDIC_WRITE: &str = "dab90757b5a1e29cb041bcd562613bde";
/// Notification channel from the Nordic controller.
pub const CHAR_NORDIC_LISTEN: &str = "dab90756b5a1e29cb041bcd562613bde";
/// Signal strength notification channel.
pub const CHAR_RSSI_LISTEN: &str = "dab90755b5a1e29cb041bcd562613bde";
/// Raw chunk channel used during DLC uploads.
pub const CHAR_FILE_WRITE: &str = "dab90758b5a1e29cb041bcd562613bde";

// ============================================================================
// GeneralPlus Command Opcodes (host → device)
// ============================================================================

/// Idle keepalive, written periodically to keep the Furby from chattering.
pub const CMD_KEEPALIVE: u8 = 0x00;
/// Trigger an action by top-level input only.
pub const CMD_TRIGGER_ACTION_BY_INPUT: u8 = 0x10;
/// Trigger an action by input and index.
pub const CMD_TRIGGER_ACTION_BY_INDEX: u8 = 0x11;
/// Trigger an action by input, index, and subindex.
pub const CMD_TRIGGER_ACTION_BY_SUBINDEX: u8 = 0x12;
/// Trigger a fully specified action.
pub const CMD_TRIGGER_SPECIFIC_ACTION: u8 = 0x13;
/// Set the antenna LED color.
pub const CMD_SET_ANTENNA_COLOR: u8 = 0x14;
/// Furby status message.
pub const CMD_FURBY_MESSAGE: u8 = 0x20;
/// Set the Furby's name by id.
pub const CMD_SET_NAME: u8 = 0x21;
/// Set or adjust a mood meter.
pub const CMD_SET_MOODMETER: u8 = 0x23;
/// Configure custom notifications.
pub const CMD_SET_NOTIFICATIONS: u8 = 0x31;
/// Announce an upcoming DLC upload.
pub const CMD_ANNOUNCE_DLC_UPLOAD: u8 = 0x50;
/// Delete a file by name.
pub const CMD_DELETE_FILE: u8 = 0x53;
/// Query a file's size.
pub const CMD_GET_FILE_SIZE: u8 = 0x54;
/// Query a file's checksum.
pub const CMD_GET_CHECKSUM: u8 = 0x55;
/// Load the DLC stored in a slot.
pub const CMD_LOAD_DLC: u8 = 0x60;
/// Activate the currently loaded DLC.
pub const CMD_ACTIVATE_DLC: u8 = 0x61;
/// Deactivate a DLC slot without deleting it.
pub const CMD_DEACTIVATE_DLC: u8 = 0x62;
/// Query slot allocation.
pub const CMD_GET_SLOT_ALLOCATION: u8 = 0x72;
/// Query a slot's info.
pub const CMD_GET_SLOT_INFO: u8 = 0x73;
/// Delete the DLC stored in a slot.
pub const CMD_DELETE_DLC_SLOT: u8 = 0x74;
/// Body camera control.
pub const CMD_BODY_CAM: u8 = 0xBC;
/// LCD backlight control.
pub const CMD_LCD_BACKLIGHT: u8 = 0xCD;
/// Cycle through the LCD debug menus.
pub const CMD_LCD_DEBUG_MENU: u8 = 0xDB;
/// Query the GeneralPlus firmware version.
pub const CMD_GET_GPL_FIRMWARE: u8 = 0xFE;

// ============================================================================
// GeneralPlus Notification Opcodes (device → host)
// ============================================================================

/// Furby status message; the second byte is a [`StatusEvent`] code.
///
/// [`StatusEvent`]: crate::StatusEvent
pub const RESP_FURBY_MESSAGE: u8 = 0x20;
/// Sensor state snapshot.
pub const RESP_SENSOR_STATUS: u8 = 0x21;
/// Periodic presence signal.
pub const RESP_IM_HERE: u8 = 0x22;
/// Current device mode.
pub const RESP_CURRENT_MODE: u8 = 0x23;
/// DLC transfer status; the second byte is a [`TransferStatus`] code.
///
/// [`TransferStatus`]: crate::TransferStatus
pub const RESP_FILE_TRANSFER_MODE: u8 = 0x24;
/// Device language.
pub const RESP_LANGUAGE: u8 = 0x25;
/// Count of other Furbies met.
pub const RESP_FURBIES_MET: u8 = 0x26;
/// File size query result.
pub const RESP_GOT_FILE_SIZE: u8 = 0x54;
/// File checksum query result.
pub const RESP_GOT_FILE_CHECKSUM: u8 = 0x55;
/// Slot allocation query result.
pub const RESP_SLOTS_INFO: u8 = 0x72;
/// Slot info query result.
pub const RESP_GOT_SLOT_INFO: u8 = 0x73;
/// Slot deletion result.
pub const RESP_DELETED_SLOT: u8 = 0x74;
/// DLC slot report.
pub const RESP_REPORT_DLC: u8 = 0xDC;
/// GeneralPlus firmware version.
pub const RESP_GPL_FIRMWARE_VERSION: u8 = 0xFE;

// ============================================================================
// Nordic Opcodes
// ============================================================================

/// Per-chunk acknowledgment mode: the command that toggles it (host → Nordic)
/// and the ack notification itself (Nordic → host) share this opcode.
pub const NORDIC_PACKET_ACK: u8 = 0x09;

// ============================================================================
// Sizes and Limits
// ============================================================================

/// Maximum safe BLE write size for this device.
pub const MAX_PACKET_SIZE: usize = 20;
/// Bytes of DLC payload carried per chunk frame.
pub const FILE_CHUNK_SIZE: usize = 20;
/// Size of the filename field in a DLC announce frame.
pub const DLC_FILENAME_SIZE: usize = 12;
/// Largest DLC size encodable in the announce frame's 3-byte length field.
pub const MAX_DLC_SIZE: u32 = 0x00FF_FFFF;
/// Highest top-level action `input` selector.
pub const MAX_ACTION_INPUT: u8 = 75;
/// Highest mood meter value.
pub const MAX_MOOD_VALUE: u8 = 100;
/// Highest id in the name table.
pub const MAX_NAME_ID: u8 = 128;
/// Seconds between keepalive writes.
pub const IDLE_INTERVAL_SECS: u64 = 3;
