use serde::{Deserialize, Serialize};

use crate::message::{DisplayMode, Message};
use crate::protocol::timestamp::format_timestamp;
use crate::protocol::{PacketDecoder, PacketError, layout};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Human-readable summary of a decoded packet.
///
/// # Examples
/// ```
/// use wangsign_core::{SAMPLE_PACKET, inspect_packet};
///
/// let report = inspect_packet(&SAMPLE_PACKET)?;
/// assert_eq!(report.magic, "77616e670000");
/// assert_eq!(report.timestamp, "2019-08-30T23:11:39");
/// assert_eq!(report.messages[0].mode.to_string(), "anim");
/// # Ok::<(), wangsign_core::PacketError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Magic bytes in lowercase hex.
    pub magic: String,
    /// Header timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
    /// Total input size in bytes.
    pub bytes: usize,
    /// Bytes after the last message body.
    pub trailing_bytes: usize,
    /// Whether the input would be accepted by the device.
    pub within_limit: bool,
    /// Occupied slots in slot order.
    pub messages: Vec<MessageReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReport {
    pub slot: usize,
    pub mode: DisplayMode,
    pub speed: u8,
    pub blink: bool,
    pub border: bool,
    pub cells: usize,
    /// One string per pixel row, `#` for lit and `.` for dark.
    pub preview: Vec<String>,
}

impl MessageReport {
    pub fn new(slot: usize, message: &Message) -> Self {
        Self {
            slot,
            mode: message.mode,
            speed: message.speed.get(),
            blink: message.blink,
            border: message.border,
            cells: message.columns.len(),
            preview: preview_rows(message),
        }
    }
}

/// Decodes `bytes` and summarizes every occupied slot.
pub fn inspect_packet(bytes: &[u8]) -> Result<PacketReport, PacketError> {
    let mut decoder = PacketDecoder::new(bytes)?;
    let magic = decoder.header().magic;
    let fields = decoder.header().timestamp;
    let timestamp = format_timestamp(decoder.timestamp()?, fields)?;
    let messages = decoder
        .by_ref()
        .map(|entry| entry.map(|(slot, message)| MessageReport::new(slot, &message)))
        .collect::<Result<Vec<_>, _>>()?;
    let used = layout::HEADER_LEN + decoder.consumed();

    Ok(PacketReport {
        report_version: REPORT_VERSION,
        magic: magic.iter().map(|b| format!("{:02x}", b)).collect(),
        timestamp,
        bytes: bytes.len(),
        trailing_bytes: bytes.len() - used,
        within_limit: bytes.len() <= layout::MAX_PACKET_LEN,
        messages,
    })
}

fn preview_rows(message: &Message) -> Vec<String> {
    (0..layout::CELL_HEIGHT)
        .map(|row| {
            message
                .columns
                .iter()
                .flat_map(|cell| {
                    (0..layout::CELL_WIDTH).map(move |bit| {
                        if cell[row] & (0x80 >> bit) != 0 {
                            '#'
                        } else {
                            '.'
                        }
                    })
                })
                .collect()
        })
        .collect()
}
