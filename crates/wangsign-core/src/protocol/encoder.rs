use tracing::{trace, warn};

use super::error::PacketError;
use super::header::{Header, SlotAttributes};
use super::layout;
use super::timestamp::encode_timestamp;
use crate::packet::Packet;

/// Length after zero padding to the next block boundary.
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(layout::BLOCK_LEN) * layout::BLOCK_LEN
}

/// Encodes a packet: header, message bodies in order, zero padding.
///
/// The result may exceed the device limit; see [`check_size`].
///
/// # Examples
/// ```
/// use wangsign_core::{DisplayMode, Message, Packet, Speed, encode_packet};
///
/// let mut packet = Packet::new();
/// let mut msg = Message::new(DisplayMode::ScrollLeft, Speed::new(5)?);
/// msg.columns.push([0; 11]);
/// packet.push(msg)?;
///
/// let bytes = encode_packet(&packet)?;
/// assert_eq!(bytes.len(), 128);
/// assert_eq!(&bytes[0..6], b"wang\0\0");
/// assert_eq!(bytes[8], 0x50);
/// # Ok::<(), wangsign_core::PacketError>(())
/// ```
pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>, PacketError> {
    let count = packet.messages.len();
    if count > layout::SLOTS {
        return Err(PacketError::TooManyMessages { count });
    }

    let mut header = Header {
        magic: packet.magic,
        timestamp: encode_timestamp(packet.timestamp),
        ..Header::default()
    };
    for (slot, message) in packet.messages.iter().enumerate() {
        let cells = u16::try_from(message.columns.len()).map_err(|_| {
            PacketError::MessageTooLong {
                index: slot,
                cells: message.columns.len(),
            }
        })?;
        header.set_slot(SlotAttributes {
            slot,
            speed: message.speed.get(),
            mode: message.mode.as_nibble(),
            blink: message.blink,
            border: message.border,
            cells,
        });
    }

    let body_len = header.body_len();
    let mut out = Vec::with_capacity(padded_len(layout::HEADER_LEN + body_len));
    out.extend_from_slice(&header.to_bytes());
    for message in &packet.messages {
        out.extend(message.columns.iter().flatten());
    }
    out.resize(padded_len(out.len()), 0);
    trace!(messages = count, body_len, len = out.len(), "encoded packet");
    Ok(out)
}

/// Rejects buffers larger than the device accepts.
pub fn check_size(bytes: &[u8]) -> Result<(), PacketError> {
    if bytes.len() > layout::MAX_PACKET_LEN {
        warn!(
            size = bytes.len(),
            max = layout::MAX_PACKET_LEN,
            "encoded packet exceeds device limit"
        );
        return Err(PacketError::BufferTooLarge {
            size: bytes.len(),
            max: layout::MAX_PACKET_LEN,
        });
    }
    Ok(())
}
