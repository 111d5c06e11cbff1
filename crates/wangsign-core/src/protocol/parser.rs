use time::PrimitiveDateTime;
use tracing::{debug, trace};

use super::error::PacketError;
use super::header::{Header, SlotAttributes};
use super::layout;
use super::reader::{BodyReader, HeaderReader};
use super::timestamp::decode_timestamp;
use crate::message::{DisplayMode, Message, Speed};
use crate::packet::Packet;

/// Stateful decoder yielding `(slot, message)` pairs in slot order.
///
/// Absent slots (length zero) are skipped. After the first error the
/// iterator is exhausted; messages yielded before it remain usable for
/// diagnostics.
pub struct PacketDecoder<'a> {
    header: Header,
    body: BodyReader<'a>,
    next_slot: usize,
    failed: bool,
}

impl<'a> PacketDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, PacketError> {
        let reader = HeaderReader::new(bytes)?;
        let header = Header::read(&reader)?;
        trace!(
            blink = header.blink,
            border = header.border,
            lengths = ?header.lengths,
            timestamp = ?header.timestamp,
            "decoded packet header"
        );
        Ok(Self {
            header,
            body: BodyReader::new(reader.body()),
            next_slot: 0,
            failed: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn timestamp(&self) -> Result<PrimitiveDateTime, PacketError> {
        decode_timestamp(self.header.timestamp)
    }

    /// Body bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.body.consumed()
    }

    fn decode_slot(&mut self, attrs: SlotAttributes) -> Result<Message, PacketError> {
        let mode = DisplayMode::from_nibble(attrs.mode).ok_or(PacketError::InvalidMode {
            slot: attrs.slot,
            value: attrs.mode,
        })?;
        let columns = self.body.take_cells(attrs.slot, attrs.cells as usize)?;
        Ok(Message {
            speed: Speed::from_nibble(attrs.speed),
            mode,
            border: attrs.border,
            blink: attrs.blink,
            columns,
        })
    }
}

impl Iterator for PacketDecoder<'_> {
    type Item = Result<(usize, Message), PacketError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.next_slot < layout::SLOTS {
            let slot = self.next_slot;
            self.next_slot += 1;
            let Some(attrs) = self.header.slot(slot) else {
                debug!(slot, "skipping absent slot");
                continue;
            };
            let result = self.decode_slot(attrs);
            match &result {
                Ok(message) => debug!(
                    slot,
                    mode = %message.mode,
                    speed = message.speed.get(),
                    cells = message.columns.len(),
                    "decoded message"
                ),
                Err(_) => self.failed = true,
            }
            return Some(result.map(|message| (slot, message)));
        }
        None
    }
}

/// Decodes a full packet. Any failing slot fails the whole decode.
///
/// # Examples
/// ```
/// use wangsign_core::{SAMPLE_PACKET, decode_packet};
///
/// let packet = decode_packet(&SAMPLE_PACKET)?;
/// assert_eq!(packet.messages.len(), 1);
/// assert_eq!(packet.messages[0].columns.len(), 11);
/// # Ok::<(), wangsign_core::PacketError>(())
/// ```
pub fn decode_packet(bytes: &[u8]) -> Result<Packet, PacketError> {
    let decoder = PacketDecoder::new(bytes)?;
    let magic = decoder.header().magic;
    let timestamp = decoder.timestamp()?;
    let messages = decoder
        .map(|entry| entry.map(|(_, message)| message))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Packet {
        magic,
        timestamp,
        messages,
    })
}
