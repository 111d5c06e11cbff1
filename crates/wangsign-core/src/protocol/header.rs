use super::error::PacketError;
use super::layout;
use super::reader::{HeaderReader, bit_set};

/// Raw header fields, one entry per slot for the attribute arrays.
///
/// Reserved ranges are not represented; they are always written as zero and
/// ignored on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub magic: [u8; 6],
    pub blink: u8,
    pub border: u8,
    pub speed_mode: [u8; layout::SLOTS],
    pub lengths: [u16; layout::SLOTS],
    pub timestamp: [u8; 6],
}

/// Attributes of one occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAttributes {
    pub slot: usize,
    pub speed: u8,
    pub mode: u8,
    pub blink: bool,
    pub border: bool,
    pub cells: u16,
}

impl Header {
    pub fn read(reader: &HeaderReader<'_>) -> Result<Self, PacketError> {
        let mut lengths = [0u16; layout::SLOTS];
        for (slot, length) in lengths.iter_mut().enumerate() {
            *length = reader.read_u16_be(layout::message_length_range(slot))?;
        }
        Ok(Self {
            magic: reader.read_array(layout::MAGIC_RANGE)?,
            blink: reader.read_u8(layout::BLINK_OFFSET)?,
            border: reader.read_u8(layout::BORDER_OFFSET)?,
            speed_mode: reader.read_array(layout::SPEED_MODE_RANGE)?,
            lengths,
            timestamp: reader.read_array(layout::TIMESTAMP_RANGE)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; layout::HEADER_LEN] {
        let mut out = [0u8; layout::HEADER_LEN];
        out[layout::MAGIC_RANGE].copy_from_slice(&self.magic);
        out[layout::BLINK_OFFSET] = self.blink;
        out[layout::BORDER_OFFSET] = self.border;
        out[layout::SPEED_MODE_RANGE].copy_from_slice(&self.speed_mode);
        for (slot, length) in self.lengths.iter().enumerate() {
            out[layout::message_length_range(slot)].copy_from_slice(&length.to_be_bytes());
        }
        out[layout::TIMESTAMP_RANGE].copy_from_slice(&self.timestamp);
        out
    }

    /// Attributes for `slot`, or `None` when its length is zero (absent).
    pub fn slot(&self, slot: usize) -> Option<SlotAttributes> {
        let cells = *self.lengths.get(slot)?;
        if cells == 0 {
            return None;
        }
        let (speed, mode) = unpack_speed_mode(self.speed_mode[slot]);
        Some(SlotAttributes {
            slot,
            speed,
            mode,
            blink: bit_set(self.blink, slot),
            border: bit_set(self.border, slot),
            cells,
        })
    }

    /// Stores attributes for `slot`. Speed and mode are masked to 4 bits.
    pub fn set_slot(&mut self, attrs: SlotAttributes) {
        let slot = attrs.slot;
        self.speed_mode[slot] = pack_speed_mode(attrs.speed, attrs.mode);
        self.lengths[slot] = attrs.cells;
        if attrs.blink {
            self.blink |= 1 << slot;
        }
        if attrs.border {
            self.border |= 1 << slot;
        }
    }

    pub fn body_len(&self) -> usize {
        self.lengths
            .iter()
            .map(|&cells| cells as usize * layout::CELL_HEIGHT)
            .sum()
    }
}

pub fn pack_speed_mode(speed: u8, mode: u8) -> u8 {
    ((speed & layout::NIBBLE_MASK) << layout::SPEED_SHIFT) | (mode & layout::NIBBLE_MASK)
}

pub fn unpack_speed_mode(value: u8) -> (u8, u8) {
    (
        (value >> layout::SPEED_SHIFT) & layout::NIBBLE_MASK,
        value & layout::NIBBLE_MASK,
    )
}
