use std::ops::Range;

pub const MAGIC: &[u8; 6] = b"wang\0\0";
pub const MAGIC_RANGE: Range<usize> = 0..6;

pub const BLINK_OFFSET: usize = 6;
pub const BORDER_OFFSET: usize = 7;
pub const SPEED_MODE_RANGE: Range<usize> = 8..16;
pub const MESSAGE_LENGTH_RANGE: Range<usize> = 16..32;
pub const TIMESTAMP_RANGE: Range<usize> = 38..44;

pub const HEADER_LEN: usize = 64;
pub const BLOCK_LEN: usize = 64;
pub const MAX_PACKET_LEN: usize = 8192;

pub const SLOTS: usize = 8;
pub const CELL_HEIGHT: usize = 11;
pub const CELL_WIDTH: usize = 8;

pub const SPEED_SHIFT: u32 = 4;
pub const NIBBLE_MASK: u8 = 0x0F;

pub const YEAR_BASE: i32 = 2000;
pub const YEAR_MODULUS: i32 = 100;

/// Byte range of the big-endian cell count for `slot`.
pub const fn message_length_range(slot: usize) -> Range<usize> {
    let start = MESSAGE_LENGTH_RANGE.start + slot * 2;
    start..start + 2
}
