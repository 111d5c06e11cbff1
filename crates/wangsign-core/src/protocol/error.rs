use thiserror::Error;

use super::layout;

/// Errors returned by packet encoding and decoding.
///
/// # Examples
/// ```
/// use wangsign_core::{PacketError, decode_packet};
///
/// let err = decode_packet(&[0u8; 10]).unwrap_err();
/// assert!(matches!(err, PacketError::TruncatedHeader { actual: 10 }));
/// assert!(err.to_string().contains("truncated header"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("truncated header: need {} bytes, got {actual}", layout::HEADER_LEN)]
    TruncatedHeader { actual: usize },
    #[error("truncated body in slot {slot}: need {needed} bytes, got {actual}")]
    TruncatedBody {
        slot: usize,
        needed: usize,
        actual: usize,
    },
    #[error("buffer too large: {size} bytes (max {max})")]
    BufferTooLarge { size: usize, max: usize },
    #[error("too many messages: {count} (max {})", layout::SLOTS)]
    TooManyMessages { count: usize },
    #[error("message {index} too long: {cells} cells (max {})", u16::MAX)]
    MessageTooLong { index: usize, cells: usize },
    #[error("invalid display mode {value} in slot {slot}")]
    InvalidMode { slot: usize, value: u8 },
    #[error("speed out of range: {value} (max 15)")]
    SpeedOutOfRange { value: u8 },
    #[error("invalid timestamp fields: {fields:?}")]
    InvalidTimestamp { fields: [u8; 6] },
}
