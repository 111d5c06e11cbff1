use time::{OffsetDateTime, PrimitiveDateTime};

use crate::message::Message;
use crate::protocol::timestamp::truncate_to_seconds;
use crate::protocol::{PacketError, check_size, encode_packet, layout};

/// Maximum number of messages a packet can carry.
pub const MAX_MESSAGES: usize = layout::SLOTS;

/// The unit written to the badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub magic: [u8; 6],
    pub timestamp: PrimitiveDateTime,
    pub messages: Vec<Message>,
}

impl Packet {
    /// An empty packet stamped with the current local time.
    pub fn new() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::at(PrimitiveDateTime::new(now.date(), now.time()))
    }

    /// An empty packet with the given timestamp, truncated to seconds.
    pub fn at(timestamp: PrimitiveDateTime) -> Self {
        Self {
            magic: *layout::MAGIC,
            timestamp: truncate_to_seconds(timestamp),
            messages: Vec::new(),
        }
    }

    /// Appends a message, refusing a ninth one.
    pub fn push(&mut self, message: Message) -> Result<(), PacketError> {
        if self.messages.len() >= MAX_MESSAGES {
            return Err(PacketError::TooManyMessages {
                count: self.messages.len() + 1,
            });
        }
        self.messages.push(message);
        Ok(())
    }

    /// Encodes the packet. Oversize buffers are returned, flagged.
    pub fn encode(&self) -> Result<Encoded, PacketError> {
        Ok(Encoded {
            bytes: encode_packet(self)?,
        })
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

/// An encoded packet that may still exceed the device limit.
///
/// # Examples
/// ```
/// use wangsign_core::{DisplayMode, Message, Packet, PacketError, Speed};
///
/// let mut packet = Packet::new();
/// for _ in 0..8 {
///     let mut msg = Message::new(DisplayMode::ScrollLeft, Speed::new(5)?);
///     msg.columns = vec![[0; 11]; 1000];
///     packet.push(msg)?;
/// }
/// let encoded = packet.encode()?;
/// assert!(encoded.is_oversize());
/// assert!(!encoded.bytes().is_empty());
/// assert!(matches!(
///     encoded.into_transmittable(),
///     Err(PacketError::BufferTooLarge { .. })
/// ));
/// # Ok::<(), PacketError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    bytes: Vec<u8>,
}

impl Encoded {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_oversize(&self) -> bool {
        self.bytes.len() > layout::MAX_PACKET_LEN
    }

    pub fn check(&self) -> Result<(), PacketError> {
        check_size(&self.bytes)
    }

    /// The bytes, only if they fit the device limit.
    pub fn into_transmittable(self) -> Result<Vec<u8>, PacketError> {
        self.check()?;
        Ok(self.bytes)
    }
}
