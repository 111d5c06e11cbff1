//! wangsign core library for LED name badge packets.
//!
//! This crate implements the pipeline used by the CLI: rasters are cut into
//! column-bitmap cells by `bitmap`, messages are framed into a fixed 64-byte
//! header plus bodies by the `protocol` codec (layout/reader/parser/encoder),
//! and complete buffers are handed to a `sink`. Encoding and decoding are
//! byte-oriented and side-effect free; all device I/O is isolated in `sink`.
//!
//! Invariants:
//! - Encoded buffers are a multiple of 64 bytes; the device accepts at most 8192.
//! - A packet carries at most eight messages, one per header slot.
//! - Decoding preserves slot order and never reports absent (zero-length) slots.
//!
//! Version française (résumé):
//! Cette crate encode des images de 11 pixels de haut en cellules de colonnes,
//! puis en paquets binaires (en-tête fixe de 64 octets, corps, remplissage à
//! 64 octets, 8192 octets maximum) et les décode. Les E/S restent dans `sink`.
//!
//! # Examples
//! ```
//! use wangsign_core::{DisplayMode, GrayRaster, Message, Packet, Speed, decode_packet};
//!
//! let mut raster = GrayRaster::new(25, 11);
//! raster.set(10, 5, 255);
//!
//! let mut packet = Packet::new();
//! packet.push(Message::from_raster(&raster, DisplayMode::Animation, Speed::new(0)?)?.with_border(true))?;
//!
//! let encoded = packet.encode()?;
//! assert_eq!(encoded.len() % 64, 0);
//! let decoded = decode_packet(encoded.bytes())?;
//! assert_eq!(decoded.messages, packet.messages);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bitmap;
mod hexdump;
mod message;
mod packet;
mod protocol;
mod report;
mod sample;
mod sink;

pub use bitmap::{
    BitmapError, GrayRaster, LIT_THRESHOLD, RASTER_HEIGHT, Raster, cell_count, encode_raster,
    luma_from_rgb, luma_from_rgba, pixel_lit,
};
pub use hexdump::hex_dump;
pub use message::{Cell, DisplayMode, Message, Speed, UnknownModeError};
pub use packet::{Encoded, MAX_MESSAGES, Packet};
pub use protocol::header::{Header, SlotAttributes};
pub use protocol::layout::{BLOCK_LEN, HEADER_LEN, MAGIC, MAX_PACKET_LEN};
pub use protocol::{PacketDecoder, PacketError, check_size, decode_packet, encode_packet, padded_len};
pub use report::{MessageReport, PacketReport, REPORT_VERSION, inspect_packet};
pub use sample::SAMPLE_PACKET;
pub use sink::{
    DEFAULT_USB_ID, HidrawDevice, HidrawSink, PacketSink, SinkError, UsbId, find_hidraw_devices,
    parse_uevent,
};
