//! Badge packet codec.
//!
//! The packet follows the same layered structure as the rest of the crate:
//! - `layout`: byte offsets, ranges and limits (source of truth)
//! - `reader`: bounds-checked header access and the body cursor
//! - `header`: raw header fields and nibble/bitmask packing
//! - `timestamp`: the six raw date-time bytes
//! - `parser`: decoding into domain types (no direct byte indexing)
//! - `encoder`: encoding, padding and the size guard
//! - `error`: explicit, actionable errors
//!
//! Everything here is pure; the device write lives in `sink`.

pub mod encoder;
pub mod error;
pub mod header;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod timestamp;

pub use encoder::{check_size, encode_packet, padded_len};
pub use error::PacketError;
pub use parser::{PacketDecoder, decode_packet};
