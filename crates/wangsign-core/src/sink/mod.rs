//! Device output.
//!
//! A `PacketSink` receives a complete encoded buffer in one call. The hidraw
//! implementation locates the badge through sysfs and performs a single
//! blocking write; no response is read back.

mod hidraw;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use hidraw::{HidrawDevice, HidrawSink, find_hidraw_devices, parse_uevent};

/// USB vendor/product pair, written `vvvv:pppp` in hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsbId {
    pub vendor: u16,
    pub product: u16,
}

/// The LED name badge.
pub const DEFAULT_USB_ID: UsbId = UsbId {
    vendor: 0x0416,
    product: 0x5020,
};

impl fmt::Display for UsbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor, self.product)
    }
}

impl FromStr for UsbId {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SinkError::InvalidUsbId(s.to_string());
        let (vendor, product) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            vendor: u16::from_str_radix(vendor, 16).map_err(|_| invalid())?,
            product: u16::from_str_radix(product, 16).map_err(|_| invalid())?,
        })
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid USB id '{0}' (expected vvvv:pppp in hex)")]
    InvalidUsbId(String),
    #[error("no hidraw device found for {id}")]
    NoDevice { id: UsbId },
    #[error("device index {index} out of range ({found} found)")]
    DeviceIndex { index: usize, found: usize },
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

/// Destination for encoded packets.
pub trait PacketSink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SinkError>;
}

impl PacketSink for Vec<u8> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}
