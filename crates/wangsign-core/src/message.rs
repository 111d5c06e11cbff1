use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitmap::{BitmapError, Raster, encode_raster};
use crate::protocol::{PacketError, layout};

/// One 8-pixel-wide column block: a byte per row, bit 7 is the leftmost pixel.
pub type Cell = [u8; layout::CELL_HEIGHT];

/// How the badge animates a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DisplayMode {
    ScrollLeft = 0,
    ScrollRight = 1,
    ScrollUp = 2,
    ScrollDown = 3,
    StillCenter = 4,
    Animation = 5,
    DropDown = 6,
    Curtain = 7,
    Laser = 8,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 9] = [
        Self::ScrollLeft,
        Self::ScrollRight,
        Self::ScrollUp,
        Self::ScrollDown,
        Self::StillCenter,
        Self::Animation,
        Self::DropDown,
        Self::Curtain,
        Self::Laser,
    ];

    /// Values 9..=15 are reserved and yield `None`.
    pub fn from_nibble(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub const fn as_nibble(self) -> u8 {
        self as u8
    }

    /// Short name accepted on the command line.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::ScrollLeft => "left",
            Self::ScrollRight => "right",
            Self::ScrollUp => "up",
            Self::ScrollDown => "down",
            Self::StillCenter => "center",
            Self::Animation => "anim",
            Self::DropDown => "drop",
            Self::Curtain => "curtain",
            Self::Laser => "laser",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display mode '{0}' (expected left, right, up, down, center, anim, drop, curtain or laser)")]
pub struct UnknownModeError(pub String);

impl FromStr for DisplayMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

/// Animation speed, 0 (slowest) to 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = layout::NIBBLE_MASK;

    pub fn new(value: u8) -> Result<Self, PacketError> {
        if value > Self::MAX {
            return Err(PacketError::SpeedOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub(crate) fn from_nibble(value: u8) -> Self {
        Self(value & layout::NIBBLE_MASK)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A single frame shown by the badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speed: Speed,
    pub mode: DisplayMode,
    pub border: bool,
    pub blink: bool,
    pub columns: Vec<Cell>,
}

impl Message {
    pub fn new(mode: DisplayMode, speed: Speed) -> Self {
        Self {
            speed,
            mode,
            border: false,
            blink: false,
            columns: Vec::new(),
        }
    }

    /// Builds a message whose columns are the bitmap of `raster`.
    ///
    /// # Examples
    /// ```
    /// use wangsign_core::{DisplayMode, GrayRaster, Message, Speed};
    ///
    /// let raster = GrayRaster::new(20, 11);
    /// let msg = Message::from_raster(&raster, DisplayMode::ScrollLeft, Speed::new(5)?)?;
    /// assert_eq!(msg.columns.len(), 3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_raster<R: Raster + ?Sized>(
        raster: &R,
        mode: DisplayMode,
        speed: Speed,
    ) -> Result<Self, BitmapError> {
        let mut message = Self::new(mode, speed);
        message.set_image(raster)?;
        Ok(message)
    }

    /// Replaces the columns. On error the message is left unchanged.
    pub fn set_image<R: Raster + ?Sized>(&mut self, raster: &R) -> Result<(), BitmapError> {
        self.columns = encode_raster(raster)?;
        Ok(())
    }

    pub fn with_blink(mut self, blink: bool) -> Self {
        self.blink = blink;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn body_len(&self) -> usize {
        self.columns.len() * layout::CELL_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_nibbles_are_dense() {
        for (value, mode) in DisplayMode::ALL.iter().enumerate() {
            assert_eq!(mode.as_nibble() as usize, value);
            assert_eq!(DisplayMode::from_nibble(value as u8), Some(*mode));
        }
        for reserved in 9..=15 {
            assert_eq!(DisplayMode::from_nibble(reserved), None);
        }
    }

    #[test]
    fn mode_parses_short_names() {
        assert_eq!("anim".parse::<DisplayMode>().unwrap(), DisplayMode::Animation);
        assert_eq!("LEFT".parse::<DisplayMode>().unwrap(), DisplayMode::ScrollLeft);
        let err = "sideways".parse::<DisplayMode>().unwrap_err();
        assert!(err.to_string().contains("unknown display mode 'sideways'"));
    }

    #[test]
    fn speed_rejects_values_above_fifteen() {
        assert_eq!(Speed::new(15).unwrap().get(), 15);
        assert_eq!(
            Speed::new(16).unwrap_err(),
            PacketError::SpeedOutOfRange { value: 16 }
        );
    }

    #[test]
    fn set_image_keeps_columns_on_error() {
        let mut msg = Message::new(DisplayMode::Laser, Speed::new(1).unwrap());
        msg.columns = vec![[0xAA; layout::CELL_HEIGHT]];
        let bad = crate::GrayRaster::new(8, 12);
        assert!(msg.set_image(&bad).is_err());
        assert_eq!(msg.columns, vec![[0xAA; layout::CELL_HEIGHT]]);
    }
}
