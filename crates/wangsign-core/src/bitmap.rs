//! Raster to column-bitmap conversion.
//!
//! A raster exactly 11 pixels high is cut into 8-pixel-wide cells. Each cell
//! holds one byte per row; bit 7 is the leftmost pixel of the cell. A pixel is
//! lit when its luminance is strictly above 127. Pixels past the raster width
//! in the last cell stay dark.

use thiserror::Error;

use crate::message::Cell;
use crate::protocol::layout;

/// The only raster height the badge accepts.
pub const RASTER_HEIGHT: usize = layout::CELL_HEIGHT;
/// Luminance values above this are lit.
pub const LIT_THRESHOLD: u8 = 0x7F;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    #[error("bad raster height: {height} (expected {})", RASTER_HEIGHT)]
    BadRasterHeight { height: usize },
    #[error("pixel buffer size mismatch: need {expected} bytes, got {actual}")]
    PixelCount { expected: usize, actual: usize },
}

/// A two-dimensional pixel source with grayscale access.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Luminance of the pixel at column `x`, row `y`, on a 0-255 scale.
    fn luma(&self, x: usize, y: usize) -> u8;
}

/// Perceptual grayscale of an 8-bit RGB colour.
pub fn luma_from_rgb(r: u8, g: u8, b: u8) -> u8 {
    let y = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + (1 << 15);
    (y >> 16) as u8
}

/// Like [`luma_from_rgb`], with the channels premultiplied by alpha first.
pub fn luma_from_rgba(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let premultiply = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
    luma_from_rgb(premultiply(r), premultiply(g), premultiply(b))
}

/// In-memory grayscale raster, row-major, one byte per pixel.
///
/// # Examples
/// ```
/// use wangsign_core::{GrayRaster, Raster};
///
/// let mut raster = GrayRaster::new(25, 11);
/// raster.set(10, 5, 255);
/// assert_eq!(raster.luma(10, 5), 255);
/// assert_eq!(raster.get(25, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayRaster {
    /// A black raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn from_luma(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(BitmapError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Sets one pixel; writes outside the raster are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }
}

impl Raster for GrayRaster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn luma(&self, x: usize, y: usize) -> u8 {
        self.get(x, y).unwrap_or(0)
    }
}

/// Number of cells needed for a raster `width` pixels wide.
pub fn cell_count(width: usize) -> usize {
    width.div_ceil(layout::CELL_WIDTH)
}

/// Whether bit `bit` (0 = leftmost) of row `row` in cell `cell` is lit.
pub fn pixel_lit<R: Raster + ?Sized>(raster: &R, cell: usize, row: usize, bit: usize) -> bool {
    let x = cell * layout::CELL_WIDTH + bit;
    x < raster.width() && raster.luma(x, row) > LIT_THRESHOLD
}

/// Converts a raster into its column-bitmap cells.
///
/// # Examples
/// ```
/// use wangsign_core::{GrayRaster, encode_raster};
///
/// let mut raster = GrayRaster::new(8, 11);
/// raster.fill(200);
/// assert_eq!(encode_raster(&raster)?, vec![[0xFF; 11]]);
/// # Ok::<(), wangsign_core::BitmapError>(())
/// ```
pub fn encode_raster<R: Raster + ?Sized>(raster: &R) -> Result<Vec<Cell>, BitmapError> {
    let height = raster.height();
    if height != RASTER_HEIGHT {
        return Err(BitmapError::BadRasterHeight { height });
    }

    let cells = (0..cell_count(raster.width()))
        .map(|cell| {
            let mut out = [0u8; layout::CELL_HEIGHT];
            for (row, byte) in out.iter_mut().enumerate() {
                for bit in 0..layout::CELL_WIDTH {
                    if pixel_lit(raster, cell, row, bit) {
                        *byte |= 0x80 >> bit;
                    }
                }
            }
            out
        })
        .collect();
    Ok(cells)
}
