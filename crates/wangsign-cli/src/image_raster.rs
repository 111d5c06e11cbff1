use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use wangsign_core::{Raster, luma_from_rgba};

/// A decoded image file exposed to the bitmap encoder.
pub struct ImageRaster {
    image: RgbaImage,
}

impl ImageRaster {
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to load image: {}", path.display()))?;
        Ok(Self {
            image: image.to_rgba8(),
        })
    }
}

impl Raster for ImageRaster {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn luma(&self, x: usize, y: usize) -> u8 {
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        luma_from_rgba(r, g, b, a)
    }
}
