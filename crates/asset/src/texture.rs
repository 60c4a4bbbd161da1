//! RGBA8 textures used to preview sphere UV mapping.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Texture data in CPU-friendly format.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            bail!(
                "RGBA8 texture {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            );
        }
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Square checkerboard with `cell`-pixel squares.
    ///
    /// The top-left cell is tinted red so flips of the V axis are visible on the sphere.
    pub fn checker(size: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let pixel = if x < cell && y < cell {
                    [220, 40, 40, 255]
                } else if ((x / cell) + (y / cell)) % 2 == 0 {
                    [255, 255, 255, 255]
                } else {
                    [128, 128, 128, 255]
                };
                data.extend_from_slice(&pixel);
            }
        }

        Self {
            data,
            width: size,
            height: size,
            format: TextureFormat::Rgba8,
        }
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size =
            self.width as usize * self.height as usize * self.bytes_per_pixel() as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }

    /// Save as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .with_context(|| format!("Texture buffer does not fit {}x{}", self.width, self.height))?;
        img.save(path)
            .with_context(|| format!("Failed to save texture {:?}", path))?;
        log::info!("Saved texture {}x{} to {:?}", self.width, self.height, path);
        Ok(())
    }
}
