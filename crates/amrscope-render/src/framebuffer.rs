//! Frame buffer read back from a backend.

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};

/// RGBA8 pixels of a rendered frame, row-major.
///
/// Rows are stored bottom row first, the way backends hand them back.
/// Use [`FrameBuffer::flipped`] or [`FrameBuffer::to_image`] before writing to
/// a top-left-origin image format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl FrameBuffer {
    /// Wraps pixel data, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> RenderResult<Self> {
        if pixels.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(RenderError::InvalidImageData {
                width,
                height,
                pixels: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a frame filled with one color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps packed 32-bit pixels, keeping their in-memory byte order.
    pub fn from_packed(width: u32, height: u32, packed: &[u32]) -> RenderResult<Self> {
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(packed);
        Self::new(width, height, pixels.to_vec())
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixels in storage order.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Returns the pixel at column `x` of stored row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns the pixel data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns a copy with the row order reversed.
    pub fn flipped(&self) -> Self {
        let row = self.width as usize;
        let pixels = if row == 0 {
            Vec::new()
        } else {
            self.pixels
                .chunks_exact(row)
                .rev()
                .flatten()
                .copied()
                .collect()
        };
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Converts to a top-left-origin RGBA image.
    pub fn to_image(&self) -> RenderResult<RgbaImage> {
        let flipped = self.flipped();
        let bytes = flipped.as_bytes().to_vec();
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(self.width, self.height, bytes)
            .ok_or(RenderError::InvalidImageData {
                width: self.width,
                height: self.height,
                pixels: self.pixels.len(),
            })?;
        Ok(img)
    }
}
