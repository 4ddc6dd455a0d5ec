use std::path::Path;

use crate::math::TexCoord;

/// Represents a 2D texture for texture mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format, top row first.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    // Load a texture from an image file (PNG, JPG, BMP, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wrap an already decoded, row-major ARGB buffer.
    ///
    /// Returns `None` for an empty image or when `data` doesn't hold exactly
    /// `width * height` pixels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Texel column and row for a texture coordinate.
    ///
    /// # UV Coordinate Convention
    /// - `(0,0)` is the bottom-left corner in mesh files, but rows are stored
    ///   top first, so V is flipped
    /// - Coordinates are scaled by `size - 1` and truncated, so `1.0` lands on
    ///   the last texel
    /// - The result is clamped into the texture for inputs outside `[0,1]`
    #[inline]
    pub fn texel_coords(&self, uv: TexCoord) -> (u32, u32) {
        let x = ((self.width - 1) as f32 * uv.x) as i64;
        let y = ((self.height - 1) as f32 * (1.0 - uv.y)) as i64;
        (
            x.clamp(0, self.width as i64 - 1) as u32,
            y.clamp(0, self.height as i64 - 1) as u32,
        )
    }

    /// Sample the texture at a texture coordinate using nearest-neighbor
    /// filtering.
    #[inline]
    pub fn sample(&self, uv: TexCoord) -> u32 {
        let (x, y) = self.texel_coords(uv);
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}
