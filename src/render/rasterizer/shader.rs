//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage and depth; the shader turns the
//! barycentric weights of a covered pixel into a color.

use super::Barycentric;
use crate::colors;
use crate::math::TexCoord;
use crate::texture::Texture;
use crate::triangle::Triangle;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each pixel that is inside the
/// triangle and passes the depth test.
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric weights.
    fn shade(&self, weights: &Barycentric) -> u32;
}

/// Texture color scaled by interpolated Lambert intensity.
///
/// Intensities are computed once per vertex and blended across the
/// triangle, then clamped to `[0, 1]` and applied as an 8-bit factor to
/// the nearest texel.
pub struct LitTextureShader<'a> {
    texture: &'a Texture,
    texcoords: Triangle<TexCoord>,
    intensities: Triangle<f32>,
}

impl<'a> LitTextureShader<'a> {
    pub fn new(
        texture: &'a Texture,
        texcoords: Triangle<TexCoord>,
        intensities: Triangle<f32>,
    ) -> Self {
        Self {
            texture,
            texcoords,
            intensities,
        }
    }
}

impl PixelShader for LitTextureShader<'_> {
    #[inline]
    fn shade(&self, weights: &Barycentric) -> u32 {
        let factor = colors::shading_factor(weights.interpolate(self.intensities));
        let texel = self.texture.sample(weights.interpolate(self.texcoords));
        colors::shade(texel, factor)
    }
}
