//! Packed color helpers.
//!
//! Colors travel through the renderer as `u32` in `0xAARRGGBB` layout. The
//! frame buffer holds `0x00RRGGBB`: alpha is dropped when a texel is shaded.

/// Cleared pixel value.
pub const BACKGROUND: u32 = 0x0000_0000;

/// Splits a packed color into its `(r, g, b)` channels.
#[inline]
pub fn unpack_rgb(color: u32) -> (u32, u32, u32) {
    ((color >> 16) & 0xFF, (color >> 8) & 0xFF, color & 0xFF)
}

#[inline]
pub fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r & 0xFF) << 16 | (g & 0xFF) << 8 | (b & 0xFF)
}

/// Scales each color channel by `factor / 256` using fixed-point arithmetic.
///
/// `factor` is an 8-bit shading value, so full intensity (255) darkens a
/// channel by one step at most.
#[inline]
pub fn shade(color: u32, factor: u32) -> u32 {
    let factor = factor.min(0xFF);
    let (r, g, b) = unpack_rgb(color);
    pack_rgb((r * factor) >> 8, (g * factor) >> 8, (b * factor) >> 8)
}

/// Converts an intensity to the 8-bit shading factor used by [`shade`].
///
/// Rounds to nearest rather than truncating, so `0.5` gives 128 where a
/// plain `as u32` cast would give 127. An intensity of 1.0 that
/// interpolates to 0.99999994 across a triangle then still gives 255, and
/// a uniformly lit face shades to one color.
#[inline]
pub fn shading_factor(intensity: f32) -> u32 {
    // NaN clamps to NaN; treat it as unlit.
    if intensity.is_nan() {
        return 0;
    }
    (255.0 * intensity.clamp(0.0, 1.0)).round() as u32
}
