//! Color and depth buffers for one frame.
//!
//! # Layout
//!
//! The buffers are stored rotated relative to the screen: pixel `(x, y)`
//! lives at index `x * height + y`, so each screen column is contiguous.
//! The rasterizer walks a bounding box column by column, which keeps its
//! writes sequential in memory. [`FrameBuffer::unrotate_into`] converts to
//! the usual row-major display layout before presentation.
//!
//! # Depth Buffer
//!
//! Larger depth values are closer to the camera. Each frame starts at
//! negative infinity, so the first surface drawn at a pixel always wins.

use crate::colors;

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a cleared frame buffer for a `width` x `height` screen.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f32::NEG_INFINITY; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clear both buffers to prepare for a new frame.
    pub fn reset(&mut self) {
        self.color_buffer.fill(colors::BACKGROUND);
        self.depth_buffer.fill(f32::NEG_INFINITY);
    }

    /// Linear index of screen pixel `(x, y)` in the rotated layout.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x as usize * self.height as usize + y as usize
    }

    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth_buffer[self.index(x, y)]
    }

    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> u32 {
        self.color_buffer[self.index(x, y)]
    }

    /// Write a pixel if `depth` is closer than what is already stored.
    ///
    /// Returns whether the pixel was written. Color and depth are always
    /// updated together.
    #[inline]
    pub fn write(&mut self, x: u32, y: u32, depth: f32, color: u32) -> bool {
        let idx = self.index(x, y);
        if depth > self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
            true
        } else {
            false
        }
    }

    /// Raw pixels in the rotated layout.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Copy the frame into `out` in display orientation.
    ///
    /// `out` is row-major with `width` columns and `height` rows. Screen
    /// y grows upward while display rows grow downward, so screen row `y`
    /// becomes display row `height - 1 - y`.
    ///
    /// # Panics
    /// Panics if `out` doesn't hold exactly `width * height` pixels.
    pub fn unrotate_into(&self, out: &mut [u32]) {
        assert_eq!(
            out.len(),
            self.color_buffer.len(),
            "Display buffer size doesn't match dimensions"
        );
        let width = self.width as usize;
        let height = self.height as usize;
        for (x, column) in self.color_buffer.chunks_exact(height.max(1)).enumerate() {
            for (y, &color) in column.iter().enumerate() {
                out[(height - 1 - y) * width + x] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_cleared() {
        let fb = FrameBuffer::new(4, 3);
        assert!(fb.pixels().iter().all(|&p| p == 0));
        assert_eq!(fb.depth_at(3, 2), f32::NEG_INFINITY);
    }

    #[test]
    fn index_is_column_major() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.index(0, 0), 0);
        assert_eq!(fb.index(0, 2), 2);
        assert_eq!(fb.index(1, 0), 3);
        assert_eq!(fb.index(3, 2), 11);
    }

    #[test]
    fn write_respects_depth() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.write(1, 0, 0.5, 0x11));
        assert!(!fb.write(1, 0, 0.2, 0x22));
        assert!(!fb.write(1, 0, 0.5, 0x33));
        assert_eq!(fb.pixel_at(1, 0), 0x11);
        assert!(fb.write(1, 0, 0.9, 0x44));
        assert_eq!(fb.pixel_at(1, 0), 0x44);
        assert_eq!(fb.depth_at(1, 0), 0.9);
    }

    #[test]
    fn reset_clears_both_buffers() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.write(0, 1, 1.0, 0xFF);
        fb.reset();
        assert_eq!(fb.pixel_at(0, 1), 0);
        assert_eq!(fb.depth_at(0, 1), f32::NEG_INFINITY);
    }

    #[test]
    fn unrotate_puts_screen_origin_bottom_left() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.write(0, 0, 0.0, 1);
        fb.write(2, 0, 0.0, 2);
        fb.write(0, 1, 0.0, 3);
        fb.write(2, 1, 0.0, 4);

        let mut out = vec![0; 6];
        fb.unrotate_into(&mut out);
        assert_eq!(out, vec![3, 0, 4, 1, 0, 2]);
    }
}
