//! Perspective divide and viewport mapping.
//!
//! The projection is a fixed pinhole: a camera-space point is divided by
//! `1 - z / FOCAL_DISTANCE`, so points further down -Z shrink toward the
//! center. The [`Viewport`] then scales and offsets the result to pixels.

use crate::math::{Position, Vec3};
use crate::triangle::Triangle;

/// Distance controlling the strength of the perspective effect.
pub const FOCAL_DISTANCE: f32 = 3.0;

/// Divisors closer to zero than this are treated as singular.
const MIN_DEPTH_FACTOR: f32 = 1e-6;

/// Applies the perspective divide to one camera-space point.
///
/// Returns `None` when the point sits on the singular plane
/// `z == FOCAL_DISTANCE`.
#[inline]
pub fn perspective(v: Position) -> Option<Position> {
    let depth_factor = 1.0 - v.z / FOCAL_DISTANCE;
    if depth_factor.abs() < MIN_DEPTH_FACTOR || !depth_factor.is_finite() {
        return None;
    }
    Some(v / depth_factor)
}

/// Applies the perspective divide to every corner, or `None` if any corner
/// is singular.
pub fn perspective_triangle(triangle: Triangle<Position>) -> Option<Triangle<Position>> {
    Some(Triangle::new(
        perspective(triangle.a)?,
        perspective(triangle.b)?,
        perspective(triangle.c)?,
    ))
}

/// Maps projected coordinates to pixel coordinates of the output.
///
/// Both axes use the same scale (`yres / 1.5`), so the image keeps its
/// aspect ratio. The horizontal origin is the center of the output and the
/// vertical origin a quarter of the way up. `z` becomes a depth value that
/// only matters relative to other depth values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn map(&self, p: Position) -> Position {
        let scale = self.height as f32 / 1.5;
        let x_offset = self.width as f32 / 2.0;
        let y_offset = self.height as f32 / 4.0;
        Vec3::new(
            scale * p.x + x_offset,
            scale * p.y + y_offset,
            (p.z + 1.0) / 1.5,
        )
    }

    pub fn map_triangle(&self, triangle: Triangle<Position>) -> Triangle<Position> {
        triangle.map(|p| self.map(p))
    }
}
