//! Lighting types for the renderer.

use crate::math::{Normal, Vec3};
use crate::triangle::Triangle;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// The light is fixed in camera space: it moves with the camera, so the
/// side of the mesh facing the viewer is always lit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light shining from behind the viewer.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl DirectionalLight {
    /// Create a new directional light shining from the given direction.
    /// The direction will be normalized automatically; a zero vector yields
    /// a light that illuminates nothing.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize_or_zero(),
        }
    }

    /// Lambert intensity for a unit normal. Unclamped: negative values mean
    /// the surface faces away from the light.
    #[inline]
    pub fn intensity(&self, normal: Normal) -> f32 {
        self.direction.dot(normal)
    }

    /// Per-vertex intensities of a triangle, in corner order.
    pub fn vertex_intensities(&self, normals: Triangle<Normal>) -> Triangle<f32> {
        normals.map(|n| self.intensity(n))
    }
}
