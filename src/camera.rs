//! Orbiting camera.
//!
//! The camera sits on a sphere of radius 1 around the origin and always
//! looks at the origin. Its position is driven by two accumulated angles:
//!
//! - **Yaw**: horizontal angle, `eye.x = sin(yaw)`, `eye.z = cos(yaw)`
//! - **Pitch**: vertical offset, `eye.y = sin(pitch)`
//!
//! With yaw = pitch = 0 the eye is at `(0, 0, 1)` looking down -Z.

use crate::math::{Normal, Position, Vec3};
use crate::triangle::Triangle;

/// Per-frame input collected by the window layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Relative mouse motion since the previous frame, in pixels.
    pub dx: i32,
    pub dy: i32,
    pub quit: bool,
}

/// Accumulated orbit angles in radians.
///
/// Only updated between frames; the geometry pipeline reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Accumulates mouse motion. Moving right orbits left, moving down
    /// raises the eye.
    pub fn apply(&mut self, input: &FrameInput, sensitivity: f32) {
        self.yaw -= sensitivity * input.dx as f32;
        self.pitch += sensitivity * input.dy as f32;
    }

    /// Builds this frame's camera basis.
    pub fn basis(&self) -> Option<CameraBasis> {
        CameraBasis::look_from(Vec3::new(
            self.yaw.sin(),
            self.pitch.sin(),
            self.yaw.cos(),
        ))
    }
}

/// Orthonormal camera frame looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub eye: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    /// Camera at `eye` looking at the origin with +Y as world up.
    ///
    /// Returns `None` when the eye sits on the origin or directly above or
    /// below it, where no right vector exists.
    pub fn look_from(eye: Vec3) -> Option<Self> {
        let forward = (eye - Vec3::ZERO).try_normalize()?;
        let right = Vec3::UP.cross(forward).try_normalize()?;
        let up = forward.cross(right);
        Some(Self {
            eye,
            right,
            up,
            forward,
        })
    }

    /// Moves a point into camera space.
    #[inline]
    pub fn view_position(&self, v: Position) -> Position {
        Vec3::new(
            v.dot(self.right) - self.right.dot(self.eye),
            v.dot(self.up) - self.up.dot(self.eye),
            v.dot(self.forward) - self.forward.dot(self.eye),
        )
    }

    /// Rotates a normal into camera space and renormalizes it.
    #[inline]
    pub fn view_normal(&self, n: Normal) -> Normal {
        Vec3::new(n.dot(self.right), n.dot(self.up), n.dot(self.forward)).normalize_or_zero()
    }

    pub fn view_triangle(&self, triangle: Triangle<Position>) -> Triangle<Position> {
        triangle.map(|v| self.view_position(v))
    }

    pub fn view_normals(&self, normals: Triangle<Normal>) -> Triangle<Normal> {
        normals.map(|n| self.view_normal(n))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let basis = CameraState::default().basis().unwrap();
        assert_eq!(basis.eye, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(basis.forward.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn basis_is_orthonormal() {
        let basis = CameraState::new(0.7, -0.4).basis().unwrap();
        for axis in [basis.right, basis.up, basis.forward] {
            assert_relative_eq!(axis.magnitude(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(basis.right.dot(basis.up), 0.0, epsilon = 1e-5);
        assert_relative_eq!(basis.right.dot(basis.forward), 0.0, epsilon = 1e-5);
        assert_relative_eq!(basis.up.dot(basis.forward), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn eye_above_origin_is_degenerate() {
        assert_eq!(CameraBasis::look_from(Vec3::new(0.0, 1.0, 0.0)), None);
        assert_eq!(CameraBasis::look_from(Vec3::ZERO), None);
        assert_eq!(CameraState::new(f32::NAN, 0.0).basis(), None);
    }

    #[test]
    fn view_position_translates_eye_to_origin() {
        let basis = CameraState::new(1.1, 0.3).basis().unwrap();
        let eye = basis.view_position(basis.eye);
        assert_relative_eq!(eye.magnitude(), 0.0, epsilon = 1e-5);

        // The origin is straight ahead at distance |eye|.
        let origin = basis.view_position(Vec3::ZERO);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, -basis.eye.magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn view_normal_is_unit_or_zero() {
        let basis = CameraState::new(0.2, 0.1).basis().unwrap();
        let n = basis.view_normal(Vec3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
        assert_eq!(basis.view_normal(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn mouse_motion_accumulates() {
        let mut state = CameraState::default();
        let input = FrameInput {
            dx: 10,
            dy: -4,
            quit: false,
        };
        state.apply(&input, 0.005);
        state.apply(&input, 0.005);
        assert_relative_eq!(state.yaw, -0.1, epsilon = 1e-6);
        assert_relative_eq!(state.pitch, -0.04, epsilon = 1e-6);
    }
}
