//! Triangle rasterization.
//!
//! The rasterizer decides which pixels a triangle covers and whether they
//! survive the depth test; a [`PixelShader`] decides their color. Both see
//! coverage through [`Barycentric`] weights.
//!
//! # Weight Slots
//!
//! The weights solved for a pixel are traditionally called `(u, v, w)` with
//! `v` and `w` coming out of the solve and `u = 1 - v - w`. Here `v` weights
//! vertex **B**, `w` weights vertex **C** and `u` weights vertex **A**:
//!
//! ```text
//! attr(P) = v * attr(B) + w * attr(C) + u * attr(A)
//! ```
//!
//! [`Barycentric`] names its slots after the vertex they weight so every
//! interpolation (depth, intensity, texture coordinates) goes through the
//! same mapping.

mod barycentric;
mod shader;

pub use barycentric::BarycentricRasterizer;
pub use shader::{LitTextureShader, PixelShader};

use std::ops::{Add, Mul};

use super::framebuffer::FrameBuffer;
use crate::light::DirectionalLight;
use crate::math::Position;
use crate::pipeline::RenderTarget;
use crate::triangle::Triangle;

/// Barycentric weights of a point, one per triangle corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    /// Weight of vertex A (`1 - v - w`).
    pub a: f32,
    /// Weight of vertex B (`v`).
    pub b: f32,
    /// Weight of vertex C (`w`).
    pub c: f32,
}

impl Barycentric {
    /// Inside the triangle or on one of its edges.
    #[inline]
    pub fn is_inside(&self) -> bool {
        self.a >= 0.0 && self.b >= 0.0 && self.c >= 0.0
    }

    /// Blends the three corner values of `attr` with these weights.
    #[inline]
    pub fn interpolate<T>(&self, attr: Triangle<T>) -> T
    where
        T: Copy + Mul<f32, Output = T> + Add<Output = T>,
    {
        attr.b * self.b + attr.c * self.c + attr.a * self.a
    }
}

/// Per-triangle constants of the barycentric solve.
///
/// With `e0 = B - A`, `e1 = C - A` and `e2 = P - A` on the screen plane,
/// the weights follow from Cramer's rule on the normal equations:
///
/// ```text
/// v = (d11 * d20 - d01 * d21) / den
/// w = (d00 * d21 - d01 * d20) / den
/// den = d00 * d11 - d01 * d01
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BarycentricSolver {
    origin: (f32, f32),
    e0: (f32, f32),
    e1: (f32, f32),
    d00: f32,
    d01: f32,
    d11: f32,
    den: f32,
}

impl BarycentricSolver {
    /// Returns `None` for degenerate (zero-area) or non-finite triangles.
    pub fn new(triangle: &Triangle<Position>) -> Option<Self> {
        let Triangle { a, b, c } = *triangle;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return None;
        }
        let e0 = (b.x - a.x, b.y - a.y);
        let e1 = (c.x - a.x, c.y - a.y);
        let d00 = dot2(e0, e0);
        let d01 = dot2(e0, e1);
        let d11 = dot2(e1, e1);
        let den = d00 * d11 - d01 * d01;
        if !den.is_finite() || den.abs() < f32::EPSILON {
            return None;
        }
        Some(Self {
            origin: (a.x, a.y),
            e0,
            e1,
            d00,
            d01,
            d11,
            den,
        })
    }

    /// Weights of the screen point `(x, y)`.
    #[inline]
    pub fn weights(&self, x: f32, y: f32) -> Barycentric {
        let e2 = (x - self.origin.0, y - self.origin.1);
        let d20 = dot2(e2, self.e0);
        let d21 = dot2(e2, self.e1);
        let v = (self.d11 * d20 - self.d01 * d21) / self.den;
        let w = (self.d00 * d21 - self.d01 * d20) / self.den;
        Barycentric {
            a: 1.0 - v - w,
            b: v,
            c: w,
        }
    }
}

#[inline]
fn dot2(p: (f32, f32), q: (f32, f32)) -> f32 {
    p.0 * q.0 + p.1 * q.1
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors draw one transformed triangle into the frame buffer,
/// touching only pixels that are covered and pass the depth test.
pub trait Rasterizer {
    /// Draw a textured, lit triangle.
    ///
    /// # Arguments
    /// * `target` - The triangle in screen space with its shading inputs
    /// * `light` - The directional light, in camera space
    /// * `buffer` - The frame buffer to draw into
    fn draw(&self, target: &RenderTarget, light: &DirectionalLight, buffer: &mut FrameBuffer);
}
