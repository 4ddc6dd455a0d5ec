//! Bounding box rasterization with barycentric coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's screen-space bounding box and clamp it to the
//!    frame buffer
//! 2. For each pixel in the box, solve for its barycentric weights
//! 3. A pixel is covered if all three weights are non-negative (edges count)
//! 4. Covered pixels are depth tested with the interpolated z; survivors are
//!    shaded and written
//!
//! Pixels are sampled at integer coordinates: the viewport mapping puts pixel
//! centers there. The box is walked column by column to match the frame
//! buffer's rotated layout.

use super::shader::{LitTextureShader, PixelShader};
use super::{BarycentricSolver, Rasterizer};
use crate::light::DirectionalLight;
use crate::math::Position;
use crate::pipeline::RenderTarget;
use crate::render::framebuffer::FrameBuffer;
use crate::triangle::Triangle;

/// Triangle rasterizer that tests every pixel of the clamped bounding box.
pub struct BarycentricRasterizer;

impl BarycentricRasterizer {
    /// Creates a new barycentric rasterizer instance.
    pub fn new() -> Self {
        BarycentricRasterizer {}
    }

    /// Rasterize a triangle using the provided pixel shader.
    ///
    /// Degenerate and non-finite triangles are skipped entirely.
    pub fn rasterize_with_shader<S: PixelShader>(
        screen: &Triangle<Position>,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) {
        let Some(solver) = BarycentricSolver::new(screen) else {
            return;
        };
        let Some((min_x, max_x, min_y, max_y)) = Self::clamped_bounds(screen, buffer) else {
            return;
        };
        let depths = screen.map(|p| p.z);

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let weights = solver.weights(x as f32, y as f32);
                if !weights.is_inside() {
                    continue;
                }
                let depth = weights.interpolate(depths);
                if depth > buffer.depth_at(x, y) {
                    buffer.write(x, y, depth, shader.shade(&weights));
                }
            }
        }
    }

    /// Integer bounding box of the triangle, clamped to the buffer.
    ///
    /// Returns `None` when the box lies entirely outside the buffer.
    fn clamped_bounds(
        screen: &Triangle<Position>,
        buffer: &FrameBuffer,
    ) -> Option<(u32, u32, u32, u32)> {
        let Triangle { a, b, c } = *screen;
        let max_x_pixel = buffer.width() as i64 - 1;
        let max_y_pixel = buffer.height() as i64 - 1;

        let min_x = (a.x.min(b.x).min(c.x).floor() as i64).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(max_x_pixel);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i64).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(max_y_pixel);

        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some((min_x as u32, max_x as u32, min_y as u32, max_y as u32))
    }
}

impl Default for BarycentricRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for BarycentricRasterizer {
    fn draw(&self, target: &RenderTarget, light: &DirectionalLight, buffer: &mut FrameBuffer) {
        let shader = LitTextureShader::new(
            target.texture,
            target.texcoords,
            light.vertex_intensities(target.normals),
        );
        Self::rasterize_with_shader(&target.screen, buffer, &shader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec2, Vec3};
    use crate::texture::Texture;
    use approx::assert_relative_eq;

    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    fn solid(color: u32) -> Texture {
        Texture::from_pixels(2, 2, vec![color; 4]).unwrap()
    }

    fn target<'a>(screen: Triangle<Position>, texture: &'a Texture) -> RenderTarget<'a> {
        RenderTarget {
            screen,
            normals: Triangle::new(Vec3::FORWARD, Vec3::FORWARD, Vec3::FORWARD),
            texcoords: Triangle::new(Vec2::ZERO, Vec2::ONE, Vec2::ZERO),
            texture,
        }
    }

    fn flat(z: f32, points: [(f32, f32); 3]) -> Triangle<Position> {
        let [a, b, c] = points.map(|(x, y)| Vec3::new(x, y, z));
        Triangle::new(a, b, c)
    }

    fn covered(buffer: &FrameBuffer) -> usize {
        buffer.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn fills_interior_and_leaves_exterior() {
        let texture = solid(RED);
        let mut buffer = FrameBuffer::new(20, 20);
        let screen = flat(0.5, [(2.3, 2.3), (12.3, 2.3), (2.3, 12.3)]);
        BarycentricRasterizer::new().draw(
            &target(screen, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );

        assert_eq!(buffer.pixel_at(4, 4), 0x00FE_0000);
        assert_relative_eq!(buffer.depth_at(4, 4), 0.5, epsilon = 1e-6);
        assert_eq!(buffer.pixel_at(3, 11), 0x00FE_0000);
        // Beyond the hypotenuse and left of the legs.
        assert_eq!(buffer.pixel_at(8, 7), 0);
        assert_eq!(buffer.depth_at(8, 7), f32::NEG_INFINITY);
        assert_eq!(buffer.pixel_at(2, 5), 0);
        // Pixels (x, y) with x, y >= 3 and x + y <= 14.
        assert_eq!(covered(&buffer), 45);
    }

    #[test]
    fn vertices_are_inclusive() {
        let texture = solid(RED);
        let mut buffer = FrameBuffer::new(20, 20);
        let screen = flat(0.5, [(2.0, 2.0), (12.0, 2.0), (2.0, 12.0)]);
        BarycentricRasterizer::new().draw(
            &target(screen, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );
        for (x, y) in [(2, 2), (12, 2), (2, 12)] {
            assert_eq!(buffer.pixel_at(x, y), 0x00FE_0000);
        }
    }

    #[test]
    fn closer_triangle_wins_in_either_order() {
        let red = solid(RED);
        let blue = solid(BLUE);
        let near = target(flat(0.9, [(0.0, 0.0), (15.0, 0.0), (0.0, 15.0)]), &red);
        let far = target(flat(0.1, [(3.0, 3.0), (19.0, 3.0), (3.0, 19.0)]), &blue);
        let light = DirectionalLight::default();
        let rasterizer = BarycentricRasterizer::new();

        let mut first = FrameBuffer::new(20, 20);
        rasterizer.draw(&near, &light, &mut first);
        rasterizer.draw(&far, &light, &mut first);

        let mut second = FrameBuffer::new(20, 20);
        rasterizer.draw(&far, &light, &mut second);
        rasterizer.draw(&near, &light, &mut second);

        assert_eq!(first.pixels(), second.pixels());
        assert_eq!(first.pixel_at(5, 5), 0x00FE_0000);
        assert_relative_eq!(first.depth_at(5, 5), 0.9, epsilon = 1e-6);
        assert_eq!(first.pixel_at(14, 4), 0x0000_00FE);
    }

    #[test]
    fn offscreen_parts_are_clamped() {
        let texture = solid(RED);
        let mut buffer = FrameBuffer::new(10, 8);
        let screen = flat(0.0, [(-50.0, -50.0), (60.0, -40.0), (5.0, 70.0)]);
        BarycentricRasterizer::new().draw(
            &target(screen, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );
        assert_eq!(covered(&buffer), 80);

        let mut buffer = FrameBuffer::new(10, 8);
        let gone = flat(0.0, [(-50.0, -50.0), (-40.0, -50.0), (-45.0, -30.0)]);
        BarycentricRasterizer::new().draw(
            &target(gone, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );
        assert_eq!(covered(&buffer), 0);
    }

    #[test]
    fn degenerate_triangles_draw_nothing() {
        let texture = solid(RED);
        let mut buffer = FrameBuffer::new(10, 10);
        let line = flat(0.0, [(1.0, 1.0), (5.0, 5.0), (8.0, 8.0)]);
        BarycentricRasterizer::new().draw(
            &target(line, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );
        assert_eq!(covered(&buffer), 0);

        let blown_up = flat(0.0, [(1.0, 1.0), (f32::NAN, 5.0), (8.0, 1.0)]);
        BarycentricRasterizer::new().draw(
            &target(blown_up, &texture),
            &DirectionalLight::default(),
            &mut buffer,
        );
        assert_eq!(covered(&buffer), 0);
    }

    #[test]
    fn unlit_faces_are_black_but_still_occlude() {
        let texture = solid(RED);
        let mut buffer = FrameBuffer::new(10, 10);
        let mut away = target(flat(0.3, [(0.0, 0.0), (9.0, 0.0), (0.0, 9.0)]), &texture);
        away.normals = Triangle::new(-Vec3::FORWARD, -Vec3::FORWARD, -Vec3::FORWARD);
        BarycentricRasterizer::new().draw(&away, &DirectionalLight::default(), &mut buffer);

        assert_eq!(buffer.pixel_at(2, 2), 0);
        assert_relative_eq!(buffer.depth_at(2, 2), 0.3, epsilon = 1e-6);
    }
}
