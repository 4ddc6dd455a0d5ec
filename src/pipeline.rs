//! Per-frame geometry stage.
//!
//! Takes one face's triangles from [`MeshTriangles`] through
//! camera space, the perspective divide and the viewport, producing a
//! [`RenderTarget`] the rasterizer can draw. No clipping happens here:
//! geometry behind the camera is projected like everything else.

use crate::camera::CameraBasis;
use crate::math::{Normal, Position, TexCoord};
use crate::projection::{perspective_triangle, Viewport};
use crate::texture::Texture;
use crate::triangle::{MeshTriangles, Triangle};

/// Everything the rasterizer needs to draw one triangle.
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget<'a> {
    /// Pixel-space x/y with a depth value in z.
    pub screen: Triangle<Position>,
    /// Camera-space unit normals.
    pub normals: Triangle<Normal>,
    pub texcoords: Triangle<TexCoord>,
    pub texture: &'a Texture,
}

/// Transforms mesh triangles into render targets for a fixed output size.
#[derive(Debug, Clone, Copy)]
pub struct GeometryPipeline {
    viewport: Viewport,
}

impl GeometryPipeline {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    /// Transforms triangle `index` of `triangles`.
    ///
    /// Returns `None` when a corner hits the perspective singularity.
    pub fn transform<'a>(
        &self,
        basis: &CameraBasis,
        triangles: &MeshTriangles,
        index: usize,
        texture: &'a Texture,
    ) -> Option<RenderTarget<'a>> {
        let view = basis.view_triangle(triangles.positions()[index]);
        let projected = perspective_triangle(view)?;
        Some(RenderTarget {
            screen: self.viewport.map_triangle(projected),
            normals: basis.view_normals(triangles.normals()[index]),
            texcoords: triangles.texcoords()[index],
            texture,
        })
    }

    /// Transforms every triangle in face order, skipping singular ones.
    pub fn targets<'a>(
        &'a self,
        basis: &'a CameraBasis,
        triangles: &'a MeshTriangles,
        texture: &'a Texture,
    ) -> impl Iterator<Item = RenderTarget<'a>> + 'a {
        (0..triangles.len()).filter_map(move |i| self.transform(basis, triangles, i, texture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::math::{Vec2, Vec3};
    use crate::mesh::{Corner, Face, MeshBuilder};
    use approx::assert_relative_eq;

    fn single_triangle(z: f32) -> MeshTriangles {
        let mut builder = MeshBuilder::new();
        builder
            .push_position(Vec3::new(-1.0, 0.0, z))
            .push_position(Vec3::new(1.0, 0.0, z))
            .push_position(Vec3::new(0.0, 1.0, z))
            .push_normal(Vec3::new(0.0, 0.0, 2.0))
            .push_texcoord(Vec2::new(0.25, 0.75));
        let corner = |position| Corner {
            position,
            texcoord: 0,
            normal: 0,
        };
        builder
            .push_face(Face {
                a: corner(0),
                b: corner(1),
                c: corner(2),
            })
            .unwrap();
        MeshTriangles::from_mesh(&builder.build())
    }

    fn texture() -> Texture {
        Texture::from_pixels(1, 1, vec![0xFFFF_FFFF]).unwrap()
    }

    #[test]
    fn transforms_through_every_stage() {
        let triangles = single_triangle(0.0);
        let texture = texture();
        let pipeline = GeometryPipeline::new(Viewport::new(800, 600));
        let basis = CameraState::default().basis().unwrap();

        let target = pipeline.transform(&basis, &triangles, 0, &texture).unwrap();

        // Camera space z = -1, so the perspective factor is 4/3.
        assert_relative_eq!(target.screen.a.x, 400.0 - 400.0 * 0.75, epsilon = 1e-3);
        assert_relative_eq!(target.screen.c.y, 150.0 + 400.0 * 0.75, epsilon = 1e-3);
        assert_relative_eq!(target.screen.a.z, (1.0 - 0.75) / 1.5, epsilon = 1e-5);

        assert_relative_eq!(target.normals.a.z, 1.0, epsilon = 1e-6);
        assert_eq!(target.texcoords.b, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn targets_follow_face_order() {
        let triangles = single_triangle(0.5);
        let texture = texture();
        let pipeline = GeometryPipeline::new(Viewport::new(320, 240));
        let basis = CameraState::new(0.3, 0.2).basis().unwrap();

        let targets: Vec<_> = pipeline.targets(&basis, &triangles, &texture).collect();
        assert_eq!(targets.len(), triangles.len());
        let direct = pipeline.transform(&basis, &triangles, 0, &texture).unwrap();
        assert_eq!(targets[0].screen, direct.screen);
    }
}
