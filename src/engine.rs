//! Core rendering engine.
//!
//! The [`Engine`] owns everything that lives for the whole run (the mesh
//! triangles, the texture, the light) together with the frame buffer, and
//! renders one frame per call to [`Engine::render_frame`].

use crate::camera::CameraState;
use crate::light::DirectionalLight;
use crate::pipeline::GeometryPipeline;
use crate::projection::Viewport;
use crate::render::{BarycentricRasterizer, FrameBuffer, Rasterizer};
use crate::texture::Texture;
use crate::triangle::MeshTriangles;

pub struct Engine {
    triangles: MeshTriangles,
    texture: Texture,
    light: DirectionalLight,
    pipeline: GeometryPipeline,
    rasterizer: BarycentricRasterizer,
    framebuffer: FrameBuffer,
}

impl Engine {
    pub fn new(triangles: MeshTriangles, texture: Texture, width: u32, height: u32) -> Self {
        Self {
            triangles,
            texture,
            light: DirectionalLight::default(),
            pipeline: GeometryPipeline::new(Viewport::new(width, height)),
            rasterizer: BarycentricRasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Render one frame as seen from `camera`.
    ///
    /// Triangles are drawn in face order. Returns how many reached the
    /// rasterizer; a camera without a valid basis draws nothing and leaves a
    /// cleared frame.
    pub fn render_frame(&mut self, camera: &CameraState) -> usize {
        self.framebuffer.reset();

        let Some(basis) = camera.basis() else {
            return 0;
        };

        let mut drawn = 0;
        for target in self
            .pipeline
            .targets(&basis, &self.triangles, &self.texture)
        {
            self.rasterizer
                .draw(&target, &self.light, &mut self.framebuffer);
            drawn += 1;
        }
        drawn
    }

    /// Copy the last frame into `out` in display orientation.
    pub fn present_into(&self, out: &mut [u32]) {
        self.framebuffer.unrotate_into(out);
    }
}
