//! A CPU software rasterizer for textured, lit triangle meshes.
//!
//! Meshes are read from a subset of Wavefront OBJ, pushed through a fixed
//! orbit-camera geometry pipeline and rasterized with barycentric coverage
//! into a depth-tested frame buffer. SDL2 is used only for the window, mouse
//! input and putting the finished pixels on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use gel::prelude::*;
//!
//! let mesh = Mesh::from_obj("model.obj")?;
//! let texture = Texture::from_file("skin.png")?;
//! let mut engine = Engine::new(MeshTriangles::from_mesh(&mesh), texture, 800, 600);
//! engine.render_frame(&CameraState::new(0.0, 0.0));
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod texture;
pub mod triangle;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use config::Config;
pub use engine::Engine;
pub use mesh::{LoadError, Mesh};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use gel::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{CameraBasis, CameraState, FrameInput};

    // Engine
    pub use crate::engine::Engine;
    pub use crate::light::DirectionalLight;

    // Geometry
    pub use crate::mesh::{LoadError, Mesh};
    pub use crate::pipeline::{GeometryPipeline, RenderTarget};
    pub use crate::projection::Viewport;
    pub use crate::texture::Texture;
    pub use crate::triangle::{MeshTriangles, Triangle};

    // Math
    pub use crate::math::{Normal, Position, TexCoord, Vec2, Vec3};

    // Window & Input
    pub use crate::window::{FrameLimiter, Window};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        Barycentric, BarycentricRasterizer, BarycentricSolver, FrameBuffer, Rasterizer,
    };
}
