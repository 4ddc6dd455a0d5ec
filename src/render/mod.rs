//! Pixel-level rendering: the frame buffer and the triangle rasterizer.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    Barycentric, BarycentricRasterizer, BarycentricSolver, LitTextureShader, PixelShader,
    Rasterizer,
};
