//! Small vector types shared by the whole pipeline.

pub mod vec2;
pub mod vec3;

pub use vec2::{TexCoord, Vec2};
pub use vec3::{Normal, Position, Vec3};
