//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::math::Vec3;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u32 = 60;
pub const MOUSE_SENSITIVITY: f32 = 0.005;

/// Software rasterizer: spins a textured mesh around under the mouse.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gel", version, about)]
pub struct Config {
    /// Path to the mesh (.obj with v/vt/vn triangles)
    pub mesh: PathBuf,

    /// Path to the diffuse texture (any format the image crate decodes)
    pub texture: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Radians of orbit per pixel of mouse motion
    #[arg(long, default_value_t = MOUSE_SENSITIVITY)]
    pub sensitivity: f32,

    /// Direction toward the light in camera space, as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,1", allow_hyphen_values = true)]
    pub light: Vec3,

    /// Window title
    #[arg(long, default_value = "Gel")]
    pub title: String,
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let components = value
        .split(',')
        .map(|c| c.trim().parse::<f32>().map_err(|e| format!("'{}': {}", c, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match components.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {} components", components.len())),
    }
}
