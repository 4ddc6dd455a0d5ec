use clap::Parser;

use gel::camera::CameraState;
use gel::config::Config;
use gel::light::DirectionalLight;
use gel::mesh::Mesh;
use gel::texture::Texture;
use gel::triangle::MeshTriangles;
use gel::window::{FrameLimiter, Window};
use gel::Engine;

fn main() -> Result<(), String> {
    let config = Config::parse();

    let mesh = Mesh::from_obj(&config.mesh)
        .map_err(|e| format!("{}: {}", config.mesh.display(), e))?;
    let texture = Texture::from_file(&config.texture)
        .map_err(|e| format!("{}: {}", config.texture.display(), e))?;
    let triangles = MeshTriangles::from_mesh(&mesh);

    println!(
        "Loaded {} ({} vertices, {} triangles), texture {} ({}x{})",
        config.mesh.display(),
        mesh.positions().len(),
        triangles.len(),
        config.texture.display(),
        texture.width(),
        texture.height()
    );
    if triangles.is_empty() {
        eprintln!("warning: {} has no faces, nothing will be drawn", config.mesh.display());
    }

    let mut window = Window::new(&config.title, config.width, config.height)?;
    let mut limiter = FrameLimiter::new(&window, config.fps);

    let mut engine = Engine::new(triangles, texture, config.width, config.height);
    engine.set_light(DirectionalLight::new(config.light));

    let mut camera = CameraState::default();
    let mut display = vec![0u32; (config.width * config.height) as usize];

    loop {
        let input = window.poll_input();
        if input.quit {
            break;
        }
        camera.apply(&input, config.sensitivity);

        engine.render_frame(&camera);
        engine.present_into(&mut display);
        window.present(&display)?;

        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
