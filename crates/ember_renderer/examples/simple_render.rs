//! Simple path tracer example.
//!
//! Renders the material showcase scene and saves it in PPM format.

use ember_core::{Preset, RenderSettings};
use ember_renderer::{render, save_image, Camera};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Build the scene
    let start = std::time::Instant::now();
    let setup = Preset::Materials.setup(0).expect("preset scene is valid");
    println!("Scene built in {:?} ({} spheres)", start.elapsed(), setup.scene.len());

    let settings = RenderSettings::default()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(50, 20)
        .with_seed(1);
    let camera = Camera::new(&setup.camera, settings.aspect_ratio);

    let image = render(&camera, &setup.scene, &settings);

    let filename = "output.ppm";
    save_image(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}
