//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over analytic spheres with diffuse, metal and
//! dielectric surfaces, lit only by a sky gradient.

mod band;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod sampling;
mod sphere;

pub use band::{band_seed, generate_bands, render, render_band, Band, BandResult};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HIT_RANGE};
pub use material::{Scatter, ScatterResult};
pub use output::{save_image, write_ppm, OutputError, OutputResult};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, render_pixel, sky_gradient, ImageBuffer};

/// Re-export the scene description and math types
pub use ember_core::{Material, MaterialId, RenderSettings, Scene, Shape, Sphere};
pub use ember_math::{Color, Interval, Point3, Ray, Vec3};
