//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with a hard depth budget
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use ember_core::{RenderSettings, Scene};
use ember_math::{Color, Interval, Ray};
use rand::{Rng, RngCore};

use crate::hittable::{Hittable, HIT_RANGE};
use crate::material::Scatter;
use crate::Camera;

/// Quantization range; keeps 1.0 from wrapping past 255.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Estimate the light arriving along `ray`.
///
/// Follows at most `depth` bounces, multiplying the attenuation of every
/// surface on the way. Running out of bounces or being absorbed yields black;
/// escaping the scene picks up the sky.
pub fn ray_color(ray: &Ray, world: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, HIT_RANGE) else {
            return throughput * sky_gradient(&ray);
        };

        match world.material(rec.material).scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Sky gradient: white at the horizon, blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (255.999 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with `y = 0` the top row. Returns the
/// average of `samples_per_pixel` estimates.
pub fn render_pixel(
    camera: &Camera,
    world: &Scene,
    x: u32,
    y: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width = settings.image_width;
    let height = settings.image_height();
    // Screen t runs bottom to top
    let j = (height - 1 - y) as f64;
    let i = x as f64;
    let s_scale = (width - 1).max(1) as f64;
    let t_scale = (height - 1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..settings.samples_per_pixel {
        let s = (i + rng.gen::<f64>()) / s_scale;
        let t = (j + rng.gen::<f64>()) / t_scale;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, settings.max_depth, rng);
    }

    pixel_color / settings.samples_per_pixel as f64
}

/// Averaged linear colors, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit RGB bytes, in raster order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&c| color_to_rgb(c)).collect()
    }
}
