//! Band-based parallel rendering.
//!
//! Divides the image into horizontal bands of whole rows. Bands are rendered
//! independently on the rayon pool, each with its own random stream, and
//! stitched back together top to bottom.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use ember_core::{RenderSettings, Scene};
use ember_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer};
use crate::Camera;

/// A run of consecutive image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row (0 = top of the image)
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Position of this band, top to bottom
    pub index: usize,
}

impl Band {
    /// Create a new band.
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, image_width: u32) -> usize {
        image_width as usize * self.height as usize
    }
}

/// Split `image_height` rows into bands of `band_height`; the last band may
/// be shorter.
pub fn generate_bands(image_height: u32, band_height: u32) -> Vec<Band> {
    let band_height = band_height.max(1);
    let mut bands = Vec::new();

    let mut y = 0;
    while y < image_height {
        let height = band_height.min(image_height - y);
        bands.push(Band::new(y, height, bands.len()));
        y += height;
    }

    bands
}

/// Seed of a band's random stream.
///
/// Distinct bands get unrelated streams; the same `(seed, index)` always
/// reproduces the same stream.
pub fn band_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render a single band to a vector of colors.
///
/// Returns pixels in row-major order within the band.
pub fn render_band(
    band: &Band,
    camera: &Camera,
    world: &Scene,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let width = settings.image_width;
    let mut pixels = Vec::with_capacity(band.pixel_count(width));

    for y in band.y..band.y + band.height {
        for x in 0..width {
            pixels.push(render_pixel(camera, world, x, y, settings, rng));
        }
    }

    pixels
}

/// Result of rendering a band.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The band that was rendered
    pub band: Band,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BandResult {
    /// Create a new band result.
    pub fn new(band: Band, pixels: Vec<Color>) -> Self {
        Self { band, pixels }
    }
}

/// Render the entire scene in parallel.
///
/// With `settings.seed` set the output is identical across runs and thread
/// counts; otherwise a fresh seed is drawn and logged.
pub fn render(camera: &Camera, world: &Scene, settings: &RenderSettings) -> ImageBuffer {
    let width = settings.image_width;
    let height = settings.image_height();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let bands = generate_bands(height, settings.band_height);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} bands on {} threads (seed {})",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        bands.len(),
        rayon::current_num_threads(),
        seed
    );

    let start = Instant::now();
    let remaining = AtomicUsize::new(bands.len());

    let results: Vec<BandResult> = bands
        .par_iter()
        .map(|band| {
            let mut rng = StdRng::seed_from_u64(band_seed(seed, band.index));
            let pixels = render_band(band, camera, world, settings, &mut rng);

            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            log::debug!(
                "Band {} done (rows {}..{}), {} remaining",
                band.index,
                band.y,
                band.y + band.height,
                left
            );

            BandResult::new(*band, pixels)
        })
        .collect();

    // collect() keeps band order, so appending yields raster order
    let pixel_count = width as usize * height as usize;
    let mut image = ImageBuffer {
        width,
        height,
        pixels: Vec::with_capacity(pixel_count),
    };
    for result in results {
        debug_assert_eq!(result.band.y as usize * width as usize, image.pixels.len());
        image.pixels.extend(result.pixels);
    }

    let elapsed = start.elapsed();
    let samples = width as u64 * height as u64 * settings.samples_per_pixel as u64;
    log::info!(
        "Rendered {} pixels ({} samples) in {:.2?} ({:.0} samples/s)",
        pixel_count,
        samples,
        elapsed,
        samples as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    image
}
