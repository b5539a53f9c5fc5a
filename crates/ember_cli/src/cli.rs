use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ember_core::{Preset, RenderSettings};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parse a built-in scene by the name it reports through [`Preset::name`].
fn parse_preset(name: &str) -> Result<Preset, String> {
    Preset::ALL
        .into_iter()
        .find(|preset| preset.name() == name)
        .ok_or_else(|| {
            let known: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            format!("unknown scene '{}' (expected one of: {})", name, known.join(", "))
        })
}

#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A Monte Carlo path tracer for spheres")]
pub struct Args {
    /// Built-in scene to render: two-spheres, materials or random
    #[arg(long, value_parser = parse_preset, default_value = "two-spheres", conflicts_with = "scene_file")]
    pub scene: Preset,

    /// JSON scene file to render instead of a preset
    #[arg(long)]
    pub scene_file: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image aspect ratio (width / height)
    #[arg(long)]
    pub aspect_ratio: Option<f64>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Rows per parallel work unit
    #[arg(long)]
    pub band_height: Option<u32>,

    /// Random seed; fixes the output bit for bit
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Output file (.ppm or .png), or "-" for PPM on stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Set the logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of `base`.
    pub fn apply_overrides(&self, base: RenderSettings) -> RenderSettings {
        RenderSettings {
            image_width: self.width.unwrap_or(base.image_width),
            aspect_ratio: self.aspect_ratio.unwrap_or(base.aspect_ratio),
            samples_per_pixel: self.samples.unwrap_or(base.samples_per_pixel),
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            band_height: self.band_height.unwrap_or(base.band_height),
            seed: self.seed.or(base.seed),
        }
    }

    /// Whether the image goes to stdout.
    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
