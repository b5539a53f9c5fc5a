//! Image output.
//!
//! Plain-text PPM (`P3`) is the native format; PNG goes through the
//! `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use thiserror::Error;

use crate::renderer::{color_to_rgb, ImageBuffer};

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Pixel buffer does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write the image as an ASCII PPM: header, then one `r g b` line per pixel,
/// rows top to bottom.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save the image, choosing the format from the file extension
/// (`.ppm` or `.png`).
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") => {
            let writer = BufWriter::new(File::create(path)?);
            write_ppm(image, writer)?;
        }
        Some("png") => {
            let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8()).ok_or(
                OutputError::SizeMismatch {
                    width: image.width,
                    height: image.height,
                },
            )?;
            rgb.save_with_format(path, ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(path.to_path_buf())),
    }

    log::info!("Saved {}", path.display());
    Ok(())
}
