//! Render and camera settings.
//!
//! Both structs deserialize from JSON with every field optional, falling back
//! to the defaults below.

use ember_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for settings that cannot produce an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("aspect ratio {0} must be positive and finite")]
    InvalidAspectRatio(f64),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("band height must be at least 1 row")]
    ZeroBandHeight,

    #[error("vertical field of view {0} must be in (0, 180) degrees")]
    InvalidFieldOfView(f64),

    #[error("aperture {0} must be non-negative and finite")]
    InvalidAperture(f64),

    #[error("focus distance {0} must be positive and finite")]
    InvalidFocusDistance(f64),

    #[error("camera look_from and look_at coincide")]
    DegenerateView,

    #[error("camera up vector is zero or parallel to the view direction")]
    DegenerateUp,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Image and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Width over height; the image height is derived from it
    pub aspect_ratio: f64,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Rows per parallel work unit
    pub band_height: u32,
    /// Seed for the per-band random streams (None = fresh entropy per render)
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            band_height: 16,
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Image height in pixels, never less than one row.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Set image resolution from a width and aspect ratio.
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f64) -> Self {
        self.image_width = width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Fix the random seed, making renders repeatable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.image_width == 0 {
            return Err(SettingsError::ZeroWidth);
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(SettingsError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::ZeroSamples);
        }
        if self.band_height == 0 {
            return Err(SettingsError::ZeroBandHeight);
        }
        if self.max_depth == 0 {
            log::warn!("max_depth is 0: every ray is cut off and the image will be black");
        }
        Ok(())
    }
}

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position
    pub look_from: Point3,
    /// Point the camera looks at
    pub look_at: Point3,
    /// World up direction
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Lens diameter (0 = pinhole)
    pub aperture: f64,
    /// Distance from the eye to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SettingsError::InvalidFieldOfView(self.vfov));
        }
        if !(self.aperture >= 0.0 && self.aperture.is_finite()) {
            return Err(SettingsError::InvalidAperture(self.aperture));
        }
        if !(self.focus_dist > 0.0 && self.focus_dist.is_finite()) {
            return Err(SettingsError::InvalidFocusDistance(self.focus_dist));
        }

        let view = self.look_from - self.look_at;
        if !view.is_finite() || view.length_squared() < 1e-12 {
            return Err(SettingsError::DegenerateView);
        }
        if self.vup.cross(view).length_squared() < 1e-12 {
            return Err(SettingsError::DegenerateUp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_height() {
        let settings = RenderSettings::default();
        assert_eq!(settings.image_width, 400);
        assert_eq!(settings.image_height(), 225);

        // Never collapses to zero rows
        let sliver = RenderSettings::default().with_resolution(4, 100.0);
        assert_eq!(sliver.image_height(), 1);
    }

    #[test]
    fn test_render_settings_validate() {
        assert!(RenderSettings::default().validate().is_ok());
        assert_eq!(
            RenderSettings::default().with_quality(0, 50).validate(),
            Err(SettingsError::ZeroSamples)
        );
        assert_eq!(
            RenderSettings::default().with_resolution(0, 1.0).validate(),
            Err(SettingsError::ZeroWidth)
        );
        assert_eq!(
            RenderSettings::default().with_resolution(100, -1.0).validate(),
            Err(SettingsError::InvalidAspectRatio(-1.0))
        );

        let no_bands = RenderSettings {
            band_height: 0,
            ..Default::default()
        };
        assert_eq!(no_bands.validate(), Err(SettingsError::ZeroBandHeight));

        // Depth 0 is legal, just useless
        assert!(RenderSettings::default().with_quality(1, 0).validate().is_ok());
    }

    #[test]
    fn test_camera_settings_validate() {
        assert!(CameraSettings::default().validate().is_ok());

        let looking_up = CameraSettings::default().with_position(Point3::ZERO, Point3::Y, Vec3::Y);
        assert_eq!(looking_up.validate(), Err(SettingsError::DegenerateUp));

        let no_view = CameraSettings::default().with_position(Point3::ONE, Point3::ONE, Vec3::Y);
        assert_eq!(no_view.validate(), Err(SettingsError::DegenerateView));

        let wide = CameraSettings::default().with_lens(180.0, 0.0, 1.0);
        assert_eq!(wide.validate(), Err(SettingsError::InvalidFieldOfView(180.0)));

        let bad_focus = CameraSettings::default().with_lens(40.0, 0.1, 0.0);
        assert_eq!(bad_focus.validate(), Err(SettingsError::InvalidFocusDistance(0.0)));
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{ "image_width": 200, "seed": 7 }"#).unwrap();
        assert_eq!(settings.image_width, 200);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.samples_per_pixel, 100);

        let camera: CameraSettings =
            serde_json::from_str(r#"{ "look_from": [3.0, 3.0, 2.0], "vfov": 20.0 }"#).unwrap();
        assert_eq!(camera.look_from, Point3::new(3.0, 3.0, 2.0));
        assert_eq!(camera.look_at, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.vfov, 20.0);
    }
}
