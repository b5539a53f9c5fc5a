//! Camera for ray generation.

use ember_core::CameraSettings;
use ember_math::{Point3, Ray, Vec3};
use rand::RngCore;

use crate::sampling::random_in_unit_disk;

/// Thin-lens camera producing rays for normalized screen coordinates.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: u right, v up, w backwards
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build the camera basis and the focus-plane viewport.
    ///
    /// `settings` are expected to have passed `CameraSettings::validate`.
    pub fn new(settings: &CameraSettings, aspect_ratio: f64) -> Self {
        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Generate a ray through screen point `(s, t)`.
    ///
    /// `s` runs left to right and `t` bottom to top, both in [0, 1]. With a
    /// non-zero aperture the origin is jittered across the lens disk.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(origin, target - origin)
    }
}
