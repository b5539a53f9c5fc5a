//! Math types for Ember.
//!
//! Thin layer over glam's double-precision vectors plus the ray and interval
//! types shared by the scene description and the renderer.

pub use glam::DVec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// 3D vector (double precision).
pub type Vec3 = DVec3;

/// A point in world space.
pub type Point3 = DVec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = DVec3;
