//! Ember Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, `Shape`, `Scene` and the
//!   validating `SceneBuilder`
//! - **Settings**: `RenderSettings` and `CameraSettings`
//! - **Scene files**: JSON scene loading via `SceneFile`
//! - **Presets**: built-in demo scenes
//!
//! # Example
//!
//! ```
//! use ember_core::{Material, SceneBuilder};
//! use ember_math::{Color, Point3};
//!
//! let mut builder = SceneBuilder::new();
//! let gray = builder.add_material(Material::lambertian(Color::splat(0.5)));
//! builder.add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, gray);
//! let scene = builder.build()?;
//! assert_eq!(scene.len(), 1);
//! # Ok::<(), ember_core::SceneError>(())
//! ```

pub mod material;
pub mod preset;
pub mod scene;
pub mod scene_file;
pub mod settings;

// Re-export commonly used types
pub use material::{Material, MaterialId};
pub use preset::{Preset, SceneSetup};
pub use scene::{Scene, SceneBuilder, SceneError, SceneResult, Shape, Sphere};
pub use scene_file::{SceneFile, SceneFileError};
pub use settings::{CameraSettings, RenderSettings, SettingsError};
