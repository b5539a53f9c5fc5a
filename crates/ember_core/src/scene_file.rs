//! JSON scene files.
//!
//! ```json
//! {
//!   "settings": { "image_width": 400, "samples_per_pixel": 50 },
//!   "camera": { "look_from": [3, 3, 2], "vfov": 20, "aperture": 2.0 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "glass": { "type": "dielectric", "ior": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
//!     { "center": [0, 0, -1], "radius": 0.5, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ember_math::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CameraSettings, Material, RenderSettings, SceneBuilder, SceneError, SceneSetup, SettingsError,
};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {index} uses undefined material \"{name}\"")]
    UndefinedMaterial { index: usize, name: String },

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid camera: {0}")]
    Camera(#[from] SettingsError),
}

pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// A sphere as written in a scene file, referencing its material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereEntry {
    pub center: Point3,
    pub radius: f64,
    pub material: String,
}

/// On-disk scene description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Optional render settings; command-line flags override them
    #[serde(default)]
    pub settings: Option<RenderSettings>,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,
    #[serde(default)]
    pub spheres: Vec<SphereEntry>,
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneFileResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_json(&text)?;
        log::info!(
            "Loaded {} ({} materials, {} spheres)",
            path.display(),
            file.materials.len(),
            file.spheres.len()
        );
        Ok(file)
    }

    /// Parse a scene file from a JSON string.
    pub fn from_json(text: &str) -> SceneFileResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve material names and build the validated scene.
    pub fn to_setup(&self) -> SceneFileResult<SceneSetup> {
        let mut builder = SceneBuilder::new();
        let ids: BTreeMap<&str, _> = self
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), builder.add_material(*material)))
            .collect();

        for (index, entry) in self.spheres.iter().enumerate() {
            let material = ids.get(entry.material.as_str()).copied().ok_or_else(|| {
                SceneFileError::UndefinedMaterial {
                    index,
                    name: entry.material.clone(),
                }
            })?;
            builder.add_sphere(entry.center, entry.radius, material);
        }

        self.camera.validate()?;
        Ok(SceneSetup {
            scene: builder.build()?,
            camera: self.camera.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATERIALS_SCENE: &str = r#"{
        "settings": { "image_width": 64, "samples_per_pixel": 4 },
        "camera": { "look_from": [3, 3, 2], "vfov": 20, "aperture": 2.0, "focus_dist": 5.2 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "glass": { "type": "dielectric", "ior": 1.5 },
            "gold": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.0 }
        },
        "spheres": [
            { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
            { "center": [-1, 0, -1], "radius": 0.5, "material": "glass" },
            { "center": [1, 0, -1], "radius": 0.5, "material": "gold" }
        ]
    }"#;

    #[test]
    fn test_scene_file_setup() {
        let file = SceneFile::from_json(MATERIALS_SCENE).unwrap();
        let settings = file.settings.clone().unwrap();
        assert_eq!(settings.image_width, 64);
        assert_eq!(settings.samples_per_pixel, 4);
        assert_eq!(settings.max_depth, 50);

        let setup = file.to_setup().unwrap();
        assert_eq!(setup.scene.len(), 3);
        assert_eq!(setup.scene.materials().len(), 3);
        assert_eq!(setup.camera.aperture, 2.0);

        let glass = setup.scene.shapes()[1].material();
        assert_eq!(setup.scene.material(glass), &Material::dielectric(1.5));
    }

    #[test]
    fn test_undefined_material() {
        let file = SceneFile::from_json(
            r#"{ "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "chrome" } ] }"#,
        )
        .unwrap();

        match file.to_setup() {
            Err(SceneFileError::UndefinedMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "chrome");
            }
            other => panic!("expected UndefinedMaterial, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_sphere_is_rejected() {
        let file = SceneFile::from_json(
            r#"{
                "materials": { "m": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } },
                "spheres": [ { "center": [0, 0, -1], "radius": -1, "material": "m" } ]
            }"#,
        )
        .unwrap();

        assert!(matches!(
            file.to_setup(),
            Err(SceneFileError::Scene(SceneError::InvalidRadius { .. }))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = SceneFile::from_json(r#"{ "spheres": 3 }"#).unwrap_err();
        assert!(matches!(err, SceneFileError::Json(_)));
    }

    #[test]
    fn test_bundled_scene() {
        let file = SceneFile::from_json(include_str!("../../../scenes/three_materials.json")).unwrap();
        let setup = file.to_setup().unwrap();
        assert_eq!(setup.scene.len(), 5);
        assert_eq!(setup.camera.vfov, 20.0);
        assert!(file.settings.unwrap().validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = SceneFile::load("/nonexistent/ember/scene.json").unwrap_err();
        assert!(matches!(err, SceneFileError::Io { .. }));
        assert!(err.to_string().contains("scene.json"));
    }
}
