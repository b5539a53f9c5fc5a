//! Surface material parameters.
//!
//! Materials are plain values stored in the scene's material table and
//! referenced from shapes by [`MaterialId`]. How each variant scatters light
//! lives in the renderer.

use std::fmt;

use ember_math::{Color, Interval};
use serde::{Deserialize, Serialize};

/// Valid range for albedo channels and metal fuzz.
pub(crate) const UNIT_RANGE: Interval = Interval::new(0.0, 1.0);

/// Handle of a material in a [`Scene`](crate::Scene)'s material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) usize);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material #{}", self.0)
    }
}

/// The closed set of surface models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` in [0, 1] blurs the reflection.
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive material such as glass (`ior` 1.5) or water (1.33).
    Dielectric { ior: f64 },
}

impl Material {
    /// Create a diffuse material.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal { albedo, fuzz }
    }

    /// Create a dielectric material with the given index of refraction.
    pub fn dielectric(ior: f64) -> Self {
        Material::Dielectric { ior }
    }

    /// Short lowercase name of the variant, for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Material::Lambertian { .. } => "lambertian",
            Material::Metal { .. } => "metal",
            Material::Dielectric { .. } => "dielectric",
        }
    }

    /// Check the parameter ranges.
    ///
    /// Returns a description of the first offending parameter.
    pub(crate) fn check(&self) -> Result<(), String> {
        match *self {
            Material::Lambertian { albedo } => check_albedo(albedo),
            Material::Metal { albedo, fuzz } => {
                check_albedo(albedo)?;
                if !UNIT_RANGE.contains(fuzz) {
                    return Err(format!("fuzz {} is outside [0, 1]", fuzz));
                }
                Ok(())
            }
            Material::Dielectric { ior } => {
                if !(ior > 0.0 && ior.is_finite()) {
                    return Err(format!("refractive index {} must be positive", ior));
                }
                Ok(())
            }
        }
    }
}

fn check_albedo(albedo: Color) -> Result<(), String> {
    if albedo.to_array().iter().all(|&c| UNIT_RANGE.contains(c)) {
        Ok(())
    } else {
        Err(format!("albedo {} has a channel outside [0, 1]", albedo))
    }
}
