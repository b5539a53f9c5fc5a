//! Scene aggregate types.
//!
//! A [`Scene`] owns a material table and an unordered list of shapes. It is
//! assembled with a [`SceneBuilder`], validated once, and read-only from
//! then on, so a single instance can be shared by every render worker.

use ember_math::Point3;
use thiserror::Error;

use crate::material::{Material, MaterialId};

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {index} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("sphere {index} has a non-finite center {center}")]
    InvalidCenter { index: usize, center: Point3 },

    #[error("sphere {index} references unknown {material}")]
    UnknownMaterial { index: usize, material: MaterialId },

    #[error("{material} ({kind}): {reason}")]
    InvalidMaterial {
        material: MaterialId,
        kind: &'static str,
        reason: String,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    pub material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// The closed set of intersectable shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
}

impl Shape {
    /// Material handle of the shape's surface.
    pub fn material(&self) -> MaterialId {
        match self {
            Shape::Sphere(sphere) => sphere.material,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

/// A validated, immutable scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Look up a material.
    ///
    /// Handles are only meaningful for the scene whose builder produced them;
    /// every handle stored in this scene's shapes was checked at build time.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// The material table, in the order materials were added.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Append-only builder for [`Scene`].
///
/// Adding never fails; all parameters are checked in [`SceneBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    materials: Vec<Material>,
    shapes: Vec<Shape>,
}

impl SceneBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material to the table and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: MaterialId) -> &mut Self {
        self.shapes.push(Sphere::new(center, radius, material).into());
        self
    }

    /// Validate every material and shape and freeze the scene.
    pub fn build(self) -> SceneResult<Scene> {
        for (index, material) in self.materials.iter().enumerate() {
            material
                .check()
                .map_err(|reason| SceneError::InvalidMaterial {
                    material: MaterialId(index),
                    kind: material.kind(),
                    reason,
                })?;
        }

        for (index, shape) in self.shapes.iter().enumerate() {
            match shape {
                Shape::Sphere(sphere) => {
                    if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                        return Err(SceneError::InvalidRadius {
                            index,
                            radius: sphere.radius,
                        });
                    }
                    if !sphere.center.is_finite() {
                        return Err(SceneError::InvalidCenter {
                            index,
                            center: sphere.center,
                        });
                    }
                }
            }
            if shape.material().0 >= self.materials.len() {
                return Err(SceneError::UnknownMaterial {
                    index,
                    material: shape.material(),
                });
            }
        }

        log::info!(
            "Built scene: {} shapes, {} materials",
            self.shapes.len(),
            self.materials.len()
        );

        Ok(Scene {
            materials: self.materials,
            shapes: self.shapes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Color;

    #[test]
    fn test_scene_builder() {
        let mut builder = SceneBuilder::new();
        let ground = builder.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
        let glass = builder.add_material(Material::dielectric(1.5));
        builder
            .add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, ground)
            .add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, glass)
            .add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, glass);

        let scene = builder.build().unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.materials().len(), 2);
        assert_eq!(scene.material(glass), &Material::dielectric(1.5));
        // Both glass spheres share one table entry
        assert_eq!(scene.shapes()[1].material(), scene.shapes()[2].material());
    }

    #[test]
    fn test_empty_scene() {
        let scene = SceneBuilder::new().build().unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let mut builder = SceneBuilder::new();
            let mat = builder.add_material(Material::lambertian(Color::splat(0.5)));
            builder.add_sphere(Point3::ZERO, radius, mat);

            assert!(matches!(
                builder.build(),
                Err(SceneError::InvalidRadius { index: 0, .. })
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let mut builder = SceneBuilder::new();
        let mat = builder.add_material(Material::lambertian(Color::splat(0.5)));
        builder.add_sphere(Point3::new(0.0, f64::NAN, 0.0), 1.0, mat);

        assert!(matches!(
            builder.build(),
            Err(SceneError::InvalidCenter { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_material() {
        let mut other = SceneBuilder::new();
        other.add_material(Material::dielectric(1.5));
        let foreign = other.add_material(Material::dielectric(1.3));

        let mut builder = SceneBuilder::new();
        builder.add_material(Material::dielectric(1.5));
        builder.add_sphere(Point3::ZERO, 1.0, foreign);

        assert_eq!(
            builder.build().unwrap_err(),
            SceneError::UnknownMaterial {
                index: 0,
                material: foreign
            }
        );
    }

    #[test]
    fn test_rejects_bad_material() {
        let mut builder = SceneBuilder::new();
        builder.add_material(Material::lambertian(Color::splat(0.5)));
        let bad = builder.add_material(Material::metal(Color::ONE, 2.0));

        let err = builder.build().unwrap_err();
        assert!(matches!(err, SceneError::InvalidMaterial { material, kind: "metal", .. } if material == bad));
        assert!(err.to_string().contains("fuzz"));
    }
}
