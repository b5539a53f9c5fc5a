//! Built-in demo scenes.

use std::fmt;

use ember_math::{Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{CameraSettings, Material, Scene, SceneBuilder, SceneResult};

/// A scene plus the camera it is meant to be viewed from.
#[derive(Debug, Clone)]
pub struct SceneSetup {
    pub scene: Scene,
    pub camera: CameraSettings,
}

/// Named demo scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Gray diffuse sphere resting on a huge ground sphere.
    TwoSpheres,
    /// Diffuse, glass-with-bubble and metal spheres side by side, with defocus blur.
    Materials,
    /// Ground, three large spheres and a field of small random ones.
    Random,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::TwoSpheres, Preset::Materials, Preset::Random];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TwoSpheres => "two-spheres",
            Preset::Materials => "materials",
            Preset::Random => "random",
        }
    }

    /// Build the scene. `seed` only affects [`Preset::Random`].
    pub fn setup(self, seed: u64) -> SceneResult<SceneSetup> {
        match self {
            Preset::TwoSpheres => two_spheres(),
            Preset::Materials => materials(),
            Preset::Random => random_spheres(seed),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn two_spheres() -> SceneResult<SceneSetup> {
    let mut builder = SceneBuilder::new();
    let gray = builder.add_material(Material::lambertian(Color::splat(0.5)));
    builder
        .add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, gray)
        .add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, gray);

    Ok(SceneSetup {
        scene: builder.build()?,
        camera: CameraSettings::default(),
    })
}

fn materials() -> SceneResult<SceneSetup> {
    let mut builder = SceneBuilder::new();
    let ground = builder.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = builder.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = builder.add_material(Material::dielectric(1.5));
    // Air pocket inside the glass: the relative index flips the refraction
    let bubble = builder.add_material(Material::dielectric(1.0 / 1.5));
    let gold = builder.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    builder
        .add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, ground)
        .add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, center)
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, glass)
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble)
        .add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, gold);

    let look_from = Point3::new(3.0, 3.0, 2.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let camera = CameraSettings::default()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 2.0, (look_from - look_at).length());

    Ok(SceneSetup {
        scene: builder.build()?,
        camera,
    })
}

fn random_spheres(seed: u64) -> SceneResult<SceneSetup> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = SceneBuilder::new();

    let ground = builder.add_material(Material::lambertian(Color::splat(0.5)));
    builder.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    let glass = builder.add_material(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                builder.add_material(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                let fuzz = rng.gen_range(0.0..0.5);
                builder.add_material(Material::metal(albedo, fuzz))
            } else {
                glass
            };
            builder.add_sphere(center, 0.2, material);
        }
    }

    let brown = builder.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let steel = builder.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    builder
        .add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, glass)
        .add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, brown)
        .add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, steel);

    let camera = CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    Ok(SceneSetup {
        scene: builder.build()?,
        camera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build() {
        for preset in Preset::ALL {
            let setup = preset.setup(1).unwrap();
            assert!(!setup.scene.is_empty(), "{} is empty", preset);
            assert!(setup.camera.validate().is_ok(), "{} camera invalid", preset);
        }
    }

    #[test]
    fn test_two_spheres_layout() {
        let setup = Preset::TwoSpheres.setup(0).unwrap();
        assert_eq!(setup.scene.len(), 2);
        assert_eq!(setup.scene.materials().len(), 1);
        assert_eq!(setup.camera, CameraSettings::default());
    }

    #[test]
    fn test_random_preset_is_seeded() {
        let a = Preset::Random.setup(42).unwrap();
        let b = Preset::Random.setup(42).unwrap();
        let c = Preset::Random.setup(43).unwrap();

        assert_eq!(a.scene.shapes(), b.scene.shapes());
        assert_eq!(a.scene.materials(), b.scene.materials());
        assert_ne!(a.scene.shapes(), c.scene.shapes());
        // ground + three large spheres + most of the 22x22 grid
        assert!(a.scene.len() > 400);
    }

    #[test]
    fn test_preset_names() {
        let names: Vec<String> = Preset::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["two-spheres", "materials", "random"]);
    }
}
