//! Surface scattering for each material model.

use ember_core::Material;
use ember_math::{Color, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::hittable::HitRecord;
use crate::sampling::{near_zero, random_in_unit_sphere};

/// Outcome of a scatter event that did not absorb the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of the incoming light carried by `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How light interacts with a surface.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

impl Scatter for Material {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => Some(lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { ior } => Some(dielectric(ior, ray_in, rec, rng)),
        }
    }
}

fn lambertian(albedo: Color, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

fn metal(
    albedo: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let reflected = reflect(ray_in.direction().normalize(), rec.normal);
    let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

    // Fuzz can push the reflection below the surface; treat that as absorbed
    if scattered_dir.dot(rec.normal) > 0.0 {
        Some(ScatterResult {
            attenuation: albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    } else {
        None
    }
}

fn dielectric(ior: f64, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
    let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

    let unit_direction = ray_in.direction().normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Total internal reflection leaves no choice, and costs no random draw
    let cannot_refract = refraction_ratio * sin_theta > 1.0;

    let direction = if cannot_refract || rng.gen::<f64>() < reflectance(cos_theta, refraction_ratio) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, refraction_ratio)
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Schlick's approximation for reflectance.
#[inline]
fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law).
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
