//! Hittable trait and HitRecord for ray-object intersection.

use ember_core::{MaterialId, Scene};
use ember_math::{Interval, Point3, Ray, Vec3};

/// Ray parameter range used for every bounce.
///
/// The lower bound skips hits at the ray origin caused by floating point
/// error in the previous intersection ("shadow acne").
pub const HIT_RANGE: Interval = Interval::new(0.001, f64::INFINITY);

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the struck surface
    pub material: MaterialId,
}

impl HitRecord {
    /// Build a record from the geometric outward normal.
    ///
    /// The normal is stored pointing against the ray direction, so we need
    /// to track whether we hit the front or back face.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: MaterialId) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Nearest hit over every shape in the scene.
///
/// A linear scan that shrinks the search range to the closest hit found so
/// far, so the result does not depend on insertion order.
impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest = None;
        let mut range = ray_t;

        for shape in self.shapes() {
            if let Some(rec) = shape.hit(ray, range) {
                range = range.with_max(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Material, SceneBuilder};
    use ember_math::Color;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn spheres() -> Vec<(Point3, f64)> {
        vec![
            (Point3::new(0.0, 0.0, -1.0), 0.5),
            (Point3::new(0.0, 0.0, -3.0), 1.0),
            (Point3::new(0.9, 0.1, -2.0), 0.75),
            (Point3::new(0.0, -100.5, -1.0), 100.0),
            (Point3::new(5.0, 0.0, -1.0), 0.5),
        ]
    }

    fn build(order: &[(Point3, f64)]) -> Scene {
        let mut builder = SceneBuilder::new();
        let mat = builder.add_material(Material::lambertian(Color::splat(0.5)));
        for &(center, radius) in order {
            builder.add_sphere(center, radius, mat);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = build(&[]);
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, HIT_RANGE).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let scene = build(&spheres());
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        let rec = scene.hit(&ray, HIT_RANGE).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(rec.front_face);
    }

    #[test]
    fn test_nearest_hit_independent_of_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = spheres();
        let rays = [
            Ray::new(Point3::ZERO, Vec3::NEG_Z),
            Ray::new(Point3::ZERO, Vec3::new(0.1, -0.2, -1.0)),
            Ray::new(Point3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.3, 1.0)),
            Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::NEG_Y),
        ];
        let reference: Vec<_> = rays.iter().map(|r| build(&order).hit(r, HIT_RANGE)).collect();

        for _ in 0..20 {
            order.shuffle(&mut rng);
            let scene = build(&order);
            for (ray, expected) in rays.iter().zip(&reference) {
                assert_eq!(&scene.hit(ray, HIT_RANGE), expected);
            }
        }
    }

    #[test]
    fn test_range_limits_hits() {
        let scene = build(&spheres());
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        // Everything is farther than 0.4
        assert!(scene.hit(&ray, Interval::new(0.001, 0.4)).is_none());
        // Skipping the first sphere's entry point finds its exit point
        let rec = scene.hit(&ray, Interval::new(0.6, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-9);
        assert!(!rec.front_face);
    }
}
