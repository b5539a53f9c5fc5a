//! Random sampling helpers.
//!
//! Every function draws from the caller's generator; there is no global RNG.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform point inside (or on) the unit sphere, by rejection.
pub(crate) fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Uniform point inside the unit disk in the XY plane.
pub(crate) fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// True if every component is close to zero.
#[inline]
pub(crate) fn near_zero(v: Vec3) -> bool {
    const S: f64 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut mean = Vec3::ZERO;
        for _ in 0..10_000 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() <= 1.0);
            mean += p;
        }
        // Symmetric distribution
        assert!((mean / 10_000.0).length() < 0.05);
    }

    #[test]
    fn test_unit_disk_samples() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..10_000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }
}
