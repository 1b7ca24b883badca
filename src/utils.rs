//! Utils
//!
//! Vector algebra on top of nalgebra, plus the rejection samplers every
//! scattering model and the camera draw from.

use rand::{Rng, RngCore};

use crate::{Color, Vec3};

/// Magnitude below which a component counts as zero
const NEAR_ZERO: f64 = 1e-8;

/// Whether every component of the vector is close to zero
pub fn near_zero(v: &Vec3) -> bool {
    v.iter().all(|c| c.abs() < NEAR_ZERO)
}

/// `v / |v|`
pub fn unit_vector(v: &Vec3) -> Vec3 {
    v / v.norm()
}

/// Mirror `v` about the normal `n`
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit direction `uv` through a surface with unit normal `n` using Snell's law.
///
/// `etai_over_etat` is the ratio of the refractive index on the incident side over the one on
/// the transmitted side. The result is not normalized.
pub fn refract(uv: &Vec3, n: &Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.norm_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute a random unit vector, uniformly distributed over the sphere
///
/// Randomly generate vectors in the [-1, 1] cube. Only the ones inside the unit sphere are kept,
/// which keeps the distribution spherical rather than cubical. Vectors too short to normalize
/// safely are thrown away as well.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = gen_random(rng, -1.0, 1.0);
        let lensq = p.norm_squared();
        if 1e-160 < lensq && lensq <= 1.0 {
            return p / lensq.sqrt();
        }
    }
}

/// Generate a random vector inside a unit disk on the z = 0 plane
///
/// This simulates defocus blur
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

/// A uniform scatter direction for all angles away from the surface
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: &Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Random offset inside the [-0.5, 0.5] square on the z = 0 plane, used to jitter pixel samples
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, 0.0)
}

/// Generate a random vector with every component in [min, max)
pub fn gen_random(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::from_fn(|_, _| rng.gen_range(min..max))
}

/// Random color with every channel in [0, 1)
pub fn random_color(rng: &mut dyn RngCore) -> Color {
    gen_random(rng, 0.0, 1.0)
}

/// Random color with every channel in [min, max)
pub fn random_color_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    gen_random(rng, min, max)
}

/// scale the color channel to between 0 and 255
pub fn scale_color(val: f64) -> u8 {
    (256.0 * val.clamp(0.0, 0.999)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-12;

    fn sample_vectors() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.5, 0.25, 7.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1e-3, 5e4, -2.0),
        ]
    }

    #[test]
    fn test_dot_is_symmetric() {
        for u in sample_vectors() {
            for v in sample_vectors() {
                assert_eq!(u.dot(&v), v.dot(&u));
            }
        }
    }

    #[test]
    fn test_cross_is_antisymmetric() {
        for u in sample_vectors() {
            for v in sample_vectors() {
                assert_eq!(u.cross(&v), -v.cross(&u));
            }
        }
    }

    #[test]
    fn test_unit_vector_has_unit_length() {
        for v in sample_vectors() {
            assert!((unit_vector(&v).norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(&Vec3::zeros()));
        assert!(near_zero(&Vec3::new(9e-9, -9e-9, 0.0)));
        assert!(!near_zero(&Vec3::new(1e-8, 0.0, 0.0)));
        assert!(!near_zero(&Vec3::new(0.0, 0.0, -2e-8)));
        assert!(!near_zero(&Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_reflect_preserves_length() {
        let n = unit_vector(&Vec3::new(0.3, 1.0, -0.2));
        for v in sample_vectors() {
            let uv = unit_vector(&v);
            assert!((reflect(&uv, &n).norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let reflected = reflect(&Vec3::new(1.0, -1.0, 0.0), &Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(reflected, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_head_on_passes_straight_through() {
        let uv = Vec3::new(0.0, 0.0, -1.0);
        let n = Vec3::new(0.0, 0.0, 1.0);
        let refracted = refract(&uv, &n, 1.0 / 1.5);
        assert!((refracted - uv).norm() < EPS);
    }

    #[test]
    fn test_refract_unit_ratio_keeps_direction() {
        let uv = unit_vector(&Vec3::new(1.0, -1.0, 0.0));
        let n = Vec3::new(0.0, 1.0, 0.0);
        let refracted = refract(&uv, &n, 1.0);
        assert!((refracted - uv).norm() < EPS);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let uv = unit_vector(&Vec3::new(1.0, -2.0, 0.0));
        let n = Vec3::new(0.0, 1.0, 0.0);
        let ratio = 1.0 / 1.5;
        let refracted = refract(&uv, &n, ratio);
        let sin_in = uv[0];
        let sin_out = refracted[0] / refracted.norm();
        assert!((sin_out - ratio * sin_in).abs() < 1e-9);
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!((random_unit_vector(&mut rng).norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p[2], 0.0);
            assert!(p.norm_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_on_hemisphere() {
        let mut rng = StdRng::seed_from_u64(3);
        let normal = unit_vector(&Vec3::new(1.0, 1.0, -1.0));
        for _ in 0..1000 {
            assert!(random_on_hemisphere(&mut rng, &normal).dot(&normal) >= 0.0);
        }
    }

    #[test]
    fn test_sample_square_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let p = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&p[0]));
            assert!((-0.5..0.5).contains(&p[1]));
            assert_eq!(p[2], 0.0);
        }
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(-1.0), 0);
        assert_eq!(scale_color(0.0), 0);
        assert_eq!(scale_color(0.5), 128);
        assert_eq!(scale_color(0.999), 255);
        assert_eq!(scale_color(4.0), 255);
    }
}
