//! Implementation of materials

use std::sync::Arc;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{objects::HitRecord, utils, Color, Material, Ray};

/// Material
///
/// The default implementation absorbs every ray.
pub trait Scatterable: Send + Sync {
    fn try_scatter(
        &self,
        _ray_in: &Ray,
        _hit_record: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Scatter Result
#[derive(Debug)]
pub struct ScatterResult {
    /// Attenuation Color
    pub attenuation: Color,
    /// Resulting Scattered Ray
    pub scattered: Ray,
}

/// Config for materials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialConfig {
    Lambertian(LambertianConfig),
    Metal(MetalConfig),
    Dielectric(DielectricConfig),
}

/// Generator from config
pub struct Generator;
impl Generator {
    pub fn from_config(config: MaterialConfig) -> Material {
        match config {
            MaterialConfig::Lambertian(c) => Arc::new(Lambertian::from_config(c)),
            MaterialConfig::Metal(c) => Arc::new(Metal::from_config(c)),
            MaterialConfig::Dielectric(c) => Arc::new(Dielectric::from_config(c)),
        }
    }
}

/// Lambertian Scatterer
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}
impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_config(config: LambertianConfig) -> Self {
        Self::new(config.albedo)
    }
}
impl Scatterable for Lambertian {
    fn try_scatter(
        &self,
        _ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = hit_record.normal + utils::random_unit_vector(rng);

        // Protect against if hit_record.normal and the random vector are exact opposites
        if utils::near_zero(&scatter_direction) {
            scatter_direction = hit_record.normal;
        }
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(hit_record.p, scatter_direction),
        })
    }
}

/// Lambertian Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambertianConfig {
    pub albedo: Color,
}

/// Metal Scatterer
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}
impl Metal {
    /// `fuzz` is clamped to [0, 1]
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: MetalConfig) -> Self {
        Self::new(config.albedo, config.fuzz)
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}
impl Scatterable for Metal {
    fn try_scatter(
        &self,
        ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = utils::reflect(&ray_in.dir, &hit_record.normal);
        let direction =
            utils::unit_vector(&reflected) + self.fuzz * utils::random_unit_vector(rng);
        // Fuzzed below the surface: absorbed
        if direction.dot(&hit_record.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(hit_record.p, direction),
            })
        } else {
            None
        }
    }
}

/// Metal Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalConfig {
    pub albedo: Color,
    #[serde(default)]
    pub fuzz: f64,
}

/// A Dielectric is a refractive material, such as glass
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's index over the index of
    /// the enclosing medium
    refractive_index: f64,
}
impl Dielectric {
    pub fn new(refractive_index: f64) -> Self {
        Self { refractive_index }
    }

    pub fn from_config(config: DielectricConfig) -> Self {
        Self::new(config.refractive_index)
    }

    fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        // Use Schlick's approximation for reflectance
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}
impl Scatterable for Dielectric {
    fn try_scatter(
        &self,
        ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let attenuation = Color::new(1.0, 1.0, 1.0);
        let ri = if hit_record.front_face {
            1.0 / self.refractive_index
        } else {
            self.refractive_index
        };

        let unit_direction = utils::unit_vector(&ray_in.dir);
        let cos_theta = (-unit_direction).dot(&hit_record.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta.powi(2)).sqrt();

        let cannot_refract = ri * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, ri) > rng.gen::<f64>() {
                utils::reflect(&unit_direction, &hit_record.normal)
            } else {
                utils::refract(&unit_direction, &hit_record.normal, ri)
            };

        Some(ScatterResult {
            attenuation,
            scattered: Ray::new(hit_record.p, direction),
        })
    }
}

/// Dielectric Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DielectricConfig {
    pub refractive_index: f64,
}
