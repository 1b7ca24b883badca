//! Scenes: a camera setup together with the world it looks at
//!
//! Scenes come either from a YAML description or from one of the built-in generators.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    cameras::CameraConfig,
    materials::{Dielectric, Generator, Lambertian, MaterialConfig, Metal},
    objects::{HittableList, Sphere, SphereConfig},
    utils, Color, Material, Point, Result, TracerError, Vec3,
};

/// Scene config
///
/// Materials are declared once by name and shared by every object that names them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialConfig>,
    #[serde(default)]
    pub objects: Vec<SphereConfig>,
}
impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        info!("Loaded scene {}", path.display());
        Self::from_yaml_str(&yaml)
    }
}

pub struct Scene {
    pub camera: CameraConfig,
    pub world: HittableList,
}
impl Scene {
    pub fn from_config(config: SceneConfig) -> Result<Self> {
        let materials: BTreeMap<String, Material> = config
            .materials
            .into_iter()
            .map(|(name, material)| (name, Generator::from_config(material)))
            .collect();

        let mut world = HittableList::default();
        for obj_cfg in config.objects {
            let material = materials
                .get(&obj_cfg.material)
                .ok_or_else(|| TracerError::UnknownMaterial(obj_cfg.material.clone()))?;
            world.add(Box::new(Sphere::new(
                obj_cfg.center,
                obj_cfg.radius,
                material.clone(),
            )));
        }
        debug!(
            "Scene has {} objects sharing {} materials",
            world.len(),
            materials.len()
        );

        Ok(Self {
            camera: config.camera,
            world,
        })
    }

    /// Ground with a diffuse, a glass (hollow) and a fuzzy metal sphere on it
    pub fn three_spheres() -> Self {
        let camera = CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vertical_fov_deg: 20.0,
            look_from: Point::new(-2.0, 2.0, 1.0),
            look_at: Point::new(0.0, 0.0, -1.0),
            v_up: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle_deg: 10.0,
            focus_distance: 3.4,
        };

        let ground: Material = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
        let center: Material = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
        let left: Material = Arc::new(Dielectric::new(1.5));
        let bubble: Material = Arc::new(Dielectric::new(1.0 / 1.5));
        let right: Material = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

        let mut world = HittableList::default();
        world.add(Box::new(Sphere::new(Point::new(0.0, -100.5, -1.0), 100.0, ground)));
        world.add(Box::new(Sphere::new(Point::new(0.0, 0.0, -1.2), 0.5, center)));
        world.add(Box::new(Sphere::new(Point::new(-1.0, 0.0, -1.0), 0.5, left)));
        world.add(Box::new(Sphere::new(Point::new(-1.0, 0.0, -1.0), 0.4, bubble)));
        world.add(Box::new(Sphere::new(Point::new(1.0, 0.0, -1.0), 0.5, right)));

        Self { camera, world }
    }

    /// The random spheres cover shot
    ///
    /// A 22x22 grid of small spheres, mostly diffuse with some metal and glass, around three
    /// large feature spheres. All glass shares a single material.
    pub fn cover(rng: &mut dyn RngCore) -> Self {
        let camera = CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1200,
            samples_per_pixel: 500,
            max_depth: 50,
            vertical_fov_deg: 20.0,
            look_from: Point::new(13.0, 2.0, 3.0),
            look_at: Point::new(0.0, 0.0, 0.0),
            v_up: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle_deg: 0.6,
            focus_distance: 10.0,
        };

        let glass: Material = Arc::new(Dielectric::new(1.5));
        let ground: Material = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));

        let mut world = HittableList::default();
        world.add(Box::new(Sphere::new(
            Point::new(0.0, -1000.0, 0.0),
            1000.0,
            ground,
        )));

        for a in -11..11 {
            for b in -11..11 {
                let choose_mat: f64 = rng.gen();
                let center = Point::new(
                    a as f64 + 0.9 * rng.gen::<f64>(),
                    0.2,
                    b as f64 + 0.9 * rng.gen::<f64>(),
                );

                // Keep clear of the large metal sphere
                if (center - Point::new(4.0, 0.2, 0.0)).norm() <= 0.9 {
                    continue;
                }
                let material: Material = if choose_mat < 0.8 {
                    let albedo = utils::random_color(rng).component_mul(&utils::random_color(rng));
                    Arc::new(Lambertian::new(albedo))
                } else if choose_mat < 0.95 {
                    let albedo = utils::random_color_range(rng, 0.5, 1.0);
                    let fuzz = rng.gen_range(0.0..0.5);
                    Arc::new(Metal::new(albedo, fuzz))
                } else {
                    glass.clone()
                };
                world.add(Box::new(Sphere::new(center, 0.2, material)));
            }
        }

        world.add(Box::new(Sphere::new(Point::new(0.0, 1.0, 0.0), 1.0, glass)));
        world.add(Box::new(Sphere::new(
            Point::new(-4.0, 1.0, 0.0),
            1.0,
            Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
        )));
        world.add(Box::new(Sphere::new(
            Point::new(4.0, 1.0, 0.0),
            1.0,
            Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
        )));

        Self { camera, world }
    }
}
