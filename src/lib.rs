//! Ray Tracing Library

use std::sync::Arc;

use nalgebra::Vector3;

pub mod cameras;
pub mod errors;
pub mod images;
pub mod materials;
pub mod objects;
pub mod scenes;
pub mod utils;

use materials::Scatterable;

pub use errors::{Result, TracerError};

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;
/// Shared handle to a material. Surfaces hold one, hit records borrow through it.
pub type Material = Arc<dyn Scatterable>;

/// Prelude
pub mod prelude {
    pub use crate::cameras::{Camera, CameraConfig};
    pub use crate::images::ImageBuffer;
    pub use crate::materials::{Dielectric, Lambertian, Metal, Scatterable};
    pub use crate::objects::{HitRecord, Hittable, HittableList, Sphere};
    pub use crate::scenes::{Scene, SceneConfig};
    pub use crate::{Color, Material, Point, Ray, Vec3};
}

/// The ray in ray tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    /// Point along the ray at parameter `t`
    pub fn at(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point::new(1.0, 2.0, 3.0), Vec3::new(0.0, -1.0, 2.0));
        assert_eq!(ray.at(0.0), ray.orig);
        assert_eq!(ray.at(2.5), Point::new(1.0, -0.5, 8.0));
        assert_eq!(ray.at(-1.0), Point::new(1.0, 3.0, 1.0));
    }
}
