//! Objects
use serde::{Deserialize, Serialize};

use crate::{materials::Scatterable, Material, Point, Ray, Vec3};

pub type HittableObj = Box<dyn Hittable + Send + Sync>;

/// Anything a ray can intersect with
pub trait Hittable {
    /// Closest intersection with parametric distance in `(t_min, t_max]`
    fn try_hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>>;
}

#[derive(Default)]
pub struct HittableList(pub Vec<HittableObj>);
impl HittableList {
    pub fn add(&mut self, boxed_obj: HittableObj) {
        self.0.push(boxed_obj)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Hittable for HittableList {
    fn try_hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let mut closest_so_far = t_max;
        let mut hr_final = None;

        for obj in &self.0 {
            if let Some(hr) = obj.try_hit(ray, t_min, closest_so_far) {
                closest_so_far = hr.t;
                hr_final = Some(hr)
            }
        }
        hr_final
    }
}

/// Represents a hit
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point,
    /// Unit normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: &'a dyn Scatterable,
    /// Ray parameter of the intersection
    pub t: f64,
    /// Whether the ray came from the side the outward normal points to
    pub front_face: bool,
}
impl<'a> HitRecord<'a> {
    /// `outward_normal` must be unit length
    pub fn new(
        p: Point,
        t: f64,
        ray: &Ray,
        outward_normal: &Vec3,
        material: &'a dyn Scatterable,
    ) -> Self {
        let mut hr = Self {
            p,
            normal: *outward_normal,
            material,
            t,
            front_face: true,
        };
        hr.set_face_normal(ray, outward_normal);
        hr
    }

    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: &Vec3) {
        self.front_face = ray.dir.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            *outward_normal
        } else {
            -outward_normal
        };
    }
}

pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub material: Material,
}
impl Sphere {
    pub fn new(center: Point, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}
impl Hittable for Sphere {
    fn try_hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let oc = ray.orig - self.center;
        let a = ray.dir.norm_squared();
        let half_b = oc.dot(&ray.dir);
        let c = oc.norm_squared() - self.radius.powi(2);
        let discriminant = half_b.powi(2) - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Find the nearest root that lies in the acceptable range
        let outside = |root: f64| root <= t_min || t_max < root;
        let sqrtd = discriminant.sqrt();
        let mut root = (-half_b - sqrtd) / a;
        if outside(root) {
            root = (-half_b + sqrtd) / a;
            if outside(root) {
                return None;
            }
        }
        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(
            p,
            root,
            ray,
            &outward_normal,
            self.material.as_ref(),
        ))
    }
}

/// Sphere config
///
/// The material is referenced by name from the scene's material table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: Point,
    pub radius: f64,
    pub material: String,
}
