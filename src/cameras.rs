//! Cameras and configs for cameras
//!
//! A [`CameraConfig`] is plain data that callers fill in. [`Camera::from_config`] validates it
//! and derives the immutable viewing frame, which then generates rays and renders images.

use std::time::Instant;

use log::{debug, info, trace, warn};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    images::ImageBuffer,
    objects::Hittable,
    utils, Color, Point, Ray, Result, TracerError, Vec3,
};

/// Closest hit distance accepted after a bounce, keeps rays from re-hitting their own origin
const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum ray bounces into the scene
    pub max_depth: u32,
    pub vertical_fov_deg: f64,
    pub look_from: Point,
    pub look_at: Point,
    /// Camera-relative up direction
    pub v_up: Vec3,
    /// Variation angle of rays through each pixel
    pub defocus_angle_deg: f64,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_distance: f64,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vertical_fov_deg: 90.0,
            look_from: Point::new(0.0, 0.0, 0.0),
            look_at: Point::new(0.0, 0.0, -1.0),
            v_up: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle_deg: 0.0,
            focus_distance: 10.0,
        }
    }
}
impl CameraConfig {
    /// Reject configurations that would turn the viewing frame into NaNs
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 {
            return Err(TracerError::ZeroImageWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(TracerError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(TracerError::ZeroSamples);
        }
        if !(self.vertical_fov_deg > 0.0 && self.vertical_fov_deg < 180.0) {
            return Err(TracerError::InvalidFieldOfView(self.vertical_fov_deg));
        }
        if !(self.focus_distance.is_finite() && self.focus_distance > 0.0) {
            return Err(TracerError::InvalidFocusDistance(self.focus_distance));
        }
        for (name, vector) in [
            ("look_from", &self.look_from),
            ("look_at", &self.look_at),
            ("v_up", &self.v_up),
        ] {
            if !vector.iter().all(|c| c.is_finite()) {
                return Err(TracerError::NonFiniteVector(name));
            }
        }
        let view = self.look_from - self.look_at;
        if utils::near_zero(&view) {
            return Err(TracerError::DegenerateViewDirection);
        }
        if utils::near_zero(&self.v_up.cross(&utils::unit_vector(&view))) {
            return Err(TracerError::DegenerateUpVector);
        }
        Ok(())
    }
}

/// Camera and related tasks
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f64,
    center: Point,
    /// Location of pixel (0, 0)
    pixel00_loc: Point,
    /// Offset to the pixel to the right
    pixel_delta_u: Vec3,
    /// Offset to the pixel below
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_angle_deg: f64,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}
impl Camera {
    pub fn from_config(config: &CameraConfig) -> Result<Self> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = (image_width as f64 / config.aspect_ratio) as u32;
        if image_height == 0 {
            warn!(
                "Image width {} at aspect ratio {} rounds to zero rows, rendering one",
                image_width, config.aspect_ratio
            );
        }
        let image_height = image_height.max(1);

        let center = config.look_from;

        // Establish the viewport on the focus plane
        let theta = config.vertical_fov_deg.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_distance;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate the viewing vectors
        let w = utils::unit_vector(&(config.look_from - config.look_at));
        let u = utils::unit_vector(&config.v_up.cross(&w));
        let v = w.cross(&u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_distance * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius =
            config.focus_distance * (config.defocus_angle_deg.to_radians() / 2.0).tan();

        let camera = Self {
            image_width,
            image_height,
            samples_per_pixel: config.samples_per_pixel,
            max_depth: config.max_depth,
            pixel_samples_scale: 1.0 / config.samples_per_pixel as f64,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_angle_deg: config.defocus_angle_deg,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        };
        debug!("Camera frame: {:?}", camera);
        Ok(camera)
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Camera frame basis vectors `(u, v, w)`
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Ray from the lens towards a random point inside pixel `(i, j)`
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = utils::sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + (i as f64 + offset[0]) * self.pixel_delta_u
            + (j as f64 + offset[1]) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle_deg <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point {
        let p = utils::random_in_unit_disk(rng);
        self.center + p[0] * self.defocus_disk_u + p[1] * self.defocus_disk_v
    }

    /// Light arriving along `ray`, following at most `depth` bounces
    ///
    /// Walks the path iteratively, keeping each bounce's attenuation. Running out of depth or
    /// being absorbed gathers no light; escaping the scene picks up the sky, which is then
    /// attenuated from the last bounce back to the first, the same order as `a1 * (a2 * sky)`.
    pub fn ray_color(
        ray: &Ray,
        depth: u32,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut ray = *ray;
        let mut attenuations: Vec<Color> = Vec::new();

        for _ in 0..depth {
            let Some(hr) = world.try_hit(&ray, SHADOW_ACNE_EPSILON, f64::INFINITY) else {
                return attenuations
                    .iter()
                    .rev()
                    .fold(sky_color(&ray), |acc, a| a.component_mul(&acc));
            };
            match hr.material.try_scatter(&ray, &hr, rng) {
                Some(sr) => {
                    attenuations.push(sr.attenuation);
                    ray = sr.scattered;
                }
                None => return Color::zeros(),
            }
        }
        Color::zeros()
    }

    /// Average of `samples_per_pixel` samples through pixel `(i, j)`
    pub fn render_pixel(
        &self,
        i: u32,
        j: u32,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut pixel_color = Color::zeros();
        for _ in 0..self.samples_per_pixel {
            let ray = self.get_ray(i, j, rng);
            pixel_color += Self::ray_color(&ray, self.max_depth, world, rng);
        }
        self.pixel_samples_scale * pixel_color
    }

    pub fn render(&self, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
        self.render_with_progress(world, rng, |_| {})
    }

    /// Render row by row, top to bottom
    ///
    /// `on_scanline` receives the number of rows still to go before each row starts.
    pub fn render_with_progress<F>(
        &self,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
        mut on_scanline: F,
    ) -> ImageBuffer
    where
        F: FnMut(u32),
    {
        info!(
            "Rendering {}x{} at {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let start = Instant::now();
        let mut image = ImageBuffer::new(self.image_width, self.image_height);

        for j in 0..self.image_height {
            let remaining = self.image_height - j;
            trace!("Scanlines remaining: {}", remaining);
            on_scanline(remaining);
            for i in 0..self.image_width {
                image.set(i, j, self.render_pixel(i, j, world, rng));
            }
        }

        info!("Done in {:.2?}", start.elapsed());
        image
    }
}

/// Linearly blends white and blue depending on the height of the ray direction
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = utils::unit_vector(&ray.dir);
    let a = 0.5 * (unit_direction[1] + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}
