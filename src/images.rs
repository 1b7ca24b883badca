//! Rendered images and how they get written out
//!
//! Pixels stay in linear color until they are written. Every output format quantizes the same
//! way: clamp to [0, 0.999], scale by 256, truncate. No gamma correction is applied.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::{utils, Color, Result};

/// Row-major buffer of averaged pixel colors, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}
impl ImageBuffer {
    /// A black image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Write as an ASCII PPM, one pixel per line
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "P3\n{} {}\n255\n", self.width, self.height)?;
        for color in &self.pixels {
            let [r, g, b] = get_pixel(color).0;
            writeln!(out, "{r} {g} {b}")?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| get_pixel(&self.get(x, y)))
    }

    /// Save to `path`, PPM for `.ppm`, anything else goes through the `image` crate
    pub fn save(&self, path: &Path) -> Result<()> {
        let is_ppm = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));
        if is_ppm {
            let mut out = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut out)?;
        } else {
            self.to_rgb_image().save(path)?;
        }
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Quantize a linear color to 8 bits per channel
pub fn get_pixel(color: &Color) -> Rgb<u8> {
    Rgb([
        utils::scale_color(color[0]),
        utils::scale_color(color[1]),
        utils::scale_color(color[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::new(0.0, 0.5, 1.0));
        image.set(1, 0, Color::new(-0.2, 0.25, 2.0));
        image.set(0, 1, Color::new(0.999, 0.1, 0.75));
        image
    }

    #[test]
    fn test_get_set_row_major() {
        let image = two_by_two();
        assert_eq!(image.pixels[1], Color::new(-0.2, 0.25, 2.0));
        assert_eq!(image.pixels[2], image.get(0, 1));
        assert_eq!(image.get(1, 1), Color::zeros());
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        two_by_two().write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "P3\n2 2\n255\n0 128 255\n0 64 255\n255 25 192\n0 0 0\n"
        );
    }

    #[test]
    fn test_rgb_image_matches_ppm_quantization() {
        let rgb = two_by_two().to_rgb_image();
        assert_eq!(rgb.dimensions(), (2, 2));
        assert_eq!(*rgb.get_pixel(0, 0), Rgb([0, 128, 255]));
        assert_eq!(*rgb.get_pixel(0, 1), Rgb([255, 25, 192]));
    }

    #[test]
    fn test_save_ppm() {
        let path = std::env::temp_dir().join(format!("weekend-tracer-{}.ppm", std::process::id()));
        two_by_two().save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));
        assert_eq!(text.lines().count(), 3 + 4);
    }
}
