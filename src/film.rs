use crate::color::Color;

use log_once::warn_once;

use std::error::Error;
use std::path::Path;

/// A row-major grid of values with `(0, 0)` at the top left.
#[derive(Clone, Debug)]
pub struct Film<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Film<T> {
    pub fn new(width: usize, height: usize, fill_value: T) -> Film<T> {
        Film {
            buffer: vec![fill_value; width * height],
            width,
            height,
        }
    }

    pub fn at(&self, x: usize, y: usize) -> T {
        self.buffer[y * self.width + x]
    }

    pub fn write_at(&mut self, x: usize, y: usize, value: T) {
        self.buffer[y * self.width + x] = value;
    }

    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl Film<Color> {
    /// Nearest-neighbor texture fetch. Coordinates outside `[0, 1]` clamp to
    /// the edge texels.
    pub fn at_uv(&self, mut u: f32, mut v: f32) -> Color {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            warn_once!("texture coordinates outside [0, 1]; clamping");
        }
        u = u.clamp(0.0, 1.0 - f32::EPSILON);
        v = v.clamp(0.0, 1.0 - f32::EPSILON);
        self.at(
            (u * self.width as f32) as usize,
            (v * self.height as f32) as usize,
        )
    }

    /// Writes an 8-bit RGB PNG, clamping to `[0, 1]` and applying
    /// square-root gamma.
    pub fn write_png(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let mut output = image::RgbImage::new(self.width as u32, self.height as u32);
        for (x, y, pixel) in output.enumerate_pixels_mut() {
            let color = self.at(x as usize, y as usize);
            let convert = |value: f32| (value.clamp(0.0, 1.0).sqrt() * 255.0).round() as u8;
            *pixel = image::Rgb([convert(color.r), convert(color.g), convert(color.b)]);
        }
        output.save(path)?;
        Ok(())
    }

    /// Reads an 8-bit RGB PNG back into linear light by squaring each
    /// normalized channel.
    pub fn read_png(path: &Path) -> Result<Film<Color>, Box<dyn Error>> {
        let decoded = image::open(path)?.into_rgb8();
        let (width, height) = decoded.dimensions();
        let mut film = Film::new(width as usize, height as usize, Color::BLACK);
        for (x, y, pixel) in decoded.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let convert = |value: u8| {
                let normalized = value as f32 / 255.0;
                normalized * normalized
            };
            film.write_at(
                x as usize,
                y as usize,
                Color::new(convert(r), convert(g), convert(b)),
            );
        }
        Ok(film)
    }
}

/// Screen-space depths, smaller is nearer. Cleared to infinity.
pub type DepthBuffer = Film<f32>;

impl Film<f32> {
    pub fn new_depth(width: usize, height: usize) -> DepthBuffer {
        Film::new(width, height, f32::INFINITY)
    }

    /// Visualizes depths as grayscale, clamped to `[0, 1]`; the infinite
    /// clear value renders white.
    pub fn to_grayscale(&self) -> Film<Color> {
        Film {
            buffer: self
                .buffer
                .iter()
                .map(|depth| {
                    let value = depth.clamp(0.0, 1.0);
                    Color::new(value, value, value)
                })
                .collect(),
            width: self.width,
            height: self.height,
        }
    }
}
