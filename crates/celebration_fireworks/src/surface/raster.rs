//! Software RGBA8 raster.
//!
//! Blending is straight-alpha source-over, the same rule a 2D canvas uses
//! for `fillRect`/`arc` with the default composite mode.

use bytemuck::{Pod, Zeroable};

use super::Surface;
use crate::color::Color;

/// One pixel, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent pixel.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    fn to_color(self) -> Color {
        Color::rgba(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }

    fn from_color(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        Self { r, g, b, a }
    }

    /// Composites `src` over this pixel.
    #[must_use]
    pub fn blend(self, src: Color) -> Self {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }

        let dst = self.to_color();
        let out_a = sa + dst.a * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: f32, d: f32| (s * sa + d * dst.a * (1.0 - sa)) / out_a;

        Self::from_color(Color::rgba(
            mix(src.r, dst.r),
            mix(src.g, dst.g),
            mix(src.b, dst.b),
            out_a,
        ))
    }
}

/// An RGBA8 pixel buffer the firework loop paints into.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl RasterSurface {
    /// Creates a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Pixel at (x, y), if inside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixel data as raw bytes (RGBA, row-major).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// True if every pixel is fully transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 0)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Rgba8::TRANSPARENT);
    }

    fn fill_overlay(&mut self, color: Color) {
        for pixel in &mut self.pixels {
            *pixel = pixel.blend(color);
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        if radius <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        // Clip the bounding box to the surface; particles may sit off-screen
        // after a resize.
        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let x0 = (x - radius).floor().clamp(0.0, max_x) as u32;
        let x1 = (x + radius).ceil().clamp(0.0, max_x) as u32;
        let y0 = (y - radius).floor().clamp(0.0, max_y) as u32;
        let y1 = (y + radius).ceil().clamp(0.0, max_y) as u32;
        let r2 = radius * radius;
        let stride = self.width as usize;

        for py in y0..=y1 {
            let cy = py as f32 + 0.5 - y;
            for px in x0..=x1 {
                let cx = px as f32 + 0.5 - x;
                if cx * cx + cy * cy <= r2 {
                    let idx = py as usize * stride + px as usize;
                    self.pixels[idx] = self.pixels[idx].blend(color);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }
}
