//! # Drawing Surfaces
//!
//! The firework loop only needs five operations from whatever it paints
//! on. Two implementations ship with the crate:
//!
//! - [`RecordingSurface`] keeps the command list for replay and tests
//! - [`RasterSurface`] blends into an RGBA8 pixel buffer

mod raster;
mod recording;

pub use raster::{RasterSurface, Rgba8};
pub use recording::{DrawCommand, RecordingSurface};

use crate::color::Color;

/// A 2D raster target sized to the viewport.
pub trait Surface {
    /// Current pixel dimensions (width, height).
    fn size(&self) -> (u32, u32);

    /// Resynchronizes pixel dimensions to the viewport.
    ///
    /// Existing content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Paints `color` (with its alpha) over the whole surface.
    fn fill_overlay(&mut self, color: Color);

    /// Paints a filled circle.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    /// Resets every pixel to transparent.
    fn clear(&mut self);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn fill_overlay(&mut self, color: Color) {
        (**self).fill_overlay(color);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        (**self).fill_circle(x, y, radius, color);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
