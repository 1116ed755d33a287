//! Command-recording surface.

use super::Surface;
use crate::color::Color;

/// A draw call issued by the firework loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole-surface translucent paint.
    Overlay {
        /// Overlay colour including alpha.
        color: Color,
    },
    /// Filled circle.
    Circle {
        /// Centre X.
        x: f32,
        /// Centre Y.
        y: f32,
        /// Radius.
        radius: f32,
        /// Fill colour including alpha.
        color: Color,
    },
    /// Full clear to transparent.
    Clear,
}

/// Surface that records every call instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    resizes: u32,
}

impl RecordingSurface {
    /// Creates an empty recorder with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(256),
            resizes: 0,
        }
    }

    /// All commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The most recent command.
    #[must_use]
    pub fn last_command(&self) -> Option<&DrawCommand> {
        self.commands.last()
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of times the surface was resized.
    #[must_use]
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
    }

    fn fill_overlay(&mut self, color: Color) {
        self.commands.push(DrawCommand::Overlay { color });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }
}
