//! Draw surface trait
//!
//! Defines the interface between the UI layer and rendering backends.
//! Drawing follows a batch contract: `begin`, any number of `draw` calls,
//! then `end`.

use std::error::Error;

use super::texture::{Texture, TextureHandle};
use crate::foundation::math::{Color, Rect, Vec2};

/// Where a texture lands on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Top-left corner at `position`, uniformly scaled
    At {
        /// Destination of the top-left corner
        position: Vec2,
        /// Uniform scale factor
        scale: f32,
    },
    /// Stretched to fill the destination rectangle
    Stretched(Rect),
}

/// One textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Texture to sample
    pub texture: TextureHandle,
    /// Source rectangle inside the texture (`None` = whole texture)
    pub source: Option<Rect>,
    /// Destination on the surface
    pub placement: Placement,
    /// Tint color
    pub color: Color,
}

impl DrawCall {
    /// Draw the whole texture at a position
    pub fn at(texture: &Texture, position: Vec2, scale: f32, color: Color) -> Self {
        Self {
            texture: texture.handle(),
            source: None,
            placement: Placement::At { position, scale },
            color,
        }
    }

    /// Draw the whole texture stretched to a rectangle
    pub fn stretched(texture: &Texture, destination: Rect, color: Color) -> Self {
        Self {
            texture: texture.handle(),
            source: None,
            placement: Placement::Stretched(destination),
            color,
        }
    }

    /// Restrict the draw to a source rectangle
    pub const fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }
}

/// Backend-agnostic drawing interface
pub trait DrawSurface {
    /// Begin a sprite batch
    fn begin(&mut self) -> Result<(), Box<dyn Error>>;

    /// Queue one draw call inside the current batch
    fn draw(&mut self, call: &DrawCall) -> Result<(), Box<dyn Error>>;

    /// Flush the current batch
    fn end(&mut self) -> Result<(), Box<dyn Error>>;
}

/// Surface that records draw calls instead of rendering them
///
/// Used by headless loops and tests. Drawing outside a batch is an error,
/// mirroring what sprite batch backends enforce.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    batches: usize,
    in_batch: bool,
}

impl RecordingSurface {
    /// Create an empty recording surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls recorded so far
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of completed batches
    pub const fn batches(&self) -> usize {
        self.batches
    }

    /// Drop recorded calls, e.g. at the start of a frame
    pub fn clear(&mut self) {
        self.calls.clear();
        self.batches = 0;
    }
}

impl DrawSurface for RecordingSurface {
    fn begin(&mut self) -> Result<(), Box<dyn Error>> {
        if self.in_batch {
            return Err("begin called while a batch is already open".into());
        }
        self.in_batch = true;
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) -> Result<(), Box<dyn Error>> {
        if !self.in_batch {
            return Err("draw called outside of a batch".into());
        }
        self.calls.push(call.clone());
        Ok(())
    }

    fn end(&mut self) -> Result<(), Box<dyn Error>> {
        if !self.in_batch {
            return Err("end called without a matching begin".into());
        }
        self.in_batch = false;
        self.batches += 1;
        Ok(())
    }
}
