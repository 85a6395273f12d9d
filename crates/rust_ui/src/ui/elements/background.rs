//! Background element - a texture stretched over a rectangle
//!
//! The only element whose rectangle is driven from outside: when its panel's
//! rectangle changes, the background takes the new rectangle verbatim.

use crate::foundation::math::{Color, Point, Rect};
use crate::ui::surface::DrawCall;
use crate::ui::texture::Texture;

/// Stretched background texture
#[derive(Debug, Clone)]
pub struct Background {
    texture: Texture,
    size: Point,
}

impl Background {
    /// Create a background covering `size` pixels
    pub const fn new(texture: Texture, size: Point) -> Self {
        Self { texture, size }
    }

    /// Texture being stretched
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Size given at construction
    pub const fn size(&self) -> Point {
        self.size
    }

    pub(crate) fn draw_call(&self, destination: Rect, color: Color) -> DrawCall {
        DrawCall::stretched(&self.texture, destination, color)
    }
}
