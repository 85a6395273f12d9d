//! Image element - a texture drawn at the element position

use crate::foundation::math::{Color, Point, Vec2};
use crate::ui::surface::DrawCall;
use crate::ui::texture::Texture;

/// Whole-texture image with an optional uniform scale
#[derive(Debug, Clone)]
pub struct Image {
    texture: Texture,
    scale: f32,
}

impl Image {
    /// Create an unscaled image
    pub const fn new(texture: Texture) -> Self {
        Self { texture, scale: 1.0 }
    }

    /// Texture being drawn
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Uniform scale factor
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Scaled texture size, truncated to whole pixels
    pub fn size(&self) -> Point {
        Point::new(
            (self.texture.width() as f32 * self.scale) as i32,
            (self.texture.height() as f32 * self.scale) as i32,
        )
    }

    pub(crate) fn draw_call(&self, position: Vec2, color: Color) -> DrawCall {
        DrawCall::at(&self.texture, position, self.scale, color)
    }
}
