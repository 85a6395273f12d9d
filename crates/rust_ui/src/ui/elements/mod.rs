//! Element kinds
//!
//! The set of drawable element kinds is closed, so geometry and drawing are
//! dispatched with a match instead of trait objects.

pub mod background;
pub mod image;
pub mod sprite;

pub use background::Background;
pub use image::Image;
pub use sprite::{Sprite, DEFAULT_FRAME_SIZE};

use crate::foundation::math::{Color, Point, Rect, Vec2};
use crate::ui::error::UiResult;
use crate::ui::surface::DrawCall;
use crate::ui::texture::Texture;

/// Visual content bound to an element
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Whole texture, optionally scaled
    Image(Image),
    /// One frame of a spritesheet
    Sprite(Sprite),
    /// Texture stretched over the element rectangle
    Background(Background),
}

impl ElementKind {
    /// Size of the content in pixels
    pub fn size(&self) -> Point {
        match self {
            Self::Image(image) => image.size(),
            Self::Sprite(sprite) => sprite.size(),
            Self::Background(background) => background.size(),
        }
    }

    /// Texture behind the content
    pub const fn texture(&self) -> &Texture {
        match self {
            Self::Image(image) => image.texture(),
            Self::Sprite(sprite) => sprite.texture(),
            Self::Background(background) => background.texture(),
        }
    }

    /// True for kinds that follow their panel's rectangle
    pub const fn tracks_panel(&self) -> bool {
        matches!(self, Self::Background(_))
    }

    /// Build the draw call for content placed at `position`
    ///
    /// `destination` is the element rectangle moved to the same place; only
    /// stretched content uses it.
    pub(crate) fn draw_call(
        &self,
        position: Vec2,
        destination: Rect,
        color: Color,
    ) -> UiResult<DrawCall> {
        match self {
            Self::Image(image) => Ok(image.draw_call(position, color)),
            Self::Sprite(sprite) => sprite.draw_call(position, color),
            Self::Background(background) => Ok(background.draw_call(destination, color)),
        }
    }
}
