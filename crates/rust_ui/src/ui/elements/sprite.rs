//! Sprite element - one frame of a spritesheet
//!
//! The sheet is cut into equally sized frames indexed from the top-left
//! corner, left to right, top to bottom. A sprite does no animation timing of
//! its own; callers pick the frame by setting the current frame index.

use std::collections::BTreeMap;

use crate::foundation::math::{Color, Point, Rect, Vec2};
use crate::ui::error::{UiError, UiResult};
use crate::ui::surface::DrawCall;
use crate::ui::texture::{frame_grid, Texture};

/// Default frame edge length in pixels
pub const DEFAULT_FRAME_SIZE: u32 = 32;

/// Spritesheet with a selectable frame
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Texture,
    frame_size: Point,
    frames: BTreeMap<usize, Rect>,
    current_frame: usize,
}

impl Sprite {
    /// Create a sprite with square frames
    ///
    /// Fails with [`UiError::SheetSizeMismatch`] if the sheet is not an exact
    /// multiple of the frame size.
    pub fn new(texture: Texture, frame_size: u32) -> UiResult<Self> {
        let edge = frame_size as i32;
        Self::with_frame_size(texture, Point::new(edge, edge))
    }

    /// Create a sprite with rectangular frames
    pub fn with_frame_size(texture: Texture, frame_size: Point) -> UiResult<Self> {
        let frames = Self::create_frames(texture.bounds(), frame_size)?;
        log::trace!("Sprite sheet cut into {} frames", frames.len());

        Ok(Self {
            texture,
            frame_size,
            frames,
            current_frame: 0,
        })
    }

    /// Index every frame of a sheet
    pub fn create_frames(sheet: Rect, frame_size: Point) -> UiResult<BTreeMap<usize, Rect>> {
        Ok(frame_grid(sheet, frame_size)?.into_iter().enumerate().collect())
    }

    /// Spritesheet texture
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Frame table
    pub const fn frames(&self) -> &BTreeMap<usize, Rect> {
        &self.frames
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Size of one frame
    pub const fn size(&self) -> Point {
        self.frame_size
    }

    /// Selected frame index
    pub const fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Select a frame
    pub fn set_current_frame(&mut self, frame: usize) -> UiResult<()> {
        if !self.frames.contains_key(&frame) {
            return Err(UiError::FrameNotFound(frame));
        }
        self.current_frame = frame;
        Ok(())
    }

    /// Source rectangle of the selected frame
    pub fn current_source(&self) -> UiResult<Rect> {
        self.frames
            .get(&self.current_frame)
            .copied()
            .ok_or(UiError::FrameNotFound(self.current_frame))
    }

    pub(crate) fn draw_call(&self, position: Vec2, color: Color) -> UiResult<DrawCall> {
        Ok(DrawCall::at(&self.texture, position, 1.0, color).with_source(self.current_source()?))
    }
}
