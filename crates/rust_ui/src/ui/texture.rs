//! Texture handles backed by in-memory RGBA pixels
//!
//! A backend uploads the pixels once and keys its GPU copy by
//! [`TextureHandle`]; the UI layer only needs sizes and region extraction.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::{imageops, Rgba, RgbaImage};

use super::error::{UiError, UiResult};
use crate::foundation::math::{Point, Rect};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a texture, shared by all clones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

impl TextureHandle {
    fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Cheaply cloneable 2D visual resource
#[derive(Debug, Clone)]
pub struct Texture {
    handle: TextureHandle,
    pixels: Arc<RgbaImage>,
}

impl Texture {
    /// Wrap decoded pixels
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            handle: TextureHandle::next(),
            pixels: Arc::new(pixels),
        }
    }

    /// Load and decode an image file
    pub fn from_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let pixels = image::open(path)?.to_rgba8();
        log::info!("Loaded texture {}x{} from {:?}", pixels.width(), pixels.height(), path);
        Ok(Self::from_image(pixels))
    }

    /// Create a single-color texture (useful for tests and placeholders)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    /// Handle identifying this texture
    pub const fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Full texture rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Raw pixels
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy a `width`x`height` block starting at (`x`, `y`) into a new texture
    ///
    /// The block is clipped to the texture bounds.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::from_image(imageops::crop_imm(&*self.pixels, x, y, width, height).to_image())
    }
}

/// Cut a sheet into equally sized cells
///
/// Cells are returned left to right, top to bottom, so index 0 is the top-left
/// cell and the last index is the bottom-right one.
pub fn frame_grid(sheet: Rect, frame: Point) -> UiResult<Vec<Rect>> {
    if frame.x <= 0 || frame.y <= 0 {
        return Err(UiError::InvalidConfig(format!(
            "Frame size {}x{} must be positive",
            frame.x, frame.y
        )));
    }
    if sheet.width % frame.x != 0 || sheet.height % frame.y != 0 {
        return Err(UiError::SheetSizeMismatch {
            sheet: sheet.size(),
            frame,
        });
    }

    let columns = sheet.width / frame.x;
    let rows = sheet.height / frame.y;
    let mut cells = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            cells.push(Rect::new(column * frame.x, row * frame.y, frame.x, frame.y));
        }
    }

    Ok(cells)
}
