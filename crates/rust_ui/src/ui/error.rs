//! UI error types

use thiserror::Error;

use crate::foundation::math::Point;

/// Errors raised while building or driving UI structures
///
/// Malformed content is refused up front: a constructor that returns one of
/// these has not partially built anything.
#[derive(Error, Debug)]
pub enum UiError {
    /// Sheet pixel size is not an exact multiple of the frame/tile size
    #[error(
        "Sheet of {}x{} does not divide evenly into {}x{} frames",
        .sheet.x, .sheet.y, .frame.x, .frame.y
    )]
    SheetSizeMismatch {
        /// Sheet size in pixels
        sheet: Point,
        /// Frame or tile size in pixels
        frame: Point,
    },

    /// A tile layer does not contain `width * height` cells
    #[error("Layer {layer} has {actual} cells, expected {expected}")]
    GridSizeMismatch {
        /// Offending layer
        layer: usize,
        /// Cells required by the grid dimensions
        expected: usize,
        /// Cells present
        actual: usize,
    },

    /// A square grid was requested but the cell count is not a perfect square
    #[error("Layer of {0} cells is not a square grid")]
    NonSquareGrid(usize),

    /// Viewport does not fit inside the map
    #[error("Viewport {}x{} exceeds the {}x{} map", .viewport.x, .viewport.y, .map.x, .map.y)]
    ViewportTooLarge {
        /// Viewport size in pixels
        viewport: Point,
        /// Map size in pixels
        map: Point,
    },

    /// Configuration values rejected during construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Texture index missing from the tile texture table
    #[error("No tile texture with index {0}")]
    TextureNotFound(usize),

    /// Frame index missing from a sprite's frame table
    #[error("No sprite frame with index {0}")]
    FrameNotFound(usize),

    /// No element with this id in the component
    #[error("No element with id '{0}'")]
    ElementNotFound(String),

    /// Tile layer beyond the map's layer count
    #[error("Layer {layer} out of range, map has {layers} layers")]
    LayerOutOfRange {
        /// Requested layer
        layer: usize,
        /// Number of layers in the map
        layers: usize,
    },

    /// Tile coordinate outside the map grid
    #[error("Tile ({}, {}) is outside the map", .0.x, .0.y)]
    TileOutOfBounds(Point),

    /// A user input event was built without any source
    #[error("One source is required, either an element or a key")]
    MissingEventSource,

    /// A user input event was built with both an element and a key
    #[error("Only one source is allowed, either an element or a key")]
    AmbiguousEventSource,

    /// Draw surface rejected a batch or draw call
    #[error("Render error: {0}")]
    Render(String),

    /// Texture file could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for UI operations
pub type UiResult<T> = Result<T, UiError>;

impl From<crate::config::ConfigError> for UiError {
    fn from(error: crate::config::ConfigError) -> Self {
        Self::InvalidConfig(error.to_string())
    }
}

impl From<Box<dyn std::error::Error>> for UiError {
    fn from(error: Box<dyn std::error::Error>) -> Self {
        Self::Render(error.to_string())
    }
}
