//! # Unified Configuration System
//!
//! All configuration for the UI layer lives here: logging, input timing,
//! screen size and tile map geometry. Every section has sensible defaults so
//! a config file only needs to name the values it changes.
//!
//! ## Configuration Categories
//!
//! - **Engine Settings**: log level and debug switches
//! - **Input Config**: mouse listener timing
//! - **Screen Config**: size of the root scene rectangle
//! - **Tile Map Config**: tile size, map size in tiles, viewport, layer count

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Rect;

/// Core behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineSettings {
    /// Create engine settings with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// # Input Configuration
///
/// Timing used when turning raw device state into broadcast events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum gap between two left presses that still counts as a double click
    pub double_click_ms: u64,
}

impl InputConfig {
    /// Create input settings with defaults
    pub const fn new() -> Self {
        Self { double_click_ms: 250 }
    }

    /// Set the double click window
    pub const fn with_double_click_ms(mut self, millis: u64) -> Self {
        self.double_click_ms = millis;
        self
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Size of the root screen rectangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl ScreenConfig {
    /// Screen rectangle anchored at the origin
    pub const fn rectangle(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

/// # Tile Map Configuration
///
/// Geometry of a tile map: how the tilesheet is cut, how large the map is
/// and which window of it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileMapConfig {
    /// Edge length of one tile in pixels
    pub tile_size: u32,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Viewport width in pixels
    pub viewport_width: i32,
    /// Viewport height in pixels
    pub viewport_height: i32,
    /// Number of stacked layers
    pub layers: usize,
}

impl TileMapConfig {
    /// Create a tile map configuration with the default 32 px tile
    pub const fn new(map_width: u32, map_height: u32) -> Self {
        Self {
            tile_size: 32,
            map_width,
            map_height,
            viewport_width: 320,
            viewport_height: 320,
            layers: 1,
        }
    }

    /// Set the tile size
    pub const fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the viewport size
    pub const fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the layer count
    pub const fn with_layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// Map size in pixels
    ///
    /// Fails if either side does not fit in an `i32` pixel extent.
    pub fn map_rectangle(&self) -> Result<Rect, ConfigError> {
        let extent = |tiles: u32| {
            tiles
                .checked_mul(self.tile_size)
                .and_then(|pixels| i32::try_from(pixels).ok())
                .ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "Map of {} tiles at {} px does not fit in pixel coordinates",
                        tiles, self.tile_size
                    ))
                })
        };
        Ok(Rect::new(0, 0, extent(self.map_width)?, extent(self.map_height)?))
    }

    /// Viewport anchored at the map origin
    pub const fn viewport(&self) -> Rect {
        Rect::new(0, 0, self.viewport_width, self.viewport_height)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid("Tile size must be at least 1".to_string()));
        }
        if self.layers == 0 {
            return Err(ConfigError::Invalid("Tile map needs at least one layer".to_string()));
        }
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(ConfigError::Invalid("Viewport must have a positive size".to_string()));
        }

        let map = self.map_rectangle()?;
        if self.viewport_width > map.width || self.viewport_height > map.height {
            return Err(ConfigError::Invalid(format!(
                "Viewport {}x{} is larger than the {}x{} map",
                self.viewport_width, self.viewport_height, map.width, map.height
            )));
        }

        Ok(())
    }
}

impl Default for TileMapConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// # Complete UI Configuration
///
/// Top-level configuration that encompasses all sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Core behavior configuration
    pub engine: EngineSettings,
    /// Input listener configuration
    pub input: InputConfig,
    /// Screen configuration
    pub screen: ScreenConfig,
    /// Tile map configuration
    pub tile_map: TileMapConfig,
}

impl UiConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width <= 0 || self.screen.height <= 0 {
            return Err(ConfigError::Invalid("Screen must have a positive size".to_string()));
        }
        self.tile_map.validate()
    }
}

impl Config for UiConfig {}
