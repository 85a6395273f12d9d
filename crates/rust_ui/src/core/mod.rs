//! # Core Module
//!
//! Shared configuration types used by every subsystem of the UI layer.

pub mod config;

pub use config::{
    Config,
    ConfigError,
    EngineSettings,
    InputConfig,
    ScreenConfig,
    TileMapConfig,
    UiConfig,
};
