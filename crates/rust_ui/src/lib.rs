//! # Rust UI
//!
//! A retained-mode 2D UI layer for real-time game loops.
//!
//! ## Features
//!
//! - **Elements**: images, spritesheet frames and stretched backgrounds with
//!   a per-element hover state machine
//! - **Input Routing**: elements subscribe to their component's input
//!   broadcast only while enabled
//! - **Tile Maps**: sparse layered tiles with a clamped, culling viewport
//! - **Backend Agnostic**: drawing goes through the [`ui::DrawSurface`] trait
//! - **Configurable**: TOML or RON configuration with defaults for every value
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_ui::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UiConfig::default();
//!     let mut host = UiHost::new(&config)?;
//!
//!     let mut screen = Screen::new("title", 0, config.screen.rectangle());
//!     screen.set_background(Texture::solid_color(1, 1, [0, 0, 0, 255]))?;
//!     screen.component_mut().add_element(Element::image(
//!         "start",
//!         Vec2::new(350.0, 280.0),
//!         Texture::from_file("assets/start.png")?,
//!         1,
//!     ));
//!
//!     let mut scene = Scene::new("title", config.screen.rectangle());
//!     scene.add_panel(Box::new(screen));
//!     host.set_current_scene(scene);
//!
//!     let mut surface = RecordingSurface::new();
//!     host.frame(MouseState::default(), &KeyboardState::default(), &mut surface)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod input;
pub mod ui;

/// Common imports for UI users
pub mod prelude {
    pub use crate::{
        core::config::{Config, InputConfig, ScreenConfig, TileMapConfig, UiConfig},
        events::{ElementEvent, ElementEventKind, EventHandler, EventKind, InputEvent},
        foundation::{
            math::{colors, Color, Point, Rect, Vec2},
            time::{FrameTime, Timer},
        },
        input::{
            EventSource, EventType, InputSource, KeyCode, KeyboardState, MouseButtons, MouseState,
            UserAction, UserInput,
        },
        ui::{
            Component, DrawSurface, Element, ElementHandle, LayerGrid, Panel, PanelRule,
            RecordingSurface, Scene, Screen, Texture, TileMap, UiError, UiHost, UiResult,
        },
    };
}
