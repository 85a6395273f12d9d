//! UI System Module
//!
//! Retained-mode element tree driven by per-frame update/draw calls.
//!
//! Architecture:
//! - Element: drawable, interactive unit with a hover state machine
//! - elements/: the closed set of element kinds (Image, Sprite, Background)
//! - Component: container owning an element arena and its input broadcast
//! - Screen / TileMap: panels built on a component
//! - Scene: ordered set of panels sharing a rectangle
//! - UiHost: frame driver tying input listeners to the current scene

pub mod error;
pub mod texture;
pub mod surface;
pub mod element;
pub mod elements;
pub mod component;
pub mod panel;
pub mod screen;
pub mod tile_map;
pub mod scene;
pub mod host;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};

pub use component::{Component, PanelRule};
pub use element::Element;
pub use elements::{Background, ElementKind, Image, Sprite};
pub use error::{UiError, UiResult};
pub use host::{FrameReport, UiHost};
pub use panel::Panel;
pub use scene::Scene;
pub use screen::{Screen, BACKGROUND_ID};
pub use surface::{DrawCall, DrawSurface, Placement, RecordingSurface};
pub use texture::{Texture, TextureHandle};
pub use tile_map::{LayerGrid, TileKey, TileMap};

slotmap::new_key_type! {
    /// Arena key of an element within its component
    pub struct ElementKey;
}

static NEXT_COMPONENT: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

impl ComponentId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_COMPONENT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning reference from an element to its slot in a component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    /// Owning component
    pub component: ComponentId,
    /// Slot in the component's arena
    pub key: ElementKey,
}

impl ElementHandle {
    /// Create a handle
    pub const fn new(component: ComponentId, key: ElementKey) -> Self {
        Self { component, key }
    }
}
