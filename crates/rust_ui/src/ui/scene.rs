//! Scene - an ordered set of panels sharing one rectangle
//!
//! Panels are kept sorted by draw order, so publishing, updating and drawing
//! all walk them back to front.

use crate::events::{ElementEvent, InputEvent};
use crate::foundation::math::Rect;
use crate::foundation::time::FrameTime;
use crate::ui::error::UiResult;
use crate::ui::panel::Panel;
use crate::ui::surface::DrawSurface;

/// Top-level container the host drives each frame
pub struct Scene {
    name: String,
    rectangle: Rect,
    panels: Vec<Box<dyn Panel>>,
    visible: bool,
}

impl Scene {
    /// Create an empty, hidden scene
    pub fn new(name: impl Into<String>, rectangle: Rect) -> Self {
        Self {
            name: name.into(),
            rectangle,
            panels: Vec::new(),
            visible: false,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scene rectangle
    pub const fn rectangle(&self) -> Rect {
        self.rectangle
    }

    /// Whether the scene was last shown
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of panels
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True when the scene has no panels
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Add a panel and return its index in draw order
    ///
    /// The panel is sized to the scene and shown if the scene is visible.
    pub fn add_panel(&mut self, mut panel: Box<dyn Panel>) -> usize {
        panel.set_parent_rectangle(self.rectangle);
        if self.visible {
            panel.show();
        }

        let draw_order = panel.draw_order();
        let index = self
            .panels
            .iter()
            .position(|p| p.draw_order() > draw_order)
            .unwrap_or(self.panels.len());
        self.panels.insert(index, panel);
        index
    }

    /// Panel at an index in draw order
    pub fn panel(&self, index: usize) -> Option<&dyn Panel> {
        self.panels.get(index).map(|p| &**p)
    }

    /// Mutable panel at an index in draw order
    pub fn panel_mut(&mut self, index: usize) -> Option<&mut (dyn Panel + 'static)> {
        self.panels.get_mut(index).map(|p| &mut **p)
    }

    /// First panel of a concrete type
    pub fn panel_as<T: Panel>(&self) -> Option<&T> {
        self.panels.iter().find_map(|p| p.as_any().downcast_ref::<T>())
    }

    /// First panel of a concrete type, mutable
    pub fn panel_as_mut<T: Panel>(&mut self) -> Option<&mut T> {
        self.panels
            .iter_mut()
            .find_map(|p| p.as_any_mut().downcast_mut::<T>())
    }

    /// Show every panel
    pub fn show(&mut self) {
        self.visible = true;
        self.panels.iter_mut().for_each(|p| p.show());
        log::info!("Scene '{}' shown", self.name);
    }

    /// Hide every panel
    pub fn hide(&mut self) {
        self.visible = false;
        self.panels.iter_mut().for_each(|p| p.hide());
        log::info!("Scene '{}' hidden", self.name);
    }

    /// Resize the scene and every panel
    pub fn set_rectangle(&mut self, rectangle: Rect) {
        self.rectangle = rectangle;
        for panel in &mut self.panels {
            panel.set_parent_rectangle(rectangle);
        }
    }

    /// Deliver a broadcast input event to every panel
    pub fn publish(&mut self, event: &InputEvent) {
        for panel in &mut self.panels {
            panel.publish(event);
        }
    }

    /// Advance every panel
    pub fn update(&mut self, time: &FrameTime) {
        for panel in &mut self.panels {
            panel.update(time);
        }
    }

    /// Draw every panel back to front
    pub fn draw(&self, time: &FrameTime, surface: &mut dyn DrawSurface) -> UiResult<()> {
        self.panels.iter().try_for_each(|p| p.draw(time, surface))
    }

    /// Run each panel's handlers and collect the events nobody consumed
    pub fn dispatch_events(&mut self) -> Vec<ElementEvent> {
        self.panels
            .iter_mut()
            .flat_map(|p| p.component_mut().dispatch_events())
            .collect()
    }

    /// Take every panel's queued events without running handlers
    pub fn drain_events(&mut self) -> Vec<ElementEvent> {
        self.panels
            .iter_mut()
            .flat_map(|p| p.component_mut().drain_events())
            .collect()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("rectangle", &self.rectangle)
            .field("panels", &self.panels.len())
            .field("visible", &self.visible)
            .finish()
    }
}
