//! Panel Trait
//!
//! Interface between a scene and the components it holds. Every panel is
//! backed by a [`Component`]; the provided methods forward to it, and panels
//! with extra behavior (the tile map's viewport) override what they need.

use std::any::Any;

use crate::events::InputEvent;
use crate::foundation::math::Rect;
use crate::foundation::time::FrameTime;
use crate::ui::component::Component;
use crate::ui::error::UiResult;
use crate::ui::surface::DrawSurface;

/// Component-backed scene member
pub trait Panel: Any {
    /// Backing component
    fn component(&self) -> &Component;

    /// Backing component, mutable
    fn component_mut(&mut self) -> &mut Component;

    /// Paint order among the scene's panels
    fn draw_order(&self) -> i32 {
        self.component().draw_order()
    }

    /// Show every element
    fn show(&mut self) {
        self.component_mut().show();
    }

    /// Hide every element
    fn hide(&mut self) {
        self.component_mut().hide();
    }

    /// Deliver a broadcast input event
    fn publish(&mut self, event: &InputEvent) {
        self.component_mut().publish(event);
    }

    /// React to the scene rectangle changing
    fn set_parent_rectangle(&mut self, parent: Rect) {
        self.component_mut().set_parent_rectangle(parent);
    }

    /// Advance one frame
    fn update(&mut self, time: &FrameTime) {
        self.component_mut().update(time);
    }

    /// Draw visible elements
    fn draw(&self, time: &FrameTime, surface: &mut dyn DrawSurface) -> UiResult<()> {
        self.component().draw(time, surface)
    }

    /// Upcast for downcasting to the concrete panel
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete panel
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Panel for Component {
    fn component(&self) -> &Component {
        self
    }

    fn component_mut(&mut self) -> &mut Component {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
