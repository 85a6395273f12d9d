//! Screen - a full-scene panel for static layouts
//!
//! A screen always covers its parent scene's rectangle. Typical use is a
//! background image with a handful of elements drawn on top of it.

use std::any::Any;

use crate::foundation::math::Rect;
use crate::ui::component::{Component, PanelRule};
use crate::ui::element::Element;
use crate::ui::error::UiResult;
use crate::ui::panel::Panel;
use crate::ui::texture::Texture;

/// Element id used for the screen background
pub const BACKGROUND_ID: &str = "background";

/// Panel covering the whole scene
#[derive(Debug)]
pub struct Screen {
    component: Component,
}

impl Screen {
    /// Create an empty screen sized to `parent_rectangle`
    pub fn new(name: impl Into<String>, draw_order: i32, parent_rectangle: Rect) -> Self {
        Self {
            component: Component::new(name, draw_order, PanelRule::FillParent, parent_rectangle),
        }
    }

    /// Stretch a texture over the whole screen, behind every other element
    ///
    /// Returns the background it replaced, if any.
    pub fn set_background(&mut self, texture: Texture) -> UiResult<Option<Element>> {
        let rectangle = self.component.rectangle();
        let background = Element::background(
            BACKGROUND_ID,
            rectangle.location().to_vec2(),
            texture,
            rectangle.size(),
            i32::MIN,
        );

        let replaced = self.component.add_element(background);
        if self.component.is_visible() {
            self.component.show_element(BACKGROUND_ID)?;
        }
        Ok(replaced)
    }

    /// Current background element
    pub fn background(&self) -> Option<&Element> {
        self.component.element(BACKGROUND_ID)
    }
}

impl Panel for Screen {
    fn component(&self) -> &Component {
        &self.component
    }

    fn component_mut(&mut self) -> &mut Component {
        &mut self.component
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point;

    #[test]
    fn test_background_covers_screen() {
        let mut screen = Screen::new("title", 0, Rect::new(0, 0, 800, 600));
        screen.set_background(Texture::solid_color(16, 16, [10, 20, 30, 255])).unwrap();

        let background = screen.background().unwrap();
        assert_eq!(background.rectangle(), Rect::new(0, 0, 800, 600));
        assert!(!background.is_visible());

        screen.set_parent_rectangle(Rect::new(0, 0, 1024, 768));
        assert_eq!(screen.background().unwrap().rectangle().size(), Point::new(1024, 768));
    }

    #[test]
    fn test_background_on_visible_screen_is_shown() {
        let mut screen = Screen::new("title", 0, Rect::new(0, 0, 800, 600));
        screen.show();

        let replaced = screen.set_background(Texture::solid_color(4, 4, [0; 4])).unwrap();
        assert!(replaced.is_none());
        assert!(screen.background().unwrap().is_visible());

        let replaced = screen
            .set_background(Texture::solid_color(4, 4, [255; 4]))
            .unwrap()
            .unwrap();
        assert!(!replaced.is_visible());
        assert_eq!(screen.component().len(), 1);
    }
}
