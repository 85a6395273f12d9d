//! Component - a named container of elements
//!
//! A component owns its elements in an arena keyed by [`ElementKey`] and
//! indexed by identifier. It also owns the input broadcast its elements
//! subscribe to and the queue their element-scoped events land in.

use slotmap::SlotMap;
use std::collections::HashMap;

use crate::events::{ElementEvent, EventSystem, InputBroadcast, InputEvent, RectangleUpdated};
use crate::foundation::math::{Rect, Vec2};
use crate::foundation::time::FrameTime;
use crate::ui::element::{Element, ElementContext};
use crate::ui::error::{UiError, UiResult};
use crate::ui::surface::DrawSurface;
use crate::ui::{ComponentId, ElementHandle, ElementKey};

/// How a component derives its panel rectangle from its parent's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRule {
    /// Same rectangle as the parent scene
    FillParent,
    /// Explicitly supplied rectangle, independent of the parent
    Fixed(Rect),
}

impl PanelRule {
    /// Panel rectangle for a given parent rectangle
    pub const fn resolve(&self, parent: Rect) -> Rect {
        match self {
            Self::FillParent => parent,
            Self::Fixed(rect) => *rect,
        }
    }
}

/// Container of elements keyed by identifier
#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    name: String,
    draw_order: i32,
    visible: bool,
    elements: SlotMap<ElementKey, Element>,
    index: HashMap<String, ElementKey>,
    broadcast: InputBroadcast,
    events: EventSystem,
    visible_elements: Vec<ElementKey>,
    rule: PanelRule,
    parent_rectangle: Rect,
    rectangle: Rect,
}

impl Component {
    /// Create an empty, hidden component
    pub fn new(
        name: impl Into<String>,
        draw_order: i32,
        rule: PanelRule,
        parent_rectangle: Rect,
    ) -> Self {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            draw_order,
            visible: false,
            elements: SlotMap::with_key(),
            index: HashMap::new(),
            broadcast: InputBroadcast::new(),
            events: EventSystem::new(),
            visible_elements: Vec::new(),
            rule,
            parent_rectangle,
            rectangle: rule.resolve(parent_rectangle),
        }
    }

    /// Unique component id
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Paint order among sibling components
    pub const fn draw_order(&self) -> i32 {
        self.draw_order
    }

    /// Whether the component was last shown
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Panel rectangle
    pub const fn rectangle(&self) -> Rect {
        self.rectangle
    }

    /// Rectangle of the parent scene
    pub const fn parent_rectangle(&self) -> Rect {
        self.parent_rectangle
    }

    /// Input registry shared by this component's elements
    pub const fn broadcast(&self) -> &InputBroadcast {
        &self.broadcast
    }

    /// Outgoing element event queue
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    /// Insert an element, replacing any element with the same id
    ///
    /// A replaced element is hidden (and so unsubscribed) before it is
    /// returned.
    pub fn add_element(&mut self, mut element: Element) -> Option<Element> {
        let replaced = self.remove_element(element.id());

        let id = element.id().to_string();
        let tracks_panel = element.kind().tracks_panel();
        let component = self.id;
        let key = self.elements.insert_with_key(|key| {
            element.attach(ElementHandle::new(component, key));
            element
        });
        self.index.insert(id, key);

        if tracks_panel {
            self.broadcast.listen_rectangle(key);
        }
        self.refresh_visible();
        replaced
    }

    /// Hide and remove an element
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let key = self.index.remove(id)?;
        let mut element = self.elements.remove(key)?;

        element.hide(&mut ElementContext {
            broadcast: &mut self.broadcast,
            events: &mut self.events,
        });
        self.broadcast.forget_rectangle(key);
        self.refresh_visible();

        log::trace!("Removed element '{}' from '{}'", id, self.name);
        Some(element)
    }

    /// Look up an element by id
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.index.get(id).and_then(|key| self.elements.get(*key))
    }

    /// Look up an element by id for mutation
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        let key = *self.index.get(id)?;
        self.elements.get_mut(key)
    }

    /// Look up an element by arena key
    pub fn get(&self, key: ElementKey) -> Option<&Element> {
        self.elements.get(key)
    }

    /// Whether an element with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the component holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Identifiers of all elements, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// All elements, in no particular order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Visible elements in ascending draw order
    pub fn visible_elements(&self) -> &[ElementKey] {
        &self.visible_elements
    }

    fn with_element<R>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Element, &mut ElementContext<'_>) -> R,
    ) -> UiResult<R> {
        let key = *self
            .index
            .get(id)
            .ok_or_else(|| UiError::ElementNotFound(id.to_string()))?;
        let element = self
            .elements
            .get_mut(key)
            .ok_or_else(|| UiError::ElementNotFound(id.to_string()))?;

        let mut ctx = ElementContext {
            broadcast: &mut self.broadcast,
            events: &mut self.events,
        };
        Ok(f(element, &mut ctx))
    }

    /// Make an element visible and subscribe it to input
    pub fn show_element(&mut self, id: &str) -> UiResult<()> {
        self.with_element(id, |element, ctx| element.show(ctx))?;
        self.refresh_visible();
        Ok(())
    }

    /// Hide an element and unsubscribe it from input
    pub fn hide_element(&mut self, id: &str) -> UiResult<()> {
        self.with_element(id, |element, ctx| element.hide(ctx))?;
        self.refresh_visible();
        Ok(())
    }

    /// Change only the visible flag of an element
    pub fn set_element_visible(&mut self, id: &str, visible: bool) -> UiResult<()> {
        self.with_element(id, |element, ctx| element.set_visible(visible, ctx))?;
        self.refresh_visible();
        Ok(())
    }

    /// Change only the enabled flag (input subscription) of an element
    pub fn set_element_enabled(&mut self, id: &str, enabled: bool) -> UiResult<()> {
        self.with_element(id, |element, ctx| element.set_enabled(enabled, ctx))
    }

    /// Switch an element to its highlighted color
    pub fn highlight(&mut self, id: &str) -> UiResult<()> {
        self.with_element(id, |element, _| element.highlight())
    }

    /// Switch an element back to its normal color
    pub fn unhighlight(&mut self, id: &str) -> UiResult<()> {
        self.with_element(id, |element, _| element.unhighlight())
    }

    /// Move an element
    pub fn set_element_position(&mut self, id: &str, position: Vec2) -> UiResult<()> {
        self.with_element(id, |element, _| element.set_position(position))
    }

    /// Change an element's paint order
    pub fn set_draw_order(&mut self, id: &str, draw_order: i32) -> UiResult<()> {
        self.with_element(id, |element, _| element.set_draw_order(draw_order))?;
        self.refresh_visible();
        Ok(())
    }

    /// Show every element
    pub fn show(&mut self) {
        self.visible = true;
        self.for_each_element(Element::show);
        log::debug!("Showing component '{}' ({} elements)", self.name, self.elements.len());
    }

    /// Hide every element
    pub fn hide(&mut self) {
        self.visible = false;
        self.for_each_element(Element::hide);
        log::debug!("Hiding component '{}'", self.name);
    }

    fn for_each_element(&mut self, mut f: impl FnMut(&mut Element, &mut ElementContext<'_>)) {
        let mut ctx = ElementContext {
            broadcast: &mut self.broadcast,
            events: &mut self.events,
        };
        for element in self.elements.values_mut() {
            f(element, &mut ctx);
        }
        self.refresh_visible();
    }

    /// Deliver a broadcast event to subscribed elements, in subscription order
    pub fn publish(&mut self, event: &InputEvent) {
        for key in self.broadcast.subscribers(event.channel()) {
            if let Some(element) = self.elements.get_mut(key) {
                element.handle_input(event, &mut self.events);
            }
        }
    }

    /// Recompute the panel rectangle after the parent moved or resized
    pub fn set_parent_rectangle(&mut self, parent: Rect) {
        self.parent_rectangle = parent;
        self.apply_rectangle(self.rule.resolve(parent));
    }

    /// Replace the panel rule and recompute the rectangle
    pub fn set_rule(&mut self, rule: PanelRule) {
        self.rule = rule;
        self.apply_rectangle(rule.resolve(self.parent_rectangle));
    }

    fn apply_rectangle(&mut self, rectangle: Rect) {
        if rectangle == self.rectangle {
            return;
        }
        self.rectangle = rectangle;
        log::debug!("Component '{}' rectangle updated to {:?}", self.name, rectangle);

        for key in self.broadcast.rectangle_listeners() {
            if let Some(element) = self.elements.get_mut(key) {
                element.on_panel_rectangle_updated(RectangleUpdated(rectangle));
            }
        }
    }

    /// Advance visible elements
    pub fn update(&mut self, time: &FrameTime) {
        for key in &self.visible_elements {
            if let Some(element) = self.elements.get_mut(*key) {
                element.update(time);
            }
        }
    }

    /// Draw visible elements in ascending draw order, as one batch
    pub fn draw(&self, time: &FrameTime, surface: &mut dyn DrawSurface) -> UiResult<()> {
        surface.begin()?;
        let result = self
            .visible_elements
            .iter()
            .filter_map(|key| self.elements.get(*key))
            .try_for_each(|element| element.draw(time, surface));
        surface.end()?;
        result
    }

    /// Run registered handlers and return the events nobody consumed
    pub fn dispatch_events(&mut self) -> Vec<ElementEvent> {
        self.events.dispatch()
    }

    /// Take queued element events without running handlers
    pub fn drain_events(&mut self) -> Vec<ElementEvent> {
        self.events.drain()
    }

    fn refresh_visible(&mut self) {
        let elements = &self.elements;
        let mut visible: Vec<ElementKey> = elements
            .iter()
            .filter(|(_, element)| element.is_visible())
            .map(|(key, _)| key)
            .collect();
        visible.sort_by(|a, b| {
            let (a, b) = (&elements[*a], &elements[*b]);
            a.draw_order().cmp(&b.draw_order()).then_with(|| a.id().cmp(b.id()))
        });
        self.visible_elements = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BroadcastStats, ElementEventKind};
    use crate::foundation::math::{Point, Vec2};
    use crate::ui::surface::RecordingSurface;
    use crate::ui::texture::Texture;

    fn square(id: &str, x: f32, draw_order: i32) -> Element {
        Element::image(id, Vec2::new(x, 0.0), Texture::solid_color(10, 10, [255; 4]), draw_order)
    }

    fn screen() -> Component {
        Component::new("screen", 0, PanelRule::FillParent, Rect::new(0, 0, 800, 600))
    }

    fn kinds(component: &mut Component) -> Vec<(String, ElementEventKind)> {
        component.events_mut().drain().into_iter().map(|e| (e.id, e.kind)).collect()
    }

    #[test]
    fn test_add_attaches_handle() {
        let mut component = screen();
        component.add_element(square("a", 0.0, 0));

        let element = component.element("a").unwrap();
        assert_eq!(element.handle().component, component.id());
        assert_eq!(component.get(element.handle().key).unwrap().id(), "a");
    }

    #[test]
    fn test_visible_elements_sorted_by_draw_order() {
        let mut component = screen();
        component.add_element(square("top", 0.0, 5));
        component.add_element(square("bottom", 0.0, -1));
        component.add_element(square("middle", 0.0, 2));
        component.add_element(square("hidden", 0.0, 3));
        for id in ["top", "bottom", "middle"] {
            component.show_element(id).unwrap();
        }

        let order: Vec<&str> = component
            .visible_elements()
            .iter()
            .map(|key| component.get(*key).unwrap().id())
            .collect();
        assert_eq!(order, vec!["bottom", "middle", "top"]);
    }

    #[test]
    fn test_publish_reaches_only_subscribers() {
        let mut component = screen();
        component.add_element(square("shown", 0.0, 0));
        component.add_element(square("idle", 0.0, 0));
        component.show_element("shown").unwrap();
        kinds(&mut component);

        component.publish(&InputEvent::MouseMoved(Point::new(5, 5)));

        assert_eq!(kinds(&mut component), vec![("shown".to_string(), ElementEventKind::MouseOver)]);
        assert!(!component.element("idle").unwrap().is_mouse_over());
    }

    #[test]
    fn test_replacing_element_unsubscribes_old_one() {
        let mut component = screen();
        component.add_element(square("a", 0.0, 0));
        component.show_element("a").unwrap();

        let replaced = component.add_element(square("a", 50.0, 0)).unwrap();

        assert!(!replaced.is_visible());
        assert!(!replaced.is_enabled());
        assert_eq!(component.len(), 1);
        assert!(component.broadcast().is_empty());
        assert_eq!(
            component.broadcast().stats(),
            BroadcastStats { subscriptions: 1, unsubscriptions: 1 }
        );
    }

    #[test]
    fn test_copied_live_element_subscribes_when_shown() {
        let mut source = screen();
        source.add_element(square("a", 0.0, 0));
        source.show();
        let copy = source.element("a").cloned().unwrap();
        assert!(copy.is_enabled());

        let mut target = screen();
        target.add_element(copy);
        let added = target.element("a").unwrap();
        assert!(!added.is_visible());
        assert!(!added.is_enabled());
        assert!(!added.is_mouse_over());

        target.show();
        kinds(&mut target);
        target.publish(&InputEvent::MouseMoved(Point::new(5, 5)));

        assert_eq!(target.broadcast().len(), 1);
        assert_eq!(kinds(&mut target), vec![("a".to_string(), ElementEventKind::MouseOver)]);
    }

    #[test]
    fn test_show_hide_cascade() {
        let mut component = screen();
        component.add_element(square("a", 0.0, 0));
        component.add_element(square("b", 20.0, 1));

        component.show();
        assert_eq!(component.visible_elements().len(), 2);
        assert_eq!(component.broadcast().len(), 2);

        component.hide();
        component.hide();
        assert!(component.visible_elements().is_empty());
        assert_eq!(
            component.broadcast().stats(),
            BroadcastStats { subscriptions: 2, unsubscriptions: 2 }
        );
    }

    #[test]
    fn test_missing_element_is_lookup_error() {
        let mut component = screen();
        assert!(matches!(component.show_element("nope"), Err(UiError::ElementNotFound(_))));
        assert!(component.remove_element("nope").is_none());
    }

    #[test]
    fn test_background_tracks_parent_rectangle() {
        let mut component = screen();
        component.add_element(Element::background(
            "background",
            Vec2::zeros(),
            Texture::solid_color(4, 4, [0, 0, 0, 255]),
            Point::new(800, 600),
            0,
        ));

        component.set_parent_rectangle(Rect::new(0, 0, 1280, 720));

        assert_eq!(component.rectangle(), Rect::new(0, 0, 1280, 720));
        assert_eq!(
            component.element("background").unwrap().rectangle(),
            Rect::new(0, 0, 1280, 720)
        );
    }

    #[test]
    fn test_fixed_rule_ignores_parent() {
        let mut component =
            Component::new("hud", 1, PanelRule::Fixed(Rect::new(0, 500, 800, 100)), Rect::empty());

        component.set_parent_rectangle(Rect::new(0, 0, 1280, 720));

        assert_eq!(component.rectangle(), Rect::new(0, 500, 800, 100));
    }

    #[test]
    fn test_draw_batches_visible_elements() {
        let mut component = screen();
        component.add_element(square("a", 0.0, 1));
        component.add_element(square("b", 20.0, 0));
        component.add_element(square("c", 40.0, 2));
        component.show();
        component.hide_element("c").unwrap();

        let mut surface = RecordingSurface::new();
        component.draw(&FrameTime::default(), &mut surface).unwrap();

        assert_eq!(surface.batches(), 1);
        assert_eq!(surface.calls().len(), 2);
    }
}
