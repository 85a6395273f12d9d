//! Element - the atomic drawable and interactive unit
//!
//! Elements live in a [`Component`](crate::ui::Component) arena and hold a
//! handle back into it. Visibility and enabled state are orthogonal; enabling
//! subscribes the element to its component's input broadcast and disabling
//! unsubscribes it. While subscribed, every mouse move runs the hover state
//! machine and clicks/scrolls are re-raised only while the cursor is over the
//! element.

use crate::events::{
    Channels, ElementEvent, ElementEventKind, EventSystem, InputBroadcast, InputEvent,
    RectangleUpdated,
};
use crate::foundation::math::{colors, snap, Color, Point, Rect, Vec2};
use crate::foundation::time::FrameTime;
use crate::ui::elements::{Background, ElementKind, Image, Sprite};
use crate::ui::error::UiResult;
use crate::ui::surface::DrawSurface;
use crate::ui::texture::Texture;
use crate::ui::ElementHandle;

/// Owning component's shared state an element talks to
pub(crate) struct ElementContext<'a> {
    pub broadcast: &'a mut InputBroadcast,
    pub events: &'a mut EventSystem,
}

/// Drawable, interactive unit of a component
#[derive(Debug, Clone)]
pub struct Element {
    id: String,
    handle: ElementHandle,
    position: Vec2,
    rectangle: Rect,
    visible: bool,
    enabled: bool,
    color: Color,
    highlighted_color: Color,
    unhighlighted_color: Color,
    draw_order: i32,
    is_mouse_over: bool,
    kind: ElementKind,
}

impl Element {
    /// Create an element around some content
    ///
    /// The element starts hidden and disabled; it becomes interactive only
    /// once its component shows it.
    pub fn new(id: impl Into<String>, position: Vec2, kind: ElementKind, draw_order: i32) -> Self {
        let mut element = Self {
            id: id.into(),
            handle: ElementHandle::default(),
            position,
            rectangle: Rect::empty(),
            visible: false,
            enabled: false,
            color: colors::white(),
            highlighted_color: colors::white(),
            unhighlighted_color: colors::white(),
            draw_order,
            is_mouse_over: false,
            kind,
        };
        element.rectangle = Rect::from_parts(snap(position), element.kind.size());
        element
    }

    /// Image element drawing the whole texture
    pub fn image(id: impl Into<String>, position: Vec2, texture: Texture, draw_order: i32) -> Self {
        Self::new(id, position, ElementKind::Image(Image::new(texture)), draw_order)
    }

    /// Sprite element cut into square frames
    pub fn sprite(
        id: impl Into<String>,
        position: Vec2,
        spritesheet: Texture,
        frame_size: u32,
        draw_order: i32,
    ) -> UiResult<Self> {
        let sprite = Sprite::new(spritesheet, frame_size)?;
        Ok(Self::new(id, position, ElementKind::Sprite(sprite), draw_order))
    }

    /// Background stretched over `size` pixels
    pub fn background(
        id: impl Into<String>,
        position: Vec2,
        texture: Texture,
        size: Point,
        draw_order: i32,
    ) -> Self {
        Self::new(id, position, ElementKind::Background(Background::new(texture, size)), draw_order)
    }

    /// Set the normal and highlighted colors; the normal one becomes active
    pub fn with_colors(mut self, unhighlighted: Color, highlighted: Color) -> Self {
        self.unhighlighted_color = unhighlighted;
        self.highlighted_color = highlighted;
        self.color = unhighlighted;
        self
    }

    /// Set the image scale (ignored by other kinds)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    /// Identifier, unique within the owning component
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Handle into the owning component
    pub const fn handle(&self) -> ElementHandle {
        self.handle
    }

    /// Bind to a component slot, back in the hidden and disabled start state
    pub(crate) fn attach(&mut self, handle: ElementHandle) {
        self.handle = handle;
        self.visible = false;
        self.enabled = false;
        self.is_mouse_over = false;
        self.color = self.unhighlighted_color;
    }

    /// Stored position
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Hit rectangle
    pub const fn rectangle(&self) -> Rect {
        self.rectangle
    }

    /// Whether the element is drawn
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the element is subscribed to input
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Currently active color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Color used while highlighted
    pub const fn highlighted_color(&self) -> Color {
        self.highlighted_color
    }

    /// Color used while not highlighted
    pub const fn unhighlighted_color(&self) -> Color {
        self.unhighlighted_color
    }

    /// Paint order, ascending back to front
    pub const fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub(crate) fn set_draw_order(&mut self, draw_order: i32) {
        self.draw_order = draw_order;
    }

    /// Whether the cursor was over the element at the last mouse move
    pub const fn is_mouse_over(&self) -> bool {
        self.is_mouse_over
    }

    /// Content bound to the element
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Sprite content, if this is a sprite
    pub fn as_sprite(&self) -> Option<&Sprite> {
        match &self.kind {
            ElementKind::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }

    /// Mutable sprite content, for frame selection
    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match &mut self.kind {
            ElementKind::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }

    /// Move the element; the hit rectangle follows in the same call
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_rectangle();
    }

    /// Replace an image's texture and resize the hit rectangle
    pub fn set_texture(&mut self, texture: Texture) {
        if let ElementKind::Image(image) = &mut self.kind {
            image.set_texture(texture);
            self.refresh_rectangle();
        }
    }

    /// Change an image's scale and resize the hit rectangle
    pub fn set_scale(&mut self, scale: f32) {
        if let ElementKind::Image(image) = &mut self.kind {
            image.set_scale(scale);
            self.refresh_rectangle();
        }
    }

    fn refresh_rectangle(&mut self) {
        let size = if self.kind.tracks_panel() {
            self.rectangle.size()
        } else {
            self.kind.size()
        };
        self.rectangle = Rect::from_parts(snap(self.position), size);
    }

    /// Switch to the highlighted color
    pub fn highlight(&mut self) {
        self.color = self.highlighted_color;
    }

    /// Switch back to the normal color
    pub fn unhighlight(&mut self) {
        self.color = self.unhighlighted_color;
    }

    pub(crate) fn show(&mut self, ctx: &mut ElementContext<'_>) {
        self.set_visible(true, ctx);
        self.set_enabled(true, ctx);
    }

    pub(crate) fn hide(&mut self, ctx: &mut ElementContext<'_>) {
        self.set_visible(false, ctx);
        self.set_enabled(false, ctx);
    }

    pub(crate) fn set_visible(&mut self, visible: bool, ctx: &mut ElementContext<'_>) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        self.raise(ctx.events, ElementEventKind::VisibleChanged(visible));
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool, ctx: &mut ElementContext<'_>) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;

        if enabled {
            ctx.broadcast.subscribe(self.handle.key, Channels::ALL);
        } else {
            ctx.broadcast.unsubscribe(self.handle.key);
        }
        log::trace!("Element '{}' enabled = {}", self.id, enabled);

        self.raise(ctx.events, ElementEventKind::EnabledChanged(enabled));
    }

    /// React to one broadcast input event
    pub(crate) fn handle_input(&mut self, event: &InputEvent, events: &mut EventSystem) {
        if !self.enabled {
            return;
        }

        match *event {
            InputEvent::MouseMoved(cursor) => {
                let inside = self.rectangle.contains(cursor);
                if inside && !self.is_mouse_over {
                    self.is_mouse_over = true;
                    self.raise(events, ElementEventKind::MouseOver);
                } else if !inside && self.is_mouse_over {
                    self.is_mouse_over = false;
                    self.raise(events, ElementEventKind::MouseGone);
                }
            }
            InputEvent::LeftClick => self.raise_if_over(events, ElementEventKind::LeftClick),
            InputEvent::RightClick => self.raise_if_over(events, ElementEventKind::RightClick),
            InputEvent::DoubleClick => self.raise_if_over(events, ElementEventKind::DoubleClick),
            InputEvent::ScrollWheel(delta) => {
                self.raise_if_over(events, ElementEventKind::ScrollWheel(delta));
            }
        }
    }

    pub(crate) fn on_panel_rectangle_updated(&mut self, update: RectangleUpdated) {
        if self.kind.tracks_panel() {
            self.rectangle = update.0;
        }
    }

    fn raise_if_over(&self, events: &mut EventSystem, kind: ElementEventKind) {
        if self.is_mouse_over {
            self.raise(events, kind);
        }
    }

    fn raise(&self, events: &mut EventSystem, kind: ElementEventKind) {
        events.send(ElementEvent {
            source: self.handle,
            id: self.id.clone(),
            kind,
        });
    }

    /// Per-frame hook; the built-in kinds have nothing to advance
    pub fn update(&mut self, _time: &FrameTime) {}

    /// Draw at the stored position
    pub fn draw(&self, _time: &FrameTime, surface: &mut dyn DrawSurface) -> UiResult<()> {
        self.draw_to(surface, self.position, self.rectangle)
    }

    /// Draw at another position without moving the element
    pub fn draw_at(
        &self,
        _time: &FrameTime,
        surface: &mut dyn DrawSurface,
        position: Vec2,
    ) -> UiResult<()> {
        self.draw_to(surface, position, self.rectangle.with_location(snap(position)))
    }

    fn draw_to(
        &self,
        surface: &mut dyn DrawSurface,
        position: Vec2,
        destination: Rect,
    ) -> UiResult<()> {
        if !self.visible {
            return Ok(());
        }
        let call = self.kind.draw_call(position, destination, self.color)?;
        surface.draw(&call)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BroadcastStats;
    use crate::ui::surface::{Placement, RecordingSurface};
    use crate::ui::{ComponentId, ElementKey};
    use slotmap::SlotMap;

    struct Harness {
        broadcast: InputBroadcast,
        events: EventSystem,
        element: Element,
    }

    impl Harness {
        fn new(element: Element) -> Self {
            let mut arena: SlotMap<ElementKey, ()> = SlotMap::with_key();
            let mut element = element;
            element.attach(ElementHandle::new(ComponentId(1), arena.insert(())));
            Self {
                broadcast: InputBroadcast::new(),
                events: EventSystem::new(),
                element,
            }
        }

        fn ctx(&mut self) -> (&mut Element, ElementContext<'_>) {
            (
                &mut self.element,
                ElementContext {
                    broadcast: &mut self.broadcast,
                    events: &mut self.events,
                },
            )
        }

        fn show(&mut self) {
            let (element, mut ctx) = self.ctx();
            element.show(&mut ctx);
        }

        fn hide(&mut self) {
            let (element, mut ctx) = self.ctx();
            element.hide(&mut ctx);
        }

        fn input(&mut self, event: InputEvent) {
            if self.broadcast.is_subscribed(self.element.handle().key) {
                self.element.handle_input(&event, &mut self.events);
            }
        }

        fn kinds(&mut self) -> Vec<ElementEventKind> {
            self.events.drain().into_iter().map(|e| e.kind).collect()
        }
    }

    fn button() -> Element {
        Element::image("button", Vec2::new(10.0, 10.0), Texture::solid_color(20, 20, [255; 4]), 0)
    }

    #[test]
    fn test_starts_hidden_and_disabled() {
        let element = button();

        assert!(!element.is_visible());
        assert!(!element.is_enabled());
        assert!(!element.is_mouse_over());
        assert_eq!(element.rectangle(), Rect::new(10, 10, 20, 20));
    }

    #[test]
    fn test_show_hide_balances_subscriptions() {
        let mut harness = Harness::new(button());

        harness.show();
        assert!(harness.broadcast.is_subscribed(harness.element.handle().key));
        assert_eq!(
            harness.kinds(),
            vec![ElementEventKind::VisibleChanged(true), ElementEventKind::EnabledChanged(true)]
        );

        harness.hide();
        harness.kinds();
        harness.hide();

        assert!(harness.kinds().is_empty());
        assert_eq!(
            harness.broadcast.stats(),
            BroadcastStats { subscriptions: 1, unsubscriptions: 1 }
        );
    }

    #[test]
    fn test_show_twice_fires_once() {
        let mut harness = Harness::new(button());

        harness.show();
        harness.show();

        assert_eq!(harness.kinds().len(), 2);
        assert_eq!(harness.broadcast.len(), 1);
    }

    #[test]
    fn test_hover_fires_on_edges_only() {
        let mut harness = Harness::new(button());
        harness.show();
        harness.kinds();

        let path = [(0, 0), (15, 15), (16, 16), (15, 15), (40, 40), (41, 41), (29, 29), (30, 30)];
        for (x, y) in path {
            harness.input(InputEvent::MouseMoved(Point::new(x, y)));
        }

        assert_eq!(
            harness.kinds(),
            vec![
                ElementEventKind::MouseOver,
                ElementEventKind::MouseGone,
                ElementEventKind::MouseOver,
                ElementEventKind::MouseGone,
            ]
        );
    }

    #[test]
    fn test_clicks_gated_on_hover() {
        let mut harness = Harness::new(button());
        harness.show();
        harness.kinds();

        harness.input(InputEvent::LeftClick);
        harness.input(InputEvent::ScrollWheel(120));
        assert!(harness.kinds().is_empty());

        harness.input(InputEvent::MouseMoved(Point::new(12, 12)));
        harness.kinds();
        harness.input(InputEvent::LeftClick);
        harness.input(InputEvent::RightClick);
        harness.input(InputEvent::DoubleClick);
        harness.input(InputEvent::ScrollWheel(-120));

        assert_eq!(
            harness.kinds(),
            vec![
                ElementEventKind::LeftClick,
                ElementEventKind::RightClick,
                ElementEventKind::DoubleClick,
                ElementEventKind::ScrollWheel(-120),
            ]
        );
    }

    #[test]
    fn test_hidden_element_ignores_input() {
        let mut harness = Harness::new(button());
        harness.show();
        harness.hide();
        harness.kinds();

        harness.input(InputEvent::MouseMoved(Point::new(12, 12)));

        assert!(harness.kinds().is_empty());
        assert!(!harness.element.is_mouse_over());
    }

    #[test]
    fn test_position_updates_rectangle() {
        let mut element = button();

        element.set_position(Vec2::new(100.7, -3.2));

        assert_eq!(element.rectangle(), Rect::new(100, -4, 20, 20));
    }

    #[test]
    fn test_scale_resizes_rectangle() {
        let element = button().with_scale(1.5);
        assert_eq!(element.rectangle().size(), Point::new(30, 30));
    }

    #[test]
    fn test_highlight_swaps_color_only() {
        let mut element = button().with_colors(colors::white(), colors::gold());
        let before = element.rectangle();

        element.highlight();
        assert_eq!(element.color(), colors::gold());
        element.unhighlight();
        assert_eq!(element.color(), colors::white());
        assert_eq!(element.rectangle(), before);
    }

    #[test]
    fn test_background_follows_panel_rectangle() {
        let mut background = Element::background(
            "background",
            Vec2::zeros(),
            Texture::solid_color(8, 8, [0, 0, 0, 255]),
            Point::new(800, 600),
            0,
        );
        let mut image = button();

        background.on_panel_rectangle_updated(RectangleUpdated(Rect::new(5, 5, 1024, 768)));
        image.on_panel_rectangle_updated(RectangleUpdated(Rect::new(5, 5, 1024, 768)));

        assert_eq!(background.rectangle(), Rect::new(5, 5, 1024, 768));
        assert_eq!(image.rectangle(), Rect::new(10, 10, 20, 20));
    }

    #[test]
    fn test_draw_only_when_visible() {
        let mut harness = Harness::new(button());
        let mut surface = RecordingSurface::new();
        let time = FrameTime::default();

        surface.begin().unwrap();
        harness.element.draw(&time, &mut surface).unwrap();
        harness.show();
        harness.element.draw_at(&time, &mut surface, Vec2::new(1.0, 2.0)).unwrap();
        surface.end().unwrap();

        assert_eq!(surface.calls().len(), 1);
        assert_eq!(
            surface.calls()[0].placement,
            Placement::At { position: Vec2::new(1.0, 2.0), scale: 1.0 }
        );
        assert_eq!(harness.element.position(), Vec2::new(10.0, 10.0));
    }
}
