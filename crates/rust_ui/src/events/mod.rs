//! Input broadcast and element event routing
//!
//! Two directions of traffic pass through here:
//! - Broadcast input (mouse moved, clicks, scroll) flows *down* from the host
//!   to every element subscribed on its component's [`InputBroadcast`].
//! - Element-scoped events (hover edges, gated clicks, state changes) flow
//!   *up* into the component's [`EventSystem`], where handlers registered by
//!   kind may consume them; whatever is left is returned to the caller.
//!
//! Subscription is an explicit registry keyed by element, so subscribing
//! twice or unsubscribing a stranger are no-ops rather than duplicates.

use bitflags::bitflags;
use std::collections::HashMap;

use crate::foundation::math::{Point, Rect};
use crate::ui::{ElementHandle, ElementKey};

bitflags! {
    /// Broadcast channels an element can listen on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        /// Cursor moved
        const MOUSE_MOVED = 1 << 0;
        /// Left button clicked
        const LEFT_CLICK = 1 << 1;
        /// Right button clicked
        const RIGHT_CLICK = 1 << 2;
        /// Left button double clicked
        const DOUBLE_CLICK = 1 << 3;
        /// Scroll wheel moved
        const SCROLL_WHEEL = 1 << 4;
        /// Every input channel
        const ALL = Self::MOUSE_MOVED.bits()
            | Self::LEFT_CLICK.bits()
            | Self::RIGHT_CLICK.bits()
            | Self::DOUBLE_CLICK.bits()
            | Self::SCROLL_WHEEL.bits();
    }
}

/// Raw input occurrence broadcast to subscribed elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Cursor moved to a new position
    MouseMoved(Point),
    /// Left button clicked
    LeftClick,
    /// Right button clicked
    RightClick,
    /// Left button double clicked
    DoubleClick,
    /// Scroll wheel moved by a delta
    ScrollWheel(i32),
}

impl InputEvent {
    /// Channel this event is delivered on
    pub const fn channel(&self) -> Channels {
        match self {
            Self::MouseMoved(_) => Channels::MOUSE_MOVED,
            Self::LeftClick => Channels::LEFT_CLICK,
            Self::RightClick => Channels::RIGHT_CLICK,
            Self::DoubleClick => Channels::DOUBLE_CLICK,
            Self::ScrollWheel(_) => Channels::SCROLL_WHEEL,
        }
    }

    /// Same event with the cursor moved by `delta`
    pub fn translated(self, delta: Point) -> Self {
        match self {
            Self::MouseMoved(position) => Self::MouseMoved(position + delta),
            other => other,
        }
    }
}

/// Running totals of registry changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    /// Successful subscriptions
    pub subscriptions: usize,
    /// Successful unsubscriptions
    pub unsubscriptions: usize,
}

/// Observer registry for one component's shared input
#[derive(Debug, Default)]
pub struct InputBroadcast {
    subscribers: Vec<(ElementKey, Channels)>,
    rectangle_listeners: Vec<ElementKey>,
    stats: BroadcastStats,
}

impl InputBroadcast {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element on the given channels
    ///
    /// Returns false if the element was already subscribed.
    pub fn subscribe(&mut self, key: ElementKey, channels: Channels) -> bool {
        if self.is_subscribed(key) {
            return false;
        }
        self.subscribers.push((key, channels));
        self.stats.subscriptions += 1;
        true
    }

    /// Remove every channel registration of an element
    ///
    /// Returns false if the element was not subscribed.
    pub fn unsubscribe(&mut self, key: ElementKey) -> bool {
        match self.subscribers.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.subscribers.remove(index);
                self.stats.unsubscriptions += 1;
                true
            }
            None => false,
        }
    }

    /// Check whether an element is subscribed
    pub fn is_subscribed(&self, key: ElementKey) -> bool {
        self.subscribers.iter().any(|(k, _)| *k == key)
    }

    /// Snapshot of the elements listening on `channel`, in subscription order
    pub fn subscribers(&self, channel: Channels) -> Vec<ElementKey> {
        self.subscribers
            .iter()
            .filter(|(_, channels)| channels.intersects(channel))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Number of subscribed elements
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// True when nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Registry change totals
    pub const fn stats(&self) -> BroadcastStats {
        self.stats
    }

    /// Register an element for panel rectangle updates
    pub fn listen_rectangle(&mut self, key: ElementKey) {
        if !self.rectangle_listeners.contains(&key) {
            self.rectangle_listeners.push(key);
        }
    }

    /// Stop delivering panel rectangle updates to an element
    pub fn forget_rectangle(&mut self, key: ElementKey) {
        self.rectangle_listeners.retain(|k| *k != key);
    }

    /// Snapshot of panel rectangle listeners
    pub fn rectangle_listeners(&self) -> Vec<ElementKey> {
        self.rectangle_listeners.clone()
    }
}

/// Event kind, used to register handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Enabled flag changed
    EnabledChanged,
    /// Visible flag changed
    VisibleChanged,
    /// Left click while hovered
    LeftClick,
    /// Right click while hovered
    RightClick,
    /// Double click while hovered
    DoubleClick,
    /// Cursor entered the element
    MouseOver,
    /// Cursor left the element
    MouseGone,
    /// Scroll while hovered
    ScrollWheel,
}

/// What happened to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEventKind {
    /// Enabled flag changed to the given value
    EnabledChanged(bool),
    /// Visible flag changed to the given value
    VisibleChanged(bool),
    /// Left click while hovered
    LeftClick,
    /// Right click while hovered
    RightClick,
    /// Double click while hovered
    DoubleClick,
    /// Cursor entered the element
    MouseOver,
    /// Cursor left the element
    MouseGone,
    /// Scroll while hovered, with the wheel delta
    ScrollWheel(i32),
}

impl ElementEventKind {
    /// Kind used for handler lookup
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::EnabledChanged(_) => EventKind::EnabledChanged,
            Self::VisibleChanged(_) => EventKind::VisibleChanged,
            Self::LeftClick => EventKind::LeftClick,
            Self::RightClick => EventKind::RightClick,
            Self::DoubleClick => EventKind::DoubleClick,
            Self::MouseOver => EventKind::MouseOver,
            Self::MouseGone => EventKind::MouseGone,
            Self::ScrollWheel(_) => EventKind::ScrollWheel,
        }
    }
}

/// Element-scoped event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementEvent {
    /// Element that raised the event
    pub source: ElementHandle,
    /// Identifier of that element within its component
    pub id: String,
    /// What happened
    pub kind: ElementEventKind,
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &ElementEvent) -> bool;
}

/// Element event queue with per-kind handler registration
/// Follows chain of responsibility pattern
#[derive(Default)]
pub struct EventSystem {
    queue: Vec<ElementEvent>,
    handlers: HashMap<EventKind, Vec<Box<dyn EventHandler>>>,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event kind
    /// Only handlers registered for this kind will be notified
    pub fn register_handler(&mut self, kind: EventKind, handler: Box<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Queue an event for this frame
    pub fn send(&mut self, event: ElementEvent) {
        self.queue.push(event);
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Take queued events without running handlers
    pub fn drain(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Run handlers over queued events
    ///
    /// Returns the events no handler consumed, in the order they were sent.
    pub fn dispatch(&mut self) -> Vec<ElementEvent> {
        let queued = std::mem::take(&mut self.queue);
        queued
            .into_iter()
            .filter(|event| !self.dispatch_event(event))
            .collect()
    }

    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &ElementEvent) -> bool {
        self.handlers
            .get_mut(&event.kind.kind())
            .is_some_and(|handlers| handlers.iter_mut().any(|handler| handler.on_event(event)))
    }

    /// Clear all queued events (useful for scene transitions)
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("queued", &self.queue.len())
            .field("handler_kinds", &self.handlers.len())
            .finish()
    }
}

/// Panel rectangle changed, delivered to rectangle listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleUpdated(pub Rect);
