//! User input events and the sources that may trigger them
//!
//! A [`UserInput`] names exactly one origin, either an element or a key.
//! An [`InputSource`] is a set of such origins an action listens to.

use crate::events::{ElementEvent, ElementEventKind};
use crate::input::KeyCode;
use crate::ui::error::{UiError, UiResult};
use crate::ui::ElementHandle;

/// What the user did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Left click on an element
    LeftClick,
    /// Right click on an element
    RightClick,
    /// Double click on an element
    DoubleClick,
    /// Cursor entered an element
    MouseOver,
    /// Cursor left an element
    MouseGone,
    /// Scroll over an element
    ScrollWheel,
    /// Key pressed
    Keyboard,
}

/// Origin of a user input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// An element raised it
    Element(ElementHandle),
    /// A key press raised it
    Key(KeyCode),
}

/// User input event with a single, validated origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInput {
    event_type: EventType,
    source: EventSource,
}

impl UserInput {
    /// Build an event from optional origins
    ///
    /// Exactly one of `element` and `key` must be given.
    pub fn new(
        event_type: EventType,
        element: Option<ElementHandle>,
        key: Option<KeyCode>,
    ) -> UiResult<Self> {
        let source = match (element, key) {
            (Some(element), None) => EventSource::Element(element),
            (None, Some(key)) => EventSource::Key(key),
            (None, None) => return Err(UiError::MissingEventSource),
            (Some(_), Some(_)) => return Err(UiError::AmbiguousEventSource),
        };
        Ok(Self { event_type, source })
    }

    /// Key press event
    pub const fn from_key(key: KeyCode) -> Self {
        Self {
            event_type: EventType::Keyboard,
            source: EventSource::Key(key),
        }
    }

    /// User-facing event for an element event, if it is one
    ///
    /// State changes (visible, enabled) are not user input.
    pub fn from_element_event(event: &ElementEvent) -> Option<Self> {
        let event_type = match event.kind {
            ElementEventKind::LeftClick => EventType::LeftClick,
            ElementEventKind::RightClick => EventType::RightClick,
            ElementEventKind::DoubleClick => EventType::DoubleClick,
            ElementEventKind::MouseOver => EventType::MouseOver,
            ElementEventKind::MouseGone => EventType::MouseGone,
            ElementEventKind::ScrollWheel(_) => EventType::ScrollWheel,
            ElementEventKind::EnabledChanged(_) | ElementEventKind::VisibleChanged(_) => {
                return None;
            }
        };
        Some(Self {
            event_type,
            source: EventSource::Element(event.source),
        })
    }

    /// What the user did
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Where it came from
    pub const fn source(&self) -> EventSource {
        self.source
    }
}

/// Elements and keys that count as triggers for one action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSource {
    elements: Vec<ElementHandle>,
    keys: Vec<KeyCode>,
}

impl InputSource {
    /// Source made of both elements and keys
    pub fn new(
        elements: impl IntoIterator<Item = ElementHandle>,
        keys: impl IntoIterator<Item = KeyCode>,
    ) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            keys: keys.into_iter().collect(),
        }
    }

    /// Single key
    pub fn from_key(key: KeyCode) -> Self {
        Self::from_keys([key])
    }

    /// Single element
    pub fn from_element(element: ElementHandle) -> Self {
        Self::from_elements([element])
    }

    /// Any of several keys
    pub fn from_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(std::iter::empty(), keys)
    }

    /// Any of several elements
    pub fn from_elements(elements: impl IntoIterator<Item = ElementHandle>) -> Self {
        Self::new(elements, std::iter::empty())
    }

    /// Source elements
    pub fn elements(&self) -> &[ElementHandle] {
        &self.elements
    }

    /// Source keys
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Whether an element is one of the sources
    pub fn contains_element(&self, element: ElementHandle) -> bool {
        self.elements.contains(&element)
    }

    /// Whether a key is one of the sources
    pub fn contains_key(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether an event origin is one of the sources
    pub fn contains(&self, source: &EventSource) -> bool {
        match *source {
            EventSource::Element(element) => self.contains_element(element),
            EventSource::Key(key) => self.contains_key(key),
        }
    }
}
