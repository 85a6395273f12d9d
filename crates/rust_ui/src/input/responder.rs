//! Input responder - maps user input to named actions

use crate::input::source::{EventType, InputSource, UserInput};

/// Named action triggered by one event type from any of its sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAction {
    /// Action name reported when triggered
    pub name: String,
    /// Event type that triggers it
    pub event_type: EventType,
    /// Origins that count
    pub source: InputSource,
}

impl UserAction {
    /// Create an action
    pub fn new(name: impl Into<String>, event_type: EventType, source: InputSource) -> Self {
        Self {
            name: name.into(),
            event_type,
            source,
        }
    }

    /// Whether a user input event triggers this action
    pub fn matches(&self, input: &UserInput) -> bool {
        self.event_type == input.event_type() && self.source.contains(&input.source())
    }
}

/// Registry of user actions
#[derive(Debug, Clone, Default)]
pub struct InputResponder {
    actions: Vec<UserAction>,
}

impl InputResponder {
    /// Create an empty responder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action
    pub fn register(&mut self, action: UserAction) {
        log::debug!("Registered user action '{}' on {:?}", action.name, action.event_type);
        self.actions.push(action);
    }

    /// Remove every action with this name, returning how many were removed
    pub fn unregister(&mut self, name: &str) -> usize {
        let before = self.actions.len();
        self.actions.retain(|action| action.name != name);
        before - self.actions.len()
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when no action is registered
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Names of the actions an event triggers, in registration order
    pub fn respond(&self, input: &UserInput) -> Vec<&str> {
        self.actions
            .iter()
            .filter(|action| action.matches(input))
            .map(|action| action.name.as_str())
            .collect()
    }
}
