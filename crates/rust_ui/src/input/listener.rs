//! Device listeners
//!
//! Listeners compare each frame's device snapshot with the previous one and
//! emit what changed. Mouse output is the broadcast input elements react to;
//! keyboard output is the set of keys pressed this frame.

use std::time::Duration;

use crate::core::config::InputConfig;
use crate::events::InputEvent;
use crate::foundation::time::FrameTime;
use crate::input::{KeyCode, KeyboardState, MouseButtons, MouseState};

/// Turns mouse snapshots into broadcast input events
#[derive(Debug, Clone)]
pub struct MouseListener {
    double_click: Duration,
    previous: Option<MouseState>,
    last_left_press: Option<Duration>,
}

impl MouseListener {
    /// Create a listener using the configured double click window
    pub fn new(config: &InputConfig) -> Self {
        Self {
            double_click: Duration::from_millis(config.double_click_ms),
            previous: None,
            last_left_press: None,
        }
    }

    /// Compare `state` with the previous snapshot
    ///
    /// Events come out as: cursor move, double click, clicks, scroll. Clicks
    /// fire when the button is released. The first snapshot always reports
    /// the cursor position and sets the scroll baseline.
    pub fn update(&mut self, time: &FrameTime, state: MouseState) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let previous = self.previous.unwrap_or(MouseState {
            buttons: MouseButtons::empty(),
            ..state
        });

        if self.previous.is_none() || previous.position != state.position {
            events.push(InputEvent::MouseMoved(state.position));
        }

        let pressed = state.buttons.difference(previous.buttons);
        let released = previous.buttons.difference(state.buttons);

        if pressed.contains(MouseButtons::LEFT) {
            match self.last_left_press {
                Some(last) if time.total.saturating_sub(last) <= self.double_click => {
                    events.push(InputEvent::DoubleClick);
                    self.last_left_press = None;
                }
                _ => self.last_left_press = Some(time.total),
            }
        }
        if released.contains(MouseButtons::LEFT) {
            events.push(InputEvent::LeftClick);
        }
        if released.contains(MouseButtons::RIGHT) {
            events.push(InputEvent::RightClick);
        }

        let delta = state.scroll_wheel_value.wrapping_sub(previous.scroll_wheel_value);
        if delta != 0 {
            events.push(InputEvent::ScrollWheel(delta));
        }

        self.previous = Some(state);
        events
    }
}

/// Reports keys that went down this frame
#[derive(Debug, Clone, Default)]
pub struct KeyboardListener {
    previous: KeyboardState,
}

impl KeyboardListener {
    /// Create a listener with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys held now that were not held in the previous snapshot
    pub fn update(&mut self, state: &KeyboardState) -> Vec<KeyCode> {
        let pressed = state
            .pressed()
            .filter(|key| !self.previous.is_pressed(*key))
            .collect();
        self.previous = state.clone();
        pressed
    }
}

/// Everything the listeners produced for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Broadcast input, in the order it happened
    pub events: Vec<InputEvent>,
    /// Keys pressed this frame
    pub keys_pressed: Vec<KeyCode>,
}

/// Mouse and keyboard listeners updated together
#[derive(Debug, Clone)]
pub struct InputListener {
    mouse: MouseListener,
    keyboard: KeyboardListener,
}

impl InputListener {
    /// Create listeners from configuration
    pub fn new(config: &InputConfig) -> Self {
        Self {
            mouse: MouseListener::new(config),
            keyboard: KeyboardListener::new(),
        }
    }

    /// Run both listeners over this frame's snapshots
    pub fn update(
        &mut self,
        time: &FrameTime,
        mouse: MouseState,
        keyboard: &KeyboardState,
    ) -> FrameInput {
        FrameInput {
            events: self.mouse.update(time, mouse),
            keys_pressed: self.keyboard.update(keyboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point;

    fn at(millis: u64) -> FrameTime {
        FrameTime::new(Duration::from_millis(16), Duration::from_millis(millis))
    }

    fn listener() -> MouseListener {
        MouseListener::new(&InputConfig::new())
    }

    #[test]
    fn test_first_snapshot_reports_position() {
        let mut mouse = listener();
        let state = MouseState::at(Point::new(3, 4)).with_scroll(360);

        assert_eq!(mouse.update(&at(0), state), vec![InputEvent::MouseMoved(Point::new(3, 4))]);
        assert!(mouse.update(&at(16), state).is_empty());
    }

    #[test]
    fn test_click_fires_on_release() {
        let mut mouse = listener();
        let up = MouseState::at(Point::zero());
        let down = up.with_buttons(MouseButtons::LEFT | MouseButtons::RIGHT);
        mouse.update(&at(0), up);

        assert!(mouse.update(&at(16), down).is_empty());
        assert_eq!(
            mouse.update(&at(500), up),
            vec![InputEvent::LeftClick, InputEvent::RightClick]
        );
    }

    #[test]
    fn test_double_click_window() {
        let mut mouse = listener();
        let up = MouseState::at(Point::zero());
        let down = up.with_buttons(MouseButtons::LEFT);
        mouse.update(&at(0), up);

        mouse.update(&at(100), down);
        mouse.update(&at(150), up);
        assert_eq!(
            mouse.update(&at(300), down),
            vec![InputEvent::DoubleClick]
        );
        mouse.update(&at(320), up);

        // A third press starts a new pair
        assert!(mouse.update(&at(400), down).is_empty());
        mouse.update(&at(420), up);
        assert!(mouse.update(&at(1000), down).is_empty());
    }

    #[test]
    fn test_move_then_scroll_order() {
        let mut mouse = listener();
        mouse.update(&at(0), MouseState::at(Point::zero()).with_scroll(120));

        let events = mouse.update(&at(16), MouseState::at(Point::new(8, 9)).with_scroll(0));

        assert_eq!(
            events,
            vec![InputEvent::MouseMoved(Point::new(8, 9)), InputEvent::ScrollWheel(-120)]
        );
    }

    #[test]
    fn test_scroll_counter_wraps() {
        let mut mouse = listener();
        let cursor = MouseState::at(Point::zero());
        mouse.update(&at(0), cursor.with_scroll(i32::MAX));

        let events = mouse.update(&at(16), cursor.with_scroll(i32::MIN));

        assert_eq!(events, vec![InputEvent::ScrollWheel(1)]);
    }

    #[test]
    fn test_keyboard_reports_new_presses_only() {
        let mut keyboard = KeyboardListener::new();

        assert_eq!(
            keyboard.update(&KeyboardState::new([KeyCode::Escape, KeyCode::A])),
            vec![KeyCode::A, KeyCode::Escape]
        );
        assert_eq!(
            keyboard.update(&KeyboardState::new([KeyCode::A, KeyCode::Space])),
            vec![KeyCode::Space]
        );
        assert!(keyboard.update(&KeyboardState::default()).is_empty());
    }
}
