//! Input system
//!
//! Device snapshots ([`MouseState`], [`KeyboardState`]) go in, listeners turn
//! consecutive snapshots into broadcast [`InputEvent`](crate::events::InputEvent)s
//! and key presses, and the responder maps user input to named actions.

pub mod listener;
pub mod responder;
pub mod source;

pub use listener::{FrameInput, InputListener, KeyboardListener, MouseListener};
pub use responder::{InputResponder, UserAction};
pub use source::{EventSource, EventType, InputSource, UserInput};

use bitflags::bitflags;
use std::collections::BTreeSet;

use crate::foundation::math::Point;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key
    Num0,
    /// 1 key
    Num1,
    /// 2 key
    Num2,
    /// 3 key
    Num3,
    /// 4 key
    Num4,
    /// 5 key
    Num5,
    /// 6 key
    Num6,
    /// 7 key
    Num7,
    /// 8 key
    Num8,
    /// 9 key
    Num9,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

bitflags! {
    /// Mouse buttons held down
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const LEFT = 1 << 0;
        /// Right mouse button
        const RIGHT = 1 << 1;
        /// Middle mouse button
        const MIDDLE = 1 << 2;
    }
}

/// Mouse device snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    /// Cursor position in screen pixels
    pub position: Point,
    /// Buttons held down
    pub buttons: MouseButtons,
    /// Cumulative scroll wheel value
    pub scroll_wheel_value: i32,
}

impl MouseState {
    /// Snapshot with the cursor at `position` and nothing pressed
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            buttons: MouseButtons::empty(),
            scroll_wheel_value: 0,
        }
    }

    /// Same snapshot with different buttons held
    pub const fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Same snapshot with a different scroll value
    pub const fn with_scroll(mut self, scroll_wheel_value: i32) -> Self {
        self.scroll_wheel_value = scroll_wheel_value;
        self
    }
}

/// Keyboard device snapshot for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: BTreeSet<KeyCode>,
}

impl KeyboardState {
    /// Snapshot with the given keys held
    pub fn new(pressed: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            pressed: pressed.into_iter().collect(),
        }
    }

    /// Whether a key is held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Held keys in a stable order
    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.pressed.iter().copied()
    }
}
