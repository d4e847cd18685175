//! The raw player inputs the game reacts to.

use super::XY;

/// A key which can be pressed or released in an [`Action`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Char(char),
    F(usize),
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Insert,
    Tab,
    Enter,
    LeftShift,
    LeftCtrl,
    LeftAlt,
}

impl Key {
    /// Whether this is a modifier, which on its own never counts as "pressing a key".
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::LeftShift | Self::LeftCtrl | Self::LeftAlt)
    }
}

/// A mouse button which can be pressed or released in an [`Action`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

/// An action the player has taken in the [`IoSystem`][super::sys::IoSystem].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// A key was pressed. Modifiers are sent as their own presses, before the key they modify.
    KeyPress { key: Key },
    /// A key was let go. Modifiers are sent as their own releases, after the key they modify.
    KeyRelease { key: Key },
    /// A mouse button was pressed.
    MousePress { pos: XY, button: MouseButton },
    /// A mouse button was released.
    MouseRelease { pos: XY, button: MouseButton },
    /// The mouse moved to a new location, possibly while holding a button.
    MouseMove { pos: XY },
    /// The display needs to be redrawn, e.g. because it was resized.
    Redraw,
    /// User requested the program end externally, e.g. with Ctrl+C or by closing the window.
    Closed,
    /// Some unknown input was received, with a description of what it was
    Unknown(String),
    /// Trying to read input led to some kind of error, with a description
    Error(String),
}

impl Action {
    /// Whether this action ends the program no matter what's on screen.
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            Self::Closed
                | Self::KeyPress { key: Key::Escape }
                | Self::KeyRelease { key: Key::Escape }
        )
    }
}
