use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the engine reacts to get variants; the rest keep their
/// platform code in `Key::Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Legacy DOM `keyCode` for the key, when it has one.
    pub fn legacy_code(self) -> Option<u32> {
        match self {
            Key::Space => Some(32),
            Key::Enter => Some(13),
            Key::Escape => Some(27),
            Key::Unknown(_) => None,
        }
    }

    /// Inverse of [`legacy_code`](Self::legacy_code).
    pub fn from_legacy_code(code: u32) -> Option<Self> {
        match code {
            32 => Some(Key::Space),
            13 => Some(Key::Enter),
            27 => Some(Key::Escape),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer button event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
}

impl PointerButtonEvent {
    /// A click is the release of the primary button.
    #[inline]
    pub fn is_click(&self) -> bool {
        self.button == MouseButton::Left && self.state == MouseButtonState::Released
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    PointerButton(PointerButtonEvent),

    Key {
        key: Key,
        state: KeyState,
        /// True when the event is an auto-repeat of a held key.
        repeat: bool,
    },
}

impl InputEvent {
    pub fn click() -> Self {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
        })
    }

    pub fn key_down(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            repeat: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_code_32() {
        assert_eq!(Key::Space.legacy_code(), Some(32));
        assert_eq!(Key::from_legacy_code(32), Some(Key::Space));
        assert_eq!(Key::from_legacy_code(65), None);
    }

    #[test]
    fn only_primary_release_is_a_click() {
        let press = PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        };
        let right = PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Released,
        };
        assert!(!press.is_click());
        assert!(!right.is_click());
        assert_eq!(InputEvent::click(), InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
        }));
    }
}
