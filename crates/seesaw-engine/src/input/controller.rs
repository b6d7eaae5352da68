use crate::motion::AnimationState;

use super::types::{InputEvent, Key, KeyState};

/// Maps input events onto the animation's frozen flag.
///
/// Two channels write the same flag:
/// - click: toggles
/// - hold key down / up: forces frozen / running
///
/// The last processed event wins. A toggle made while the hold key is down is
/// overwritten by the next key event; no arbitration happens between them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InputController {
    hold_key: Key,
}

impl InputController {
    pub fn new(hold_key: Key) -> Self {
        Self { hold_key }
    }

    pub fn hold_key(&self) -> Key {
        self.hold_key
    }

    pub fn click(&self, state: &mut AnimationState) {
        state.set_frozen(!state.is_frozen());
    }

    pub fn key_down(&self, key: Key, state: &mut AnimationState) {
        if key == self.hold_key {
            state.set_frozen(true);
        }
    }

    pub fn key_up(&self, key: Key, state: &mut AnimationState) {
        if key == self.hold_key {
            state.set_frozen(false);
        }
    }

    /// Routes `event` to the matching handler.
    ///
    /// Returns `true` when the event is one of the three the controller acts on.
    pub fn apply(&self, event: &InputEvent, state: &mut AnimationState) -> bool {
        match event {
            InputEvent::PointerButton(b) if b.is_click() => {
                self.click(state);
                true
            }
            InputEvent::Key { key, state: KeyState::Pressed, .. } if *key == self.hold_key => {
                self.key_down(*key, state);
                true
            }
            InputEvent::Key { key, state: KeyState::Released, .. } if *key == self.hold_key => {
                self.key_up(*key, state);
                true
            }
            _ => false,
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(Key::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState, PointerButtonEvent};

    fn running() -> AnimationState {
        AnimationState::new(1.0 / 600.0, 0.5)
    }

    // ── click ─────────────────────────────────────────────────────────────

    #[test]
    fn click_toggles_from_either_state() {
        let c = InputController::default();
        let mut s = running();

        c.click(&mut s);
        assert!(s.is_frozen());
        c.click(&mut s);
        assert!(!s.is_frozen());
    }

    #[test]
    fn double_click_restores_original_value() {
        let c = InputController::default();
        for initial in [false, true] {
            let mut s = running();
            s.set_frozen(initial);
            c.apply(&InputEvent::click(), &mut s);
            c.apply(&InputEvent::click(), &mut s);
            assert_eq!(s.is_frozen(), initial);
        }
    }

    #[test]
    fn button_press_and_other_buttons_do_not_toggle() {
        let c = InputController::default();
        let mut s = running();

        let press = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });
        let right = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Released,
        });

        assert!(!c.apply(&press, &mut s));
        assert!(!c.apply(&right, &mut s));
        assert!(!s.is_frozen());
    }

    // ── hold key ──────────────────────────────────────────────────────────

    #[test]
    fn hold_forces_frozen_regardless_of_toggle() {
        let c = InputController::default();
        let mut s = running();

        c.click(&mut s);
        assert!(s.is_frozen());

        c.apply(&InputEvent::key_down(Key::Space), &mut s);
        assert!(s.is_frozen());

        c.apply(&InputEvent::key_up(Key::Space), &mut s);
        assert!(!s.is_frozen());
    }

    #[test]
    fn key_repeat_keeps_frozen() {
        let c = InputController::default();
        let mut s = running();

        for repeat in [false, true, true] {
            let ev = InputEvent::Key {
                key: Key::Space,
                state: KeyState::Pressed,
                repeat,
            };
            assert!(c.apply(&ev, &mut s));
            assert!(s.is_frozen());
        }
    }

    #[test]
    fn click_while_held_is_overwritten_by_next_key_event() {
        let c = InputController::default();
        let mut s = running();

        c.apply(&InputEvent::key_down(Key::Space), &mut s);
        c.apply(&InputEvent::click(), &mut s);
        assert!(!s.is_frozen());

        c.apply(&InputEvent::key_down(Key::Space), &mut s);
        assert!(s.is_frozen());
    }

    #[test]
    fn other_keys_are_ignored() {
        let c = InputController::default();
        let mut s = running();

        assert!(!c.apply(&InputEvent::key_down(Key::Enter), &mut s));
        assert!(!s.is_frozen());

        s.set_frozen(true);
        assert!(!c.apply(&InputEvent::key_up(Key::Unknown(7)), &mut s));
        assert!(s.is_frozen());
    }

    #[test]
    fn hold_key_is_configurable() {
        let c = InputController::new(Key::Enter);
        let mut s = running();

        c.key_down(Key::Space, &mut s);
        assert!(!s.is_frozen());
        c.key_down(Key::Enter, &mut s);
        assert!(s.is_frozen());
    }
}
