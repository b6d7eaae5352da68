use crate::input::Key;
use crate::paint::Color;

/// Parameters of the oscillation and its controls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionConfig {
    /// Offset change per running frame. Only its sign ever flips.
    pub step: f32,
    /// Reflection threshold; the offset reverses once `|offset| >= bound`.
    pub bound: f32,
    /// Key that freezes the animation while held.
    pub hold_key: Key,
    pub clear_color: Color,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step: 1.0 / 600.0,
            bound: 0.5,
            hold_key: Key::Space,
            clear_color: Color::rgba(0.13, 0.13, 0.13, 1.0),
        }
    }
}
