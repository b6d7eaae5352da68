//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! [`translate_window_event`] is the only bridge from platform events.

mod controller;
mod platform;
mod types;

pub use controller::InputController;
pub use platform::{map_key, map_mouse_button, translate_window_event};
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
};
