mod winit;

pub use self::winit::{map_key, map_mouse_button, translate_window_event};
