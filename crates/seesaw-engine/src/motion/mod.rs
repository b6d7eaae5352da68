//! Oscillating offset and the per-frame driver.

mod config;
mod render_loop;
mod state;

pub use config::MotionConfig;
pub use render_loop::{FrameScheduler, RenderLoop};
pub use state::{AnimationState, Step};
