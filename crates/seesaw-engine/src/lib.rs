//! Seesaw engine crate.
//!
//! A small wgpu/winit host plus the pieces of one animated scene: a four-vertex
//! quad whose position oscillates along the diagonal and can be frozen by input.

pub mod binding;
pub mod core;
pub mod device;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod paint;
pub mod quad;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;

pub mod logging;
