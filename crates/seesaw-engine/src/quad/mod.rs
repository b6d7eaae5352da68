//! The demo scene: one four-vertex quad sliding along the diagonal.

mod app;
mod shaders;

pub use app::{QuadApp, OFFSET_UNIFORM};
pub use shaders::{FRAGMENT_SHADER, VERTEX_SHADER};
