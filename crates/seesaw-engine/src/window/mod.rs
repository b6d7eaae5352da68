//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the GPU
//! layer. Redraws are demand-driven: a frame is drawn only when the previous
//! one scheduled it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
