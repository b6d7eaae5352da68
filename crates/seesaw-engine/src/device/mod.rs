//! GPU device and surface.
//!
//! [`Gpu`] owns the wgpu instance, adapter, device and queue, keeps the surface
//! configured for the window, and hands out one [`GpuFrame`] per redraw.

mod frame;
mod gpu;
mod init;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
