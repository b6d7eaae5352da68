//! Drawing surface.
//!
//! [`Surface`] is the small set of per-frame operations the render loop issues.
//! Two implementations exist:
//! - [`PassSurface`] records them into a wgpu render pass for the acquired frame
//! - [`RecordingSurface`] keeps them as a command list (headless hosts, tests)

mod ctx;
mod pass;
mod surface;

pub use ctx::{RenderCtx, RenderTarget};
pub use pass::PassSurface;
pub use surface::{RecordingSurface, Surface, SurfaceCommand};
