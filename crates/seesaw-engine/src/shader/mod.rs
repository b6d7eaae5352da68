//! Shader pipeline.
//!
//! Stages are WGSL compiled and reflected on the CPU with naga, so compile and
//! link failures surface before any GPU object exists:
//! - [`CompiledStage`] parses, validates and reflects one stage
//! - [`Program`] links a vertex/fragment pair and resolves locations by name
//! - [`GpuProgram`] realizes a linked program as a wgpu render pipeline

mod error;
mod gpu;
mod program;
mod stage;

pub use error::PipelineError;
pub use gpu::GpuProgram;
pub use program::{Program, ProgramUniform, UniformLocation};
pub use stage::{CompiledStage, InterfaceVar, Stage, UniformVar, ValueType};
