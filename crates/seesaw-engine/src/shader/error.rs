use super::stage::{Stage, ValueType};

/// Failures while building a program or binding it to vertex data.
///
/// Every variant is fatal to pipeline construction; nothing is drawn with a
/// partially built program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} shader failed to compile:\n{diagnostic}")]
    ShaderCompile { stage: Stage, diagnostic: String },

    #[error("program failed to link: {diagnostic}")]
    ProgramLink { diagnostic: String },

    #[error("attribute `{name}` is not declared by the vertex stage")]
    AttributeNotFound { name: String },

    #[error("uniform `{name}` is not declared by the program")]
    UniformNotFound { name: String },

    #[error("attribute `{name}` is declared as {declared} but the layout supplies {requested} float(s)")]
    AttributeFormat {
        name: String,
        declared: ValueType,
        requested: u32,
    },

    #[error("vertex input `{name}` has no entry in the vertex layout")]
    AttributeUnbound { name: String },

    #[error("uniform `{name}` has type {ty}; only f32 scalars can be written")]
    UnsupportedUniform { name: String, ty: ValueType },
}

impl PipelineError {
    /// Stage at fault for compile errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::ShaderCompile { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
