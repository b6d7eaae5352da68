use super::error::PipelineError;
use super::stage::{CompiledStage, InterfaceVar, Stage, ValueType};

/// Bind point of a uniform: `@group(group) @binding(binding)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
}

/// A uniform after linking, with the stages that declare it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramUniform {
    pub name: String,
    pub location: UniformLocation,
    pub ty: ValueType,
    pub visibility: wgpu::ShaderStages,
}

/// A linked vertex + fragment pair.
///
/// Only obtainable through [`Program::build`], so holding one means both
/// stages compiled and their interfaces agree. Locations are stable for the
/// lifetime of the value.
#[derive(Debug, Clone)]
pub struct Program {
    vertex: CompiledStage,
    fragment: CompiledStage,
    uniforms: Vec<ProgramUniform>,
}

impl Program {
    /// Compiles both stages, then links them.
    ///
    /// Both stages are always compiled. When both fail, the fragment failure is
    /// logged and the vertex failure returned.
    pub fn build(vertex_source: &str, fragment_source: &str) -> Result<Self, PipelineError> {
        let vertex = CompiledStage::compile(Stage::Vertex, vertex_source);
        let fragment = CompiledStage::compile(Stage::Fragment, fragment_source);

        match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => Self::link(vertex, fragment),
            (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
            (Err(vertex_err), Err(fragment_err)) => {
                log::error!("{fragment_err}");
                Err(vertex_err)
            }
        }
    }

    fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<Self, PipelineError> {
        let fail = |diagnostic: String| PipelineError::ProgramLink { diagnostic };

        if !vertex.writes_position() {
            return Err(fail(format!(
                "vertex entry point `{}` does not write @builtin(position)",
                vertex.entry_point()
            )));
        }

        for input in fragment.inputs() {
            let Some(output) = vertex.outputs().iter().find(|o| o.location == input.location)
            else {
                return Err(fail(format!(
                    "fragment input `{}` at location {} is not written by the vertex stage",
                    input.name, input.location
                )));
            };
            if output.ty != input.ty {
                return Err(fail(format!(
                    "location {}: vertex output `{}` is {} but fragment input `{}` is {}",
                    input.location, output.name, output.ty, input.name, input.ty
                )));
            }
        }

        let mut uniforms: Vec<ProgramUniform> = Vec::new();
        for (stage, var) in [&vertex, &fragment]
            .into_iter()
            .flat_map(|s| s.uniforms().iter().map(move |u| (s.stage(), u)))
        {
            let location = UniformLocation {
                group: var.group,
                binding: var.binding,
            };

            match uniforms.iter_mut().find(|u| u.location == location) {
                Some(existing) if existing.name == var.name && existing.ty == var.ty => {
                    existing.visibility |= stage.visibility();
                }
                Some(existing) => {
                    return Err(fail(format!(
                        "@group({}) @binding({}) is `{}: {}` in one stage and `{}: {}` in the {stage} stage",
                        location.group, location.binding, existing.name, existing.ty, var.name, var.ty
                    )));
                }
                None => {
                    if uniforms.iter().any(|u| u.name == var.name) {
                        return Err(fail(format!(
                            "uniform `{}` is bound at different locations across stages",
                            var.name
                        )));
                    }
                    uniforms.push(ProgramUniform {
                        name: var.name.clone(),
                        location,
                        ty: var.ty.clone(),
                        visibility: stage.visibility(),
                    });
                }
            }
        }
        uniforms.sort_by_key(|u| u.location);

        log::debug!(
            "linked program: {} attributes, {} varyings, {} uniforms",
            vertex.inputs().len(),
            fragment.inputs().len(),
            uniforms.len()
        );

        Ok(Self {
            vertex,
            fragment,
            uniforms,
        })
    }

    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    /// Vertex-stage inputs, ordered by location.
    pub fn attributes(&self) -> &[InterfaceVar] {
        self.vertex.inputs()
    }

    pub fn attribute(&self, name: &str) -> Option<&InterfaceVar> {
        self.attributes().iter().find(|a| a.name == name)
    }

    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attribute(name).map(|a| a.location)
    }

    pub fn uniforms(&self) -> &[ProgramUniform] {
        &self.uniforms
    }

    pub fn uniform(&self, name: &str) -> Option<&ProgramUniform> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.uniform(name).map(|u| u.location)
    }

    /// Like [`uniform_location`](Self::uniform_location), failing with
    /// [`PipelineError::UniformNotFound`].
    pub fn require_uniform(&self, name: &str) -> Result<UniformLocation, PipelineError> {
        self.uniform_location(name)
            .ok_or_else(|| PipelineError::UniformNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::{FRAGMENT_SHADER, VERTEX_SHADER};

    const PLAIN_FS: &str = r"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
";

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn quad_program_links() {
        let program = Program::build(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();

        assert_eq!(program.attribute_location("aPosition"), Some(0));
        assert_eq!(program.attribute_location("aColor"), Some(1));
        assert_eq!(program.attribute_location("aNormal"), None);

        let change = program.uniform("uChange").unwrap();
        assert_eq!(change.location, UniformLocation { group: 0, binding: 0 });
        assert_eq!(change.ty, ValueType::Float(1));
        assert_eq!(change.visibility, wgpu::ShaderStages::VERTEX);
    }

    #[test]
    fn malformed_fragment_source_fails_at_fragment_stage() {
        let broken = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vColor }";
        let err = Program::build(VERTEX_SHADER, broken).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::ShaderCompile { stage: Stage::Fragment, .. }
        ));
    }

    #[test]
    fn vertex_failure_wins_when_both_stages_fail() {
        let err = Program::build("fn (", "fn (").unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Vertex));
    }

    #[test]
    fn missing_uniform_is_reported_by_name() {
        let program = Program::build(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
        assert_eq!(
            program.require_uniform("uScale"),
            Err(PipelineError::UniformNotFound {
                name: "uScale".to_string()
            })
        );
    }

    #[test]
    fn fragment_without_inputs_links() {
        assert!(Program::build(VERTEX_SHADER, PLAIN_FS).is_ok());
    }

    // ── link failures ─────────────────────────────────────────────────────

    #[test]
    fn unmatched_varying_is_a_link_error() {
        let fs = r"
@fragment
fn fs_main(@location(3) vTint: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(vTint, 1.0);
}
";
        let err = Program::build(VERTEX_SHADER, fs).unwrap_err();
        let PipelineError::ProgramLink { diagnostic } = err else {
            panic!("expected a link error");
        };
        assert!(diagnostic.contains("vTint"));
    }

    #[test]
    fn varying_type_mismatch_is_a_link_error() {
        let fs = r"
@fragment
fn fs_main(@location(0) vColor: vec4<f32>) -> @location(0) vec4<f32> {
    return vColor;
}
";
        let err = Program::build(VERTEX_SHADER, fs).unwrap_err();
        assert!(matches!(err, PipelineError::ProgramLink { .. }));
    }

    #[test]
    fn vertex_without_position_is_rejected() {
        let vs = r"
@vertex
fn vs_main(@location(0) aPosition: vec2<f32>) -> @location(0) vec3<f32> {
    return vec3<f32>(aPosition, 0.0);
}
";
        assert!(Program::build(vs, PLAIN_FS).is_err());
    }

    #[test]
    fn conflicting_uniform_binding_is_a_link_error() {
        let fs = r"
@group(0) @binding(0) var<uniform> uTint: vec4<f32>;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return uTint;
}
";
        let err = Program::build(VERTEX_SHADER, fs).unwrap_err();
        assert!(matches!(err, PipelineError::ProgramLink { .. }));
    }

    #[test]
    fn shared_uniform_is_visible_to_both_stages() {
        let fs = r"
@group(0) @binding(0) var<uniform> uChange: f32;

@fragment
fn fs_main(@location(0) vColor: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(vColor * (1.0 - uChange), 1.0);
}
";
        let program = Program::build(VERTEX_SHADER, fs).unwrap();
        assert_eq!(program.uniforms().len(), 1);
        assert_eq!(
            program.uniforms()[0].visibility,
            wgpu::ShaderStages::VERTEX_FRAGMENT
        );
    }
}
