use std::fmt;

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, BuiltIn, Handle, Module, Scalar, Type, TypeInner};

use super::error::PipelineError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }

    /// Visibility flag for resources used by this stage.
    pub fn visibility(self) -> wgpu::ShaderStages {
        match self {
            Stage::Vertex => wgpu::ShaderStages::VERTEX,
            Stage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }

    fn naga(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a value crossing a stage interface or bound as a uniform.
///
/// Only `f32` scalars and vectors are modelled; anything else is kept as an
/// opaque description so it still compares and prints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `f32` (1) or `vecN<f32>` (2..=4).
    Float(u32),
    Other(String),
}

impl ValueType {
    fn of(module: &Module, ty: Handle<Type>) -> Self {
        match &module.types[ty].inner {
            TypeInner::Scalar(s) if *s == Scalar::F32 => ValueType::Float(1),
            TypeInner::Vector { size, scalar } if *scalar == Scalar::F32 => {
                ValueType::Float(*size as u32)
            }
            other => ValueType::Other(format!("{other:?}")),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Float(1) => f.write_str("f32"),
            ValueType::Float(n) => write!(f, "vec{n}<f32>"),
            ValueType::Other(s) => f.write_str(s),
        }
    }
}

/// A location-bound input or output of an entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceVar {
    pub name: String,
    pub location: u32,
    pub ty: ValueType,
}

/// A `var<uniform>` declared by a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformVar {
    pub name: String,
    pub group: u32,
    pub binding: u32,
    pub ty: ValueType,
}

/// A validated WGSL module plus the reflected interface of its entry point.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: Stage,
    source: String,
    entry_point: String,
    inputs: Vec<InterfaceVar>,
    outputs: Vec<InterfaceVar>,
    writes_position: bool,
    uniforms: Vec<UniformVar>,
}

impl CompiledStage {
    /// Parses and validates `source`, then reflects the first entry point of `stage`.
    ///
    /// The error carries the compiler diagnostic rendered against `source`.
    pub fn compile(stage: Stage, source: &str) -> Result<Self, PipelineError> {
        let fail = |diagnostic: String| PipelineError::ShaderCompile { stage, diagnostic };

        let module = wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .map_err(|e| fail(e.emit_to_string(source)))?;

        let mut entries = module.entry_points.iter().filter(|ep| ep.stage == stage.naga());
        let entry = entries
            .next()
            .ok_or_else(|| fail(format!("no @{stage} entry point in module")))?;
        if entries.next().is_some() {
            log::warn!("{stage} module declares several entry points; using `{}`", entry.name);
        }

        let mut inputs = Interface::default();
        for arg in &entry.function.arguments {
            inputs.collect(&module, arg.name.as_deref(), arg.ty, arg.binding.as_ref());
        }

        let mut outputs = Interface::default();
        if let Some(result) = &entry.function.result {
            outputs.collect(&module, None, result.ty, result.binding.as_ref());
        }

        let uniforms = module
            .global_variables
            .iter()
            .filter(|(_, var)| var.space == AddressSpace::Uniform)
            .filter_map(|(_, var)| {
                let rb = var.binding.as_ref()?;
                Some(UniformVar {
                    name: var.name.clone().unwrap_or_default(),
                    group: rb.group,
                    binding: rb.binding,
                    ty: ValueType::of(&module, var.ty),
                })
            })
            .collect();

        log::debug!(
            "compiled {stage} stage `{}`: {} inputs, {} outputs",
            entry.name,
            inputs.vars.len(),
            outputs.vars.len()
        );

        Ok(Self {
            stage,
            source: source.to_string(),
            entry_point: entry.name.clone(),
            inputs: inputs.into_sorted(),
            writes_position: outputs.position,
            outputs: outputs.into_sorted(),
            uniforms,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The validated WGSL source.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Location-bound entry point inputs, ordered by location.
    pub fn inputs(&self) -> &[InterfaceVar] {
        &self.inputs
    }

    /// Location-bound entry point outputs, ordered by location.
    pub fn outputs(&self) -> &[InterfaceVar] {
        &self.outputs
    }

    /// Whether the entry point writes `@builtin(position)`.
    pub fn writes_position(&self) -> bool {
        self.writes_position
    }

    pub fn uniforms(&self) -> &[UniformVar] {
        &self.uniforms
    }
}

#[derive(Default)]
struct Interface {
    vars: Vec<InterfaceVar>,
    position: bool,
}

impl Interface {
    /// Records a binding; unbound struct values are flattened member by member.
    fn collect(
        &mut self,
        module: &Module,
        name: Option<&str>,
        ty: Handle<Type>,
        binding: Option<&Binding>,
    ) {
        match binding {
            Some(Binding::Location { location, .. }) => self.vars.push(InterfaceVar {
                name: name.unwrap_or_default().to_string(),
                location: *location,
                ty: ValueType::of(module, ty),
            }),
            Some(Binding::BuiltIn(BuiltIn::Position { .. })) => self.position = true,
            Some(Binding::BuiltIn(_)) => {}
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    for member in members {
                        self.collect(module, member.name.as_deref(), member.ty, member.binding.as_ref());
                    }
                }
            }
        }
    }

    fn into_sorted(mut self) -> Vec<InterfaceVar> {
        self.vars.sort_by_key(|v| v.location);
        self.vars
    }
}
