use crate::shader::{PipelineError, Program, ValueType};

use super::layout::VertexLayout;

/// A vertex layout whose attributes have been resolved against a linked program.
///
/// Produced by [`bind`]; consumed when the GPU pipeline is created.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundLayout {
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl BoundLayout {
    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    /// Per-vertex buffer layout for slot 0.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// Resolves every layout entry to the program's attribute location.
///
/// Fails when an entry names an attribute the vertex stage does not declare,
/// when the component count disagrees with the declaration, or when the vertex
/// stage declares an input the layout leaves unbound.
pub fn bind(program: &Program, layout: &VertexLayout) -> Result<BoundLayout, PipelineError> {
    let mut attributes = Vec::with_capacity(layout.attributes.len());

    for spec in &layout.attributes {
        let input = program
            .attribute(&spec.name)
            .ok_or_else(|| PipelineError::AttributeNotFound {
                name: spec.name.clone(),
            })?;

        let format_error = || PipelineError::AttributeFormat {
            name: spec.name.clone(),
            declared: input.ty.clone(),
            requested: spec.components,
        };

        if input.ty != ValueType::Float(spec.components) {
            return Err(format_error());
        }

        let format = float_format(spec.components).ok_or_else(format_error)?;

        attributes.push(wgpu::VertexAttribute {
            format,
            offset: spec.offset,
            shader_location: input.location,
        });
    }

    if let Some(unbound) = program
        .attributes()
        .iter()
        .find(|a| layout.attribute(&a.name).is_none())
    {
        return Err(PipelineError::AttributeUnbound {
            name: unbound.name.clone(),
        });
    }

    log::debug!(
        "bound {} vertex attributes (stride {} bytes)",
        attributes.len(),
        layout.stride
    );

    Ok(BoundLayout {
        stride: layout.stride,
        attributes,
    })
}

fn float_format(components: u32) -> Option<wgpu::VertexFormat> {
    match components {
        1 => Some(wgpu::VertexFormat::Float32),
        2 => Some(wgpu::VertexFormat::Float32x2),
        3 => Some(wgpu::VertexFormat::Float32x3),
        4 => Some(wgpu::VertexFormat::Float32x4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::AttributeSpec;
    use crate::quad::{FRAGMENT_SHADER, VERTEX_SHADER};

    fn quad_program() -> Program {
        Program::build(VERTEX_SHADER, FRAGMENT_SHADER).unwrap()
    }

    #[test]
    fn quad_layout_binds_to_declared_locations() {
        let program = quad_program();
        let bound = bind(&program, &VertexLayout::quad()).unwrap();

        assert_eq!(bound.stride(), 20);
        assert_eq!(
            bound.attributes(),
            &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: program.attribute_location("aPosition").unwrap(),
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 8,
                    shader_location: program.attribute_location("aColor").unwrap(),
                },
            ]
        );
    }

    #[test]
    fn rebinding_is_idempotent() {
        let program = quad_program();
        let layout = VertexLayout::quad();
        assert_eq!(bind(&program, &layout).unwrap(), bind(&program, &layout).unwrap());
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let program = quad_program();
        let mut layout = VertexLayout::quad();
        layout.attributes[1].name = "aColour".to_string();

        assert_eq!(
            bind(&program, &layout),
            Err(PipelineError::AttributeNotFound {
                name: "aColour".to_string()
            })
        );
    }

    #[test]
    fn component_mismatch_is_rejected() {
        let program = quad_program();
        let mut layout = VertexLayout::quad();
        layout.attributes[1] = AttributeSpec::new("aColor", 4, 8);

        assert!(matches!(
            bind(&program, &layout),
            Err(PipelineError::AttributeFormat { requested: 4, .. })
        ));
    }

    #[test]
    fn missing_layout_entry_is_rejected() {
        let program = quad_program();
        let mut layout = VertexLayout::quad();
        layout.attributes.truncate(1);

        assert_eq!(
            bind(&program, &layout),
            Err(PipelineError::AttributeUnbound {
                name: "aColor".to_string()
            })
        );
    }
}
