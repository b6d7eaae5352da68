use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::binding::BoundLayout;
use crate::render::RenderCtx;

use super::error::PipelineError;
use super::program::{Program, ProgramUniform, UniformLocation};
use super::stage::ValueType;

/// Backing storage for one `f32` uniform, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScalarUniform {
    value: f32,
    _pad: [f32; 3],
}

/// A [`Program`] realized on the device: both stage modules, the linked render
/// pipeline, and one uniform buffer per declared uniform.
pub struct GpuProgram {
    vertex_module: wgpu::ShaderModule,
    fragment_module: wgpu::ShaderModule,
    pipeline: wgpu::RenderPipeline,

    /// Indexed by bind group number; groups without uniforms are empty.
    bind_groups: Vec<wgpu::BindGroup>,
    uniform_buffers: Vec<(UniformLocation, wgpu::Buffer)>,
}

impl GpuProgram {
    /// Creates the stage modules and a triangle-list pipeline reading `layout`
    /// from vertex slot 0.
    pub fn new(
        ctx: &RenderCtx<'_>,
        program: &Program,
        layout: &BoundLayout,
    ) -> Result<Self, PipelineError> {
        if let Some(u) = program
            .uniforms()
            .iter()
            .find(|u| u.ty != ValueType::Float(1))
        {
            return Err(PipelineError::UnsupportedUniform {
                name: u.name.clone(),
                ty: u.ty.clone(),
            });
        }

        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("seesaw vertex stage"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source().into()),
        });
        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("seesaw fragment stage"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source().into()),
        });

        let group_count = program
            .uniforms()
            .iter()
            .map(|u| u.location.group + 1)
            .max()
            .unwrap_or(0);

        let mut bind_group_layouts = Vec::with_capacity(group_count as usize);
        let mut bind_groups = Vec::with_capacity(group_count as usize);
        let mut uniform_buffers = Vec::with_capacity(program.uniforms().len());

        for group in 0..group_count {
            let members: Vec<&ProgramUniform> = program
                .uniforms()
                .iter()
                .filter(|u| u.location.group == group)
                .collect();

            let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = members
                .iter()
                .map(|u| wgpu::BindGroupLayoutEntry {
                    binding: u.location.binding,
                    visibility: u.visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<f32>() as u64),
                    },
                    count: None,
                })
                .collect();

            let bgl = ctx
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("seesaw uniform bgl"),
                    entries: &layout_entries,
                });

            let buffers: Vec<(UniformLocation, wgpu::Buffer)> = members
                .iter()
                .map(|u| {
                    let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(u.name.as_str()),
                        contents: bytemuck::bytes_of(&ScalarUniform::zeroed()),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                    (u.location, buffer)
                })
                .collect();

            let entries: Vec<wgpu::BindGroupEntry> = buffers
                .iter()
                .map(|(location, buffer)| wgpu::BindGroupEntry {
                    binding: location.binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("seesaw uniform bind group"),
                layout: &bgl,
                entries: &entries,
            });

            bind_group_layouts.push(bgl);
            bind_groups.push(bind_group);
            uniform_buffers.extend(buffers);
        }

        let layout_refs: Vec<&wgpu::BindGroupLayout> = bind_group_layouts.iter().collect();
        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("seesaw pipeline layout"),
                bind_group_layouts: &layout_refs,
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("seesaw pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[layout.buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Fans are expanded to lists by the geometry's index buffer.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "GPU program ready ({} uniform(s), target {:?})",
            uniform_buffers.len(),
            ctx.surface_format
        );

        Ok(Self {
            vertex_module,
            fragment_module,
            pipeline,
            bind_groups,
            uniform_buffers,
        })
    }

    pub fn vertex_module(&self) -> &wgpu::ShaderModule {
        &self.vertex_module
    }

    pub fn fragment_module(&self) -> &wgpu::ShaderModule {
        &self.fragment_module
    }

    /// Makes this program current on `pass` for subsequent draws.
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        for (group, bind_group) in self.bind_groups.iter().enumerate() {
            pass.set_bind_group(group as u32, bind_group, &[]);
        }
    }

    /// Stages `value` into the uniform at `location`.
    ///
    /// Returns `false` when the program declares no uniform there.
    pub fn write_uniform(&self, queue: &wgpu::Queue, location: UniformLocation, value: f32) -> bool {
        let Some((_, buffer)) = self.uniform_buffers.iter().find(|(l, _)| *l == location) else {
            return false;
        };
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(&value));
        true
    }
}
