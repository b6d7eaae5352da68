use crate::geometry::GeometryBuffer;
use crate::paint::Color;
use crate::shader::{GpuProgram, UniformLocation};

use super::ctx::{RenderCtx, RenderTarget};
use super::surface::Surface;

/// [`Surface`] backed by one wgpu render pass over the acquired frame.
///
/// Uniform writes are staged on the queue immediately; clear and draws are
/// collected and encoded by [`finish`](Self::finish).
pub struct PassSurface<'a> {
    queue: &'a wgpu::Queue,
    encoder: &'a mut wgpu::CommandEncoder,
    view: &'a wgpu::TextureView,
    program: &'a GpuProgram,
    geometry: &'a GeometryBuffer,

    clear: Option<Color>,
    draws: Vec<(u32, u32)>,
    warned_uniform: bool,
}

impl<'a> PassSurface<'a> {
    pub fn new(
        ctx: &'a RenderCtx<'_>,
        target: &'a mut RenderTarget<'_>,
        program: &'a GpuProgram,
        geometry: &'a GeometryBuffer,
    ) -> Self {
        Self {
            queue: ctx.queue,
            encoder: &mut *target.encoder,
            view: target.color_view,
            program,
            geometry,
            clear: None,
            draws: Vec::new(),
            warned_uniform: false,
        }
    }

    /// Encodes the collected clear and draws into the frame encoder.
    ///
    /// Without a clear the previous contents are loaded.
    pub fn finish(self) {
        if self.clear.is_none() && self.draws.is_empty() {
            return;
        }

        let load = match self.clear {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("seesaw frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.draws.is_empty() {
            return;
        }

        self.program.activate(&mut rpass);
        self.geometry.bind(&mut rpass);

        for &(first, count) in &self.draws {
            if let Some((indices, base_vertex)) = self.geometry.fan_range(first, count) {
                rpass.draw_indexed(indices, base_vertex, 0..1);
            }
        }
    }
}

impl Surface for PassSurface<'_> {
    fn set_uniform(&mut self, location: UniformLocation, value: f32) {
        if !self.program.write_uniform(self.queue, location, value) && !self.warned_uniform {
            log::warn!("no uniform at @group({}) @binding({})", location.group, location.binding);
            self.warned_uniform = true;
        }
    }

    fn clear(&mut self, color: Color) {
        // A later clear discards earlier draws, as on a real target.
        self.clear = Some(color);
        self.draws.clear();
    }

    fn draw_fan(&mut self, first: u32, count: u32) {
        self.draws.push((first, count));
    }
}
