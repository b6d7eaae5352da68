use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::binding::VertexLayout;

/// Static vertex storage plus the triangle-list expansion of its fan.
///
/// Contents are written once at creation; the buffers carry no `COPY_DST`
/// usage and are never rewritten.
pub struct GeometryBuffer {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    /// Uploads interleaved vertex floats laid out according to `layout`.
    ///
    /// The float count is not validated; a length that is not a whole number
    /// of records leaves the trailing floats unreachable.
    pub fn upload(device: &wgpu::Device, vertices: &[f32], layout: &VertexLayout) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let vertex_count = layout.vertex_count(bytes.len() as u64);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("seesaw geometry vbo"),
            contents: bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("seesaw geometry fan ibo"),
            contents: bytemuck::cast_slice(&fan_indices(vertex_count)),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("uploaded {vertex_count} vertices ({} bytes)", bytes.len());

        Self {
            vertices: vertex_buffer,
            indices: index_buffer,
            vertex_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Makes the vertex and fan index buffers current on `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
    }

    /// Index range and base vertex that draw a fan of `count` vertices from `first`.
    pub fn fan_range(&self, first: u32, count: u32) -> Option<(Range<u32>, i32)> {
        fan_draw(self.vertex_count, first, count)
    }
}

/// Expands a triangle fan over `count` vertices into triangle-list indices.
///
/// Triangle `i` is `(0, i, i + 1)`; fewer than three vertices produce no triangles.
pub fn fan_indices(count: u32) -> Vec<u16> {
    (1..count.saturating_sub(1))
        .flat_map(|i| [0, i as u16, (i + 1) as u16])
        .collect()
}

/// Clamps a fan request to the uploaded vertices.
fn fan_draw(vertex_count: u32, first: u32, count: u32) -> Option<(Range<u32>, i32)> {
    let available = vertex_count.saturating_sub(first);
    let count = count.min(available);
    if count < 3 {
        return None;
    }
    Some((0..(count - 2) * 3, first as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_fan_is_two_triangles() {
        assert_eq!(fan_indices(4), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn degenerate_fans_have_no_indices() {
        assert!(fan_indices(0).is_empty());
        assert!(fan_indices(2).is_empty());
        assert_eq!(fan_indices(3), vec![0, 1, 2]);
    }

    // ── fan_draw ──────────────────────────────────────────────────────────

    #[test]
    fn full_fan_draws_all_indices() {
        assert_eq!(fan_draw(4, 0, 4), Some((0..6, 0)));
    }

    #[test]
    fn fan_request_is_clamped_to_uploaded_vertices() {
        assert_eq!(fan_draw(4, 0, 10), Some((0..6, 0)));
        assert_eq!(fan_draw(4, 1, 4), Some((0..3, 1)));
        assert_eq!(fan_draw(4, 2, 4), None);
    }
}
