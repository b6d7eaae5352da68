use bytemuck::{Pod, Zeroable};

/// Interleaved quad vertex: clip-space position followed by RGB color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// The quad, ordered as a triangle fan: A (top-left), B, C, D.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-0.5, 0.5], color: RED },
    Vertex { position: [0.5, 0.5], color: GREEN },
    Vertex { position: [0.5, -0.5], color: BLUE },
    Vertex { position: [-0.5, -0.5], color: BLUE },
];

/// Views vertices as the flat `f32` sequence that gets uploaded.
#[inline]
pub fn flatten(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}
