/// Vertex stage: passes the color through and shifts the position by `uChange`
/// along both axes.
pub const VERTEX_SHADER: &str = r#"
@group(0) @binding(0) var<uniform> uChange: f32;

struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) vColor: vec3<f32>,
};

@vertex
fn vs_main(@location(0) aPosition: vec2<f32>, @location(1) aColor: vec3<f32>) -> VertexOut {
    var out: VertexOut;
    out.position = vec4<f32>(aPosition + vec2<f32>(uChange, uChange), 0.0, 1.0);
    out.vColor = aColor;
    return out;
}
"#;

/// Fragment stage: opaque interpolated color.
pub const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main(@location(0) vColor: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(vColor, 1.0);
}
"#;
