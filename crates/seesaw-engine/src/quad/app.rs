use crate::binding::{bind, BoundLayout, VertexLayout};
use crate::core::{App, AppControl, FrameCtx};
use crate::geometry::{flatten, GeometryBuffer, QUAD_VERTICES};
use crate::input::InputEvent;
use crate::motion::{MotionConfig, RenderLoop};
use crate::render::{PassSurface, RenderCtx};
use crate::shader::{GpuProgram, PipelineError, Program};

use super::shaders::{FRAGMENT_SHADER, VERTEX_SHADER};

/// Name of the offset uniform in the vertex stage.
pub const OFFSET_UNIFORM: &str = "uChange";

struct QuadResources {
    program: GpuProgram,
    geometry: GeometryBuffer,
}

impl QuadResources {
    fn create(
        ctx: &RenderCtx<'_>,
        program: &Program,
        layout: &BoundLayout,
        vertex_layout: &VertexLayout,
    ) -> Result<Self, PipelineError> {
        let program = GpuProgram::new(ctx, program, layout)?;
        let geometry = GeometryBuffer::upload(ctx.device, flatten(&QUAD_VERTICES), vertex_layout);
        Ok(Self { program, geometry })
    }
}

/// The oscillating quad.
///
/// The program is compiled, linked and bound on construction; GPU objects are
/// created on the first frame, once a device exists. Any failure on either
/// path ends the app before anything is drawn.
pub struct QuadApp {
    program: Program,
    vertex_layout: VertexLayout,
    layout: BoundLayout,
    render_loop: RenderLoop,
    resources: Option<QuadResources>,
}

impl QuadApp {
    pub fn new(config: MotionConfig) -> Result<Self, PipelineError> {
        Self::with_shaders(config, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Builds the app around custom stage sources. They must consume the quad
    /// layout and declare `uChange`.
    pub fn with_shaders(
        config: MotionConfig,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, PipelineError> {
        let program = Program::build(vertex, fragment)?;
        let vertex_layout = VertexLayout::quad();
        let layout = bind(&program, &vertex_layout)?;
        let offset = program.require_uniform(OFFSET_UNIFORM)?;

        let floats = flatten(&QUAD_VERTICES);
        let vertex_count = vertex_layout.vertex_count(std::mem::size_of_val(floats) as u64);

        log::info!(
            "quad ready: {vertex_count} vertices, {OFFSET_UNIFORM} at @group({}) @binding({})",
            offset.group,
            offset.binding
        );

        Ok(Self {
            render_loop: RenderLoop::new(&config, offset, vertex_count),
            program,
            vertex_layout,
            layout,
            resources: None,
        })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }
}

impl App for QuadApp {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        self.render_loop.handle_input(event);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.resources.is_none() {
            let rctx = ctx.render_ctx();
            match QuadResources::create(&rctx, &self.program, &self.layout, &self.vertex_layout) {
                Ok(res) => self.resources = Some(res),
                Err(e) => {
                    log::error!("failed to create GPU pipeline: {e}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(res) = &self.resources else {
            return AppControl::Exit;
        };

        let render_loop = &mut self.render_loop;
        ctx.render(|rctx, target, scheduler| {
            let mut surface = PassSurface::new(rctx, target, &res.program, &res.geometry);
            render_loop.drive_frame(&mut surface, scheduler);
            surface.finish();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::shader::{Stage, UniformLocation};

    #[test]
    fn builds_with_default_shaders() {
        let app = QuadApp::new(MotionConfig::default()).unwrap();

        assert_eq!(
            app.program().uniform_location(OFFSET_UNIFORM),
            Some(UniformLocation { group: 0, binding: 0 })
        );
        assert_eq!(app.render_loop().animation().offset(), 0.0);
        assert!(app.resources.is_none());
    }

    #[test]
    fn malformed_fragment_yields_no_app() {
        let broken = "@fragment fn fs_main() -> @location(0) vec4<f32> { return ; }";
        let err = QuadApp::with_shaders(MotionConfig::default(), VERTEX_SHADER, broken)
            .err()
            .unwrap();

        assert!(matches!(err, PipelineError::ShaderCompile { stage: Stage::Fragment, .. }));
    }

    #[test]
    fn missing_offset_uniform_is_fatal() {
        let vs = r#"
struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) vColor: vec3<f32>,
};

@vertex
fn vs_main(@location(0) aPosition: vec2<f32>, @location(1) aColor: vec3<f32>) -> VertexOut {
    var out: VertexOut;
    out.position = vec4<f32>(aPosition, 0.0, 1.0);
    out.vColor = aColor;
    return out;
}
"#;
        let err = QuadApp::with_shaders(MotionConfig::default(), vs, FRAGMENT_SHADER)
            .err()
            .unwrap();
        assert_eq!(err, PipelineError::UniformNotFound { name: OFFSET_UNIFORM.to_string() });
    }

    #[test]
    fn input_reaches_the_render_loop() {
        let mut app = QuadApp::new(MotionConfig::default()).unwrap();

        assert_eq!(app.on_input(&InputEvent::key_down(Key::Space)), AppControl::Continue);
        assert!(app.render_loop().animation().is_frozen());

        app.on_input(&InputEvent::key_up(Key::Space));
        app.on_input(&InputEvent::click());
        assert!(app.render_loop().animation().is_frozen());
    }
}
