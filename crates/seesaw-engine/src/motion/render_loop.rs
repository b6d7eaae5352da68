use crate::input::{InputController, InputEvent};
use crate::paint::Color;
use crate::render::Surface;
use crate::shader::UniformLocation;

use super::config::MotionConfig;
use super::state::{AnimationState, Step};

/// Host hook that arranges for the next frame to be driven.
pub trait FrameScheduler {
    fn schedule_next(&mut self);
}

/// Per-frame driver owning the animation state.
///
/// Input handlers reach the state only through [`handle_input`](Self::handle_input),
/// so the flag has one owner and no shared mutability.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    animation: AnimationState,
    input: InputController,
    offset_uniform: UniformLocation,
    clear_color: Color,
    vertex_count: u32,
    frames: u64,
}

impl RenderLoop {
    pub fn new(config: &MotionConfig, offset_uniform: UniformLocation, vertex_count: u32) -> Self {
        Self {
            animation: AnimationState::from_config(config),
            input: InputController::new(config.hold_key),
            offset_uniform,
            clear_color: config.clear_color,
            vertex_count,
            frames: 0,
        }
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Number of frames driven so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Applies an input event to the frozen flag.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let was = self.animation.is_frozen();
        let consumed = self.input.apply(event, &mut self.animation);
        let now = self.animation.is_frozen();

        if was != now {
            log::debug!("animation {}", if now { "frozen" } else { "resumed" });
        }
        consumed
    }

    /// Drives one frame: advance, upload, clear, draw, reschedule.
    ///
    /// A frozen frame skips the advance and the upload; the uniform keeps the
    /// last value written.
    pub fn drive_frame<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        match self.animation.step() {
            Step::Frozen => {}
            step => {
                if step == Step::Reflected {
                    log::debug!(
                        "reflected at {:.4}, velocity {:+.5}",
                        self.animation.offset(),
                        self.animation.velocity()
                    );
                }
                surface.set_uniform(self.offset_uniform, self.animation.offset());
            }
        }

        surface.clear(self.clear_color);
        surface.draw_fan(0, self.vertex_count);
        self.frames += 1;

        scheduler.schedule_next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::{RecordingSurface, SurfaceCommand};

    const LOC: UniformLocation = UniformLocation { group: 0, binding: 0 };

    #[derive(Default)]
    struct CountingScheduler {
        scheduled: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn schedule_next(&mut self) {
            self.scheduled += 1;
        }
    }

    fn gray() -> Color {
        Color::rgba(0.13, 0.13, 0.13, 1.0)
    }

    #[test]
    fn running_frame_uploads_then_clears_and_draws() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 4);
        let mut surface = RecordingSurface::new();
        let mut sched = CountingScheduler::default();

        lp.drive_frame(&mut surface, &mut sched);

        assert_eq!(
            surface.commands(),
            &[
                SurfaceCommand::SetUniform { location: LOC, value: 1.0 / 600.0 },
                SurfaceCommand::Clear(gray()),
                SurfaceCommand::DrawFan { first: 0, count: 4 },
            ]
        );
        assert_eq!(sched.scheduled, 1);
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn frozen_frame_still_draws_and_reschedules() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 4);
        let mut surface = RecordingSurface::new();
        let mut sched = CountingScheduler::default();

        lp.drive_frame(&mut surface, &mut sched);
        let before = lp.animation().offset();
        surface.take();

        lp.handle_input(&InputEvent::click());
        lp.drive_frame(&mut surface, &mut sched);

        assert_eq!(lp.animation().offset(), before);
        assert_eq!(
            surface.commands(),
            &[
                SurfaceCommand::Clear(gray()),
                SurfaceCommand::DrawFan { first: 0, count: 4 },
            ]
        );
        assert_eq!(sched.scheduled, 2);
    }

    #[test]
    fn uploaded_value_tracks_offset() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 4);
        let mut surface = RecordingSurface::new();
        let mut sched = CountingScheduler::default();

        for _ in 0..450 {
            lp.drive_frame(&mut surface, &mut sched);
            assert_eq!(surface.last_uniform(LOC), Some(lp.animation().offset()));
        }
        assert_eq!(sched.scheduled, 450);
    }

    #[test]
    fn hold_key_pauses_across_frames() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 4);
        let mut surface = RecordingSurface::new();
        let mut sched = CountingScheduler::default();

        lp.drive_frame(&mut surface, &mut sched);
        assert!(lp.handle_input(&InputEvent::key_down(Key::Space)));
        let held = lp.animation().offset();

        for _ in 0..20 {
            lp.drive_frame(&mut surface, &mut sched);
        }
        assert_eq!(lp.animation().offset(), held);

        lp.handle_input(&InputEvent::key_up(Key::Space));
        lp.drive_frame(&mut surface, &mut sched);
        assert!(lp.animation().offset() > held);
    }

    #[test]
    fn draw_uses_configured_vertex_count() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 6);
        let mut surface = RecordingSurface::new();

        lp.drive_frame(&mut surface, &mut CountingScheduler::default());
        assert!(surface
            .commands()
            .contains(&SurfaceCommand::DrawFan { first: 0, count: 6 }));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut lp = RenderLoop::new(&MotionConfig::default(), LOC, 4);
        let mut surface = RecordingSurface::new();
        let mut sched = CountingScheduler::default();

        {
            let s: &mut dyn Surface = &mut surface;
            let f: &mut dyn FrameScheduler = &mut sched;
            lp.drive_frame(s, f);
        }
        assert_eq!(sched.scheduled, 1);
        assert_eq!(surface.commands().len(), 3);
    }
}
