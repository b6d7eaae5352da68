use crate::paint::Color;
use crate::shader::UniformLocation;

/// Per-frame drawing operations.
///
/// Setup (buffers, programs, layouts) happens before the loop starts; a
/// surface only ever sees operations against already-validated resources.
pub trait Surface {
    /// Writes a scalar uniform of the active program.
    fn set_uniform(&mut self, location: UniformLocation, value: f32);

    /// Clears the color target.
    fn clear(&mut self, color: Color);

    /// Draws `count` vertices starting at `first` as a triangle fan.
    fn draw_fan(&mut self, first: u32, count: u32);
}

/// One recorded [`Surface`] operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetUniform { location: UniformLocation, value: f32 },
    Clear(Color),
    DrawFan { first: u32, count: u32 },
}

/// Surface that stores operations instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Returns and clears the recorded commands.
    pub fn take(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Most recent value written to `location`, if any.
    pub fn last_uniform(&self, location: UniformLocation) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            SurfaceCommand::SetUniform { location: l, value } if *l == location => Some(*value),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn set_uniform(&mut self, location: UniformLocation, value: f32) {
        self.commands.push(SurfaceCommand::SetUniform { location, value });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(SurfaceCommand::Clear(color));
    }

    fn draw_fan(&mut self, first: u32, count: u32) {
        self.commands.push(SurfaceCommand::DrawFan { first, count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOC: UniformLocation = UniformLocation { group: 0, binding: 0 };

    #[test]
    fn records_in_call_order() {
        let mut s = RecordingSurface::new();
        s.set_uniform(LOC, 0.25);
        s.clear(Color::rgb(0.0, 0.0, 0.0));
        s.draw_fan(0, 4);

        assert_eq!(
            s.commands(),
            &[
                SurfaceCommand::SetUniform { location: LOC, value: 0.25 },
                SurfaceCommand::Clear(Color::rgb(0.0, 0.0, 0.0)),
                SurfaceCommand::DrawFan { first: 0, count: 4 },
            ]
        );
    }

    #[test]
    fn last_uniform_tracks_latest_write() {
        let mut s = RecordingSurface::new();
        assert_eq!(s.last_uniform(LOC), None);

        s.set_uniform(LOC, 0.1);
        s.set_uniform(LOC, 0.2);
        assert_eq!(s.last_uniform(LOC), Some(0.2));

        s.take();
        assert!(s.commands().is_empty());
    }
}
