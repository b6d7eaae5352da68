use super::config::MotionConfig;

/// Outcome of one [`AnimationState::step`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    /// Frozen; nothing changed.
    Frozen,
    /// Offset moved in the current direction.
    Advanced,
    /// Direction flipped, then the offset moved.
    Reflected,
}

/// Oscillating offset plus the frozen flag.
///
/// The boundary is checked before advancing, so the offset can exceed the
/// bound by at most one step before it turns around.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    offset: f32,
    velocity: f32,
    bound: f32,
    frozen: bool,
}

impl AnimationState {
    /// Starts at offset 0, moving in the positive direction, not frozen.
    pub fn new(step: f32, bound: f32) -> Self {
        Self {
            offset: 0.0,
            velocity: step.abs(),
            bound: bound.abs(),
            frozen: false,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.step, config.bound)
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn bound(&self) -> f32 {
        self.bound
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Advances one frame unless frozen.
    pub fn step(&mut self) -> Step {
        if self.frozen {
            return Step::Frozen;
        }

        let reflected = self.offset >= self.bound || self.offset <= -self.bound;
        if reflected {
            self.velocity = -self.velocity;
        }
        self.offset += self.velocity;

        if reflected { Step::Reflected } else { Step::Advanced }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::from_config(&MotionConfig::default())
    }
}
