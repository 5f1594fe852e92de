/// Upper bound on simulation steps run for one host frame.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed-rate frame clock.
/// Turns variable host frame times into a whole number of simulation steps,
/// since ball velocities are stored per frame at the configured rate.
pub struct FrameClock {
    /// Seconds per simulation step.
    dt: f32,
    /// Host time not yet consumed by a step.
    accumulator: f32,
}

impl FrameClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Clock ticking `fps` times per second.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }

    /// Feed elapsed host time. Returns how many steps to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // A long stall (tab in background) must not turn into a burst of steps
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a step carried over to the next frame (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
