use glam::Vec2;

use crate::api::types::VisualHandle;
use crate::core::math::{normalize, DegenerateVectorError};

/// Below `deceleration² * STOP_FACTOR` (squared speed) a ball snaps to rest.
/// Slightly larger than one friction step so a ball never flips direction.
pub const STOP_FACTOR: f32 = 1.1;

/// A ball on the table.
///
/// Velocity is stored as displacement per frame, not per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    position: Vec2,
    velocity: Vec2,
    visual: VisualHandle,
}

impl Ball {
    /// Create a resting ball at `position`, drawn by `visual`.
    pub fn new(position: Vec2, visual: VisualHandle) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            visual,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Handle of the visual owned by the rendering side.
    pub fn visual(&self) -> VisualHandle {
        self.visual
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Where the ball ends up after one frame at its current velocity.
    ///
    /// `_dt` is accepted for symmetry with the frame loop; velocity already
    /// encodes the per-frame displacement at the fixed frame rate.
    pub fn next_position(&self, _dt: f32) -> Vec2 {
        self.position + self.velocity
    }

    /// Add an impulse of magnitude `power` along `direction`.
    ///
    /// A zero-length direction leaves the velocity untouched.
    pub fn strike(&mut self, direction: Vec2, power: f32) -> Result<(), DegenerateVectorError> {
        let dir = normalize(direction)?;
        self.velocity += dir * power;
        Ok(())
    }

    /// Slow the ball by `deceleration` along its direction of travel, or stop
    /// it once it is slow enough.
    pub fn apply_friction(&mut self, deceleration: f32) {
        if !self.is_moving() {
            return;
        }
        if self.velocity.length_squared() <= deceleration * deceleration * STOP_FACTOR {
            self.velocity = Vec2::ZERO;
            return;
        }
        if let Ok(dir) = normalize(self.velocity) {
            self.velocity -= dir * deceleration;
        }
    }
}
