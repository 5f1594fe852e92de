//! Cushion and ball-ball collision response.
//!
//! Both are pure functions over ball state: they rewrite velocities (and, for
//! cushions, positions) in place and know nothing about slots or visuals.

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::core::ball::Ball;
use crate::core::math::{project_onto, DegenerateVectorError};

/// Playing area of a table centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl TableBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_width: 0.5 * width,
            half_height: 0.5 * height,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.table.width, config.table.height)
    }

    /// Whether a ball of `radius` centered at `p` pokes past any edge.
    pub fn crosses(&self, p: Vec2, radius: f32) -> bool {
        p.x + radius > self.half_width
            || p.x - radius < -self.half_width
            || p.y + radius > self.half_height
            || p.y - radius < -self.half_height
    }
}

/// Bounce a ball off whichever cushions it has crossed.
///
/// Edges are tested one after another (right, left, top, bottom) against the
/// ball's current position, so a ball in a corner reflects on both axes.
/// Penetration `d` past an edge is mirrored back as `d` inside it and the
/// velocity component normal to that edge flips sign. No energy is lost.
pub fn ricochet(ball: &mut Ball, bounds: &TableBounds, radius: f32) {
    let mut pos = ball.position();
    let mut vel = ball.velocity();

    let right = pos.x + radius - bounds.half_width;
    if right > 0.0 {
        pos.x -= 2.0 * right;
        vel.x = -vel.x;
    }

    let left = -bounds.half_width - (pos.x - radius);
    if left > 0.0 {
        pos.x += 2.0 * left;
        vel.x = -vel.x;
    }

    let top = pos.y + radius - bounds.half_height;
    if top > 0.0 {
        pos.y -= 2.0 * top;
        vel.y = -vel.y;
    }

    let bottom = -bounds.half_height - (pos.y - radius);
    if bottom > 0.0 {
        pos.y += 2.0 * bottom;
        vel.y = -vel.y;
    }

    ball.set_position(pos);
    ball.set_velocity(vel);
}

/// Exchange the velocity components of two balls along their line of centers.
///
/// Equal-mass, perfectly elastic approximation: each ball keeps its
/// perpendicular component and takes the other's parallel one. Positions are
/// not touched. Coincident centers have no collision axis; both velocities
/// are then left as they were.
pub fn collide(ball1: &mut Ball, ball2: &mut Ball) -> Result<(), DegenerateVectorError> {
    let guide = ball2.position() - ball1.position();

    let g1 = project_onto(ball1.velocity(), guide)?;
    let g2 = project_onto(ball2.velocity(), guide)?;

    ball1.set_velocity(ball1.velocity() - g1 + g2);
    ball2.set_velocity(ball2.velocity() + g1 - g2);
    Ok(())
}
