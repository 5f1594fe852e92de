use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of ball slots on the table (player ball + 6 object balls).
pub const BALL_COUNT: usize = 7;
/// Number of pockets on the table.
pub const POCKET_COUNT: usize = 6;

/// Simulation configuration. Loaded once, immutable afterwards.
///
/// Every section falls back to its defaults, so a JSON document only needs
/// the fields it wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frame rate the host is asked to run at. Ball velocities are expressed
    /// per frame at this rate.
    pub target_fps: u32,
    pub table: TableParams,
    pub ball: BallParams,
    pub physics: PhysicsParams,
    pub shot: ShotParams,
}

/// Table geometry. The table is centered on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableParams {
    pub width: f32,
    pub height: f32,
    pub pocket_radius: f32,
    /// Pocket centers: four corners, then the middle of each long edge.
    pub pocket_positions: [Vec2; POCKET_COUNT],
    /// Starting position per ball slot. Slot 0 is the player ball.
    pub ball_positions: [Vec2; BALL_COUNT],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParams {
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Speed lost per frame to the felt, in distance per frame.
    pub friction_deceleration: f32,
    /// Impulse applied by a fully charged shot.
    pub strike_power: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotParams {
    /// Seconds of holding needed to reach full charge.
    pub charge_time: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            table: TableParams::default(),
            ball: BallParams::default(),
            physics: PhysicsParams::default(),
            shot: ShotParams::default(),
        }
    }
}

impl Default for TableParams {
    fn default() -> Self {
        Self::with_size(15.0, 8.0)
    }
}

impl TableParams {
    /// Standard layout scaled to a `width` × `height` table: corner and side
    /// pockets, player ball on the left, a small rack on the right.
    pub fn with_size(width: f32, height: f32) -> Self {
        let hw = 0.5 * width;
        let hh = 0.5 * height;
        Self {
            width,
            height,
            pocket_radius: 0.4,
            pocket_positions: [
                Vec2::new(-hw, -hh),
                Vec2::new(0.0, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(-hw, hh),
                Vec2::new(0.0, hh),
                Vec2::new(hw, hh),
            ],
            ball_positions: [
                Vec2::new(-0.3 * width, 0.0),
                Vec2::new(0.2 * width, 0.0),
                Vec2::new(0.25 * width, 0.05 * height),
                Vec2::new(0.25 * width, -0.05 * height),
                Vec2::new(0.3 * width, 0.1 * height),
                Vec2::new(0.3 * width, 0.0),
                Vec2::new(0.3 * width, -0.1 * height),
            ],
        }
    }
}

impl Default for BallParams {
    fn default() -> Self {
        Self { radius: 0.3 }
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction_deceleration: 0.003,
            strike_power: 1.0,
        }
    }
}

impl Default for ShotParams {
    fn default() -> Self {
        Self { charge_time: 1.0 }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Duration of one frame in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}
