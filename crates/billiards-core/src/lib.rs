pub mod api;
pub mod core;
pub mod input;
pub mod renderer;

pub use glam;

// Re-export key types at crate root for convenience
pub use crate::api::config::{
    BallParams, PhysicsParams, ShotParams, SimConfig, TableParams, BALL_COUNT, POCKET_COUNT,
};
pub use crate::api::sim::Simulation;
pub use crate::api::types::{VisualHandle, SimEvent, WireEvent};
pub use crate::core::ball::Ball;
pub use crate::core::collision::{collide, ricochet, TableBounds};
pub use crate::core::math::{distance, normalize, project_onto, DegenerateVectorError};
pub use crate::core::shot::ShotState;
pub use crate::core::table::{Table, PLAYER_SLOT};
pub use crate::core::time::FrameClock;
pub use crate::input::queue::{InputEvent, InputQueue};
pub use crate::renderer::commands::{CommandBuffer, CommandRecord, SceneCommand};
pub use crate::renderer::traits::SceneBackend;
