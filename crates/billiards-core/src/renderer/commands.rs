use bytemuck::{Pod, Zeroable};

use crate::api::types::VisualHandle;
use crate::renderer::traits::SceneBackend;

/// A recorded scene call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    SetTargetFps { fps: u32 },
    SetupBackground { width: f32, height: f32 },
    CreatePocket { handle: VisualHandle, radius: f32 },
    CreateBall { handle: VisualHandle, radius: f32 },
    Place { handle: VisualHandle, x: f32, y: f32, z: f32 },
    Destroy { handle: VisualHandle },
    ChargeIndicator { progress: f32 },
}

/// Opcodes used in the wire format.
pub mod ops {
    pub const SET_TARGET_FPS: f32 = 1.0;
    pub const SETUP_BACKGROUND: f32 = 2.0;
    pub const CREATE_POCKET: f32 = 3.0;
    pub const CREATE_BALL: f32 = 4.0;
    pub const PLACE: f32 = 5.0;
    pub const DESTROY: f32 = 6.0;
    pub const CHARGE_INDICATOR: f32 = 7.0;
}

/// Per-command data read by the TypeScript renderer.
/// Must match the TypeScript protocol: 5 floats = 20 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CommandRecord {
    pub op: f32,
    /// Visual handle, or 0 for commands that don't target a visual.
    pub handle: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl CommandRecord {
    pub const FLOATS: usize = 5;
}

impl SceneCommand {
    pub fn to_record(self) -> CommandRecord {
        let rec = |op, handle: Option<VisualHandle>, a, b, c| CommandRecord {
            op,
            handle: handle.map_or(0.0, |h| h.0 as f32),
            a,
            b,
            c,
        };
        match self {
            SceneCommand::SetTargetFps { fps } => {
                rec(ops::SET_TARGET_FPS, None, fps as f32, 0.0, 0.0)
            }
            SceneCommand::SetupBackground { width, height } => {
                rec(ops::SETUP_BACKGROUND, None, width, height, 0.0)
            }
            SceneCommand::CreatePocket { handle, radius } => {
                rec(ops::CREATE_POCKET, Some(handle), radius, 0.0, 0.0)
            }
            SceneCommand::CreateBall { handle, radius } => {
                rec(ops::CREATE_BALL, Some(handle), radius, 0.0, 0.0)
            }
            SceneCommand::Place { handle, x, y, z } => rec(ops::PLACE, Some(handle), x, y, z),
            SceneCommand::Destroy { handle } => rec(ops::DESTROY, Some(handle), 0.0, 0.0, 0.0),
            SceneCommand::ChargeIndicator { progress } => {
                rec(ops::CHARGE_INDICATOR, None, progress, 0.0, 0.0)
            }
        }
    }
}

/// Records scene calls so a host can replay them.
///
/// Handles start at 1 and are never reused. The host drains the commands once
/// per frame, after packing them into `records` for a zero-copy read.
pub struct CommandBuffer {
    commands: Vec<SceneCommand>,
    records: Vec<CommandRecord>,
    next_handle: u32,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            records: Vec::with_capacity(64),
            next_handle: 1,
        }
    }

    fn allocate(&mut self) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[SceneCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop recorded commands (handle allocation continues where it left off).
    pub fn clear(&mut self) {
        self.commands.clear();
        self.records.clear();
    }

    /// Rebuild the flat record buffer from the recorded commands.
    pub fn pack(&mut self) {
        self.records.clear();
        self.records.extend(self.commands.iter().map(|c| c.to_record()));
    }

    /// Packed records (valid after [`CommandBuffer::pack`]).
    pub fn records(&self) -> &[CommandRecord] {
        &self.records
    }

    /// Packed records viewed as raw floats.
    pub fn record_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.records)
    }

    /// Number of destroy commands recorded for `handle`.
    pub fn destroy_count(&self, handle: VisualHandle) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SceneCommand::Destroy { handle: h } if *h == handle))
            .count()
    }

    /// Last recorded placement for `handle`.
    pub fn last_placement(&self, handle: VisualHandle) -> Option<(f32, f32)> {
        self.commands.iter().rev().find_map(|c| match *c {
            SceneCommand::Place { handle: h, x, y, .. } if h == handle => Some((x, y)),
            _ => None,
        })
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBackend for CommandBuffer {
    fn set_target_fps(&mut self, fps: u32) {
        self.commands.push(SceneCommand::SetTargetFps { fps });
    }

    fn setup_background(&mut self, width: f32, height: f32) {
        self.commands.push(SceneCommand::SetupBackground { width, height });
    }

    fn create_pocket_visual(&mut self, radius: f32) -> VisualHandle {
        let handle = self.allocate();
        self.commands.push(SceneCommand::CreatePocket { handle, radius });
        handle
    }

    fn create_ball_visual(&mut self, radius: f32) -> VisualHandle {
        let handle = self.allocate();
        self.commands.push(SceneCommand::CreateBall { handle, radius });
        handle
    }

    fn place_visual(&mut self, handle: VisualHandle, x: f32, y: f32, z: f32) {
        self.commands.push(SceneCommand::Place { handle, x, y, z });
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        self.commands.push(SceneCommand::Destroy { handle });
    }

    fn update_charge_indicator(&mut self, progress: f32) {
        self.commands.push(SceneCommand::ChargeIndicator { progress });
    }
}
