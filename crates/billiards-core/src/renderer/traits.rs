//! Rendering collaborator contract.
//!
//! The simulation never draws anything itself. It creates, places and destroys
//! opaque visuals through this trait and reports a few pieces of scene state.
//! In the browser build the implementation is [`CommandBuffer`], which records
//! the calls for the TypeScript renderer to replay; a native renderer would
//! implement the trait directly.
//!
//! [`CommandBuffer`]: super::commands::CommandBuffer

use crate::api::types::VisualHandle;

/// Scene operations the simulation depends on.
pub trait SceneBackend {
    /// Ask the host loop to run at `fps` frames per second. Called once at init.
    fn set_target_fps(&mut self, fps: u32);

    /// One-time scene setup sized to the table.
    fn setup_background(&mut self, width: f32, height: f32);

    /// Create the visual for a pocket of the given radius.
    fn create_pocket_visual(&mut self, radius: f32) -> VisualHandle;

    /// Create the visual for a ball of the given radius.
    fn create_ball_visual(&mut self, radius: f32) -> VisualHandle;

    /// Move a visual to world coordinates.
    fn place_visual(&mut self, handle: VisualHandle, x: f32, y: f32, z: f32);

    /// Release a visual. The handle is not used again afterwards.
    fn destroy_visual(&mut self, handle: VisualHandle);

    /// Report the current shot charge in `[0, 1]`. Called once per frame.
    fn update_charge_indicator(&mut self, progress: f32);
}
