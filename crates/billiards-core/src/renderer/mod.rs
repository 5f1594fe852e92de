// Scene collaborator: the trait the simulation draws through, plus a
// recording implementation whose packed output is read by the web host.

pub mod commands;
pub mod traits;

pub use commands::{CommandBuffer, CommandRecord, SceneCommand};
pub use traits::SceneBackend;
