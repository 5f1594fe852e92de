use bytemuck::{Pod, Zeroable};

/// Opaque handle to a visual owned by the rendering side.
/// The simulation only creates, places and destroys these; it never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u32);

/// Something noteworthy that happened during a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The ball in `slot` dropped into pocket `pocket` and left the table.
    Pocketed { slot: usize, pocket: usize },
    /// Balls in slots `a` and `b` exchanged momentum (`a < b`).
    Collision { a: usize, b: usize },
    /// The ball in `slot` bounced off a cushion.
    Cushion { slot: usize },
}

/// Event kinds used in the wire format.
pub mod event_kinds {
    pub const POCKETED: f32 = 1.0;
    pub const COLLISION: f32 = 2.0;
    pub const CUSHION: f32 = 3.0;
}

impl SimEvent {
    /// Flatten into the fixed-size wire form read by the host.
    pub fn to_wire(self) -> WireEvent {
        match self {
            SimEvent::Pocketed { slot, pocket } => WireEvent {
                kind: event_kinds::POCKETED,
                a: slot as f32,
                b: pocket as f32,
                c: 0.0,
            },
            SimEvent::Collision { a, b } => WireEvent {
                kind: event_kinds::COLLISION,
                a: a as f32,
                b: b as f32,
                c: 0.0,
            },
            SimEvent::Cushion { slot } => WireEvent {
                kind: event_kinds::CUSHION,
                a: slot as f32,
                b: 0.0,
                c: 0.0,
            },
        }
    }
}

/// A simulation event as read by JavaScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}
