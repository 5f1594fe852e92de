/// Pointer and control input, in table coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer down. Starts charging a shot.
    PressStart { x: f32, y: f32 },
    /// Pointer up. Strikes the player ball toward `(x, y)`.
    PressEnd { x: f32, y: f32 },
    Reset,
}

/// Input collected between frames, delivered in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Hand over everything pending, oldest first. The queue is empty afterwards
    /// even if the iterator is dropped early.
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.pending.drain(..)
    }

    /// Discard pending input without delivering it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
