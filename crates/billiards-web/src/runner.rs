use billiards_core::{
    CommandBuffer, FrameClock, InputEvent, InputQueue, SimConfig, Simulation, WireEvent,
};

/// Drives a [`Simulation`] from browser frames.
///
/// The exported wasm-bindgen functions keep one of these in a `thread_local!`.
/// Each tick delivers pending input, runs as many fixed steps as the elapsed
/// time calls for, and packs scene commands and events into flat buffers for
/// TypeScript to read.
pub struct TableRunner {
    sim: Simulation,
    input: InputQueue,
    clock: FrameClock,
    commands: CommandBuffer,
    /// Events from every step of the last tick, in wire form.
    events: Vec<WireEvent>,
    initialized: bool,
}

impl TableRunner {
    pub fn new(config: SimConfig) -> Self {
        let clock = FrameClock::from_fps(config.target_fps);
        Self {
            sim: Simulation::new(config),
            input: InputQueue::new(),
            clock,
            commands: CommandBuffer::new(),
            events: Vec::with_capacity(16),
            initialized: false,
        }
    }

    /// Rack the table. Call once after construction.
    pub fn init(&mut self) {
        self.commands.clear();
        self.sim.init(&mut self.commands);
        self.commands.pack();
        self.initialized = true;
    }

    /// Tear down the table's scene objects.
    pub fn deinit(&mut self) {
        if !self.initialized {
            return;
        }
        self.commands.clear();
        self.sim.deinit(&mut self.commands);
        self.commands.pack();
        self.input.clear();
        self.initialized = false;
    }

    /// Queue input for the next tick. Dropped while no table is racked.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.initialized {
            log::debug!("input dropped, table not initialized: {:?}", event);
            return;
        }
        self.input.push(event);
    }

    /// Input waiting for the next tick.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Run one host frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Commands from the previous tick have been consumed by now
        self.commands.clear();
        self.events.clear();

        let pending = self.input.drain();
        self.sim.handle_input(pending, &mut self.commands);

        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.sim.step(self.clock.dt(), &mut self.commands);
            self.events
                .extend(self.sim.events().iter().map(|e| e.to_wire()));
        }

        self.commands.pack();
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn commands(&self) -> &CommandBuffer {
        &self.commands
    }

    pub fn events(&self) -> &[WireEvent] {
        &self.events
    }

    // ---- Pointer accessors for zero-copy reads from wasm memory ----

    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.record_floats().as_ptr()
    }

    pub fn command_count(&self) -> u32 {
        self.commands.records().len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn balls_remaining(&self) -> u32 {
        self.sim.table().object_balls_remaining() as u32
    }

    pub fn is_at_rest(&self) -> bool {
        self.sim.table().is_at_rest()
    }

    pub fn table_width(&self) -> f32 {
        self.sim.config().table.width
    }

    pub fn table_height(&self) -> f32 {
        self.sim.config().table.height
    }
}
