/// Charge-and-release shot state.
///
/// Idle (`charging == false`, `progress == 0`) → Charging on press → back to
/// Idle on release, handing the accumulated charge to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShotState {
    charging: bool,
    progress: f32,
}

impl ShotState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Accumulated charge in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start charging. Pressing again while charging changes nothing.
    pub fn press(&mut self) {
        self.charging = true;
    }

    /// Accumulate `dt / charge_time` while charging, kept within `[0, 1]`.
    pub fn advance(&mut self, dt: f32, charge_time: f32) {
        if !self.charging {
            return;
        }
        let gain = if charge_time > 0.0 { dt / charge_time } else { 1.0 };
        self.progress = (self.progress + gain).clamp(0.0, 1.0);
    }

    /// Return the accumulated charge and go back to idle.
    pub fn release(&mut self) -> f32 {
        let progress = self.progress;
        self.reset();
        progress
    }

    pub fn reset(&mut self) {
        self.charging = false;
        self.progress = 0.0;
    }
}
