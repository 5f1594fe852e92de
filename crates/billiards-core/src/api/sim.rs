use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::types::SimEvent;
use crate::core::shot::ShotState;
use crate::core::step;
use crate::core::table::Table;
use crate::input::queue::InputEvent;
use crate::renderer::traits::SceneBackend;

/// Everything one game of billiards needs between frames.
///
/// Owned by the host. Input handlers and [`Simulation::step`] are never
/// interleaved: the host delivers pending input, then steps.
pub struct Simulation {
    config: SimConfig,
    table: Table,
    shot: ShotState,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let table = Table::new(&config);
        Self {
            config,
            table,
            shot: ShotState::new(),
            events: Vec::with_capacity(16),
        }
    }

    /// Configure the scene and rack the table.
    ///
    /// # Panics
    /// If the table is already initialized.
    pub fn init<S: SceneBackend>(&mut self, scene: &mut S) {
        scene.set_target_fps(self.config.target_fps);
        scene.setup_background(self.config.table.width, self.config.table.height);
        self.table.init(&self.config, scene);
        self.shot.reset();
        self.events.clear();
        log::info!(
            "table initialized: {}x{}, {} balls",
            self.config.table.width,
            self.config.table.height,
            self.table.balls_on_table().count()
        );
    }

    /// Release the pocket visuals.
    pub fn deinit<S: SceneBackend>(&mut self, scene: &mut S) {
        self.table.deinit(scene);
    }

    /// Clear the table and rack a fresh set of balls.
    pub fn reset<S: SceneBackend>(&mut self, scene: &mut S) {
        self.table.clear_balls(scene);
        self.table.deinit(scene);
        self.table.init(&self.config, scene);
        self.shot.reset();
        self.events.clear();
        log::info!("table reset");
    }

    /// Advance one frame: shot charge first, then ball physics.
    pub fn step<S: SceneBackend>(&mut self, dt: f32, scene: &mut S) {
        self.events.clear();

        self.shot.advance(dt, self.config.shot.charge_time);
        scene.update_charge_indicator(self.shot.progress());

        step::advance(&mut self.table, &self.config, dt, scene, &mut self.events);
    }

    /// Pointer down: start charging. Coordinates are not used.
    pub fn on_press_start(&mut self, _x: f32, _y: f32) {
        self.shot.press();
    }

    /// Pointer up: strike the player ball toward `(x, y)` with the charge built
    /// up so far, then go back to idle.
    pub fn on_press_end(&mut self, x: f32, y: f32) {
        let charge = self.shot.release();
        let power = charge * self.config.physics.strike_power;

        let Some(ball) = self.table.ball_to_hit_mut() else {
            log::warn!("shot ignored: player ball is not on the table");
            return;
        };

        let direction = Vec2::new(x, y) - ball.position();
        match ball.strike(direction, power) {
            Ok(()) => log::info!("shot toward ({:.2}, {:.2}) with power {:.3}", x, y, power),
            Err(err) => log::warn!("shot ignored: aim point is the ball center ({})", err),
        }
    }

    /// Dispatch pending input events in order.
    pub fn handle_input<S, I>(&mut self, events: I, scene: &mut S)
    where
        S: SceneBackend,
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            match event {
                InputEvent::PressStart { x, y } => self.on_press_start(x, y),
                InputEvent::PressEnd { x, y } => self.on_press_end(x, y),
                InputEvent::Reset => self.reset(scene),
            }
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn shot(&self) -> &ShotState {
        &self.shot
    }

    /// Events produced by the most recent step.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::commands::{CommandBuffer, SceneCommand};

    const DT: f32 = 1.0 / 60.0;

    fn started() -> (Simulation, CommandBuffer) {
        let mut sim = Simulation::new(SimConfig::default());
        let mut scene = CommandBuffer::new();
        sim.init(&mut scene);
        (sim, scene)
    }

    #[test]
    fn init_configures_scene() {
        let (_, scene) = started();
        let cmds = scene.commands();
        assert_eq!(cmds[0], SceneCommand::SetTargetFps { fps: 60 });
        assert_eq!(cmds[1], SceneCommand::SetupBackground { width: 15.0, height: 8.0 });
    }

    #[test]
    fn step_reports_charge_every_frame() {
        let (mut sim, mut scene) = started();
        scene.clear();
        sim.on_press_start(0.0, 0.0);
        sim.step(0.25, &mut scene);
        sim.step(0.25, &mut scene);

        let charges: Vec<f32> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                SceneCommand::ChargeIndicator { progress } => Some(*progress),
                _ => None,
            })
            .collect();
        assert_eq!(charges, vec![0.25, 0.5]);
    }

    #[test]
    fn charge_clamps_and_release_resets() {
        let (mut sim, mut scene) = started();
        sim.on_press_start(0.0, 0.0);
        for _ in 0..200 {
            sim.step(DT, &mut scene);
            assert!(sim.shot().progress() <= 1.0);
        }
        assert_eq!(sim.shot().progress(), 1.0);

        sim.on_press_end(0.0, 0.0);
        assert!(!sim.shot().is_charging());
        assert_eq!(sim.shot().progress(), 0.0);
    }

    #[test]
    fn full_charge_shot_end_to_end() {
        let (mut sim, mut scene) = started();
        sim.on_press_start(-4.5, 0.0);
        sim.step(1.0, &mut scene);
        assert_eq!(sim.shot().progress(), 1.0);

        // Aim straight right of the player ball at (-4.5, 0)
        sim.on_press_end(0.0, 0.0);
        let player = sim.table().ball_to_hit().unwrap();
        assert!((player.velocity() - Vec2::new(1.0, 0.0)).length() < 1e-6);

        sim.step(DT, &mut scene);
        assert!(sim.events().is_empty());
        let player = sim.table().ball_to_hit().unwrap();
        let (pos, vel) = (player.position(), player.velocity());
        assert!((pos - Vec2::new(-3.5, 0.0)).length() < 1e-5, "pos {:?}", pos);
        assert!((vel - Vec2::new(0.997, 0.0)).length() < 1e-6, "vel {:?}", vel);
    }

    #[test]
    fn release_without_charge_does_nothing() {
        let (mut sim, _) = started();
        sim.on_press_end(3.0, 1.0);
        assert_eq!(sim.table().ball_to_hit().unwrap().velocity(), Vec2::ZERO);
    }

    #[test]
    fn aiming_at_ball_center_is_ignored() {
        let (mut sim, mut scene) = started();
        sim.on_press_start(0.0, 0.0);
        sim.step(0.5, &mut scene);
        let center = sim.table().ball_to_hit().unwrap().position();
        sim.on_press_end(center.x, center.y);

        let v = sim.table().ball_to_hit().unwrap().velocity();
        assert_eq!(v, Vec2::ZERO);
        assert!(!sim.shot().is_charging());
    }

    #[test]
    fn release_without_player_ball_resets_shot() {
        let (mut sim, mut scene) = started();
        sim.table_mut().balls[0] = None;
        sim.on_press_start(0.0, 0.0);
        sim.step(0.5, &mut scene);
        sim.on_press_end(1.0, 1.0);
        assert_eq!(*sim.shot(), ShotState::default());
    }

    #[test]
    fn input_events_drive_shot_and_reset() {
        let (mut sim, mut scene) = started();
        sim.handle_input([InputEvent::PressStart { x: 0.0, y: 0.0 }], &mut scene);
        sim.step(0.5, &mut scene);
        sim.handle_input([InputEvent::PressEnd { x: 0.0, y: 0.0 }], &mut scene);
        assert!(sim.table().ball_to_hit().unwrap().is_moving());

        for _ in 0..5 {
            sim.step(DT, &mut scene);
        }
        sim.handle_input([InputEvent::Reset], &mut scene);

        let config = sim.config().clone();
        assert!(sim.table().is_at_rest());
        assert_eq!(sim.table().balls_on_table().count(), 7);
        for (slot, ball) in sim.table().balls_on_table() {
            assert_eq!(ball.position(), config.table.ball_positions[slot]);
        }
    }

    #[test]
    fn reset_releases_old_visuals() {
        let (mut sim, mut scene) = started();
        let old: Vec<_> = sim.table().balls_on_table().map(|(_, b)| b.visual()).collect();
        sim.reset(&mut scene);
        for h in &old {
            assert_eq!(scene.destroy_count(*h), 1);
        }
        let fresh: Vec<_> = sim.table().balls_on_table().map(|(_, b)| b.visual()).collect();
        assert!(fresh.iter().all(|h| !old.contains(h)));
    }
}
