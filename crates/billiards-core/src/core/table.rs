use glam::Vec2;

use crate::api::config::{SimConfig, BALL_COUNT, POCKET_COUNT};
use crate::api::types::VisualHandle;
use crate::core::ball::Ball;
use crate::renderer::traits::SceneBackend;

/// Slot of the ball the player strikes.
pub const PLAYER_SLOT: usize = 0;

/// The table: a fixed arena of ball slots plus six pockets.
///
/// Slot indices are stable for the table's lifetime. A pocketed ball leaves an
/// empty slot behind; slots are never compacted.
pub struct Table {
    pub(crate) balls: [Option<Ball>; BALL_COUNT],
    pub(crate) pocket_centers: [Vec2; POCKET_COUNT],
    pocket_visuals: [Option<VisualHandle>; POCKET_COUNT],
    ball_to_hit: usize,
}

impl Table {
    /// Empty table with pocket centers taken from `config`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            balls: Default::default(),
            pocket_centers: config.table.pocket_positions,
            pocket_visuals: [None; POCKET_COUNT],
            ball_to_hit: PLAYER_SLOT,
        }
    }

    /// Create pocket and ball visuals and rack every ball at its start position.
    ///
    /// # Panics
    /// If the table is already initialized.
    pub fn init<S: SceneBackend>(&mut self, config: &SimConfig, scene: &mut S) {
        let radius = config.table.pocket_radius;
        for (visual, center) in self.pocket_visuals.iter_mut().zip(self.pocket_centers.iter()) {
            assert!(visual.is_none(), "table pockets already initialized");
            let handle = scene.create_pocket_visual(radius);
            scene.place_visual(handle, center.x, center.y, 0.0);
            *visual = Some(handle);
        }

        for (slot, start) in self.balls.iter_mut().zip(config.table.ball_positions.iter()) {
            let handle = scene.create_ball_visual(config.ball.radius);
            scene.place_visual(handle, start.x, start.y, 0.0);
            *slot = Some(Ball::new(*start, handle));
        }

        self.ball_to_hit = PLAYER_SLOT;
    }

    /// Release the pocket visuals. Ball visuals are left alone: they go away
    /// when their ball is pocketed or through [`Table::clear_balls`].
    pub fn deinit<S: SceneBackend>(&mut self, scene: &mut S) {
        for visual in self.pocket_visuals.iter_mut() {
            if let Some(handle) = visual.take() {
                scene.destroy_visual(handle);
            }
        }
    }

    /// Remove every ball still on the table, releasing its visual.
    pub fn clear_balls<S: SceneBackend>(&mut self, scene: &mut S) {
        for slot in self.balls.iter_mut() {
            if let Some(ball) = slot.take() {
                scene.destroy_visual(ball.visual());
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.pocket_visuals.iter().any(Option::is_some)
    }

    pub fn ball(&self, slot: usize) -> Option<&Ball> {
        self.balls.get(slot).and_then(Option::as_ref)
    }

    pub fn ball_mut(&mut self, slot: usize) -> Option<&mut Ball> {
        self.balls.get_mut(slot).and_then(Option::as_mut)
    }

    /// Slot of the ball the player strikes (always the player ball).
    pub fn ball_to_hit_slot(&self) -> usize {
        self.ball_to_hit
    }

    /// The ball the player strikes, if it is still on the table.
    pub fn ball_to_hit(&self) -> Option<&Ball> {
        self.ball(self.ball_to_hit)
    }

    pub fn ball_to_hit_mut(&mut self) -> Option<&mut Ball> {
        self.ball_mut(self.ball_to_hit)
    }

    /// Occupied slots with their balls, in slot order.
    pub fn balls_on_table(&self) -> impl Iterator<Item = (usize, &Ball)> {
        self.balls
            .iter()
            .enumerate()
            .filter_map(|(slot, ball)| ball.as_ref().map(|b| (slot, b)))
    }

    /// Object balls (everything except the player ball) still in play.
    pub fn object_balls_remaining(&self) -> usize {
        self.balls_on_table().filter(|(slot, _)| *slot != PLAYER_SLOT).count()
    }

    /// True when no ball on the table is moving.
    pub fn is_at_rest(&self) -> bool {
        self.balls_on_table().all(|(_, ball)| !ball.is_moving())
    }

    pub fn pocket_centers(&self) -> &[Vec2; POCKET_COUNT] {
        &self.pocket_centers
    }
}
