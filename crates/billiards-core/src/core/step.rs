//! Per-frame table physics.
//!
//! Balls are processed one at a time in ascending slot order. For each ball:
//! tentative move → pocket test → friction → cushion bounce → collisions with
//! higher slots → commit. Pair tests only look forward, so every pair is
//! checked once per frame from the lower slot's side. This makes results
//! depend on slot order, and replays rely on that order staying fixed.

use crate::api::config::SimConfig;
use crate::api::types::SimEvent;
use crate::core::collision::{collide, ricochet, TableBounds};
use crate::core::math::distance;
use crate::core::table::Table;
use crate::renderer::traits::SceneBackend;

/// Advance every ball on the table by one frame.
///
/// Events produced during the frame are appended to `events`.
pub fn advance<S: SceneBackend>(
    table: &mut Table,
    config: &SimConfig,
    dt: f32,
    scene: &mut S,
    events: &mut Vec<SimEvent>,
) {
    let bounds = TableBounds::from_config(config);
    let radius = config.ball.radius;
    let contact = 2.0 * radius;
    let pocket_radius = config.table.pocket_radius;
    let friction = config.physics.friction_deceleration;
    let pockets = table.pocket_centers;

    for slot in 0..table.balls.len() {
        let (head, tail) = table.balls.split_at_mut(slot + 1);

        let Some(ball) = head[slot].as_mut() else {
            continue;
        };
        let mut next = ball.next_position(dt);

        // Scoring ends this ball's frame; one pocket is enough.
        if let Some(pocket) = pockets.iter().position(|c| distance(next, *c) < pocket_radius) {
            if let Some(scored) = head[slot].take() {
                scene.destroy_visual(scored.visual());
                log::info!("ball {} pocketed in pocket {}", slot, pocket);
                events.push(SimEvent::Pocketed { slot, pocket });
            }
            continue;
        }

        ball.apply_friction(friction);

        if bounds.crosses(next, radius) {
            ball.set_position(next);
            ricochet(ball, &bounds, radius);
            next = ball.position();
            log::debug!("ball {} hit a cushion at {:?}", slot, next);
            events.push(SimEvent::Cushion { slot });
        }

        for (offset, other) in tail.iter_mut().enumerate() {
            let Some(other) = other.as_mut() else {
                continue;
            };
            if distance(next, other.position()) > contact {
                continue;
            }
            let other_slot = slot + 1 + offset;
            next = ball.position();
            match collide(ball, other) {
                Ok(()) => {
                    log::debug!("balls {} and {} collided", slot, other_slot);
                    events.push(SimEvent::Collision { a: slot, b: other_slot });
                }
                Err(err) => {
                    log::warn!(
                        "balls {} and {} share a center, skipping: {}",
                        slot,
                        other_slot,
                        err
                    );
                }
            }
        }

        ball.set_position(next);
        scene.place_visual(ball.visual(), next.x, next.y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::api::config::BALL_COUNT;
    use crate::renderer::commands::CommandBuffer;

    const DT: f32 = 1.0 / 60.0;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    /// Table with slots 0 and 1 at the given spots and the rest parked out of the way.
    fn table_with(first: Vec2, second: Vec2) -> (Table, CommandBuffer, SimConfig) {
        table_from(SimConfig::default(), first, second)
    }

    fn table_from(
        mut config: SimConfig,
        first: Vec2,
        second: Vec2,
    ) -> (Table, CommandBuffer, SimConfig) {
        config.table.ball_positions = [
            first,
            second,
            Vec2::new(-5.0, -2.0),
            Vec2::new(-5.0, 2.0),
            Vec2::new(5.0, -2.0),
            Vec2::new(5.0, 2.0),
            Vec2::new(0.0, -2.0),
        ];
        let mut scene = CommandBuffer::new();
        let mut table = Table::new(&config);
        table.init(&config, &mut scene);
        scene.clear();
        (table, scene, config)
    }

    fn run(table: &mut Table, config: &SimConfig, scene: &mut CommandBuffer) -> Vec<SimEvent> {
        let mut events = Vec::new();
        advance(table, config, DT, scene, &mut events);
        events
    }

    #[test]
    fn resting_table_stays_put() {
        let (mut table, mut scene, config) = table_with(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        let events = run(&mut table, &config, &mut scene);
        assert!(events.is_empty());
        for (slot, ball) in table.balls_on_table() {
            assert_eq!(ball.position(), config.table.ball_positions[slot]);
        }
        // Every ball is re-placed once per frame
        assert_eq!(scene.len(), BALL_COUNT);
    }

    #[test]
    fn free_ball_moves_then_slows() {
        let (mut table, mut scene, config) = table_with(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        table.ball_mut(0).unwrap().set_velocity(Vec2::new(0.2, 0.1));
        run(&mut table, &config, &mut scene);

        let ball = table.ball(0).unwrap();
        // Moved by the pre-friction velocity
        assert!(approx(ball.position(), Vec2::new(-2.8, 0.1)));
        // Friction takes effect from the next frame
        let expected_speed = Vec2::new(0.2, 0.1).length() - 0.003;
        assert!((ball.velocity().length() - expected_speed).abs() < 1e-6);
        let (x, y) = scene.last_placement(ball.visual()).unwrap();
        assert!(approx(Vec2::new(x, y), ball.position()));
    }

    #[test]
    fn cushion_reflects_ball_inside_table() {
        let (mut table, mut scene, config) = table_with(Vec2::new(6.9, 1.0), Vec2::new(3.0, 0.0));
        table.ball_mut(0).unwrap().set_velocity(Vec2::new(0.4, 0.05));
        let events = run(&mut table, &config, &mut scene);

        assert_eq!(events, vec![SimEvent::Cushion { slot: 0 }]);
        let ball = table.ball(0).unwrap();
        // Tentative x 7.3 puts the edge 0.1 past 7.5; mirrored to 7.1
        assert!(approx(ball.position(), Vec2::new(7.1, 1.05)), "pos {:?}", ball.position());
        let v = ball.velocity();
        assert!(v.x < 0.0, "x velocity should flip: {:?}", v);
        assert!(v.y > 0.0, "y velocity keeps its sign: {:?}", v);
        // Reflected speed equals the post-friction speed
        let expected = Vec2::new(0.4, 0.05).length() - 0.003;
        assert!((v.length() - expected).abs() < 1e-6);
    }

    #[test]
    fn pocketed_ball_leaves_table_once() {
        let (mut table, mut scene, config) = table_with(Vec2::new(-3.0, 0.0), Vec2::new(7.0, 3.5));
        let handle = table.ball(1).unwrap().visual();
        // Tentative (7.3, 3.8) is ~0.28 from the corner pocket at (7.5, 4)
        table.ball_mut(1).unwrap().set_velocity(Vec2::new(0.3, 0.3));

        let events = run(&mut table, &config, &mut scene);
        assert_eq!(events, vec![SimEvent::Pocketed { slot: 1, pocket: 5 }]);
        assert!(table.ball(1).is_none());
        assert_eq!(scene.destroy_count(handle), 1);

        for _ in 0..10 {
            run(&mut table, &config, &mut scene);
        }
        assert!(table.ball(1).is_none());
        assert_eq!(scene.destroy_count(handle), 1);
        assert_eq!(scene.last_placement(handle), None);
        assert_eq!(table.object_balls_remaining(), 5);
    }

    #[test]
    fn overlapping_pockets_destroy_once() {
        let (_, _, mut config) = table_with(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        config.table.pocket_positions[1] = Vec2::new(-2.9, 0.0);
        config.table.pocket_positions[4] = Vec2::new(-2.9, 0.05);
        let mut scene = CommandBuffer::new();
        let mut table = Table::new(&config);
        table.init(&config, &mut scene);

        let handle = table.ball(0).unwrap().visual();
        table.ball_mut(0).unwrap().set_velocity(Vec2::new(0.1, 0.0));
        let events = run(&mut table, &config, &mut scene);

        assert_eq!(events, vec![SimEvent::Pocketed { slot: 0, pocket: 1 }]);
        assert_eq!(scene.destroy_count(handle), 1);
    }

    #[test]
    fn moving_ball_hands_momentum_to_resting_neighbor() {
        let (mut table, mut scene, config) = table_with(Vec2::new(0.0, 0.0), Vec2::new(0.9, 0.0));
        table.ball_mut(0).unwrap().set_velocity(Vec2::new(0.5, 0.0));
        let events = run(&mut table, &config, &mut scene);

        assert_eq!(events, vec![SimEvent::Collision { a: 0, b: 1 }]);
        let striker = table.ball(0).unwrap();
        let target = table.ball(1).unwrap();
        // The striker stays where it was and stops
        assert_eq!(striker.position(), Vec2::new(0.0, 0.0));
        assert!(striker.velocity().length() < 1e-6);
        // The target got the striker's post-friction velocity and moved with it,
        // losing one friction step of its own
        let pos = target.position();
        assert!(approx(pos, Vec2::new(0.9 + 0.497, 0.0)), "pos {:?}", pos);
        assert!(approx(target.velocity(), Vec2::new(0.494, 0.0)), "vel {:?}", target.velocity());
    }

    #[test]
    fn balls_exactly_touching_collide() {
        let mut config = SimConfig::default();
        config.ball.radius = 0.25;
        let (mut table, mut scene, config) =
            table_from(config, Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0));

        let events = run(&mut table, &config, &mut scene);
        assert_eq!(events, vec![SimEvent::Collision { a: 0, b: 1 }]);
    }

    #[test]
    fn balls_just_apart_do_not_collide() {
        let mut config = SimConfig::default();
        config.ball.radius = 0.25;
        let (mut table, mut scene, config) =
            table_from(config, Vec2::new(0.0, 0.0), Vec2::new(0.5625, 0.0));

        let events = run(&mut table, &config, &mut scene);
        assert!(events.is_empty());
    }

    #[test]
    fn ball_on_pocket_rim_stays_on_table() {
        let mut config = SimConfig::default();
        config.table.pocket_radius = 0.5;
        config.table.pocket_positions[1] = Vec2::new(-3.0, 0.5);
        let (mut table, mut scene, config) =
            table_from(config, Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));

        let events = run(&mut table, &config, &mut scene);
        assert!(events.is_empty());
        assert_eq!(table.ball(0).unwrap().position(), Vec2::new(-3.0, 0.0));
        assert_eq!(table.object_balls_remaining(), 6);
    }

    #[test]
    fn ball_just_inside_pocket_rim_is_pocketed() {
        let mut config = SimConfig::default();
        config.table.pocket_radius = 0.5;
        config.table.pocket_positions[1] = Vec2::new(-3.0, 0.4375);
        let (mut table, mut scene, config) =
            table_from(config, Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));

        let events = run(&mut table, &config, &mut scene);
        assert_eq!(events, vec![SimEvent::Pocketed { slot: 0, pocket: 1 }]);
        assert!(table.ball(0).is_none());
    }

    #[test]
    fn pairs_are_only_tested_from_the_lower_slot() {
        // Slot 1 runs into a resting slot 0. Slot 1 never tests backwards, so on
        // the first frame it moves into overlap; the exchange happens on the next
        // frame, when slot 0 tests forward.
        let (mut table, mut scene, config) = table_with(Vec2::new(0.0, 0.0), Vec2::new(0.9, 0.0));
        table.ball_mut(1).unwrap().set_velocity(Vec2::new(-0.5, 0.0));

        let first = run(&mut table, &config, &mut scene);
        assert!(first.is_empty());
        assert!(approx(table.ball(1).unwrap().position(), Vec2::new(0.4, 0.0)));
        assert_eq!(table.ball(0).unwrap().velocity(), Vec2::ZERO);

        let second = run(&mut table, &config, &mut scene);
        assert_eq!(second, vec![SimEvent::Collision { a: 0, b: 1 }]);
        assert!(approx(table.ball(0).unwrap().velocity(), Vec2::new(-0.497, 0.0)));
    }

    #[test]
    fn empty_slots_are_skipped() {
        let (mut table, mut scene, config) = table_with(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        table.balls[2] = None;
        table.balls[6] = None;
        run(&mut table, &config, &mut scene);
        assert_eq!(scene.len(), BALL_COUNT - 2);
    }
}
