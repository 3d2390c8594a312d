//! Per-frame simulation step
//!
//! Core game loop that advances the world by one rendered frame.

use super::collision::circles_overlap;
use super::entity::{roll_collectible, roll_obstacle};
use super::events::GameEvent;
use super::world::World;
use crate::consts::{TILT_EASING, TILT_FACTOR};

/// Held directions for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// -1 for left, +1 for right, 0 when neither or both are held
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[inline]
fn due(frame: u64, rate: u32) -> bool {
    rate != 0 && frame.is_multiple_of(u64::from(rate))
}

/// Advance the world by one frame. Does nothing unless a round is playing.
///
/// Obstacles are resolved before collectibles, so a frame that touches
/// both ends the round without collecting anything.
pub fn tick(world: &mut World, input: &TickInput) {
    if !world.state.is_playing() {
        return;
    }

    // Steering (may spill the last of the tofu)
    let velocity = input.direction() * world.config.lateral_speed;
    world.state.register_lateral_input(velocity, &mut world.bus);
    if !world.state.is_playing() {
        return;
    }

    let (min_x, max_x) = world.config.player_x_bounds();
    world.player.x = (world.player.x + velocity).clamp(min_x, max_x);
    world.player.tilt += (-velocity * TILT_FACTOR - world.player.tilt) * TILT_EASING;

    // Spawning
    world.frame += 1;
    if due(world.frame, world.config.obstacle_spawn_rate) {
        let id = world.next_entity_id();
        let obstacle = roll_obstacle(id, &world.config, &mut world.rng);
        world.obstacles.spawn(obstacle);
    }
    if due(world.frame, world.config.collect_spawn_rate) {
        let id = world.next_entity_id();
        let tofu = roll_collectible(id, &world.config, &mut world.rng);
        world.collectibles.spawn(tofu);
    }

    let player_pos = world.player.pos();
    let player_radius = world.player.radius;
    let despawn_z = world.config.despawn_z;

    // Obstacles: any contact is fatal
    for i in (0..world.obstacles.len()).rev() {
        let Some(obstacle) = world.obstacles.get_mut(i) else {
            continue;
        };
        obstacle.advance();
        if obstacle.is_past(despawn_z) {
            world.obstacles.remove(i);
            continue;
        }
        if circles_overlap(player_pos, player_radius, obstacle.pos, obstacle.radius) {
            log::info!("Crashed into {:?} #{}", obstacle.kind, obstacle.id);
            world.state.game_over(&mut world.bus);
            return;
        }
    }

    // Collectibles
    for i in (0..world.collectibles.len()).rev() {
        let Some(tofu) = world.collectibles.get_mut(i) else {
            continue;
        };
        tofu.advance();
        if tofu.is_past(despawn_z) {
            world.collectibles.remove(i);
            continue;
        }
        if circles_overlap(player_pos, player_radius, tofu.pos, tofu.radius) {
            let tofu = world.collectibles.remove(i);
            world.state.add_score(1, &mut world.bus);
            world.bus.emit(GameEvent::Collected { position: tofu.pos });
        }
    }

    let speed = world.state.speed;
    world.state.add_distance(speed, &mut world.bus);
}

/// How far ahead the autopilot looks for trouble
const AUTOPILOT_LOOKAHEAD: f32 = 25.0;
/// Extra lateral clearance the autopilot keeps from obstacles
const AUTOPILOT_CLEARANCE: f32 = 0.4;

/// Simple demo driver: dodge the closest obstacle in the car's path,
/// otherwise line up with the closest collectible.
pub fn autopilot(world: &World) -> TickInput {
    let car = world.player.pos();
    let reach = world.player.radius + AUTOPILOT_CLEARANCE;
    let (min_x, max_x) = world.config.player_x_bounds();
    let step = world.config.lateral_speed;

    let ahead = |z: f32, radius: f32| z < car.y + radius && z > car.y - AUTOPILOT_LOOKAHEAD;

    let threat = world
        .obstacles
        .iter()
        .filter(|o| ahead(o.pos.y, o.radius) && (o.pos.x - car.x).abs() < o.radius + reach)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(obstacle) = threat {
        let mut go_left = if obstacle.pos.x != car.x {
            obstacle.pos.x > car.x
        } else {
            car.x > 0.0
        };
        // Pinned against a wall: squeeze past on the other side
        if go_left && car.x - step < min_x {
            go_left = false;
        } else if !go_left && car.x + step > max_x {
            go_left = true;
        }
        return TickInput {
            left: go_left,
            right: !go_left,
        };
    }

    let target = world
        .collectibles
        .iter()
        .filter(|t| ahead(t.pos.y, t.radius))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match target {
        Some(tofu) if (tofu.pos.x - car.x).abs() > step => TickInput {
            left: tofu.pos.x < car.x,
            right: tofu.pos.x > car.x,
        },
        _ => TickInput::default(),
    }
}
