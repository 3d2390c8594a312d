//! Simulation context
//!
//! Everything one game session needs, constructed explicitly and handed to
//! [`super::tick`] each frame. Presentation code reads the public fields
//! between frames and listens on `bus`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::EntityPool;
use super::events::EventBus;
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::config::Config;

/// Depth of the car on the road; it never moves along z
pub const PLAYER_Z: f32 = 0.0;

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub radius: f32,
    /// Roll angle hint for rendering, eased toward the steering direction
    pub tilt: f32,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            x: 0.0,
            radius,
            tilt: 0.0,
        }
    }

    /// (x, z) position
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Z)
    }
}

/// A game session: config, round state, entities, events and RNG
pub struct World {
    pub config: Config,
    pub state: GameState,
    pub bus: EventBus,
    pub player: Player,
    pub obstacles: EntityPool,
    pub collectibles: EntityPool,
    /// Frames simulated this round
    pub frame: u64,
    pub(crate) rng: Pcg32,
    seed: u64,
    next_id: u32,
}

impl World {
    /// Build a session in the menu phase
    pub fn new(config: Config, seed: u64) -> Self {
        let state = GameState::new(&config);
        let player = Player::new(config.player_radius());
        Self {
            config,
            state,
            bus: EventBus::new(),
            player,
            obstacles: EntityPool::new(),
            collectibles: EntityPool::new(),
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear the road, recentre the car and begin a round
    pub fn start(&mut self) {
        self.obstacles.clear();
        self.collectibles.clear();
        self.player = Player::new(self.config.player_radius());
        self.frame = 0;
        self.state.start(&mut self.bus);
    }

    /// Advance one frame
    pub fn step(&mut self, input: &TickInput) {
        tick(self, input);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("seed", &self.seed)
            .field("frame", &self.frame)
            .field("state", &self.state)
            .field("player", &self.player)
            .field("obstacles", &self.obstacles.len())
            .field("collectibles", &self.collectibles.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, EntityKind};
    use crate::sim::events::GameEvent;
    use crate::sim::state::GamePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_start_clears_previous_round() {
        let mut world = World::new(Config::default(), 3);
        assert_eq!(world.state.phase, GamePhase::Menu);

        world.start();
        world.player.x = 2.5;
        world.player.tilt = 0.3;
        world.frame = 99;
        let id = world.next_entity_id();
        world.collectibles.spawn(Entity {
            id,
            kind: EntityKind::Collectible,
            pos: Vec2::new(1.0, -20.0),
            radius: 0.4,
            speed: 0.3,
        });
        world.state.game_over(&mut world.bus);

        world.start();
        assert!(world.state.is_playing());
        assert!(world.collectibles.is_empty());
        assert!(world.obstacles.is_empty());
        assert_eq!(world.player.x, 0.0);
        assert_eq!(world.player.tilt, 0.0);
        assert_eq!(world.frame, 0);
    }

    #[test]
    fn test_start_while_playing_restarts_round() {
        let config = Config {
            obstacle_spawn_rate: 0,
            lateral_speed: 0.9,
            ..Config::default()
        };
        let mut world = World::new(config, 3);
        let events = Rc::new(RefCell::new(Vec::new()));
        let e = events.clone();
        world.bus.subscribe_all(move |event| e.borrow_mut().push(*event));

        world.start();
        let hold_right = TickInput {
            left: false,
            right: true,
        };
        for _ in 0..60 {
            world.step(&hold_right);
        }
        assert!(world.state.is_playing());
        assert!(!world.collectibles.is_empty());
        assert!(world.state.score > 0);
        assert!(world.state.distance > 0.0);
        assert!(world.state.spill > 0.0);
        assert!(world.player.x > 0.0);

        events.borrow_mut().clear();
        world.start();

        assert!(world.state.is_playing());
        assert!(world.collectibles.is_empty());
        assert!(world.obstacles.is_empty());
        assert_eq!(world.state.score, 0);
        assert_eq!(world.state.distance, 0.0);
        assert_eq!(world.state.spill, 0.0);
        assert_eq!(world.player.x, 0.0);
        assert_eq!(world.frame, 0);
        assert_eq!(*events.borrow(), vec![GameEvent::GameStarted]);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(Config::default(), 3);
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
        assert_eq!(world.seed(), 3);
    }
}
