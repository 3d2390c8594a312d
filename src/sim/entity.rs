//! Moving world objects and their pools
//!
//! Entities live in the x-z ground plane: x across the road, z along it
//! (negative = ahead of the car). They only ever move toward +z.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Obstacle look. Only the spawn footprint depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    Cone,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Tree, ObstacleKind::Rock, ObstacleKind::Cone];

    /// Ground-plane collision radius
    pub fn footprint(&self) -> f32 {
        match self {
            ObstacleKind::Tree => 0.5,
            ObstacleKind::Rock => 0.6,
            ObstacleKind::Cone => 0.3,
        }
    }
}

/// What an entity does when the car touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Ends the round
    Obstacle(ObstacleKind),
    /// Tofu block, worth a point
    Collectible,
}

/// An obstacle or collectible on the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// (x, z) position
    pub pos: Vec2,
    pub radius: f32,
    /// Forward movement per frame
    pub speed: f32,
}

impl Entity {
    /// Move one frame toward the car
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    #[inline]
    pub fn is_past(&self, despawn_z: f32) -> bool {
        self.pos.y > despawn_z
    }
}

/// Random x in the lane keeping `margin` from each edge
fn lane_x<R: Rng>(rng: &mut R, lane_width: f32, margin: f32) -> f32 {
    let half = (lane_width / 2.0 - margin).max(0.0);
    rng.random_range(-half..=half)
}

/// Random speed in `[min, max]`
fn speed_in<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Roll a new obstacle at the far end of the lane
pub fn roll_obstacle<R: Rng>(id: u32, config: &Config, rng: &mut R) -> Entity {
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let x = lane_x(rng, config.lane_width, config.obstacle_margin);
    let speed = speed_in(rng, config.obstacle_min_speed, config.obstacle_max_speed);
    Entity {
        id,
        kind: EntityKind::Obstacle(kind),
        pos: Vec2::new(x, config.spawn_z()),
        radius: kind.footprint(),
        speed,
    }
}

/// Roll a new collectible at the far end of the lane
pub fn roll_collectible<R: Rng>(id: u32, config: &Config, rng: &mut R) -> Entity {
    let x = lane_x(rng, config.lane_width, config.collect_margin);
    let speed = speed_in(rng, config.collect_min_speed, config.collect_max_speed);
    Entity {
        id,
        kind: EntityKind::Collectible,
        pos: Vec2::new(x, config.spawn_z()),
        radius: config.collect_radius,
        speed,
    }
}

/// A list of live entities of one kind
///
/// Removal is swap-remove. Callers walking the pool back to front can
/// remove the current index safely: the element swapped in was already
/// visited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) {
        log::trace!("Spawned {:?} #{} at x={:.2}", entity.kind, entity.id, entity.pos.x);
        self.entities.push(entity);
    }

    pub fn remove(&mut self, index: usize) -> Entity {
        self.entities.swap_remove(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_stay_inside_margins() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let obstacle = roll_obstacle(id, &config, &mut rng);
            assert!(obstacle.pos.x.abs() <= 4.0);
            assert_eq!(obstacle.pos.y, -100.0);
            assert!((0.3..=0.5).contains(&obstacle.speed));

            let tofu = roll_collectible(id, &config, &mut rng);
            assert!(tofu.pos.x.abs() <= 3.5);
            assert!((0.3..=0.4).contains(&tofu.speed));
            assert_eq!(tofu.radius, 0.4);
        }
    }

    #[test]
    fn test_obstacle_footprint_matches_kind() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = Vec::new();
        for id in 0..200 {
            let obstacle = roll_obstacle(id, &config, &mut rng);
            let EntityKind::Obstacle(kind) = obstacle.kind else {
                panic!("expected an obstacle");
            };
            assert_eq!(obstacle.radius, kind.footprint());
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_degenerate_speed_range() {
        let config = Config {
            collect_min_speed: 0.3,
            collect_max_speed: 0.3,
            ..Config::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(roll_collectible(1, &config, &mut rng).speed, 0.3);
    }

    #[test]
    fn test_reverse_walk_with_removal() {
        let mut pool = EntityPool::new();
        for (id, z) in [(1, 9.8), (2, 5.0), (3, 9.9), (4, -50.0)] {
            pool.spawn(Entity {
                id,
                kind: EntityKind::Collectible,
                pos: Vec2::new(0.0, z),
                radius: 0.4,
                speed: 0.3,
            });
        }

        for i in (0..pool.len()).rev() {
            let Some(entity) = pool.get_mut(i) else { continue };
            entity.advance();
            if entity.is_past(10.0) {
                pool.remove(i);
            }
        }

        let mut ids: Vec<u32> = pool.iter().map(|e| e.id).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 4]);
        assert!(pool.iter().all(|e| e.pos.y <= 10.0));
    }
}
