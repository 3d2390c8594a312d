//! Tofu Run - A lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, collisions, game state, events)
//! - `config`: Data-driven game balance
//! - `platform`: Browser input translation
//! - `reporting`: Fire-and-forget score submission
//! - `highscores`: Local leaderboard

pub mod config;
pub mod highscores;
pub mod platform;
pub mod reporting;
pub mod sim;

pub use config::{Config, ConfigError};
pub use highscores::HighScores;
pub use reporting::{ReportError, ScoreReporter, attach_reporter};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, World};

/// Default tuning constants (overridable through [`Config`])
pub mod consts {
    /// Road dimensions
    pub const LANE_WIDTH: f32 = 10.0;
    pub const LANE_LENGTH: f32 = 200.0;

    /// Forward speed (distance units per frame)
    pub const PLAYER_SPEED: f32 = 0.5;
    /// Lateral speed while a direction is held (units per frame)
    pub const PLAYER_LATERAL_SPEED: f32 = 0.15;
    /// Car footprint width; collision radius is half of this
    pub const PLAYER_WIDTH: f32 = 1.2;
    /// Distance kept between the car centre and the road edge
    pub const PLAYER_LANE_MARGIN: f32 = 1.0;

    /// Obstacle spawning (frames between spawns, speed range)
    pub const OBSTACLE_SPAWN_RATE: u32 = 60;
    pub const OBSTACLE_MIN_SPEED: f32 = 0.3;
    pub const OBSTACLE_MAX_SPEED: f32 = 0.5;
    pub const OBSTACLE_LANE_MARGIN: f32 = 1.0;

    /// Collectibles spawn more often and move a little slower
    pub const COLLECT_SPAWN_RATE: u32 = 45;
    pub const COLLECT_MIN_SPEED: f32 = 0.3;
    pub const COLLECT_MAX_SPEED: f32 = 0.4;
    pub const COLLECT_LANE_MARGIN: f32 = 1.5;
    pub const COLLECT_RADIUS: f32 = 0.4;

    /// Entities past this z (behind the car) are removed
    pub const DESPAWN_Z: f32 = 10.0;

    /// Lateral speed above which the tofu starts spilling
    pub const SPILL_THRESHOLD: f32 = 0.8;
    /// Spill added per unit of lateral speed over the threshold
    pub const SPILL_FACTOR: f32 = 0.5;
    pub const MAX_SPILL: f32 = 100.0;

    /// One bonus point per this many distance units
    pub const SCORE_DISTANCE_INTERVAL: f32 = 10.0;

    /// Car roll easing (presentation hint)
    pub const TILT_FACTOR: f32 = 3.0;
    pub const TILT_EASING: f32 = 0.1;
}
