//! Game balance configuration
//!
//! Defaults come from [`crate::consts`]. A JSON tuning override can be
//! stored in LocalStorage; it is read once at startup and never changes
//! while a [`crate::World`] is alive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning override
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("inconsistent tuning: {0}")]
    Invalid(String),
}

/// Tunable game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Road ===
    pub lane_width: f32,
    pub lane_length: f32,
    /// Entities with z beyond this are despawned
    pub despawn_z: f32,

    // === Player ===
    pub base_speed: f32,
    pub lateral_speed: f32,
    pub player_width: f32,
    pub player_margin: f32,

    // === Obstacles ===
    /// Frames between spawns (0 disables)
    pub obstacle_spawn_rate: u32,
    pub obstacle_min_speed: f32,
    pub obstacle_max_speed: f32,
    pub obstacle_margin: f32,

    // === Collectibles ===
    /// Frames between spawns (0 disables)
    pub collect_spawn_rate: u32,
    pub collect_min_speed: f32,
    pub collect_max_speed: f32,
    pub collect_margin: f32,
    pub collect_radius: f32,

    // === Scoring / spill ===
    pub score_distance_interval: f32,
    pub spill_threshold: f32,
    pub spill_factor: f32,
    pub max_spill: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_length: LANE_LENGTH,
            despawn_z: DESPAWN_Z,

            base_speed: PLAYER_SPEED,
            lateral_speed: PLAYER_LATERAL_SPEED,
            player_width: PLAYER_WIDTH,
            player_margin: PLAYER_LANE_MARGIN,

            obstacle_spawn_rate: OBSTACLE_SPAWN_RATE,
            obstacle_min_speed: OBSTACLE_MIN_SPEED,
            obstacle_max_speed: OBSTACLE_MAX_SPEED,
            obstacle_margin: OBSTACLE_LANE_MARGIN,

            collect_spawn_rate: COLLECT_SPAWN_RATE,
            collect_min_speed: COLLECT_MIN_SPEED,
            collect_max_speed: COLLECT_MAX_SPEED,
            collect_margin: COLLECT_LANE_MARGIN,
            collect_radius: COLLECT_RADIUS,

            score_distance_interval: SCORE_DISTANCE_INTERVAL,
            spill_threshold: SPILL_THRESHOLD,
            spill_factor: SPILL_FACTOR,
            max_spill: MAX_SPILL,
        }
    }
}

impl Config {
    /// Parse a tuning override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry and speed ranges the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        };

        let positive = [
            ("lane_width", self.lane_width),
            ("lane_length", self.lane_length),
            ("base_speed", self.base_speed),
            ("player_width", self.player_width),
            ("obstacle_min_speed", self.obstacle_min_speed),
            ("collect_min_speed", self.collect_min_speed),
            ("collect_radius", self.collect_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }

        let half_lane = self.lane_width / 2.0;
        if self.player_margin < 0.0 || self.player_margin > half_lane {
            return invalid("player_margin exceeds half the lane width");
        }
        if self.obstacle_margin > half_lane || self.collect_margin > half_lane {
            return invalid("spawn margin exceeds half the lane width");
        }
        if self.obstacle_min_speed > self.obstacle_max_speed {
            return invalid("obstacle_min_speed above obstacle_max_speed");
        }
        if self.collect_min_speed > self.collect_max_speed {
            return invalid("collect_min_speed above collect_max_speed");
        }
        if self.lateral_speed < 0.0 || self.max_spill <= 0.0 {
            return invalid("lateral_speed must not be negative and max_spill must be positive");
        }
        Ok(())
    }

    /// Player collision radius
    #[inline]
    pub fn player_radius(&self) -> f32 {
        self.player_width / 2.0
    }

    /// Allowed player x range
    pub fn player_x_bounds(&self) -> (f32, f32) {
        let half = (self.lane_width / 2.0 - self.player_margin).max(0.0);
        (-half, half)
    }

    /// z where new entities appear (far end of the lane)
    #[inline]
    pub fn spawn_z(&self) -> f32 {
        -self.lane_length / 2.0
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tofu_run_tuning";

    /// Load the tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
