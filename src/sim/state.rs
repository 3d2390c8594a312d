//! Round state: score, distance, spill and the play/over lifecycle
//!
//! `GameState` is the only place outcome transitions happen. Every mutation
//! goes through a method that also announces it on the [`EventBus`].

use serde::{Deserialize, Serialize};

use super::events::{EventBus, GameEvent};
use crate::config::Config;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing started yet
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Round ended, waiting for `start()`
    GameOver,
}

/// The subset of [`Config`] that drives scoring and spill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub base_speed: f32,
    pub score_distance_interval: f32,
    pub spill_threshold: f32,
    pub spill_factor: f32,
    pub max_spill: f32,
}

impl From<&Config> for Rules {
    fn from(config: &Config) -> Self {
        Self {
            base_speed: config.base_speed,
            score_distance_interval: config.score_distance_interval,
            spill_threshold: config.spill_threshold,
            spill_factor: config.spill_factor,
            max_spill: config.max_spill,
        }
    }
}

/// Authoritative round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Collectibles picked up plus distance bonuses
    pub score: u64,
    /// Distance travelled this round
    pub distance: f64,
    /// Spill meter, 0..=max_spill
    pub spill: f32,
    /// Forward speed (distance per frame)
    pub speed: f32,
    /// Last lateral velocity fed in by the step
    pub lateral_velocity: f32,
    rules: Rules,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        let rules = Rules::from(config);
        Self {
            phase: GamePhase::Menu,
            score: 0,
            distance: 0.0,
            spill: 0.0,
            speed: rules.base_speed,
            lateral_velocity: 0.0,
            rules,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn reset(&mut self) {
        self.score = 0;
        self.distance = 0.0;
        self.spill = 0.0;
        self.speed = self.rules.base_speed;
        self.lateral_velocity = 0.0;
    }

    /// Begin a fresh round. Calling this mid-round restarts it.
    pub fn start(&mut self, bus: &mut EventBus) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Round started");
        bus.emit(GameEvent::GameStarted);
    }

    /// End the round. Only the first call per round has any effect;
    /// returns whether this call ended it.
    pub fn game_over(&mut self, bus: &mut EventBus) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} after {:.1} units",
            self.score,
            self.distance
        );
        bus.emit(GameEvent::GameOver { score: self.score });
        true
    }

    pub fn add_score(&mut self, points: u64, bus: &mut EventBus) {
        self.score += points;
        bus.emit(GameEvent::ScoreChanged { score: self.score });
    }

    /// Travel `d` units, awarding a point for each interval boundary crossed
    pub fn add_distance(&mut self, d: f32, bus: &mut EventBus) {
        let interval = f64::from(self.rules.score_distance_interval);
        let before = self.distance;
        self.distance += f64::from(d.max(0.0));

        if interval > 0.0 {
            let crossed = (self.distance / interval).floor() - (before / interval).floor();
            for _ in 0..crossed.max(0.0) as u64 {
                self.add_score(1, bus);
            }
        }
    }

    /// Record the lateral velocity; hard turns spill tofu
    pub fn register_lateral_input(&mut self, velocity: f32, bus: &mut EventBus) {
        self.lateral_velocity = velocity;
        if velocity.abs() > self.rules.spill_threshold {
            self.spill_tofu(velocity.abs() * self.rules.spill_factor, bus);
        }
    }

    fn spill_tofu(&mut self, amount: f32, bus: &mut EventBus) {
        self.spill = (self.spill + amount).min(self.rules.max_spill);
        log::debug!("Tofu spilling: {:.1}/{}", self.spill, self.rules.max_spill);
        bus.emit(GameEvent::SpillChanged { spill: self.spill });
        if self.spill >= self.rules.max_spill {
            self.game_over(bus);
        }
    }
}
