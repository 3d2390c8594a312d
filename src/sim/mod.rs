//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per rendered frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::circles_overlap;
pub use entity::{Entity, EntityKind, EntityPool, ObstacleKind};
pub use events::{EventBus, EventKind, GameEvent, SubscriptionId};
pub use state::{GamePhase, GameState, Rules};
pub use tick::{TickInput, autopilot, tick};
pub use world::{PLAYER_Z, Player, World};
