//! Platform abstraction layer
//!
//! Turns browser input (keys, touches) into the per-frame [`crate::TickInput`].

pub mod input;

pub use input::{InputState, Key, Side};
