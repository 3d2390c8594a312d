//! Keyboard and touch to held-direction translation

use std::collections::HashMap;

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Start,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` / `.code` pair
    pub fn from_dom(key: &str, code: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            _ if code == "Space" => Some(Key::Start),
            _ => None,
        }
    }
}

/// Which half of the screen a touch is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn of(x: f32, screen_width: f32) -> Self {
        if x < screen_width / 2.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Held keys plus active touches, collapsed into a [`TickInput`] each frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_key: bool,
    right_key: bool,
    /// Touch identifier -> side it is currently on
    touches: HashMap<i32, Side>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_key = true,
            Key::Right => self.right_key = true,
            Key::Start => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_key = false,
            Key::Right => self.right_key = false,
            Key::Start => {}
        }
    }

    /// A touch began or slid (possibly across the centre line)
    pub fn touch_moved(&mut self, id: i32, side: Side) {
        self.touches.insert(id, side);
    }

    /// A touch ended or was cancelled
    pub fn touch_ended(&mut self, id: i32) {
        self.touches.remove(&id);
    }

    /// Forget everything held (e.g. on round start)
    pub fn release_all(&mut self) {
        self.left_key = false;
        self.right_key = false;
        self.touches.clear();
    }

    pub fn tick_input(&self) -> TickInput {
        let touch_left = self.touches.values().any(|s| *s == Side::Left);
        let touch_right = self.touches.values().any(|s| *s == Side::Right);

        // Touching both halves cancels out
        let (touch_left, touch_right) = (touch_left && !touch_right, touch_right && !touch_left);

        TickInput {
            left: self.left_key || touch_left,
            right: self.right_key || touch_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("ArrowLeft", "ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("d", "KeyD"), Some(Key::Right));
        assert_eq!(Key::from_dom(" ", "Space"), Some(Key::Start));
        assert_eq!(Key::from_dom("w", "KeyW"), None);
    }

    #[test]
    fn test_keys_held_and_released() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert_eq!(input.tick_input(), TickInput { left: true, right: false });

        input.key_down(Key::Right);
        assert_eq!(input.tick_input().direction(), 0.0);

        input.key_up(Key::Left);
        assert_eq!(input.tick_input().direction(), 1.0);
    }

    #[test]
    fn test_touch_halves() {
        let mut input = InputState::new();
        input.touch_moved(1, Side::of(100.0, 800.0));
        assert_eq!(input.tick_input().direction(), -1.0);

        input.touch_moved(2, Side::of(700.0, 800.0));
        assert_eq!(input.tick_input(), TickInput::default());

        input.touch_ended(1);
        assert_eq!(input.tick_input().direction(), 1.0);

        // Finger slides across the centre
        input.touch_moved(2, Side::of(300.0, 800.0));
        assert_eq!(input.tick_input().direction(), -1.0);

        input.release_all();
        assert_eq!(input.tick_input(), TickInput::default());
    }
}
