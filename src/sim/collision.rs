//! Ground-plane collision
//!
//! Everything is a circle in the x-z plane; height is ignored.

use glam::Vec2;

/// True when two circles overlap (touching is not a hit)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance_squared(b) < (a_radius + b_radius).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 0.6, Vec2::new(0.0, -0.9), 0.4));
        assert!(circles_overlap(Vec2::new(1.0, 0.0), 0.6, Vec2::new(0.5, 0.5), 0.3));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 0.5, Vec2::new(0.0, -1.0), 0.5));
        assert!(!circles_overlap(Vec2::ZERO, 0.6, Vec2::new(3.0, 0.0), 0.5));
    }

    #[test]
    fn test_uses_both_axes() {
        // Each axis alone is inside the radius sum, the diagonal is not
        assert!(!circles_overlap(Vec2::ZERO, 0.5, Vec2::new(0.8, 0.8), 0.5));
    }
}
