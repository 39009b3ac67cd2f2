//! One-way platform landing
//!
//! Platforms only collide with a body falling onto their top edge: the
//! player passes through them from below and from the sides.

use super::aabb::Aabb;

/// Result of a landing check
#[derive(Debug, Clone)]
pub struct Landing {
    /// Whether the body came to rest on the platform this step
    pub hit: bool,
    /// Center y that puts the body's bottom on the platform top
    pub rest_y: f32,
}

impl Landing {
    pub fn miss() -> Self {
        Self {
            hit: false,
            rest_y: 0.0,
        }
    }
}

/// Check whether `body` crossed the top of `platform` this step
///
/// `prev_bottom` is the body's bottom edge before integration and `vel_y`
/// its vertical velocity; only downward motion can land.
pub fn land_on_platform(prev_bottom: f32, vel_y: f32, body: &Aabb, platform: &Aabb) -> Landing {
    if vel_y < 0.0 || !body.overlaps_x(platform) {
        return Landing::miss();
    }

    let top = platform.top();
    if prev_bottom <= top && body.bottom() >= top {
        Landing {
            hit: true,
            rest_y: top - body.half.y,
        }
    } else {
        Landing::miss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn platform() -> Aabb {
        Aabb::new(Vec2::new(200.0, 300.0), Vec2::new(190.0, 47.0))
    }

    #[test]
    fn test_lands_when_falling_through_top() {
        // Platform top is at 276.5; body bottom moves from 270 to 280
        let body = Aabb::new(Vec2::new(210.0, 280.0 - 47.5), Vec2::new(60.0, 95.0));
        let landing = land_on_platform(270.0, 120.0, &body, &platform());
        assert!(landing.hit);
        assert_eq!(landing.rest_y, 276.5 - 47.5);
    }

    #[test]
    fn test_rising_body_passes_through() {
        let body = Aabb::new(Vec2::new(210.0, 280.0 - 47.5), Vec2::new(60.0, 95.0));
        assert!(!land_on_platform(270.0, -300.0, &body, &platform()).hit);
    }

    #[test]
    fn test_miss_horizontally() {
        let body = Aabb::new(Vec2::new(400.0, 280.0 - 47.5), Vec2::new(60.0, 95.0));
        assert!(!land_on_platform(270.0, 120.0, &body, &platform()).hit);
    }

    #[test]
    fn test_already_below_top() {
        // Bottom started under the top edge: falling past, not landing
        let body = Aabb::new(Vec2::new(210.0, 300.0), Vec2::new(60.0, 95.0));
        assert!(!land_on_platform(340.0, 120.0, &body, &platform()).hit);
    }
}
