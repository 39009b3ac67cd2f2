//! Axis-aligned boxes for the reference host
//!
//! Boxes are stored center + half extents, matching how bodies are placed
//! (sprite origin at the center).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Top edge (smaller y)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    /// Bottom edge (larger y)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict overlap on the x axis (touching edges do not count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half.x + other.half.x
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && (self.center.y - other.center.y).abs() < self.half.y + other.half.y
    }
}
