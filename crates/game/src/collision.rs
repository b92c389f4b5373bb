//! Collision detection.
//!
//! This module handles the two hit tests the game needs:
//! - Orb pickup (circle vs circle)
//! - Hazard contact (axis-aligned rectangle vs circle)

use glam::Vec2;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build a rectangle from its center and full size.
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Check whether two circles touch or overlap.
/// `distance² <= (ra + rb)²`
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// Check whether a circle touches or overlaps a rectangle.
///
/// Uses the clamped-distance form:
/// `dx = max(left - cx, 0, cx - right)`, `dy = max(top - cy, 0, cy - bottom)`,
/// hit when `dx² + dy² <= r²`.
#[inline]
pub fn rect_circle_overlap(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let dx = (rect.min.x - center.x).max(0.0).max(center.x - rect.max.x);
    let dy = (rect.min.y - center.y).max(0.0).max(center.y - rect.max.y);
    dx * dx + dy * dy <= radius * radius
}
