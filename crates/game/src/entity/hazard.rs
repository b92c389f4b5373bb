//! Lethal hazard bar.

use super::Drifter;
use crate::collision::Rect;
use glam::Vec2;

/// A spinning bar that ends the session on contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub id: u32,
    /// Center position.
    pub position: Vec2,
    /// Width and height of the unrotated bar.
    pub size: Vec2,
    pub velocity: Vec2,
    /// Rotation in radians. Only used for drawing.
    pub rotation: f32,
    /// Angular velocity in radians per tick.
    pub spin: f32,
}

impl Hazard {
    pub fn new(id: u32, position: Vec2, size: Vec2, velocity: Vec2, rotation: f32, spin: f32) -> Self {
        Self {
            id,
            position,
            size,
            velocity,
            rotation,
            spin,
        }
    }

    /// Unrotated bounding box used for hit testing.
    ///
    /// Rotation is ignored: the hit box is the axis-aligned
    /// rectangle of the bar's own width and height around its center.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }
}

impl Drifter for Hazard {
    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn advance(&mut self) {
        self.position += self.velocity;
        self.rotation += self.spin;
    }
}
