//! Collectible orb.

use super::Drifter;
use glam::Vec2;

/// An orb the player collects for one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub id: u32,
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
}

impl Orb {
    pub fn new(id: u32, position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            radius,
            velocity,
        }
    }
}

impl Drifter for Orb {
    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn advance(&mut self) {
        self.position += self.velocity;
    }
}
