//! The player-controlled orb.

use crate::config::{ArenaConfig, PlayerConfig};
use glam::Vec2;

/// Player state. One per session, reset on every start.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
}

impl Player {
    /// Create a player at the configured start position.
    pub fn new(player: &PlayerConfig, arena: &ArenaConfig) -> Self {
        Self {
            position: Self::start_position(player, arena),
            velocity: Vec2::ZERO,
            radius: player.radius,
        }
    }

    fn start_position(player: &PlayerConfig, arena: &ArenaConfig) -> Vec2 {
        Vec2::new(arena.width * player.start_x, arena.height * player.start_y)
    }

    /// Radius is fixed for the lifetime of the player.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Clamp the position so the whole body stays inside the arena.
    #[inline]
    pub fn check_border(&mut self, arena: &ArenaConfig) {
        let r = self.radius;
        self.position.x = self.position.x.clamp(r, arena.width - r);
        self.position.y = self.position.y.clamp(r, arena.height - r);
    }
}
