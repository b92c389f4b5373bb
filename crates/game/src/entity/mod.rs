//! Game entities.
//!
//! This module defines the player and the two drifting entity kinds.

mod hazard;
mod orb;
mod player;

pub use hazard::Hazard;
pub use orb::Orb;
pub use player::Player;

use glam::Vec2;

/// Common behaviour of spawned entities that drift across the arena.
pub trait Drifter {
    /// Session-unique id.
    fn id(&self) -> u32;

    /// Center position.
    fn position(&self) -> Vec2;

    /// Advance by one tick of motion.
    fn advance(&mut self);
}
