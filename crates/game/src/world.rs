//! World state management.
//!
//! Owns the orb and hazard collections of one session.

use crate::collision::{circles_overlap, rect_circle_overlap};
use crate::config::GameConfig;
use crate::entity::{Drifter, Hazard, Orb, Player};
use glam::Vec2;

/// Entity containers for a session.
#[derive(Debug, Clone)]
pub struct World {
    /// Next entity id to assign. Shared by orbs and hazards.
    next_id: u32,
    pub orbs: Vec<Orb>,
    pub hazards: Vec<Hazard>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            orbs: Vec::new(),
            hazards: Vec::new(),
        }
    }

    /// Drop every entity and restart id assignment.
    pub fn reset(&mut self) {
        self.next_id = 1;
        self.orbs.clear();
        self.hazards.clear();
    }

    /// Allocate the next entity id.
    #[inline]
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_orb(&mut self, orb: Orb) {
        self.orbs.push(orb);
    }

    pub fn add_hazard(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    /// Move every orb and hazard by one tick.
    pub fn advance(&mut self) {
        self.orbs.iter_mut().for_each(Drifter::advance);
        self.hazards.iter_mut().for_each(Drifter::advance);
    }

    /// Remove every orb touching the player.
    /// Returns the positions of the collected orbs, one entry per orb.
    pub fn collect_orbs(&mut self, player: &Player) -> Vec<Vec2> {
        let mut collected = Vec::new();
        self.orbs.retain(|orb| {
            if circles_overlap(orb.position, orb.radius, player.position, player.radius()) {
                collected.push(orb.position);
                false
            } else {
                true
            }
        });
        collected
    }

    /// Id of the first hazard touching the player, if any.
    pub fn hazard_hit(&self, player: &Player) -> Option<u32> {
        self.hazards
            .iter()
            .find(|h| rect_circle_overlap(&h.bounds(), player.position, player.radius()))
            .map(|h| h.id)
    }

    /// Remove entities whose center has left the arena plus its margin.
    /// Returns the number of removed entities.
    pub fn cull(&mut self, config: &GameConfig) -> usize {
        let before = self.orbs.len() + self.hazards.len();
        let arena = &config.arena;
        retain_in_view(&mut self.orbs, |p| arena.contains(p.x, p.y, config.orb.cull_margin));
        retain_in_view(&mut self.hazards, |p| arena.contains(p.x, p.y, config.hazard.cull_margin));
        before - (self.orbs.len() + self.hazards.len())
    }

    pub fn entity_count(&self) -> usize {
        self.orbs.len() + self.hazards.len()
    }
}

fn retain_in_view<T: Drifter>(items: &mut Vec<T>, in_view: impl Fn(Vec2) -> bool) {
    items.retain(|item| in_view(item.position()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArenaConfig, PlayerConfig};

    fn player() -> Player {
        Player::new(&PlayerConfig::default(), &ArenaConfig::default())
    }

    fn orb_at(world: &mut World, pos: Vec2) -> u32 {
        let id = world.next_id();
        world.add_orb(Orb::new(id, pos, 10.0, Vec2::ZERO));
        id
    }

    #[test]
    fn test_ids_are_monotonic_and_reset() {
        let mut world = World::new();
        assert_eq!(world.next_id(), 1);
        assert_eq!(world.next_id(), 2);
        world.reset();
        assert_eq!(world.next_id(), 1);
    }

    #[test]
    fn test_collect_adjacent_orbs_without_skipping() {
        let mut world = World::new();
        let p = player();
        orb_at(&mut world, p.position);
        orb_at(&mut world, p.position + Vec2::new(5.0, 0.0));
        let far = orb_at(&mut world, p.position + Vec2::new(200.0, 0.0));
        orb_at(&mut world, p.position + Vec2::new(0.0, -5.0));

        let collected = world.collect_orbs(&p);
        assert_eq!(collected.len(), 3);
        assert_eq!(world.orbs.len(), 1);
        assert_eq!(world.orbs[0].id, far);

        // Nothing left to collect: no double counting.
        assert!(world.collect_orbs(&p).is_empty());
    }

    #[test]
    fn test_hazard_hit_ignores_rotation() {
        let mut world = World::new();
        let p = player();
        let id = world.next_id();
        // Bar 40x10 centred 20 units to the right of the player: the left
        // edge sits at +0, well within the player's radius.
        world.add_hazard(Hazard::new(
            id,
            p.position + Vec2::new(20.0, 0.0),
            Vec2::new(40.0, 10.0),
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
            0.0,
        ));
        assert_eq!(world.hazard_hit(&p), Some(id));
    }

    #[test]
    fn test_hazard_miss() {
        let mut world = World::new();
        let p = player();
        let id = world.next_id();
        world.add_hazard(Hazard::new(
            id,
            p.position + Vec2::new(0.0, 40.0),
            Vec2::new(40.0, 10.0),
            Vec2::ZERO,
            0.0,
            0.0,
        ));
        // Top edge at +35, player reaches +12.
        assert_eq!(world.hazard_hit(&p), None);
    }

    #[test]
    fn test_cull_margins() {
        let config = GameConfig::default();
        let mut world = World::new();
        orb_at(&mut world, Vec2::new(-39.0, 100.0));
        orb_at(&mut world, Vec2::new(-41.0, 100.0));
        let id = world.next_id();
        world.add_hazard(Hazard::new(id, Vec2::new(-79.0, 100.0), Vec2::new(30.0, 10.0), Vec2::ZERO, 0.0, 0.0));
        let id = world.next_id();
        world.add_hazard(Hazard::new(id, Vec2::new(100.0, 721.0), Vec2::new(30.0, 10.0), Vec2::ZERO, 0.0, 0.0));

        assert_eq!(world.cull(&config), 2);
        assert_eq!(world.orbs.len(), 1);
        assert_eq!(world.hazards.len(), 1);
        assert_eq!(world.hazards[0].position.x, -79.0);
    }

    #[test]
    fn test_advance_moves_and_spins() {
        let mut world = World::new();
        let id = world.next_id();
        world.add_hazard(Hazard::new(id, Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, 1.0), 0.0, 0.5));
        world.advance();
        assert_eq!(world.hazards[0].position, Vec2::new(2.0, 1.0));
        assert_eq!(world.hazards[0].rotation, 0.5);
    }
}
