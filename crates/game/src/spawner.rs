//! Entity spawner.
//!
//! Orbs arrive on a fixed cadence, hazards on a cadence that shortens as
//! the score grows. Both enter from a uniformly chosen arena edge just
//! outside the visible area and move inward.

use crate::config::{ArenaConfig, GameConfig, HazardConfig, OrbConfig};
use crate::entity::{Hazard, Orb};
use crate::world::World;
use glam::Vec2;
use rand::Rng;

/// Arena edge an entity enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Pick an edge uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Spawn point `offset` units outside this edge and a velocity whose
    /// inward component is `speed` and whose lateral component is drawn
    /// from `[-lateral/2, lateral/2)`.
    pub fn entry<R: Rng>(
        self,
        rng: &mut R,
        arena: &ArenaConfig,
        offset: f32,
        speed: f32,
        lateral: f32,
    ) -> (Vec2, Vec2) {
        let drift = (rng.random::<f32>() - 0.5) * lateral;
        match self {
            Edge::Top => (
                Vec2::new(rng.random::<f32>() * arena.width, -offset),
                Vec2::new(drift, speed),
            ),
            Edge::Right => (
                Vec2::new(arena.width + offset, rng.random::<f32>() * arena.height),
                Vec2::new(-speed, drift),
            ),
            Edge::Bottom => (
                Vec2::new(rng.random::<f32>() * arena.width, arena.height + offset),
                Vec2::new(drift, -speed),
            ),
            Edge::Left => (
                Vec2::new(-offset, rng.random::<f32>() * arena.height),
                Vec2::new(speed, drift),
            ),
        }
    }
}

/// What the spawner created during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub orbs: u32,
    pub hazards: u32,
}

/// Spawn cadence tracker.
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    /// Host time of the last orb spawn. `None` spawns on the first update.
    last_orb: Option<f64>,
    last_hazard: Option<f64>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.last_orb = None;
        self.last_hazard = None;
    }

    /// Spawn whatever is due at host time `now`.
    pub fn update<R: Rng>(
        &mut self,
        now: f64,
        score: u32,
        world: &mut World,
        config: &GameConfig,
        rng: &mut R,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        if due(self.last_orb, now, config.orb.spawn_interval_ms) {
            let id = world.next_id();
            world.add_orb(spawn_orb(id, rng, &config.orb, &config.arena));
            self.last_orb = Some(now);
            report.orbs += 1;
        }

        if due(self.last_hazard, now, config.hazard.interval_for(score)) {
            let id = world.next_id();
            world.add_hazard(spawn_hazard(id, rng, &config.hazard, &config.arena));
            self.last_hazard = Some(now);
            report.hazards += 1;
        }

        report
    }
}

#[inline]
fn due(last: Option<f64>, now: f64, interval: f64) -> bool {
    match last {
        None => true,
        Some(t) => now - t > interval,
    }
}

/// Create one orb entering from a random edge.
pub fn spawn_orb<R: Rng>(id: u32, rng: &mut R, orb: &OrbConfig, arena: &ArenaConfig) -> Orb {
    let radius = rng.random_range(orb.min_radius..orb.max_radius);
    let speed = rng.random_range(orb.min_speed..orb.max_speed);
    let (position, velocity) = Edge::random(rng).entry(rng, arena, orb.spawn_offset, speed, orb.lateral_jitter);
    Orb::new(id, position, radius, velocity)
}

/// Create one hazard entering from a random edge.
pub fn spawn_hazard<R: Rng>(id: u32, rng: &mut R, hazard: &HazardConfig, arena: &ArenaConfig) -> Hazard {
    let size = Vec2::new(
        rng.random_range(hazard.min_width..hazard.max_width),
        rng.random_range(hazard.min_height..hazard.max_height),
    );
    let speed = rng.random_range(hazard.min_speed..hazard.max_speed);
    let (position, velocity) =
        Edge::random(rng).entry(rng, arena, hazard.spawn_offset, speed, hazard.lateral_jitter);
    let rotation = rng.random::<f32>() * std::f32::consts::PI;
    let spin = (rng.random::<f32>() - 0.5) * hazard.spin_jitter;
    Hazard::new(id, position, size, velocity, rotation, spin)
}
