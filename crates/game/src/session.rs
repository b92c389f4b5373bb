//! Session state and the per-frame tick.
//!
//! A session moves through `Idle -> Running -> Over`, and back to
//! `Running` through [`Session::start`], which rebuilds everything from
//! scratch. One call to [`Session::tick`] is one display frame.

use crate::config::GameConfig;
use crate::effects::Effects;
use crate::entity::Player;
use crate::input::Controls;
use crate::physics::step_player;
use crate::spawner::Spawner;
use crate::world::World;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::debug;

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start.
    #[default]
    Idle,
    Running,
    /// Finished, showing the result until restarted.
    Over,
}

/// Emitted exactly once when a running session hits a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    /// Score at the moment of the collision.
    pub score: u32,
    /// Hazard that ended the run.
    pub hazard_id: u32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned_orbs: u32,
    pub spawned_hazards: u32,
    pub collected: u32,
    pub culled: u32,
    pub game_over: Option<GameOver>,
}

/// One player's game.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    phase: Phase,
    score: u32,
    pub player: Player,
    pub world: World,
    pub effects: Effects,
    spawner: Spawner,
    rng: Pcg32,
    tick_count: u64,
    /// Host time of the latest tick, used by the painter.
    clock: f64,
}

impl Session {
    /// Create an idle session with a random seed.
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create an idle session with a fixed seed (replays, tests).
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(&config.player, &config.arena);
        Self {
            config,
            phase: Phase::Idle,
            score: 0,
            player,
            world: World::new(),
            effects: Effects::new(),
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            tick_count: 0,
            clock: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Host time of the latest tick or start.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Start a fresh run from `Idle` or `Over`.
    ///
    /// Returns `false` and changes nothing if a run is already in progress.
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase == Phase::Running {
            return false;
        }
        self.phase = Phase::Running;
        self.score = 0;
        self.player = Player::new(&self.config.player, &self.config.arena);
        self.world.reset();
        self.effects.clear();
        self.spawner.reset();
        self.tick_count = 0;
        self.clock = now;
        debug!("Session started");
        true
    }

    /// Advance one frame at host time `now`.
    ///
    /// Order: spawn, player physics, entity motion, orb pickups, hazard
    /// contact, effects, culling. Pickups resolve before hazards so a
    /// same-tick pickup still counts toward the final score. Outside
    /// `Running` this does nothing.
    pub fn tick(&mut self, now: f64, controls: Controls) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != Phase::Running {
            return report;
        }

        self.tick_count += 1;
        self.clock = now;

        let spawned = self
            .spawner
            .update(now, self.score, &mut self.world, &self.config, &mut self.rng);
        report.spawned_orbs = spawned.orbs;
        report.spawned_hazards = spawned.hazards;

        step_player(&mut self.player, controls, &self.config.player, &self.config.arena);
        self.effects
            .push_trail(self.player.position, self.config.player.trail_length);

        self.world.advance();

        for at in self.world.collect_orbs(&self.player) {
            self.score += 1;
            report.collected += 1;
            self.effects.pickup(at, &self.config.effects, &mut self.rng);
        }

        if let Some(hazard_id) = self.world.hazard_hit(&self.player) {
            report.game_over = self.end(hazard_id);
            return report;
        }

        self.effects.update(&self.config.effects);
        report.culled = self.world.cull(&self.config) as u32;

        report
    }

    /// Terminal transition. Only the first call of a run produces a result.
    fn end(&mut self, hazard_id: u32) -> Option<GameOver> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::Over;
        debug!(
            "Session over after {} ticks: score {} (hazard #{})",
            self.tick_count, self.score, hazard_id
        );
        Some(GameOver {
            score: self.score,
            hazard_id,
        })
    }
}
