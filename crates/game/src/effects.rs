//! Cosmetic effects: pickup sparks, ring waves and the player trail.
//!
//! Effects only consume pickup positions and player positions. They never
//! feed back into score, collisions or phase.

use crate::config::EffectsConfig;
use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;

/// A single spark.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    /// Depth factor in `[0.2, 1.0)`, shrinks the drawn size.
    pub depth: f32,
    pub hue: f32,
}

/// An expanding ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub position: Vec2,
    pub radius: f32,
    pub life: f32,
    pub max_life: f32,
}

/// A recent player position, newest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub alpha: f32,
}

/// Effect containers for a session.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub waves: Vec<Wave>,
    pub trail: VecDeque<TrailPoint>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.waves.clear();
        self.trail.clear();
    }

    /// Spark burst plus one ring at a pickup position.
    pub fn pickup<R: Rng>(&mut self, at: Vec2, config: &EffectsConfig, rng: &mut R) {
        for _ in 0..config.burst_count {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random_range(config.spark_min_speed..config.spark_max_speed);
            self.particles.push(Particle {
                position: at,
                velocity: Vec2::from_angle(angle) * speed,
                life: rng.random_range(config.spark_min_life..config.spark_max_life),
                max_life: config.spark_max_life,
                depth: rng.random::<f32>() * 0.8 + 0.2,
                hue: rng.random_range(config.spark_min_hue..config.spark_max_hue),
            });
        }
        self.waves.push(Wave {
            position: at,
            radius: config.wave_radius,
            life: config.wave_life,
            max_life: config.wave_life,
        });
    }

    /// Push the newest player position, keeping at most `max_len` points.
    pub fn push_trail(&mut self, position: Vec2, max_len: usize) {
        self.trail.push_front(TrailPoint { position, alpha: 1.0 });
        self.trail.truncate(max_len);
        let len = max_len.max(1) as f32;
        for (i, point) in self.trail.iter_mut().enumerate() {
            point.alpha = 1.0 - i as f32 / len;
        }
    }

    /// Integrate and age every effect, then purge the expired ones.
    pub fn update(&mut self, config: &EffectsConfig) {
        for p in &mut self.particles {
            p.position += p.velocity;
            p.life -= config.particle_decay;
        }
        self.particles.retain(|p| p.life > 0.0);

        for w in &mut self.waves {
            w.radius += config.wave_growth;
            w.life -= config.wave_decay;
        }
        self.waves.retain(|w| w.life > 0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.waves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pickup_spawns_burst_and_one_wave() {
        let config = EffectsConfig::default();
        let mut effects = Effects::new();
        let mut rng = Pcg32::seed_from_u64(3);
        effects.pickup(Vec2::new(50.0, 60.0), &config, &mut rng);
        assert_eq!(effects.particles.len(), 14);
        assert_eq!(effects.waves.len(), 1);
        assert_eq!(effects.waves[0].radius, 10.0);
        for p in &effects.particles {
            assert!(p.life >= 26.0 && p.life < 36.0);
            assert!(p.hue >= 210.0 && p.hue < 270.0);
            assert!(p.depth >= 0.2 && p.depth < 1.0);
            let speed = p.velocity.length();
            assert!(speed > 1.19 && speed < 3.41);
        }
    }

    #[test]
    fn test_wave_grows_then_expires() {
        let config = EffectsConfig::default();
        let mut effects = Effects::new();
        effects.pickup(Vec2::ZERO, &config, &mut Pcg32::seed_from_u64(1));
        effects.update(&config);
        assert!((effects.waves[0].radius - 15.4).abs() < 1e-4);
        // 22 / 1.6 = 13.75 ticks of life.
        for _ in 0..12 {
            effects.update(&config);
        }
        assert_eq!(effects.waves.len(), 1);
        effects.update(&config);
        assert!(effects.waves.is_empty());
    }

    #[test]
    fn test_all_effects_expire() {
        let config = EffectsConfig::default();
        let mut effects = Effects::new();
        let mut rng = Pcg32::seed_from_u64(9);
        effects.pickup(Vec2::ZERO, &config, &mut rng);
        effects.pickup(Vec2::ONE, &config, &mut rng);
        for _ in 0..23 {
            effects.update(&config);
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn test_trail_is_bounded_and_fades() {
        let mut effects = Effects::new();
        for i in 0..20 {
            effects.push_trail(Vec2::new(i as f32, 0.0), 14);
        }
        assert_eq!(effects.trail.len(), 14);
        assert_eq!(effects.trail[0].position.x, 19.0);
        assert_eq!(effects.trail[0].alpha, 1.0);
        assert!((effects.trail[13].alpha - 1.0 / 14.0).abs() < 1e-6);
    }
}
