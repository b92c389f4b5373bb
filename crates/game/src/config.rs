//! Game tuning.
//!
//! All gameplay constants live here so the simulation can be driven with
//! alternative values in tests. Time values are in milliseconds of host
//! frame time; distances and speeds are in arena units per tick.

use serde::{Deserialize, Serialize};

/// Root tuning structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub orb: OrbConfig,
    #[serde(default)]
    pub hazard: HazardConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
}

/// Logical arena dimensions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArenaConfig {
    #[serde(default = "default_arena_width")]
    pub width: f32,
    #[serde(default = "default_arena_height")]
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_width(),
            height: default_arena_height(),
        }
    }
}

impl ArenaConfig {
    /// Whether a point lies inside the arena grown by `margin` on every side.
    #[inline]
    pub fn contains(&self, x: f32, y: f32, margin: f32) -> bool {
        x > -margin && y > -margin && x < self.width + margin && y < self.height + margin
    }
}

fn default_arena_width() -> f32 {
    560.0
}
fn default_arena_height() -> f32 {
    640.0
}

/// Player movement configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_radius")]
    pub radius: f32,
    /// Start position as a fraction of the arena size.
    #[serde(default = "default_player_start_x")]
    pub start_x: f32,
    #[serde(default = "default_player_start_y")]
    pub start_y: f32,
    /// Velocity added per tick while a direction is held.
    #[serde(default = "default_player_accel")]
    pub accel: f32,
    /// Per-axis speed cap.
    #[serde(default = "default_player_max_speed")]
    pub max_speed: f32,
    /// Velocity multiplier applied after integrating position.
    #[serde(default = "default_player_friction")]
    pub friction: f32,
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: default_player_radius(),
            start_x: default_player_start_x(),
            start_y: default_player_start_y(),
            accel: default_player_accel(),
            max_speed: default_player_max_speed(),
            friction: default_player_friction(),
            trail_length: default_trail_length(),
        }
    }
}

fn default_player_radius() -> f32 {
    12.0
}
fn default_player_start_x() -> f32 {
    0.5
}
fn default_player_start_y() -> f32 {
    0.75
}
fn default_player_accel() -> f32 {
    0.9
}
fn default_player_max_speed() -> f32 {
    4.2
}
fn default_player_friction() -> f32 {
    0.92
}
fn default_trail_length() -> usize {
    14
}

/// Orb spawning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrbConfig {
    #[serde(default = "default_orb_interval")]
    pub spawn_interval_ms: f64,
    #[serde(default = "default_orb_min_radius")]
    pub min_radius: f32,
    #[serde(default = "default_orb_max_radius")]
    pub max_radius: f32,
    #[serde(default = "default_orb_min_speed")]
    pub min_speed: f32,
    #[serde(default = "default_orb_max_speed")]
    pub max_speed: f32,
    /// Full width of the lateral speed band, centred on zero.
    #[serde(default = "default_orb_lateral")]
    pub lateral_jitter: f32,
    /// Distance outside the edge at which orbs appear.
    #[serde(default = "default_orb_offset")]
    pub spawn_offset: f32,
    #[serde(default = "default_orb_cull_margin")]
    pub cull_margin: f32,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: default_orb_interval(),
            min_radius: default_orb_min_radius(),
            max_radius: default_orb_max_radius(),
            min_speed: default_orb_min_speed(),
            max_speed: default_orb_max_speed(),
            lateral_jitter: default_orb_lateral(),
            spawn_offset: default_orb_offset(),
            cull_margin: default_orb_cull_margin(),
        }
    }
}

fn default_orb_interval() -> f64 {
    700.0
}
fn default_orb_min_radius() -> f32 {
    7.0
}
fn default_orb_max_radius() -> f32 {
    13.0
}
fn default_orb_min_speed() -> f32 {
    1.0
}
fn default_orb_max_speed() -> f32 {
    2.5
}
fn default_orb_lateral() -> f32 {
    0.6
}
fn default_orb_offset() -> f32 {
    10.0
}
fn default_orb_cull_margin() -> f32 {
    40.0
}

/// Hazard spawning configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HazardConfig {
    #[serde(default = "default_hazard_base_interval")]
    pub base_interval_ms: f64,
    /// Interval reduction per point of score.
    #[serde(default = "default_hazard_interval_step")]
    pub interval_step_ms: f64,
    #[serde(default = "default_hazard_min_interval")]
    pub min_interval_ms: f64,
    #[serde(default = "default_hazard_min_width")]
    pub min_width: f32,
    #[serde(default = "default_hazard_max_width")]
    pub max_width: f32,
    #[serde(default = "default_hazard_min_height")]
    pub min_height: f32,
    #[serde(default = "default_hazard_max_height")]
    pub max_height: f32,
    #[serde(default = "default_hazard_min_speed")]
    pub min_speed: f32,
    #[serde(default = "default_hazard_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_hazard_lateral")]
    pub lateral_jitter: f32,
    /// Full width of the angular velocity band, centred on zero.
    #[serde(default = "default_hazard_spin")]
    pub spin_jitter: f32,
    #[serde(default = "default_hazard_offset")]
    pub spawn_offset: f32,
    #[serde(default = "default_hazard_cull_margin")]
    pub cull_margin: f32,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: default_hazard_base_interval(),
            interval_step_ms: default_hazard_interval_step(),
            min_interval_ms: default_hazard_min_interval(),
            min_width: default_hazard_min_width(),
            max_width: default_hazard_max_width(),
            min_height: default_hazard_min_height(),
            max_height: default_hazard_max_height(),
            min_speed: default_hazard_min_speed(),
            max_speed: default_hazard_max_speed(),
            lateral_jitter: default_hazard_lateral(),
            spin_jitter: default_hazard_spin(),
            spawn_offset: default_hazard_offset(),
            cull_margin: default_hazard_cull_margin(),
        }
    }
}

impl HazardConfig {
    /// Hazard cadence for the current score: `max(min, base - step * score)`.
    pub fn interval_for(&self, score: u32) -> f64 {
        (self.base_interval_ms - self.interval_step_ms * score as f64).max(self.min_interval_ms)
    }
}

fn default_hazard_base_interval() -> f64 {
    1200.0
}
fn default_hazard_interval_step() -> f64 {
    20.0
}
fn default_hazard_min_interval() -> f64 {
    520.0
}
fn default_hazard_min_width() -> f32 {
    24.0
}
fn default_hazard_max_width() -> f32 {
    50.0
}
fn default_hazard_min_height() -> f32 {
    10.0
}
fn default_hazard_max_height() -> f32 {
    22.0
}
fn default_hazard_min_speed() -> f32 {
    1.6
}
fn default_hazard_max_speed() -> f32 {
    2.8
}
fn default_hazard_lateral() -> f32 {
    0.4
}
fn default_hazard_spin() -> f32 {
    0.06
}
fn default_hazard_offset() -> f32 {
    20.0
}
fn default_hazard_cull_margin() -> f32 {
    80.0
}

/// Pickup effect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EffectsConfig {
    #[serde(default = "default_burst_count")]
    pub burst_count: usize,
    #[serde(default = "default_spark_min_speed")]
    pub spark_min_speed: f32,
    #[serde(default = "default_spark_max_speed")]
    pub spark_max_speed: f32,
    #[serde(default = "default_spark_min_life")]
    pub spark_min_life: f32,
    #[serde(default = "default_spark_max_life")]
    pub spark_max_life: f32,
    #[serde(default = "default_spark_min_hue")]
    pub spark_min_hue: f32,
    #[serde(default = "default_spark_max_hue")]
    pub spark_max_hue: f32,
    #[serde(default = "default_particle_decay")]
    pub particle_decay: f32,
    #[serde(default = "default_wave_radius")]
    pub wave_radius: f32,
    #[serde(default = "default_wave_life")]
    pub wave_life: f32,
    #[serde(default = "default_wave_growth")]
    pub wave_growth: f32,
    #[serde(default = "default_wave_decay")]
    pub wave_decay: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            burst_count: default_burst_count(),
            spark_min_speed: default_spark_min_speed(),
            spark_max_speed: default_spark_max_speed(),
            spark_min_life: default_spark_min_life(),
            spark_max_life: default_spark_max_life(),
            spark_min_hue: default_spark_min_hue(),
            spark_max_hue: default_spark_max_hue(),
            particle_decay: default_particle_decay(),
            wave_radius: default_wave_radius(),
            wave_life: default_wave_life(),
            wave_growth: default_wave_growth(),
            wave_decay: default_wave_decay(),
        }
    }
}

fn default_burst_count() -> usize {
    14
}
fn default_spark_min_speed() -> f32 {
    1.2
}
fn default_spark_max_speed() -> f32 {
    3.4
}
fn default_spark_min_life() -> f32 {
    26.0
}
fn default_spark_max_life() -> f32 {
    36.0
}
fn default_spark_min_hue() -> f32 {
    210.0
}
fn default_spark_max_hue() -> f32 {
    270.0
}
fn default_particle_decay() -> f32 {
    1.6
}
fn default_wave_radius() -> f32 {
    10.0
}
fn default_wave_life() -> f32 {
    22.0
}
fn default_wave_growth() -> f32 {
    5.4
}
fn default_wave_decay() -> f32 {
    1.6
}
