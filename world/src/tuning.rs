//! Tuning knobs for the power-up subsystems.

use std::time::Duration;

/// Aggregated tuning knobs controlling every adjustable aspect of the power-ups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerUpTuning {
    /// Parameters shared by every pickup spawn roll.
    pub spawn: SpawnTuning,
    /// Bomb spawn chance and explosion shape.
    pub bomb: BombTuning,
    /// Magnet spawn chance, aura radius and duration.
    pub magnet: MagnetTuning,
    /// Rocket spawn chance, flight model and drop schedule.
    pub rocket: RocketTuning,
}

impl PowerUpTuning {
    /// Tuning with every pickup spawn chance pinned to zero.
    ///
    /// Useful for scenarios that place pickups explicitly.
    #[must_use]
    pub fn without_spawns() -> Self {
        let mut tuning = Self::default();
        tuning.bomb.spawn_chance = 0.0;
        tuning.magnet.spawn_chance = 0.0;
        tuning.rocket.spawn_chance = 0.0;
        tuning
    }
}

/// Parameters shared by all pickup spawn rolls.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTuning {
    /// Pickups only spawn strictly farther than this from the head, in cells.
    pub min_head_distance: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            min_head_distance: 4.0,
        }
    }
}

/// Bomb parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct BombTuning {
    /// Per-tick probability of placing a bomb when none exists.
    pub spawn_chance: f64,
    /// Number of apple candidates produced by an explosion.
    pub scatter_count: u32,
    /// Largest distance from the impact cell an apple may land at.
    pub scatter_radius: f32,
    /// Smallest distance from the impact cell an apple may land at.
    pub min_scatter_distance: f32,
    /// Largest random deviation applied to each candidate's angle, in radians.
    pub angle_jitter: f32,
}

impl Default for BombTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.02,
            scatter_count: 14,
            scatter_radius: 4.0,
            min_scatter_distance: 2.0,
            angle_jitter: 0.3,
        }
    }
}

/// Magnet parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MagnetTuning {
    /// Per-tick probability of placing a magnet when neither pickup nor aura exists.
    pub spawn_chance: f64,
    /// Lifetime of the aura once the pickup is collected.
    pub duration: Duration,
    /// Apples within this distance of the head are collected, inclusive.
    pub radius: f32,
}

impl Default for MagnetTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.015,
            duration: Duration::from_millis(15_000),
            radius: 3.0,
        }
    }
}

/// Rocket parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RocketTuning {
    /// Per-tick probability of placing a rocket when neither pickup nor rocket exists.
    pub spawn_chance: f64,
    /// Lifetime of the active rocket.
    pub lifetime: Duration,
    /// Flight speed in cells per second.
    pub speed: f32,
    /// Inset from each board edge at which the rocket bounces, in cells.
    pub margin: f32,
    /// Probability of a heading perturbation on each update.
    pub turn_chance: f64,
    /// Largest heading perturbation in radians.
    pub max_turn: f32,
    /// Number of apples the rocket may drop over its lifetime.
    pub drop_budget: u32,
    /// Delay between drops, also used for the first drop after launch.
    pub drop_interval: Duration,
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.012,
            lifetime: Duration::from_millis(10_000),
            speed: 8.0,
            margin: 0.5,
            turn_chance: 0.1,
            max_turn: 0.2,
            drop_budget: 40,
            drop_interval: Duration::from_millis(250),
        }
    }
}
