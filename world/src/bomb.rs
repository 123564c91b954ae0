//! Bomb explosion geometry.

use std::f32::consts::TAU;

use rand::Rng;
use snake_arcade_core::{Cell, WallMode};

use crate::{grid::Grid, registry::Entities, tuning::BombTuning};

/// Scatters a ring of apples around `impact` and returns the cells that received one.
///
/// Each candidate sits at an evenly spaced angle with random jitter and a
/// random distance inside the scatter band. Candidates are mapped through the
/// boundary rule and discarded when they fall outside the grid or onto an
/// occupied cell, including apples placed earlier in the same explosion.
pub(crate) fn scatter_apples<R: Rng>(
    impact: Cell,
    grid: &Grid,
    walls: WallMode,
    entities: &mut Entities,
    tuning: &BombTuning,
    rng: &mut R,
) -> Vec<Cell> {
    let count = tuning.scatter_count;
    let mut placed = Vec::new();
    if count == 0 {
        return placed;
    }

    let max_distance = tuning.scatter_radius.max(tuning.min_scatter_distance);
    let jitter = tuning.angle_jitter.abs();

    for index in 0..count {
        let base = TAU * index as f32 / count as f32;
        let angle = if jitter > 0.0 {
            base + rng.gen_range(-jitter..=jitter)
        } else {
            base
        };
        let distance = if max_distance > tuning.min_scatter_distance {
            rng.gen_range(tuning.min_scatter_distance..=max_distance)
        } else {
            max_distance
        };

        let dx = (angle.cos() * distance).round() as i32;
        let dy = (angle.sin() * distance).round() as i32;
        let candidate = grid.normalize(impact.offset(dx, dy), walls);
        if entities.try_place_apple(grid, candidate) {
            placed.push(candidate);
        }
    }

    placed
}
