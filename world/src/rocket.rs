//! Free-roaming rocket launched by the rocket pickup.
//!
//! The rocket lives in continuous space measured in cell units, so the centre
//! of cell `(x, y)` sits at `(x + 0.5, y + 0.5)`. Renderers scale positions by
//! their own cell length.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use snake_arcade_core::{Cell, RocketSnapshot, WallMode};

use crate::{grid::Grid, registry::Entities, tuning::RocketTuning};

/// Active rocket entity with absolute-timestamp timers.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ActiveRocket {
    position: Vec2,
    velocity: Vec2,
    expires_at: Duration,
    drops_remaining: u32,
    next_drop_at: Duration,
    last_update: Duration,
}

/// Result of advancing the rocket once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RocketFlight {
    /// Cells that received an apple during the update.
    pub(crate) dropped: Vec<Cell>,
    /// Whether the rocket reached the end of its lifetime.
    pub(crate) expired: bool,
}

impl ActiveRocket {
    /// Launches a rocket from the centre of `origin` on a random heading.
    pub(crate) fn launch<R: Rng>(
        origin: Cell,
        now: Duration,
        tuning: &RocketTuning,
        rng: &mut R,
    ) -> Self {
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        Self {
            position: cell_centre(origin),
            velocity: Vec2::from_angle(heading) * tuning.speed,
            expires_at: now.saturating_add(tuning.lifetime),
            drops_remaining: tuning.drop_budget,
            next_drop_at: now.saturating_add(tuning.drop_interval),
            last_update: now,
        }
    }

    pub(crate) const fn expires_at(&self) -> Duration {
        self.expires_at
    }

    pub(crate) fn snapshot(&self) -> RocketSnapshot {
        RocketSnapshot {
            x: self.position.x,
            y: self.position.y,
            heading_radians: self.velocity.y.atan2(self.velocity.x),
            drops_remaining: self.drops_remaining,
        }
    }

    /// Integrates motion since the previous update, drops apples that fell due
    /// and reports expiry.
    pub(crate) fn update<R: Rng>(
        &mut self,
        now: Duration,
        grid: &Grid,
        walls: WallMode,
        entities: &mut Entities,
        tuning: &RocketTuning,
        rng: &mut R,
    ) -> RocketFlight {
        let elapsed = now.saturating_sub(self.last_update).as_secs_f32();
        self.last_update = now;
        self.position += self.velocity * elapsed;
        self.bounce(grid, tuning.margin);

        if tuning.turn_chance > 0.0 && rng.gen_bool(tuning.turn_chance.min(1.0)) {
            let max_turn = tuning.max_turn.abs();
            let turn = if max_turn > 0.0 {
                rng.gen_range(-max_turn..=max_turn)
            } else {
                0.0
            };
            self.velocity = Vec2::from_angle(turn).rotate(self.velocity);
        }

        let mut flight = RocketFlight::default();
        while self.drops_remaining > 0 && now >= self.next_drop_at {
            let jitter = (rng.gen_range(-1..=1), rng.gen_range(-1..=1));
            let cell = nearest_cell(self.position).offset(jitter.0, jitter.1);
            let cell = grid.normalize(cell, walls);
            if entities.try_place_apple(grid, cell) {
                flight.dropped.push(cell);
            }
            self.drops_remaining -= 1;
            self.next_drop_at = self.next_drop_at.saturating_add(tuning.drop_interval);
            if tuning.drop_interval.is_zero() {
                break;
            }
        }

        flight.expired = now >= self.expires_at;
        flight
    }

    fn bounce(&mut self, grid: &Grid, margin: f32) {
        let min = margin;
        let max_x = (grid.width() as f32 - margin).max(min);
        let max_y = (grid.height() as f32 - margin).max(min);

        if self.position.x <= min {
            self.position.x = min;
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x >= max_x {
            self.position.x = max_x;
            self.velocity.x = -self.velocity.x.abs();
        }

        if self.position.y <= min {
            self.position.y = min;
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y >= max_y {
            self.position.y = max_y;
            self.velocity.y = -self.velocity.y.abs();
        }
    }
}

fn cell_centre(cell: Cell) -> Vec2 {
    Vec2::new(cell.x() as f32 + 0.5, cell.y() as f32 + 0.5)
}

fn nearest_cell(position: Vec2) -> Cell {
    Cell::new(position.x.floor() as i32, position.y.floor() as i32)
}
