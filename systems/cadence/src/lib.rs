#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-interval tick scheduler that turns render-frame deltas into
//! simulation ticks.

use std::time::Duration;

use snake_arcade_core::{Command, SessionPhase};
use tracing::debug;

/// Largest number of ticks emitted for a single frame; older backlog is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Configuration parameters required to construct the cadence system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: Duration,
}

impl Config {
    /// Creates a configuration ticking once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

/// Pure system that emits `Tick` commands at a fixed cadence while running.
#[derive(Debug)]
pub struct Cadence {
    interval: Duration,
    clock: Duration,
    elapsed: Duration,
    accumulator: Duration,
}

impl Cadence {
    /// Creates a new cadence system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval,
            clock: Duration::ZERO,
            elapsed: Duration::ZERO,
            accumulator: Duration::ZERO,
        }
    }

    /// Wall-clock time observed so far, including time spent outside `Running`.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock
    }

    /// Simulation time: the clock counted only while the session runs.
    ///
    /// Ticks are stamped on this clock, so a pause never consumes the
    /// deadlines the world schedules.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Interval between consecutive ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Re-targets the cadence, typically after a restart changed the difficulty.
    pub fn set_interval(&mut self, interval: Duration) {
        if interval != self.interval {
            debug!(?interval, "tick interval changed");
        }
        self.interval = interval;
        self.accumulator = Duration::ZERO;
    }

    /// Advances the clock by `frame_dt` and emits the ticks that fell due.
    ///
    /// Outside `Running` only the wall clock moves; partial progress towards
    /// the next tick is kept for when the session resumes.
    pub fn handle(&mut self, frame_dt: Duration, phase: SessionPhase, out: &mut Vec<Command>) {
        self.clock = self.clock.saturating_add(frame_dt);

        if phase != SessionPhase::Running {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(frame_dt);
        if self.interval.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(frame_dt);

        let mut emitted = 0;
        while self.accumulator >= self.interval {
            if emitted == MAX_TICKS_PER_FRAME {
                debug!(backlog = ?self.accumulator, "dropping tick backlog");
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.interval;
            out.push(Command::Tick {
                now: self.elapsed.saturating_sub(self.accumulator),
            });
            emitted += 1;
        }
    }
}
