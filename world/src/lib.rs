#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Snake Arcade.
//!
//! The [`World`] owns every piece of mutable game state: the snake, the apple
//! set, the ground pickups, the magnet aura, the active rocket, the score and
//! the session phase. It is mutated exclusively through [`apply`] and read
//! through the [`query`] module.

mod bomb;
mod grid;
mod magnet;
mod registry;
mod rocket;
mod step;
mod tuning;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_arcade_core::{
    AudioCue, Cell, Command, Direction, Event, GridSize, SessionPhase, Settings, WELCOME_BANNER,
};
use tracing::{debug, info};

use crate::{grid::Grid, magnet::MagnetEffect, registry::Entities, rocket::ActiveRocket};

pub use crate::tuning::{BombTuning, MagnetTuning, PowerUpTuning, RocketTuning, SpawnTuning};

const INITIAL_SNAKE_LENGTH: i32 = 3;
const INITIAL_DIRECTION: Direction = Direction::East;

/// Configuration parameters required to construct a world.
#[derive(Clone, Debug, Default)]
pub struct Config {
    grid: GridSize,
    settings: Settings,
    best_score: u32,
    seed: Option<u64>,
    tuning: PowerUpTuning,
}

impl Config {
    /// Creates a configuration for the provided field size and settings.
    #[must_use]
    pub fn new(grid: GridSize, settings: Settings) -> Self {
        Self {
            grid,
            settings,
            ..Self::default()
        }
    }

    /// Seeds the session with a previously persisted best score.
    #[must_use]
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score;
        self
    }

    /// Fixes the random number generator seed, making spawns reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the power-up tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: PowerUpTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Represents the authoritative Snake Arcade session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    settings: Settings,
    pending_settings: Settings,
    tuning: PowerUpTuning,
    entities: Entities,
    heading: Heading,
    magnet: MagnetEffect,
    rocket: Option<ActiveRocket>,
    score: u32,
    best_score: u32,
    phase: SessionPhase,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world on the default field with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Creates an idle world from an explicit configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(config.grid),
            settings: config.settings,
            pending_settings: config.settings,
            tuning: config.tuning,
            entities: Entities::default(),
            heading: Heading::new(INITIAL_DIRECTION),
            magnet: MagnetEffect::default(),
            rocket: None,
            score: 0,
            best_score: config.best_score,
            phase: SessionPhase::Idle,
            rng,
        };
        let mut discarded = Vec::new();
        world.reset(&mut discarded);
        world
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.settings = self.pending_settings;
        self.entities = Entities::default();
        let centre = Cell::new(self.grid.width() / 2, self.grid.height() / 2);
        for offset in 0..INITIAL_SNAKE_LENGTH {
            let segment = centre.offset(-offset, 0);
            if self.grid.contains(segment) {
                self.entities.snake.push_back(segment);
            }
        }
        self.heading = Heading::new(INITIAL_DIRECTION);
        self.magnet = MagnetEffect::default();
        self.rocket = None;
        self.score = 0;
        self.phase = SessionPhase::Idle;
        step::ensure_apple(self, out_events);
    }

    fn set_phase(&mut self, phase: SessionPhase, out_events: &mut Vec<Event>) {
        debug!(from = ?self.phase, to = ?phase, "session phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn award(&mut self, points: u32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(points);
        out_events.push(Event::ScoreChanged { score: self.score });
    }

    fn end_session(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(SessionPhase::GameOver, out_events);
        out_events.push(Event::Cue {
            cue: AudioCue::GameOver,
        });
        if self.score > self.best_score {
            self.best_score = self.score;
            info!(score = self.score, "new best score");
            out_events.push(Event::BestScoreRecorded { score: self.score });
        }
        info!(score = self.score, best = self.best_score, "game over");
        out_events.push(Event::GameOver {
            score: self.score,
            best_score: self.best_score,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading applied on the current tick and the one latched for the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Heading {
    current: Direction,
    pending: Direction,
}

impl Heading {
    const fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            pending: direction,
        }
    }

    /// Latches `direction` unless it reverses the heading used on the last tick.
    fn request(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.current) {
            return false;
        }
        self.pending = direction;
        true
    }

    fn latch(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }
}

/// Applies the provided command to the world, mutating state in place.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { settings } => {
            debug!(?settings, "settings stored for next restart");
            world.pending_settings = settings;
        }
        Command::Start => {
            if world.phase == SessionPhase::Idle {
                world.set_phase(SessionPhase::Running, out_events);
            }
        }
        Command::Pause => {
            if world.phase == SessionPhase::Running {
                world.set_phase(SessionPhase::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.phase == SessionPhase::Paused {
                world.set_phase(SessionPhase::Running, out_events);
            }
        }
        Command::Restart => {
            world.reset(out_events);
            out_events.push(Event::SessionReset {
                settings: world.settings,
            });
            world.set_phase(SessionPhase::Running, out_events);
        }
        Command::RequestDirection { direction } => {
            if world.phase == SessionPhase::GameOver {
                return;
            }
            if !world.heading.request(direction) {
                out_events.push(Event::DirectionRejected {
                    requested: direction,
                    current: world.heading.current,
                });
            }
        }
        Command::Tick { now } => {
            if world.phase == SessionPhase::Running {
                step::advance(world, now, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_arcade_core::{GridSize, SessionPhase, SessionSnapshot, Settings};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Phase of the current session.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Score accumulated in the current session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Best score across sessions.
    #[must_use]
    pub fn best_score(world: &World) -> u32 {
        world.best_score
    }

    /// Settings governing the current session.
    #[must_use]
    pub fn settings(world: &World) -> Settings {
        world.settings
    }

    /// Settings that the next restart will apply.
    #[must_use]
    pub fn pending_settings(world: &World) -> Settings {
        world.pending_settings
    }

    /// Dimensions of the playing field.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Captures a read-only snapshot of the whole session for renderers.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            grid: world.grid.size(),
            walls: world.settings.walls,
            phase: world.phase,
            score: world.score,
            best_score: world.best_score,
            snake: world.entities.snake.iter().copied().collect(),
            apples: world.entities.apples.iter().copied().collect(),
            bomb: world.entities.bomb,
            magnet: world.entities.magnet,
            rocket: world.entities.rocket,
            magnet_expires_at: world.magnet.expires_at(),
            magnet_radius: world.tuning.magnet.radius,
            active_rocket: world.rocket.as_ref().map(|rocket| rocket.snapshot()),
        }
    }
}
