#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arcade engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the supporting systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and adapters react to. Renderers never mutate the world; they
//! read a [`SessionSnapshot`] captured after each frame.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake Arcade.";

/// Number of points awarded for every apple consumed.
pub const APPLE_POINTS: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Stores settings that become active on the next restart.
    Configure {
        /// Settings to apply when the session is re-initialised.
        settings: Settings,
    },
    /// Leaves the idle phase and starts the simulation.
    Start,
    /// Suspends a running session.
    Pause,
    /// Continues a paused session.
    Resume,
    /// Re-initialises the session with the pending settings and starts it.
    Restart,
    /// Latches a new heading that is applied on the next tick boundary.
    RequestDirection {
        /// Heading requested by the input collaborator.
        direction: Direction,
    },
    /// Advances the simulation by exactly one fixed-interval step.
    Tick {
        /// Absolute timestamp of the tick measured from the driver's clock origin.
        now: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: SessionPhase,
    },
    /// Confirms that all session state was re-initialised.
    SessionReset {
        /// Settings that govern the fresh session.
        settings: Settings,
    },
    /// Reports that a heading request would have reversed the snake into its neck.
    DirectionRejected {
        /// Heading that was requested.
        requested: Direction,
        /// Heading the snake is currently travelling in.
        current: Direction,
    },
    /// Confirms that the snake head moved into a new cell.
    SnakeAdvanced {
        /// Cell now occupied by the head.
        head: Cell,
        /// Whether the tail was retained during the tick.
        grew: bool,
    },
    /// Confirms that the head consumed an apple.
    AppleEaten {
        /// Cell that held the apple.
        cell: Cell,
    },
    /// Confirms that a replacement apple was placed after the board ran empty.
    AppleSpawned {
        /// Cell that received the apple.
        cell: Cell,
    },
    /// Confirms that a pickup was placed on the ground.
    PowerUpSpawned {
        /// Kind of pickup placed.
        kind: PowerUpKind,
        /// Cell that holds the pickup.
        cell: Cell,
    },
    /// Confirms that the head collected a pickup.
    PowerUpCollected {
        /// Kind of pickup collected.
        kind: PowerUpKind,
        /// Cell the pickup occupied.
        cell: Cell,
    },
    /// Reports the apples scattered by a bomb explosion.
    BombExploded {
        /// Impact cell of the explosion.
        cell: Cell,
        /// Cells that received a new apple.
        apples: Vec<Cell>,
    },
    /// Confirms that the magnet aura is active.
    MagnetActivated {
        /// Timestamp at which the aura switches off.
        expires_at: Duration,
    },
    /// Reports apples pulled in by the magnet aura during a tick.
    MagnetCollected {
        /// Cells whose apples were consumed.
        cells: Vec<Cell>,
    },
    /// Announces that the magnet aura switched off.
    MagnetExpired,
    /// Confirms that an active rocket was launched.
    RocketLaunched {
        /// Cell the pickup occupied when the rocket launched.
        origin: Cell,
        /// Timestamp at which the rocket is destroyed.
        expires_at: Duration,
    },
    /// Confirms that the active rocket dropped an apple.
    RocketDropped {
        /// Cell that received the apple.
        cell: Cell,
    },
    /// Announces that the active rocket reached the end of its lifetime.
    RocketExpired,
    /// Reports the running score after it changed.
    ScoreChanged {
        /// Score accumulated in the current session.
        score: u32,
    },
    /// Requests that the audio collaborator play a cue.
    Cue {
        /// Cue to play.
        cue: AudioCue,
    },
    /// Announces that the session ended.
    GameOver {
        /// Final score of the session.
        score: u32,
        /// Best score after the session was evaluated.
        best_score: u32,
    },
    /// Requests that the persistence collaborator store a new best score.
    BestScoreRecorded {
        /// Score that exceeded the previous best.
        score: u32,
    },
}

/// Lifecycle phase of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    /// Session initialised and awaiting a start request.
    #[default]
    Idle,
    /// Simulation advancing on every tick.
    Running,
    /// Simulation suspended by the player.
    Paused,
    /// Simulation frozen after a terminal collision.
    GameOver,
}

/// Named audio cues emitted by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioCue {
    /// A bomb detonated under the head.
    BombExplode,
    /// The head consumed an apple.
    AppleEat,
    /// The magnet pickup was collected.
    MagnetPickup,
    /// The rocket pickup was collected.
    RocketPickup,
    /// The magnet aura pulled in apples.
    MagnetCollect,
    /// The session ended.
    GameOver,
}

impl AudioCue {
    /// Stable cue name understood by audio collaborators.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BombExplode => "bomb-explode",
            Self::AppleEat => "apple-eat",
            Self::MagnetPickup => "magnet-pickup",
            Self::RocketPickup => "rocket-pickup",
            Self::MagnetCollect => "magnet-collect",
            Self::GameOver => "game-over",
        }
    }
}

/// Kinds of special pickups that can lie on the ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    /// Explodes into a ring of apples.
    Bomb,
    /// Activates the timed auto-collect aura.
    Magnet,
    /// Launches a free-roaming rocket that drops apples.
    Rocket,
}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Converts a raw input vector into a heading.
    ///
    /// Only axis-aligned unit vectors are accepted; every other vector yields
    /// `None`.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }

    /// Unit vector of the heading expressed as column and row deltas.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Heading pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Reports whether `other` is the exact reversal of this heading.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that a head stepping past a solid wall can be
/// represented before the collision is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Neighbouring cell one step along `direction`, without any boundary handling.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Cell displaced by the provided deltas, without any boundary handling.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Straight-line distance between two cells measured in cells.
    #[must_use]
    pub fn distance(self, other: Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        dx.hypot(dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of the playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Playing field used when no explicit size is configured.
    pub const DEFAULT: Self = Self::new(24, 24);

    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Boundary behaviour applied when the head leaves the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallMode {
    /// Leaving the grid ends the session.
    #[default]
    Solid,
    /// Leaving the grid re-enters from the opposite edge.
    Wrap,
}

impl WallMode {
    /// Stable lowercase name of the mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Wrap => "wrap",
        }
    }

    /// The other wall mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Solid => Self::Wrap,
            Self::Wrap => Self::Solid,
        }
    }
}

impl FromStr for WallMode {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "wrap" => Ok(Self::Wrap),
            other => Err(SettingsError::UnknownWallMode(other.to_owned())),
        }
    }
}

/// Difficulty presets selecting the simulation tick interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    /// Slowest cadence.
    Easy,
    /// Default cadence.
    #[default]
    Normal,
    /// Fastest cadence.
    Hard,
}

impl Difficulty {
    /// Fixed simulation interval associated with the preset.
    #[must_use]
    pub const fn tick_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(260),
            Self::Normal => Duration::from_millis(210),
            Self::Hard => Duration::from_millis(160),
        }
    }

    /// Stable lowercase name of the preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            other => Err(SettingsError::UnknownDifficulty(other.to_owned())),
        }
    }
}

/// Player-facing configuration consumed when a session is initialised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Selected difficulty preset.
    pub difficulty: Difficulty,
    /// Selected boundary behaviour.
    pub walls: WallMode,
}

impl Settings {
    /// Creates a settings bundle from explicit values.
    #[must_use]
    pub const fn new(difficulty: Difficulty, walls: WallMode) -> Self {
        Self { difficulty, walls }
    }

    /// Parses settings from a TOML document, defaulting any missing key.
    pub fn from_toml_str(document: &str) -> Result<Self, SettingsError> {
        toml::from_str(document).map_err(SettingsError::Parse)
    }

    /// Simulation interval implied by the difficulty preset.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }
}

/// Reasons settings input may be rejected.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The difficulty name did not match a preset.
    #[error("unknown difficulty '{0}' (expected easy, normal or hard)")]
    UnknownDifficulty(String),
    /// The wall mode name did not match a mode.
    #[error("unknown wall mode '{0}' (expected solid or wrap)")]
    UnknownWallMode(String),
    /// The TOML document could not be parsed.
    #[error("could not parse settings: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Immutable description of the free-flying rocket used for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RocketSnapshot {
    /// Horizontal position measured in cell units.
    pub x: f32,
    /// Vertical position measured in cell units.
    pub y: f32,
    /// Heading of the rocket's velocity in radians.
    pub heading_radians: f32,
    /// Number of apple drops the rocket may still perform.
    pub drops_remaining: u32,
}

/// Read-only snapshot of the whole session exposed to renderers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    /// Dimensions of the playing field.
    pub grid: GridSize,
    /// Boundary behaviour of the active session.
    pub walls: WallMode,
    /// Current phase.
    pub phase: SessionPhase,
    /// Score accumulated in the current session.
    pub score: u32,
    /// Best score across sessions.
    pub best_score: u32,
    /// Snake segments ordered head-first.
    pub snake: Vec<Cell>,
    /// Apples on the board in deterministic order.
    pub apples: Vec<Cell>,
    /// Bomb pickup, if one lies on the ground.
    pub bomb: Option<Cell>,
    /// Magnet pickup, if one lies on the ground.
    pub magnet: Option<Cell>,
    /// Rocket pickup, if one lies on the ground.
    pub rocket: Option<Cell>,
    /// Expiry of the magnet aura while it is active.
    pub magnet_expires_at: Option<Duration>,
    /// Collection radius of the magnet aura, in cells.
    pub magnet_radius: f32,
    /// Free-flying rocket, if one is active.
    pub active_rocket: Option<RocketSnapshot>,
}

impl SessionSnapshot {
    /// Reports whether the magnet aura is currently active.
    #[must_use]
    pub const fn magnet_active(&self) -> bool {
        self.magnet_expires_at.is_some()
    }

    /// Head of the snake, if the snake has any segments.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}
