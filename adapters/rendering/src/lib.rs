#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Arcade adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_arcade_core::{
    Cell, Difficulty, Direction, PowerUpKind, SessionPhase, SessionSnapshot, Settings, WallMode,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used by every scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Frame clear color.
    pub background: Color,
    /// Board fill.
    pub board: Color,
    /// Grid lines.
    pub grid_lines: Color,
    /// Border drawn around the board when walls are solid.
    pub solid_wall: Color,
    /// Snake head.
    pub snake_head: Color,
    /// Snake body segments.
    pub snake_body: Color,
    /// Apples.
    pub apple: Color,
    /// Bomb pickup.
    pub bomb: Color,
    /// Magnet pickup and aura.
    pub magnet: Color,
    /// Rocket pickup and active rocket.
    pub rocket: Color,
    /// HUD text.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0x10, 0x12, 0x18),
            board: Color::from_rgb_u8(0x1b, 0x1f, 0x2a),
            grid_lines: Color::from_rgb_u8(0x25, 0x2a, 0x38),
            solid_wall: Color::from_rgb_u8(0x8a, 0x93, 0xa6),
            snake_head: Color::from_rgb_u8(0x7c, 0xe0, 0x5a),
            snake_body: Color::from_rgb_u8(0x3f, 0xa3, 0x3c),
            apple: Color::from_rgb_u8(0xe0, 0x3c, 0x3c),
            bomb: Color::from_rgb_u8(0x30, 0x30, 0x30),
            magnet: Color::from_rgb_u8(0x4f, 0x8c, 0xff),
            rocket: Color::from_rgb_u8(0xff, 0xa6, 0x2b),
            text: Color::from_rgb_u8(0xf0, 0xf0, 0xf0),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Steering request captured on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the player asked to start a fresh session or restart the current one.
    pub start_or_restart: bool,
    /// Whether the player toggled pause.
    pub toggle_pause: bool,
    /// Difficulty chosen for the next restart.
    pub difficulty: Option<Difficulty>,
    /// Whether the player toggled the wall mode for the next restart.
    pub toggle_walls: bool,
}

impl FrameInput {
    /// Reports whether the frame carried no player intent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Describes the rectangular cell board that adapters render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of columns on the board.
    pub columns: u32,
    /// Number of rows on the board.
    pub rows: u32,
    /// Side length of a single cell expressed in screen units.
    pub cell_length: f32,
    /// Boundary behaviour, drawn as a solid border or left open.
    pub walls: WallMode,
}

impl BoardPresentation {
    /// Creates a new board descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        walls: WallMode,
    ) -> std::result::Result<Self, RenderingError> {
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            walls,
        })
    }

    /// Calculates the total width of the board.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the board.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Converts a cell-unit position into board-space screen units.
    #[must_use]
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        position * self.cell_length
    }
}

/// A single grid-aligned square drawn on the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Cell occupied by the element.
    pub cell: Cell,
    /// Fill color.
    pub color: Color,
}

impl CellPresentation {
    /// Creates a new cell descriptor.
    #[must_use]
    pub const fn new(cell: Cell, color: Color) -> Self {
        Self { cell, color }
    }

    /// Centre of the cell in cell units.
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.cell.x() as f32 + 0.5, self.cell.y() as f32 + 0.5)
    }
}

/// Ground pickup waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupPresentation {
    /// Kind of power-up.
    pub kind: PowerUpKind,
    /// Location and color.
    pub body: CellPresentation,
}

/// Free-flying rocket expressed in cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RocketPresentation {
    /// Continuous position in cell units.
    pub position: Vec2,
    /// Heading in radians.
    pub heading_radians: f32,
    /// Fill color.
    pub color: Color,
}

impl RocketPresentation {
    /// Tip of the rocket's nose, `length` cells ahead of its position.
    #[must_use]
    pub fn nose(&self, length: f32) -> Vec2 {
        self.position + Vec2::from_angle(self.heading_radians) * length
    }
}

/// Translucent circle drawn around the head while the magnet aura is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuraPresentation {
    /// Centre in cell units.
    pub centre: Vec2,
    /// Radius in cells.
    pub radius: f32,
    /// Fill color, usually translucent.
    pub color: Color,
}

/// Text overlay summarising the session.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Current score.
    pub score: u32,
    /// Best score across sessions.
    pub best_score: u32,
    /// Phase of the session.
    pub phase: SessionPhase,
    /// Settings the next restart will apply, when they differ from the active ones.
    pub pending: Option<Settings>,
    /// Text color.
    pub color: Color,
}

impl HudPresentation {
    /// Status line showing the score and the best score.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("Score {}   Best {}", self.score, self.best_score)
    }

    /// Hint describing what the player can do in the current phase.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self.phase {
            SessionPhase::Idle => Some("Press Enter to start"),
            SessionPhase::Running => None,
            SessionPhase::Paused => Some("Paused. Press Space to resume"),
            SessionPhase::GameOver => Some("Game over. Press Enter to restart"),
        }
    }

    /// Note about settings queued for the next restart.
    #[must_use]
    pub fn pending_line(&self) -> Option<String> {
        self.pending.map(|settings| {
            format!(
                "Next game: {} / {} walls",
                settings.difficulty.name(),
                settings.walls.name()
            )
        })
    }

    /// Every line of text to draw, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.status_line()];
        lines.extend(self.hint().map(str::to_owned));
        lines.extend(self.pending_line());
        lines
    }
}

/// Scene description combining the board and everything on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board that composes the play area.
    pub board: BoardPresentation,
    /// Snake segments, head first.
    pub snake: Vec<CellPresentation>,
    /// Apples on the board.
    pub apples: Vec<CellPresentation>,
    /// Pickups lying on the ground.
    pub pickups: Vec<PickupPresentation>,
    /// Active rocket, if any.
    pub rocket: Option<RocketPresentation>,
    /// Magnet aura around the head, if active.
    pub magnet_aura: Option<AuraPresentation>,
    /// Text overlay.
    pub hud: HudPresentation,
}

impl Scene {
    /// Builds a scene from a session snapshot using the default palette.
    pub fn from_snapshot(
        snapshot: &SessionSnapshot,
        cell_length: f32,
    ) -> std::result::Result<Self, RenderingError> {
        Self::from_snapshot_with_palette(snapshot, cell_length, &Palette::default())
    }

    /// Builds a scene from a session snapshot using explicit colors.
    pub fn from_snapshot_with_palette(
        snapshot: &SessionSnapshot,
        cell_length: f32,
        palette: &Palette,
    ) -> std::result::Result<Self, RenderingError> {
        let board = BoardPresentation::new(
            snapshot.grid.width(),
            snapshot.grid.height(),
            cell_length,
            snapshot.walls,
        )?;

        let snake = snapshot
            .snake
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let color = if index == 0 {
                    palette.snake_head
                } else {
                    palette.snake_body
                };
                CellPresentation::new(*cell, color)
            })
            .collect();

        let apples = snapshot
            .apples
            .iter()
            .map(|cell| CellPresentation::new(*cell, palette.apple))
            .collect();

        let pickups = [
            (PowerUpKind::Bomb, snapshot.bomb, palette.bomb),
            (PowerUpKind::Magnet, snapshot.magnet, palette.magnet),
            (PowerUpKind::Rocket, snapshot.rocket, palette.rocket),
        ]
        .into_iter()
        .filter_map(|(kind, cell, color)| {
            cell.map(|cell| PickupPresentation {
                kind,
                body: CellPresentation::new(cell, color),
            })
        })
        .collect();

        let rocket = snapshot.active_rocket.map(|rocket| RocketPresentation {
            position: Vec2::new(rocket.x, rocket.y),
            heading_radians: rocket.heading_radians,
            color: palette.rocket.lighten(0.2),
        });

        let magnet_aura = if snapshot.magnet_active() {
            snapshot.head().map(|head| AuraPresentation {
                centre: CellPresentation::new(head, palette.magnet).centre(),
                radius: snapshot.magnet_radius,
                color: palette.magnet.with_alpha(0.18),
            })
        } else {
            None
        };

        Ok(Self {
            board,
            snake,
            apples,
            pickups,
            rocket,
            magnet_aura,
            hud: HudPresentation {
                score: snapshot.score,
                best_score: snapshot.best_score,
                phase: snapshot.phase,
                pending: None,
                color: palette.text,
            },
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake Arcade scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the per-frame input captured by the adapter, and replaces the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
