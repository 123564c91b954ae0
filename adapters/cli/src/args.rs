//! Command-line flags and the settings they resolve to.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use snake_arcade_core::{Difficulty, GridSize, Settings, WallMode};

/// Grid-based snake arcade with bombs, magnets and rockets.
#[derive(Debug, Parser)]
#[command(name = "snake-arcade", version, about)]
pub(crate) struct Args {
    /// Difficulty preset; overrides the config file.
    #[arg(long)]
    pub(crate) difficulty: Option<Difficulty>,

    /// Boundary mode, `solid` or `wrap`; overrides the config file.
    #[arg(long)]
    pub(crate) walls: Option<WallMode>,

    /// TOML file with `difficulty` and `walls` keys.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// File the best score is persisted to.
    #[arg(long, value_name = "PATH", default_value = "snake-arcade-best.toml")]
    pub(crate) best_score_file: PathBuf,

    /// Keep the best score in memory only.
    #[arg(long)]
    pub(crate) no_persist: bool,

    /// Seed for reproducible spawns.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Number of grid columns.
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(4..=200)
    )]
    pub(crate) columns: u32,

    /// Number of grid rows.
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(4..=200)
    )]
    pub(crate) rows: u32,

    /// Side length of a cell in pixels.
    #[arg(long, default_value_t = 24.0)]
    pub(crate) cell_length: f32,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) vsync: bool,

    /// Log the frame rate once per second.
    #[arg(long)]
    pub(crate) show_fps: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,

    /// Play this many ticks with the autopilot and no window, then print the score.
    #[arg(long, value_name = "TICKS")]
    pub(crate) headless_ticks: Option<u32>,
}

impl Args {
    /// Field size requested on the command line.
    pub(crate) fn grid(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }

    /// Resolves the session settings: file values first, then flag overrides.
    pub(crate) fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let document = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Settings::from_toml_str(&document)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(walls) = self.walls {
            settings.walls = walls;
        }
        Ok(settings)
    }
}
