#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake Arcade experience.

mod args;
mod autopilot;
mod driver;

use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade_core::SessionPhase;
use snake_arcade_rendering::{FrameInput, Palette, Presentation, RenderingBackend};
use snake_arcade_rendering_macroquad::MacroquadBackend;
use snake_arcade_system_scoreboard::{BestScoreStore, FileStore, MemoryStore};
use snake_arcade_world::Config;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{args::Args, driver::Session};

/// Entry point for the Snake Arcade command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let settings = args.settings()?;
    let store: Box<dyn BestScoreStore> = if args.no_persist {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(&args.best_score_file))
    };

    let mut config = Config::new(args.grid(), settings);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let session = Session::new(config, store);
    info!(
        banner = session.welcome_banner(),
        difficulty = settings.difficulty.name(),
        walls = settings.walls.name(),
        "session ready"
    );

    match args.headless_ticks {
        Some(ticks) => run_headless(session, ticks),
        None => run_window(session, &args),
    }
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")
}

fn run_headless(mut session: Session, ticks: u32) -> Result<()> {
    session.handle_input(&FrameInput {
        start_or_restart: true,
        ..FrameInput::default()
    });

    let mut played = 0;
    while played < ticks && session.phase() == SessionPhase::Running {
        let direction = autopilot::steer(&session.snapshot());
        session.handle_input(&FrameInput {
            direction,
            ..FrameInput::default()
        });
        session.advance(session.tick_interval());
        played += 1;
    }

    let snapshot = session.snapshot();
    info!(ticks = played, phase = ?snapshot.phase, "headless run finished");
    println!(
        "score {} best {} length {}",
        snapshot.score,
        snapshot.best_score,
        snapshot.snake.len()
    );
    Ok(())
}

fn run_window(mut session: Session, args: &Args) -> Result<()> {
    let cell_length = args.cell_length;
    let scene = session
        .scene(cell_length)
        .context("failed to build the initial scene")?;
    let presentation = Presentation::new("Snake Arcade", Palette::default().background, scene);

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |frame_dt, input, scene| {
            session.frame(frame_dt, &input);
            match session.scene(cell_length) {
                Ok(next) => *scene = next,
                Err(error) => warn!(error = %error, "failed to rebuild scene"),
            }
        })
}
