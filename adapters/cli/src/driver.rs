//! Frame driver wiring the world, the cadence and the scoreboard together.

use std::time::Duration;

use snake_arcade_core::{Command, Event, SessionPhase, SessionSnapshot, Settings};
use snake_arcade_rendering::{FrameInput, RenderingError, Scene};
use snake_arcade_system_cadence::{self as cadence, Cadence};
use snake_arcade_system_scoreboard::{BestScoreStore, Scoreboard};
use snake_arcade_world::{self as world, query, Config, World};
use tracing::{debug, trace};

/// One running game: the authoritative world plus the systems feeding it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    cadence: Cadence,
    scoreboard: Scoreboard<Box<dyn BestScoreStore>>,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    /// Builds a session, seeding the world with the persisted best score.
    pub(crate) fn new(config: Config, store: Box<dyn BestScoreStore>) -> Self {
        let scoreboard = Scoreboard::new(store);
        let world = World::from_config(config.with_best_score(scoreboard.load_best()));
        let cadence = Cadence::new(cadence::Config::new(
            query::settings(&world).tick_interval(),
        ));
        Self {
            world,
            cadence,
            scoreboard,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Runs one render frame: player input first, then the ticks that fell due.
    pub(crate) fn frame(&mut self, frame_dt: Duration, input: &FrameInput) {
        self.handle_input(input);
        self.advance(frame_dt);
    }

    /// Translates player intent into world commands.
    pub(crate) fn handle_input(&mut self, input: &FrameInput) {
        let phase = query::phase(&self.world);

        if input.difficulty.is_some() || input.toggle_walls {
            let mut settings = query::pending_settings(&self.world);
            if let Some(difficulty) = input.difficulty {
                settings.difficulty = difficulty;
            }
            if input.toggle_walls {
                settings.walls = settings.walls.toggled();
            }
            self.dispatch(Command::Configure { settings });
        }

        if input.start_or_restart {
            match phase {
                SessionPhase::Idle => self.dispatch(Command::Start),
                SessionPhase::Paused | SessionPhase::GameOver => self.restart(),
                SessionPhase::Running => {}
            }
        }

        if input.toggle_pause {
            match phase {
                SessionPhase::Running => self.dispatch(Command::Pause),
                SessionPhase::Paused => self.dispatch(Command::Resume),
                SessionPhase::Idle | SessionPhase::GameOver => {}
            }
        }

        if let Some(direction) = input.direction {
            self.dispatch(Command::RequestDirection { direction });
        }
    }

    /// Advances the cadence clock and applies every tick it emits.
    pub(crate) fn advance(&mut self, frame_dt: Duration) {
        let mut commands = std::mem::take(&mut self.commands);
        self.cadence
            .handle(frame_dt, query::phase(&self.world), &mut commands);
        for command in commands.drain(..) {
            self.dispatch(command);
        }
        self.commands = commands;
    }

    /// Starts a fresh session with the pending settings.
    pub(crate) fn restart(&mut self) {
        self.dispatch(Command::Restart);
        self.cadence
            .set_interval(query::settings(&self.world).tick_interval());
    }

    pub(crate) fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        query::snapshot(&self.world)
    }

    pub(crate) fn phase(&self) -> SessionPhase {
        query::phase(&self.world)
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.cadence.interval()
    }

    /// Settings queued for the next restart, when they differ from the active ones.
    pub(crate) fn pending_change(&self) -> Option<Settings> {
        let pending = query::pending_settings(&self.world);
        (pending != query::settings(&self.world)).then_some(pending)
    }

    /// Scene for the current state, with the HUD noting queued settings.
    pub(crate) fn scene(&self, cell_length: f32) -> Result<Scene, RenderingError> {
        let mut scene = Scene::from_snapshot(&self.snapshot(), cell_length)?;
        scene.hud.pending = self.pending_change();
        Ok(scene)
    }

    fn dispatch(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
        if self.events.is_empty() {
            return;
        }

        for event in &self.events {
            match event {
                Event::Cue { cue } => trace!(cue = cue.name(), "audio cue"),
                Event::SessionReset { settings } => debug!(?settings, "session reset"),
                _ => {}
            }
        }
        self.scoreboard.handle(&self.events);
        self.events.clear();
    }
}
