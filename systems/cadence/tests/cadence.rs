use std::time::Duration;

use snake_arcade_core::{Command, Difficulty, GridSize, SessionPhase, Settings, WallMode};
use snake_arcade_system_cadence::{Cadence, Config};
use snake_arcade_world::{self as world, query, Config as WorldConfig, PowerUpTuning, World};

const FRAME: Duration = Duration::from_millis(16);

fn wrapping_world() -> World {
    World::from_config(
        WorldConfig::new(
            GridSize::new(24, 24),
            Settings::new(Difficulty::Normal, WallMode::Wrap),
        )
        .with_seed(3)
        .with_tuning(PowerUpTuning::without_spawns()),
    )
}

fn run_frames(world: &mut World, cadence: &mut Cadence, frames: u32) -> usize {
    let mut ticks = 0;
    for _ in 0..frames {
        let mut commands = Vec::new();
        cadence.handle(FRAME, query::phase(world), &mut commands);
        ticks += commands.len();
        for command in commands {
            let mut events = Vec::new();
            world::apply(world, command, &mut events);
        }
    }
    ticks
}

#[test]
fn emits_no_ticks_until_the_session_starts() {
    let mut world = wrapping_world();
    let mut cadence = Cadence::new(Config::new(query::settings(&world).tick_interval()));

    assert_eq!(run_frames(&mut world, &mut cadence, 60), 0);
    assert_eq!(cadence.now(), FRAME * 60);
}

#[test]
fn normal_difficulty_ticks_at_its_interval() {
    let mut world = wrapping_world();
    let mut cadence = Cadence::new(Config::new(query::settings(&world).tick_interval()));
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);

    // 105 frames of 16 ms cover 1680 ms, i.e. eight 210 ms intervals.
    let ticks = run_frames(&mut world, &mut cadence, 105);

    assert_eq!(ticks, 8);
    assert_eq!(query::phase(&world), SessionPhase::Running);
}

#[test]
fn pausing_freezes_ticks_but_not_the_clock() {
    let mut world = wrapping_world();
    let mut cadence = Cadence::new(Config::new(query::settings(&world).tick_interval()));
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    let _ = run_frames(&mut world, &mut cadence, 20);

    world::apply(&mut world, Command::Pause, &mut events);
    let before = query::snapshot(&world);
    let clock = cadence.now();
    let elapsed = cadence.elapsed();

    assert_eq!(run_frames(&mut world, &mut cadence, 100), 0);
    assert_eq!(query::snapshot(&world), before);
    assert_eq!(cadence.now(), clock + FRAME * 100);
    assert_eq!(cadence.elapsed(), elapsed);

    world::apply(&mut world, Command::Resume, &mut events);
    assert!(run_frames(&mut world, &mut cadence, 20) > 0);
}
