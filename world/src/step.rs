//! Fixed-interval simulation step.

use std::time::Duration;

use rand::Rng;
use snake_arcade_core::{AudioCue, Cell, Event, PowerUpKind, WallMode, APPLE_POINTS};
use tracing::{debug, trace};

use crate::{bomb, magnet::MagnetPulse, rocket::ActiveRocket, World};

/// Advances a running session by one tick at timestamp `now`.
///
/// Growth is a single flag: however many sources fire during the tick, at
/// most one tail removal is skipped.
pub(crate) fn advance(world: &mut World, now: Duration, out_events: &mut Vec<Event>) {
    let direction = world.heading.latch();
    let Some(head) = world.entities.head() else {
        return;
    };

    let walls = world.settings.walls;
    let next = world.grid.normalize(head.step(direction), walls);
    let hit_wall = walls == WallMode::Solid && !world.grid.contains(next);
    if hit_wall || world.entities.snake_contains(next) {
        debug!(cell = %next, hit_wall, "snake collided");
        world.end_session(out_events);
        return;
    }

    world.entities.snake.push_front(next);

    let mut grew = consume_bomb_or_apple(world, next, out_events);
    grew |= collect_magnet(world, next, now, out_events);
    grew |= collect_rocket(world, next, now, out_events);
    grew |= pulse_magnet(world, next, now, out_events);

    if !grew {
        let _ = world.entities.snake.pop_back();
    }
    out_events.push(Event::SnakeAdvanced { head: next, grew });

    ensure_apple(world, out_events);
    roll_spawns(world, next, out_events);
    fly_rocket(world, now, out_events);
}

/// Places an apple on a free cell when the board has none.
pub(crate) fn ensure_apple(world: &mut World, out_events: &mut Vec<Event>) {
    if !world.entities.apples.is_empty() {
        return;
    }

    match world
        .entities
        .random_free_cell(&world.grid, &mut world.rng, |_| true)
    {
        Some(cell) => {
            let _ = world.entities.apples.insert(cell);
            out_events.push(Event::AppleSpawned { cell });
        }
        None => debug!("board full; no apple placed"),
    }
}

fn cue(cue: AudioCue, out_events: &mut Vec<Event>) {
    trace!(cue = cue.name(), "cue requested");
    out_events.push(Event::Cue { cue });
}

fn consume_bomb_or_apple(world: &mut World, head: Cell, out_events: &mut Vec<Event>) -> bool {
    if world.entities.bomb == Some(head) {
        world.entities.bomb = None;
        out_events.push(Event::PowerUpCollected {
            kind: PowerUpKind::Bomb,
            cell: head,
        });
        cue(AudioCue::BombExplode, out_events);
        let apples = bomb::scatter_apples(
            head,
            &world.grid,
            world.settings.walls,
            &mut world.entities,
            &world.tuning.bomb,
            &mut world.rng,
        );
        debug!(cell = %head, apples = apples.len(), "bomb exploded");
        out_events.push(Event::BombExploded { cell: head, apples });
        return true;
    }

    if world.entities.apples.remove(&head) {
        out_events.push(Event::AppleEaten { cell: head });
        cue(AudioCue::AppleEat, out_events);
        world.award(APPLE_POINTS, out_events);
        return true;
    }

    false
}

fn collect_magnet(
    world: &mut World,
    head: Cell,
    now: Duration,
    out_events: &mut Vec<Event>,
) -> bool {
    if world.entities.magnet != Some(head) {
        return false;
    }

    world.entities.magnet = None;
    out_events.push(Event::PowerUpCollected {
        kind: PowerUpKind::Magnet,
        cell: head,
    });
    cue(AudioCue::MagnetPickup, out_events);
    let expires_at = world.magnet.activate(now, world.tuning.magnet.duration);
    debug!(?expires_at, "magnet activated");
    out_events.push(Event::MagnetActivated { expires_at });
    true
}

fn collect_rocket(
    world: &mut World,
    head: Cell,
    now: Duration,
    out_events: &mut Vec<Event>,
) -> bool {
    if world.entities.rocket != Some(head) {
        return false;
    }

    world.entities.rocket = None;
    out_events.push(Event::PowerUpCollected {
        kind: PowerUpKind::Rocket,
        cell: head,
    });
    cue(AudioCue::RocketPickup, out_events);
    let rocket = ActiveRocket::launch(head, now, &world.tuning.rocket, &mut world.rng);
    let expires_at = rocket.expires_at();
    world.rocket = Some(rocket);
    debug!(?expires_at, "rocket launched");
    out_events.push(Event::RocketLaunched {
        origin: head,
        expires_at,
    });
    true
}

fn pulse_magnet(world: &mut World, head: Cell, now: Duration, out_events: &mut Vec<Event>) -> bool {
    let radius = world.tuning.magnet.radius;
    match world
        .magnet
        .pulse(now, head, radius, &mut world.entities.apples)
    {
        MagnetPulse::Inactive => false,
        MagnetPulse::Expired => {
            debug!("magnet expired");
            out_events.push(Event::MagnetExpired);
            false
        }
        MagnetPulse::Collected(cells) if cells.is_empty() => false,
        MagnetPulse::Collected(cells) => {
            let count = u32::try_from(cells.len()).unwrap_or(u32::MAX);
            cue(AudioCue::MagnetCollect, out_events);
            out_events.push(Event::MagnetCollected { cells });
            world.award(APPLE_POINTS.saturating_mul(count), out_events);
            true
        }
    }
}

fn roll_spawns(world: &mut World, head: Cell, out_events: &mut Vec<Event>) {
    if world.entities.bomb.is_none() && !world.entities.apples.is_empty() {
        let chance = world.tuning.bomb.spawn_chance;
        try_spawn(world, PowerUpKind::Bomb, chance, head, out_events);
    }

    if world.entities.magnet.is_none() && !world.magnet.is_active() {
        let chance = world.tuning.magnet.spawn_chance;
        try_spawn(world, PowerUpKind::Magnet, chance, head, out_events);
    }

    if world.entities.rocket.is_none() && world.rocket.is_none() {
        let chance = world.tuning.rocket.spawn_chance;
        try_spawn(world, PowerUpKind::Rocket, chance, head, out_events);
    }
}

fn try_spawn(
    world: &mut World,
    kind: PowerUpKind,
    chance: f64,
    head: Cell,
    out_events: &mut Vec<Event>,
) {
    if !roll(&mut world.rng, chance) {
        return;
    }

    let min_distance = world.tuning.spawn.min_head_distance;
    let far_from_head = |cell: Cell| cell.distance(head) > min_distance;
    let free = world
        .entities
        .random_free_cell(&world.grid, &mut world.rng, far_from_head);
    let Some(cell) = free else {
        debug!(?kind, "no free cell far enough from the head; spawn skipped");
        return;
    };

    *world.entities.pickup_mut(kind) = Some(cell);
    debug!(?kind, %cell, "pickup spawned");
    out_events.push(Event::PowerUpSpawned { kind, cell });
}

fn roll<R: Rng>(rng: &mut R, chance: f64) -> bool {
    chance > 0.0 && rng.gen_bool(chance.min(1.0))
}

fn fly_rocket(world: &mut World, now: Duration, out_events: &mut Vec<Event>) {
    let Some(rocket) = world.rocket.as_mut() else {
        return;
    };

    let flight = rocket.update(
        now,
        &world.grid,
        world.settings.walls,
        &mut world.entities,
        &world.tuning.rocket,
        &mut world.rng,
    );
    for cell in flight.dropped {
        out_events.push(Event::RocketDropped { cell });
    }
    if flight.expired {
        debug!("rocket expired");
        world.rocket = None;
        out_events.push(Event::RocketExpired);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use snake_arcade_core::{
        Command, Direction, GridSize, SessionPhase, Settings, WallMode, APPLE_POINTS,
    };

    use snake_arcade_system_cadence::{self as cadence, Cadence};

    use super::*;
    use crate::{apply, query, Config, Heading, PowerUpTuning};

    const TICK: Duration = Duration::from_millis(210);
    const AURA: Duration = Duration::from_millis(15_000);

    fn scenario(walls: WallMode, snake: &[(i32, i32)], direction: Direction) -> World {
        let settings = Settings {
            walls,
            ..Settings::default()
        };
        let mut world = World::from_config(
            Config::new(GridSize::new(24, 24), settings)
                .with_seed(0x5eed)
                .with_tuning(PowerUpTuning::without_spawns()),
        );
        world.entities.snake = snake.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        world.entities.apples.clear();
        world.heading = Heading::new(direction);
        let mut events = Vec::new();
        apply(&mut world, Command::Start, &mut events);
        world
    }

    fn place_apples(world: &mut World, cells: &[(i32, i32)]) {
        world
            .entities
            .apples
            .extend(cells.iter().map(|&(x, y)| Cell::new(x, y)));
    }

    fn tick(world: &mut World, now: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick { now }, &mut events);
        events
    }

    fn run_cadence(world: &mut World, cadence: &mut Cadence, frame: Duration) -> Vec<Event> {
        let mut commands = Vec::new();
        cadence.handle(frame, world.phase, &mut commands);
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    fn drops_remaining(world: &World) -> Option<u32> {
        world
            .rocket
            .as_ref()
            .map(|rocket| rocket.snapshot().drops_remaining)
    }

    fn snake(world: &World) -> Vec<Cell> {
        world.entities.snake.iter().copied().collect()
    }

    #[test]
    fn eating_an_apple_grows_and_scores() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(6, 5)]);

        let events = tick(&mut world, TICK);

        assert_eq!(
            snake(&world),
            vec![
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(3, 5)
            ]
        );
        assert_eq!(world.score, APPLE_POINTS);
        assert!(!world.entities.apples.contains(&Cell::new(6, 5)));
        assert_eq!(world.entities.apples.len(), 1);
        assert!(events.contains(&Event::AppleEaten {
            cell: Cell::new(6, 5)
        }));
        assert!(events.contains(&Event::Cue {
            cue: AudioCue::AppleEat
        }));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::AppleSpawned { .. })));
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);

        let events = tick(&mut world, TICK);

        assert_eq!(
            snake(&world),
            vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
        assert_eq!(world.score, 0);
        assert!(events.contains(&Event::SnakeAdvanced {
            head: Cell::new(6, 5),
            grew: false
        }));
    }

    #[test]
    fn self_collision_ends_session_and_updates_best() {
        let mut world = scenario(
            WallMode::Solid,
            &[(4, 5), (4, 6), (3, 6), (3, 5), (3, 4)],
            Direction::West,
        );
        world.score = 30;
        world.best_score = 20;
        world.entities.bomb = Some(Cell::new(3, 5));
        place_apples(&mut world, &[(20, 20)]);
        let before = snake(&world);

        let events = tick(&mut world, TICK);

        assert_eq!(world.phase, SessionPhase::GameOver);
        assert_eq!(snake(&world), before);
        assert_eq!(world.score, 30);
        assert_eq!(world.best_score, 30);
        assert_eq!(world.entities.bomb, Some(Cell::new(3, 5)));
        assert!(events.contains(&Event::BestScoreRecorded { score: 30 }));
        assert!(events.contains(&Event::Cue {
            cue: AudioCue::GameOver
        }));

        let frozen = tick(&mut world, TICK * 2);
        assert!(frozen.is_empty());
        assert_eq!(snake(&world), before);
    }

    #[test]
    fn collision_with_tail_segment_is_terminal() {
        let mut world = scenario(
            WallMode::Solid,
            &[(5, 5), (6, 5), (6, 6), (5, 6)],
            Direction::South,
        );
        place_apples(&mut world, &[(20, 20)]);

        let _ = tick(&mut world, TICK);

        assert_eq!(world.phase, SessionPhase::GameOver);
    }

    #[test]
    fn best_score_is_kept_when_not_exceeded() {
        let mut world = scenario(
            WallMode::Solid,
            &[(23, 5), (22, 5), (21, 5)],
            Direction::East,
        );
        world.score = 10;
        world.best_score = 50;
        place_apples(&mut world, &[(1, 1)]);

        let events = tick(&mut world, TICK);

        assert_eq!(world.phase, SessionPhase::GameOver);
        assert_eq!(world.best_score, 50);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::BestScoreRecorded { .. })));
        assert!(events.contains(&Event::GameOver {
            score: 10,
            best_score: 50
        }));
    }

    #[test]
    fn solid_walls_end_session_when_leaving_grid() {
        let mut world = scenario(WallMode::Solid, &[(0, 3), (1, 3), (2, 3)], Direction::West);
        place_apples(&mut world, &[(10, 10)]);

        let _ = tick(&mut world, TICK);

        assert_eq!(world.phase, SessionPhase::GameOver);
        assert_eq!(world.entities.head(), Some(Cell::new(0, 3)));
    }

    #[test]
    fn wrap_walls_re_enter_from_opposite_edge() {
        let mut world = scenario(
            WallMode::Wrap,
            &[(23, 5), (22, 5), (21, 5)],
            Direction::East,
        );
        place_apples(&mut world, &[(10, 10)]);

        let _ = tick(&mut world, TICK);
        assert_eq!(world.entities.head(), Some(Cell::new(0, 5)));

        world.heading = Heading::new(Direction::North);
        world.entities.snake = [Cell::new(4, 0), Cell::new(4, 1), Cell::new(4, 2)].into();
        let _ = tick(&mut world, TICK * 2);
        assert_eq!(world.entities.head(), Some(Cell::new(4, 23)));
        assert_eq!(world.phase, SessionPhase::Running);
    }

    #[test]
    fn latched_direction_applies_on_next_tick() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::RequestDirection {
                direction: Direction::South,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(world.entities.head(), Some(Cell::new(5, 5)));

        let _ = tick(&mut world, TICK);
        assert_eq!(world.entities.head(), Some(Cell::new(5, 6)));

        apply(
            &mut world,
            Command::RequestDirection {
                direction: Direction::North,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::DirectionRejected {
                requested: Direction::North,
                current: Direction::South,
            }]
        );
        let _ = tick(&mut world, TICK * 2);
        assert_eq!(world.entities.head(), Some(Cell::new(5, 7)));
    }

    #[test]
    fn magnet_collects_apples_in_radius_with_single_growth() {
        let mut world = scenario(
            WallMode::Solid,
            &[(9, 10), (8, 10), (7, 10)],
            Direction::East,
        );
        place_apples(&mut world, &[(11, 10), (13, 10), (15, 10)]);
        let _ = world.magnet.activate(Duration::ZERO, AURA);

        let events = tick(&mut world, TICK);

        assert_eq!(world.entities.head(), Some(Cell::new(10, 10)));
        assert_eq!(world.score, 2 * APPLE_POINTS);
        assert_eq!(world.entities.snake.len(), 4);
        assert_eq!(world.entities.apples, BTreeSet::from([Cell::new(15, 10)]));
        assert!(events.contains(&Event::MagnetCollected {
            cells: vec![Cell::new(11, 10), Cell::new(13, 10)]
        }));
        assert!(events.contains(&Event::Cue {
            cue: AudioCue::MagnetCollect
        }));
    }

    #[test]
    fn apple_and_magnet_in_same_tick_grow_once() {
        let mut world = scenario(
            WallMode::Solid,
            &[(9, 10), (8, 10), (7, 10)],
            Direction::East,
        );
        place_apples(&mut world, &[(10, 10), (11, 10), (12, 10), (20, 20)]);
        let _ = world.magnet.activate(Duration::ZERO, AURA);

        let _ = tick(&mut world, TICK);

        assert_eq!(world.score, 3 * APPLE_POINTS);
        assert_eq!(world.entities.snake.len(), 4);
    }

    #[test]
    fn magnet_expiry_skips_collection_on_that_tick() {
        let mut world = scenario(
            WallMode::Solid,
            &[(9, 10), (8, 10), (7, 10)],
            Direction::East,
        );
        place_apples(&mut world, &[(11, 10)]);
        let expires_at = world.magnet.activate(Duration::ZERO, AURA);

        let events = tick(&mut world, expires_at);

        assert!(events.contains(&Event::MagnetExpired));
        assert!(!world.magnet.is_active());
        assert_eq!(world.score, 0);
        assert_eq!(world.entities.snake.len(), 3);
        assert!(world.entities.apples.contains(&Cell::new(11, 10)));
    }

    #[test]
    fn magnet_pickup_activates_aura_and_grows() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.entities.magnet = Some(Cell::new(6, 5));
        let now = Duration::from_secs(4);

        let events = tick(&mut world, now);

        assert_eq!(world.entities.magnet, None);
        assert_eq!(
            world.magnet.expires_at(),
            Some(now + Duration::from_millis(15_000))
        );
        assert_eq!(world.entities.snake.len(), 4);
        assert!(events.contains(&Event::Cue {
            cue: AudioCue::MagnetPickup
        }));
    }

    #[test]
    fn bomb_pickup_scatters_apples_and_grows() {
        let mut world = scenario(WallMode::Solid, &[(7, 8), (6, 8), (5, 8)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.entities.bomb = Some(Cell::new(8, 8));
        world.entities.rocket = Some(Cell::new(10, 8));

        let events = tick(&mut world, TICK);

        assert_eq!(world.entities.bomb, None);
        assert_eq!(world.entities.snake.len(), 4);
        let scattered = events
            .iter()
            .find_map(|event| match event {
                Event::BombExploded { cell, apples } if *cell == Cell::new(8, 8) => {
                    Some(apples.clone())
                }
                _ => None,
            })
            .expect("bomb exploded");
        assert!(!scattered.is_empty());
        assert!(scattered.len() <= 14);
        for apple in &scattered {
            assert!(world.entities.apples.contains(apple));
            assert!(!world.entities.snake_contains(*apple));
            assert_ne!(Some(*apple), world.entities.rocket);
            assert_ne!(*apple, Cell::new(20, 20));
        }
        assert_eq!(world.entities.apples.len(), scattered.len() + 1);
        assert!(events.contains(&Event::Cue {
            cue: AudioCue::BombExplode
        }));
    }

    #[test]
    fn rocket_pickup_launches_rocket_that_expires() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.entities.rocket = Some(Cell::new(6, 5));
        let launch = Duration::from_secs(1);

        let events = tick(&mut world, launch);
        assert_eq!(world.entities.rocket, None);
        assert_eq!(world.entities.snake.len(), 4);
        assert!(world.rocket.is_some());
        assert!(events.contains(&Event::RocketLaunched {
            origin: Cell::new(6, 5),
            expires_at: launch + Duration::from_millis(10_000),
        }));

        world.heading = Heading::new(Direction::South);
        let expiry = launch + Duration::from_millis(10_000);
        let events = tick(&mut world, expiry);

        let dropped: Vec<Cell> = events
            .iter()
            .filter_map(|event| match event {
                Event::RocketDropped { cell } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(world.phase, SessionPhase::Running);
        assert!(!dropped.is_empty());
        assert!(dropped.len() <= 40);
        for cell in &dropped {
            assert!(world.entities.apples.contains(cell));
        }
        assert!(events.contains(&Event::RocketExpired));
        assert!(world.rocket.is_none());
    }

    #[test]
    fn pause_leaves_power_up_timers_untouched() {
        let mut world = scenario(WallMode::Wrap, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.entities.magnet = Some(Cell::new(6, 5));
        world.entities.rocket = Some(Cell::new(7, 5));
        let mut cadence = Cadence::new(cadence::Config::new(TICK));

        let _ = run_cadence(&mut world, &mut cadence, TICK * 2);
        let magnet_deadline = world.magnet.expires_at();
        let drops_before = drops_remaining(&world);
        assert!(magnet_deadline.is_some());
        assert!(drops_before.is_some());

        let mut events = Vec::new();
        apply(&mut world, Command::Pause, &mut events);
        let paused = run_cadence(&mut world, &mut cadence, Duration::from_secs(30));
        assert!(paused.is_empty());
        apply(&mut world, Command::Resume, &mut events);

        let events = run_cadence(&mut world, &mut cadence, TICK);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::SnakeAdvanced { .. })));
        assert!(!events.contains(&Event::MagnetExpired));
        assert!(!events.contains(&Event::RocketExpired));
        assert!(world.magnet.is_active());
        assert_eq!(world.magnet.expires_at(), magnet_deadline);
        let dropped = events
            .iter()
            .filter(|event| matches!(event, Event::RocketDropped { .. }))
            .count();
        assert!(dropped <= 1, "resumed tick dropped {dropped} apples");
        let (Some(before), Some(after)) = (drops_before, drops_remaining(&world)) else {
            panic!("rocket survives the pause");
        };
        assert!(before - after <= 1);
    }

    #[test]
    fn apple_set_is_replenished_when_emptied() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(6, 5)]);

        let _ = tick(&mut world, TICK);

        assert_eq!(world.entities.apples.len(), 1);
    }

    #[test]
    fn spawn_rolls_respect_head_distance_and_single_instances() {
        let mut world = scenario(WallMode::Wrap, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.tuning.bomb.spawn_chance = 1.0;
        world.tuning.magnet.spawn_chance = 1.0;
        world.tuning.rocket.spawn_chance = 1.0;

        let events = tick(&mut world, TICK);
        let head = world.entities.head().expect("head");
        let spawned: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::PowerUpSpawned { kind, cell } => Some((*kind, *cell)),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 3);
        for (_, cell) in &spawned {
            assert!(cell.distance(head) > 4.0);
        }

        let events = tick(&mut world, TICK * 2);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PowerUpSpawned { .. })));
        assert_eq!(query::snapshot(&world).bomb, world.entities.bomb);
    }

    #[test]
    fn magnet_does_not_spawn_while_aura_is_active() {
        let mut world = scenario(WallMode::Solid, &[(5, 5), (4, 5), (3, 5)], Direction::East);
        place_apples(&mut world, &[(20, 20)]);
        world.tuning.magnet.spawn_chance = 1.0;
        let _ = world.magnet.activate(Duration::ZERO, AURA);

        let events = tick(&mut world, TICK);

        assert!(!events.iter().any(|event| matches!(
            event,
            Event::PowerUpSpawned {
                kind: PowerUpKind::Magnet,
                ..
            }
        )));
    }

    #[test]
    fn bomb_does_not_spawn_without_apples_on_full_board() {
        let mut world = World::from_config(
            Config::new(GridSize::new(3, 1), Settings::default())
                .with_seed(1)
                .with_tuning(PowerUpTuning::without_spawns()),
        );
        world.tuning.bomb.spawn_chance = 1.0;
        world.entities.snake = [Cell::new(1, 0), Cell::new(0, 0)].into();
        world.entities.apples.clear();
        world.heading = Heading::new(Direction::East);
        let mut events = Vec::new();
        apply(&mut world, Command::Start, &mut events);
        place_apples(&mut world, &[(2, 0)]);

        let events = tick(&mut world, TICK);

        assert_eq!(world.entities.snake.len(), 3);
        assert!(world.entities.apples.is_empty());
        assert_eq!(world.entities.bomb, None);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PowerUpSpawned { .. })));
    }
}
