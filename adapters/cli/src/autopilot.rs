//! Greedy steering used by the headless mode.

use snake_arcade_core::{Cell, Direction, SessionSnapshot, WallMode};

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Picks the safe direction that brings the head closest to an apple.
///
/// Returns `None` when every move collides, leaving the current heading alone.
pub(crate) fn steer(snapshot: &SessionSnapshot) -> Option<Direction> {
    let head = snapshot.head()?;
    let heading = current_heading(snapshot);

    DIRECTIONS
        .into_iter()
        .filter(|direction| Some(direction.opposite()) != heading)
        .filter_map(|direction| {
            let next = next_cell(snapshot, head, direction)?;
            if snapshot.snake.contains(&next) {
                return None;
            }
            Some((direction, distance_to_food(snapshot, next)))
        })
        .min_by(|(_, left), (_, right)| left.total_cmp(right))
        .map(|(direction, _)| direction)
}

/// Direction of travel inferred from the two leading segments.
fn current_heading(snapshot: &SessionSnapshot) -> Option<Direction> {
    let [head, neck, ..] = snapshot.snake.as_slice() else {
        return None;
    };
    let dx = unwrap_axis(head.x() - neck.x());
    let dy = unwrap_axis(head.y() - neck.y());
    Direction::from_delta(dx, dy)
}

/// Maps a wrapped jump across the board back onto a unit step.
fn unwrap_axis(delta: i32) -> i32 {
    if delta.abs() > 1 {
        -delta.signum()
    } else {
        delta
    }
}

fn next_cell(snapshot: &SessionSnapshot, head: Cell, direction: Direction) -> Option<Cell> {
    let width = i32::try_from(snapshot.grid.width()).ok()?;
    let height = i32::try_from(snapshot.grid.height()).ok()?;
    let next = head.step(direction);
    let inside = next.x() >= 0 && next.x() < width && next.y() >= 0 && next.y() < height;

    match snapshot.walls {
        WallMode::Solid if inside => Some(next),
        WallMode::Solid => None,
        WallMode::Wrap if width > 0 && height > 0 => Some(Cell::new(
            next.x().rem_euclid(width),
            next.y().rem_euclid(height),
        )),
        WallMode::Wrap => None,
    }
}

fn distance_to_food(snapshot: &SessionSnapshot, cell: Cell) -> f32 {
    snapshot
        .apples
        .iter()
        .chain(snapshot.bomb.iter())
        .map(|target| target.distance(cell))
        .fold(f32::INFINITY, f32::min)
}
