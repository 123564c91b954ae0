//! Positions of every grid-aligned entity and the occupancy queries built on them.

use std::collections::{BTreeSet, VecDeque};

use rand::{seq::SliceRandom, Rng};
use snake_arcade_core::{Cell, PowerUpKind};

use crate::grid::Grid;

/// Random draws attempted before the free-cell search falls back to a full scan.
const FREE_CELL_ATTEMPTS: usize = 64;

/// Registry of the snake, apples and ground pickups.
#[derive(Clone, Debug, Default)]
pub(crate) struct Entities {
    /// Snake segments ordered head-first.
    pub(crate) snake: VecDeque<Cell>,
    pub(crate) apples: BTreeSet<Cell>,
    pub(crate) bomb: Option<Cell>,
    pub(crate) magnet: Option<Cell>,
    pub(crate) rocket: Option<Cell>,
}

impl Entities {
    pub(crate) fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub(crate) fn snake_contains(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Reports whether any entity occupies `cell`.
    pub(crate) fn is_occupied(&self, cell: Cell) -> bool {
        self.snake_contains(cell)
            || self.bomb == Some(cell)
            || self.magnet == Some(cell)
            || self.rocket == Some(cell)
            || self.apples.contains(&cell)
    }

    /// Mutable access to the ground slot of a pickup kind.
    pub(crate) fn pickup_mut(&mut self, kind: PowerUpKind) -> &mut Option<Cell> {
        match kind {
            PowerUpKind::Bomb => &mut self.bomb,
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::Rocket => &mut self.rocket,
        }
    }

    /// Places an apple on `cell` when it lies inside the grid and is free.
    pub(crate) fn try_place_apple(&mut self, grid: &Grid, cell: Cell) -> bool {
        if !grid.contains(cell) || self.is_occupied(cell) {
            return false;
        }
        self.apples.insert(cell)
    }

    /// Draws a uniformly random unoccupied cell accepted by `accept`.
    ///
    /// A bounded number of rejection-sampling attempts is made first; after
    /// that every free cell is enumerated and one is chosen uniformly. Returns
    /// `None` when no cell qualifies.
    pub(crate) fn random_free_cell<R, F>(&self, grid: &Grid, rng: &mut R, accept: F) -> Option<Cell>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        if grid.cell_count() == 0 {
            return None;
        }

        for _ in 0..FREE_CELL_ATTEMPTS {
            let cell = Cell::new(
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..grid.height()),
            );
            if !self.is_occupied(cell) && accept(cell) {
                return Some(cell);
            }
        }

        let candidates: Vec<Cell> = grid
            .cells()
            .filter(|cell| !self.is_occupied(*cell) && accept(*cell))
            .collect();
        candidates.choose(rng).copied()
    }
}
