//! Fixed-size discrete coordinate space used by the session.

use snake_arcade_core::{Cell, GridSize, WallMode};

/// Playing field dimensions with boundary helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Creates a grid from the configured size, saturating oversized axes.
    pub(crate) fn new(size: GridSize) -> Self {
        Self {
            width: i32::try_from(size.width()).unwrap_or(i32::MAX),
            height: i32::try_from(size.height()).unwrap_or(i32::MAX),
        }
    }

    pub(crate) const fn width(&self) -> i32 {
        self.width
    }

    pub(crate) const fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn size(&self) -> GridSize {
        GridSize::new(self.width.unsigned_abs(), self.height.unsigned_abs())
    }

    /// Reports whether both coordinates fall inside the grid.
    pub(crate) const fn contains(&self, cell: Cell) -> bool {
        cell.x() >= 0 && cell.x() < self.width && cell.y() >= 0 && cell.y() < self.height
    }

    /// Applies the boundary rule of `walls` to `cell`.
    ///
    /// Wrapping always yields non-negative coordinates; solid walls leave the
    /// cell untouched so the caller can detect the collision.
    pub(crate) fn normalize(&self, cell: Cell, walls: WallMode) -> Cell {
        match walls {
            WallMode::Solid => cell,
            WallMode::Wrap if self.width > 0 && self.height > 0 => Cell::new(
                cell.x().rem_euclid(self.width),
                cell.y().rem_euclid(self.height),
            ),
            WallMode::Wrap => cell,
        }
    }

    /// Total number of cells on the board.
    pub(crate) fn cell_count(&self) -> usize {
        let width = usize::try_from(self.width.max(0)).unwrap_or(0);
        let height = usize::try_from(self.height.max(0)).unwrap_or(0);
        width.saturating_mul(height)
    }

    /// Iterates all cells in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width.max(0);
        let height = self.height.max(0);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_reduces_coordinates_into_range() {
        let grid = Grid::new(GridSize::new(10, 8));
        let wrap = |column, row| grid.normalize(Cell::new(column, row), WallMode::Wrap);
        assert_eq!(wrap(-1, 3), Cell::new(9, 3));
        assert_eq!(wrap(10, 8), Cell::new(0, 0));
        assert_eq!(wrap(4, -9), Cell::new(4, 7));
    }

    #[test]
    fn solid_leaves_cells_untouched() {
        let grid = Grid::new(GridSize::new(10, 8));
        let outside = Cell::new(-1, 3);
        assert_eq!(grid.normalize(outside, WallMode::Solid), outside);
        assert!(!grid.contains(outside));
    }

    #[test]
    fn contains_checks_both_axes() {
        let grid = Grid::new(GridSize::new(3, 2));
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(2, 1)));
        assert!(!grid.contains(Cell::new(3, 1)));
        assert!(!grid.contains(Cell::new(2, 2)));
    }

    #[test]
    fn cells_enumerates_whole_board() {
        let grid = Grid::new(GridSize::new(3, 2));
        assert_eq!(grid.cells().count(), grid.cell_count());
        assert_eq!(grid.cells().last(), Some(Cell::new(2, 1)));
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let grid = Grid::new(GridSize::new(0, 5));
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.cells().count(), 0);
        let outside = Cell::new(-1, -1);
        assert_eq!(grid.normalize(outside, WallMode::Wrap), outside);
    }
}
