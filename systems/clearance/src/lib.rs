#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that keeps routes away from walls by dilating the wall set.

use maze_path_core::{Grid, DEFAULT_CLEARANCE};

/// Expands every wall into a square of Chebyshev radius `clearance`.
///
/// A cell of the expanded grid is a wall when any input cell with
/// `|dr| <= clearance` and `|dc| <= clearance` is a wall. Neighbours outside
/// the grid are skipped rather than treated as walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearanceExpander {
    clearance: u32,
}

impl Default for ClearanceExpander {
    fn default() -> Self {
        Self::new(DEFAULT_CLEARANCE)
    }
}

impl ClearanceExpander {
    /// Creates an expander with the provided radius.
    #[must_use]
    pub const fn new(clearance: u32) -> Self {
        Self { clearance }
    }

    /// Radius by which walls are expanded.
    #[must_use]
    pub const fn clearance(&self) -> u32 {
        self.clearance
    }

    /// Produces a new grid with walls dilated by the configured radius.
    ///
    /// Wall counts over each square window are read from a summed-area
    /// table, so the cost does not grow with the radius.
    #[must_use]
    pub fn expand(&self, grid: &Grid) -> Grid {
        if self.clearance == 0 || grid.wall_count() == 0 {
            return grid.clone();
        }

        let rows = grid.rows() as usize;
        let columns = grid.columns() as usize;
        let radius = self.clearance as usize;
        let table = WallTable::build(grid.cells(), rows, columns);

        let expanded = Grid::from_fn(grid.rows(), grid.columns(), |cell| {
            let row = cell.row() as usize;
            let column = cell.column() as usize;
            let top = row.saturating_sub(radius);
            let bottom = row.saturating_add(radius).min(rows - 1);
            let left = column.saturating_sub(radius);
            let right = column.saturating_add(radius).min(columns - 1);
            table.walls_in(top, left, bottom, right) == 0
        });
        tracing::debug!(
            clearance = self.clearance,
            walls_before = grid.wall_count(),
            walls_after = expanded.wall_count(),
            "expanded wall clearance"
        );
        expanded
    }
}

/// Summed-area table of wall cells with a zero row and column prepended.
struct WallTable {
    stride: usize,
    sums: Vec<usize>,
}

impl WallTable {
    fn build(cells: &[bool], rows: usize, columns: usize) -> Self {
        let stride = columns + 1;
        let mut sums = vec![0usize; (rows + 1) * stride];
        for row in 0..rows {
            let mut running = 0;
            for column in 0..columns {
                if !cells[row * columns + column] {
                    running += 1;
                }
                sums[(row + 1) * stride + column + 1] = sums[row * stride + column + 1] + running;
            }
        }
        Self { stride, sums }
    }

    /// Number of walls inside the inclusive rectangle.
    fn walls_in(&self, top: usize, left: usize, bottom: usize, right: usize) -> usize {
        let at = |row: usize, column: usize| self.sums[row * self.stride + column];
        at(bottom + 1, right + 1) + at(top, left) - at(top, right + 1) - at(bottom + 1, left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_path_core::CellCoord;

    #[test]
    fn zero_clearance_returns_equivalent_grid() {
        let grid = Grid::from_ascii(
            "
            ...
            .#.
            ...
            ",
        )
        .expect("valid art");
        assert_eq!(ClearanceExpander::new(0).expand(&grid), grid);
    }

    #[test]
    fn single_wall_grows_into_square() {
        let grid = Grid::from_ascii(
            "
            .....
            .....
            ..#..
            .....
            .....
            ",
        )
        .expect("valid art");

        let expanded = ClearanceExpander::new(1).expand(&grid);

        for (cell, open) in expanded.iter_cells() {
            let near = cell.chebyshev_distance(CellCoord::new(2, 2)) <= 1;
            assert_eq!(open, !near, "unexpected flag at {cell}");
        }
    }

    #[test]
    fn wall_table_counts_rectangles() {
        let grid = Grid::from_ascii("#.#\n...\n#..").expect("valid art");
        let table = WallTable::build(grid.cells(), 3, 3);
        assert_eq!(table.walls_in(0, 0, 2, 2), 3);
        assert_eq!(table.walls_in(0, 1, 1, 2), 1);
        assert_eq!(table.walls_in(1, 1, 2, 2), 0);
    }
}
