#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest path search over a traversability grid.

use std::collections::VecDeque;

use maze_path_core::{CellCoord, Grid, Path, PlannerError, PlannerResult, SearchOutcome};

/// Finds shortest 4-connected paths through passable cells.
///
/// Neighbours are expanded in the order right, down, left, up. The order
/// never changes the length of the returned path, but it decides which of
/// several equally short paths wins, so results are reproducible.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathSearcher;

impl PathSearcher {
    /// Creates a new path searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Searches `grid` for the shortest path from `start` to `goal`.
    ///
    /// Both endpoints must lie inside the grid, otherwise
    /// [`PlannerError::OutOfBounds`] is returned before any cell is visited.
    /// Endpoints are not required to be passable: a wall goal is simply never
    /// reached, and `start == goal` always yields the single-cell path.
    pub fn search(
        &self,
        grid: &Grid,
        start: CellCoord,
        goal: CellCoord,
    ) -> PlannerResult<SearchOutcome> {
        for cell in [start, goal] {
            if !grid.contains(cell) {
                return Err(out_of_bounds(grid, cell));
            }
        }
        let start_index = grid
            .index(start)
            .ok_or_else(|| out_of_bounds(grid, start))?;

        // Parent offsets double as the visited set; the start points at itself.
        let mut parents: Vec<Option<usize>> = vec![None; grid.cells().len()];
        parents[start_index] = Some(start_index);

        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut explored = 0usize;

        while let Some(cell) = queue.pop_front() {
            explored += 1;

            if cell == goal {
                tracing::debug!(%start, %goal, explored, "goal reached");
                return Ok(reconstruct(grid, &parents, start_index, cell)
                    .map_or(SearchOutcome::NoPathFound, SearchOutcome::Found));
            }

            let Some(current_index) = grid.index(cell) else {
                continue;
            };

            for neighbor in neighbors(cell, grid.rows(), grid.columns()) {
                if !grid.is_traversable(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };

                if parents[neighbor_index].is_some() {
                    continue;
                }

                parents[neighbor_index] = Some(current_index);
                queue.push_back(neighbor);
            }
        }

        tracing::debug!(%start, %goal, explored, "search exhausted without reaching goal");
        Ok(SearchOutcome::NoPathFound)
    }
}

fn out_of_bounds(grid: &Grid, cell: CellCoord) -> PlannerError {
    PlannerError::OutOfBounds {
        cell,
        rows: grid.rows(),
        columns: grid.columns(),
    }
}

/// Follows parent links from `goal` back to the start and reverses them.
fn reconstruct(
    grid: &Grid,
    parents: &[Option<usize>],
    start_index: usize,
    goal: CellCoord,
) -> Option<Path> {
    let columns = grid.columns() as usize;
    let to_cell =
        |offset: usize| CellCoord::new((offset / columns) as u32, (offset % columns) as u32);

    let mut cells = vec![goal];
    let mut cursor = grid.index(goal);
    while let Some(offset) = cursor {
        if offset == start_index {
            break;
        }
        cursor = parents[offset];
        if let Some(parent) = cursor {
            cells.push(to_cell(parent));
        }
    }
    cells.reverse();

    Path::from_cells(cells)
}

fn neighbors(cell: CellCoord, rows: u32, columns: u32) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(column) = cell.column().checked_add(1) {
        if column < columns {
            candidates[count] = Some(CellCoord::new(cell.row(), column));
            count += 1;
        }
    }

    if let Some(row) = cell.row().checked_add(1) {
        if row < rows {
            candidates[count] = Some(CellCoord::new(row, cell.column()));
            count += 1;
        }
    }

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.row(), column));
        count += 1;
    }

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(row, cell.column()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_right_down_left_up_order() {
        let around: Vec<_> = neighbors(CellCoord::new(1, 1), 3, 3).collect();
        assert_eq!(
            around,
            vec![
                CellCoord::new(1, 2),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
            ]
        );
    }

    #[test]
    fn neighbors_are_clipped_at_corners() {
        let around: Vec<_> = neighbors(CellCoord::new(0, 0), 2, 2).collect();
        assert_eq!(around, vec![CellCoord::new(0, 1), CellCoord::new(1, 0)]);

        let around: Vec<_> = neighbors(CellCoord::new(1, 1), 2, 2).collect();
        assert_eq!(around, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);
    }

    #[test]
    fn tie_break_prefers_moving_right_first() {
        let grid = Grid::filled(2, 2, true);

        let outcome = PathSearcher::new()
            .search(&grid, CellCoord::new(0, 0), CellCoord::new(1, 1))
            .expect("endpoints in bounds");

        let path = outcome.into_path().expect("open grid is solvable");
        assert_eq!(
            path.cells(),
            &[
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }
}
