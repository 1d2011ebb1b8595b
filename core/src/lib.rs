#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze path planner.
//!
//! This crate defines the values that flow between the pipeline stages.
//! Adapters decode an image into an [`IntensityGrid`], the binarizer system
//! turns it into a traversability [`Grid`], the clearance system produces a
//! second, wall-expanded [`Grid`], and the path search system answers with a
//! [`SearchOutcome`]. Every stage receives an immutable view of its
//! predecessor's output and allocates a fresh result, so nothing defined here
//! exposes in-place mutation once a value has been constructed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intensity threshold applied by the binarizer when none is configured.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Number of cells cropped from every edge when no margin is configured.
pub const DEFAULT_MARGIN: u32 = 2;

/// Wall clearance radius applied when none is configured.
pub const DEFAULT_CLEARANCE: u32 = 1;

/// Glyph marking a wall cell in ASCII grid art.
pub const WALL_GLYPH: char = '#';

/// Glyph marking a traversable cell in ASCII grid art.
pub const OPEN_GLYPH: char = '.';

/// Errors raised while constructing grids or running pipeline stages.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// Cropping the configured margin would leave an empty grid.
    #[error("cannot crop a margin of {margin} from a {rows}x{columns} grid")]
    InvalidDimensions {
        /// Number of rows in the grid being cropped.
        rows: u32,
        /// Number of columns in the grid being cropped.
        columns: u32,
        /// Margin requested on every edge.
        margin: u32,
    },
    /// A search endpoint lies outside the grid.
    #[error("cell {cell} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of rows in the searched grid.
        rows: u32,
        /// Number of columns in the searched grid.
        columns: u32,
    },
    /// A flat cell buffer does not match the declared dimensions.
    #[error("expected {expected} cells but the buffer holds {actual}")]
    BufferSizeMismatch {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },
    /// Nested rows do not share a common length.
    #[error("row {row} holds {actual} cells, expected {expected}")]
    RaggedRows {
        /// Index of the first row whose length differs.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// ASCII grid art contained a glyph other than a wall or open marker.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Unrecognised character.
        glyph: char,
        /// Row containing the glyph.
        row: usize,
        /// Column containing the glyph.
        column: usize,
    },
    /// Grid dimensions do not fit the coordinate space.
    #[error("grid dimension {0} exceeds the supported coordinate range")]
    DimensionOverflow(usize),
}

/// Result alias used throughout the planner crates.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, column): (u32, u32)) -> Self {
        Self::new(row, column)
    }
}

/// Dense row-major grid of 8-bit intensities produced by an image decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityGrid {
    rows: u32,
    columns: u32,
    values: Vec<u8>,
}

impl IntensityGrid {
    /// Wraps a row-major intensity buffer with the provided dimensions.
    pub fn new(rows: u32, columns: u32, values: Vec<u8>) -> PlannerResult<Self> {
        check_buffer_len(rows, columns, values.len())?;
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Builds an intensity grid from nested rows, rejecting ragged input.
    pub fn from_rows<R>(rows: &[R]) -> PlannerResult<Self>
    where
        R: AsRef<[u8]>,
    {
        let (row_count, columns, values) = flatten_rows(rows)?;
        Self::new(row_count, columns, values)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Intensity stored at the provided cell, if it lies within the grid.
    #[must_use]
    pub fn intensity(&self, cell: CellCoord) -> Option<u8> {
        index(self.rows, self.columns, cell).and_then(|offset| self.values.get(offset).copied())
    }

    /// Dense intensities stored in row-major order.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

/// Immutable row-major traversability grid; `true` marks a passable cell.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Wraps a row-major traversability buffer with the provided dimensions.
    pub fn new(rows: u32, columns: u32, cells: Vec<bool>) -> PlannerResult<Self> {
        check_buffer_len(rows, columns, cells.len())?;
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Creates a grid where every cell carries the same traversability flag.
    #[must_use]
    pub fn filled(rows: u32, columns: u32, traversable: bool) -> Self {
        let count = (rows as usize).saturating_mul(columns as usize);
        Self {
            rows,
            columns,
            cells: vec![traversable; count],
        }
    }

    /// Builds a grid by evaluating `open` for every cell in row-major order.
    pub fn from_fn<F>(rows: u32, columns: u32, mut open: F) -> Self
    where
        F: FnMut(CellCoord) -> bool,
    {
        let mut cells = Vec::with_capacity((rows as usize).saturating_mul(columns as usize));
        for row in 0..rows {
            for column in 0..columns {
                cells.push(open(CellCoord::new(row, column)));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Builds a grid from nested rows, rejecting ragged input.
    pub fn from_rows<R>(rows: &[R]) -> PlannerResult<Self>
    where
        R: AsRef<[bool]>,
    {
        let (row_count, columns, cells) = flatten_rows(rows)?;
        Self::new(row_count, columns, cells)
    }

    /// Parses ASCII art where [`WALL_GLYPH`] marks walls and [`OPEN_GLYPH`]
    /// marks open cells.
    ///
    /// Leading and trailing whitespace on each line is ignored, as are blank
    /// lines, so the art can be written as an indented string literal.
    pub fn from_ascii(art: &str) -> PlannerResult<Self> {
        let mut rows = Vec::new();
        for (row, line) in art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let parsed = line
                .chars()
                .enumerate()
                .map(|(column, glyph)| match glyph {
                    WALL_GLYPH => Ok(false),
                    OPEN_GLYPH => Ok(true),
                    _ => Err(PlannerError::UnknownGlyph { glyph, row, column }),
                })
                .collect::<PlannerResult<Vec<bool>>>()?;
            rows.push(parsed);
        }
        Self::from_rows(&rows)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Traversability flag of the provided cell, if it lies within the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<bool> {
        self.index(cell)
            .and_then(|offset| self.cells.get(offset).copied())
    }

    /// Reports whether the cell is in bounds and passable.
    #[must_use]
    pub fn is_traversable(&self, cell: CellCoord) -> bool {
        self.get(cell).unwrap_or(false)
    }

    /// Dense traversability flags stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterates over every cell coordinate paired with its flag, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, bool)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(offset, &open)| {
            let offset = offset as u32;
            (CellCoord::new(offset / columns, offset % columns), open)
        })
    }

    /// Number of wall cells in the grid.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|open| !**open).count()
    }

    /// Row-major offset of the provided cell, if it lies within the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        index(self.rows, self.columns, cell)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.columns)?;
        for row in self.cells.chunks(self.columns.max(1) as usize) {
            for &open in row {
                let glyph = if open { OPEN_GLYPH } else { WALL_GLYPH };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct RawGrid {
    rows: u32,
    columns: u32,
    cells: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = PlannerError;

    fn try_from(raw: RawGrid) -> PlannerResult<Self> {
        Self::new(raw.rows, raw.columns, raw.cells)
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid.rows,
            columns: grid.columns,
            cells: grid.cells,
        }
    }
}

/// Non-empty ordered sequence of cells from a start cell to a goal cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellCoord>", into = "Vec<CellCoord>")]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps the provided waypoints, returning `None` when there are none.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// Waypoints from start to goal inclusive.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// First waypoint of the path.
    #[must_use]
    pub fn start(&self) -> CellCoord {
        self.cells[0]
    }

    /// Last waypoint of the path.
    #[must_use]
    pub fn goal(&self) -> CellCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of waypoints, endpoints included. Always at least one.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of unit moves between consecutive waypoints.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// Reports whether every consecutive pair differs by one unit step.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|pair| pair[0].manhattan_distance(pair[1]) == 1)
    }
}

impl TryFrom<Vec<CellCoord>> for Path {
    type Error = &'static str;

    fn try_from(cells: Vec<CellCoord>) -> Result<Self, Self::Error> {
        Self::from_cells(cells).ok_or("path must contain at least one cell")
    }
}

impl From<Path> for Vec<CellCoord> {
    fn from(path: Path) -> Self {
        path.cells
    }
}

/// Terminal result of a single path search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// The goal was reached; the path runs from start to goal inclusive.
    Found(Path),
    /// The search exhausted every reachable cell without meeting the goal.
    NoPathFound,
}

impl SearchOutcome {
    /// Path discovered by the search, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPathFound => None,
        }
    }

    /// Consumes the outcome, yielding the discovered path.
    #[must_use]
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPathFound => None,
        }
    }

    /// Reports whether the search reached the goal.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Tunables for a single planning run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Intensities strictly above this value are traversable.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Number of cells cropped from every edge of the intensity grid.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Chebyshev radius by which walls are expanded before searching.
    #[serde(default = "default_clearance")]
    pub clearance: u32,
    /// Cell the search starts from, in cropped grid coordinates.
    pub start: CellCoord,
    /// Cell the search tries to reach, in cropped grid coordinates.
    pub goal: CellCoord,
}

impl PlannerConfig {
    /// Creates a configuration with default threshold, margin and clearance.
    #[must_use]
    pub const fn new(start: CellCoord, goal: CellCoord) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            clearance: DEFAULT_CLEARANCE,
            start,
            goal,
        }
    }
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

fn default_clearance() -> u32 {
    DEFAULT_CLEARANCE
}

/// Hand-off value consumed by presenters.
///
/// `maze` is the cropped grid before clearance expansion, which is what a
/// human expects to see underneath the overlaid path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Cropped traversability grid without clearance applied.
    pub maze: Grid,
    /// Requested start cell.
    pub start: CellCoord,
    /// Requested goal cell.
    pub goal: CellCoord,
    /// Result of searching the clearance-expanded grid.
    pub outcome: SearchOutcome,
}

impl PlannedRoute {
    /// Reports whether a path was found.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.outcome.is_found()
    }
}

fn index(rows: u32, columns: u32, cell: CellCoord) -> Option<usize> {
    if cell.row() >= rows || cell.column() >= columns {
        return None;
    }

    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let width = usize::try_from(columns).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn check_buffer_len(rows: u32, columns: u32, actual: usize) -> PlannerResult<()> {
    let expected = (rows as usize)
        .checked_mul(columns as usize)
        .ok_or(PlannerError::DimensionOverflow(rows as usize))?;
    if expected != actual {
        return Err(PlannerError::BufferSizeMismatch { expected, actual });
    }
    Ok(())
}

fn flatten_rows<T, R>(rows: &[R]) -> PlannerResult<(u32, u32, Vec<T>)>
where
    T: Copy,
    R: AsRef<[T]>,
{
    let expected = rows.first().map_or(0, |row| row.as_ref().len());
    let mut values = Vec::with_capacity(expected.saturating_mul(rows.len()));
    for (row, cells) in rows.iter().enumerate() {
        let cells = cells.as_ref();
        if cells.len() != expected {
            return Err(PlannerError::RaggedRows {
                row,
                expected,
                actual: cells.len(),
            });
        }
        values.extend_from_slice(cells);
    }

    let row_count =
        u32::try_from(rows.len()).map_err(|_| PlannerError::DimensionOverflow(rows.len()))?;
    let columns = u32::try_from(expected).map_err(|_| PlannerError::DimensionOverflow(expected))?;
    Ok((row_count, columns, values))
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Grid, IntensityGrid, Path, PlannedRoute, PlannerError, SearchOutcome};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(3, 4);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn chebyshev_distance_uses_largest_axis() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(origin.chebyshev_distance(CellCoord::new(5, 3)), 3);
        assert_eq!(origin.chebyshev_distance(CellCoord::new(1, 0)), 2);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn planned_route_round_trips_through_bincode() {
        let maze = Grid::from_ascii(
            "
            ..#
            ...
            ",
        )
        .expect("valid art");
        let path = Path::from_cells(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ])
        .expect("non-empty path");
        let route = PlannedRoute {
            maze,
            start: CellCoord::new(0, 0),
            goal: CellCoord::new(1, 1),
            outcome: SearchOutcome::Found(path),
        };
        assert_round_trip(&route);
    }

    #[test]
    fn empty_path_is_rejected_on_deserialize() {
        let bytes = bincode::serialize(&Vec::<CellCoord>::new()).expect("serialize");
        assert!(bincode::deserialize::<Path>(&bytes).is_err());
    }

    #[test]
    fn grid_rejects_mismatched_buffer() {
        assert_eq!(
            Grid::new(2, 3, vec![true; 5]),
            Err(PlannerError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn intensity_grid_rejects_ragged_rows() {
        let rows: [&[u8]; 2] = [&[1, 2, 3], &[4, 5]];
        assert_eq!(
            IntensityGrid::from_rows(&rows),
            Err(PlannerError::RaggedRows {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn ascii_art_maps_glyphs_to_flags() {
        let grid = Grid::from_ascii(
            "
            .#
            #.
            ",
        )
        .expect("valid art");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.cells(), &[true, false, false, true]);
        assert_eq!(grid.wall_count(), 2);
    }

    #[test]
    fn ascii_art_rejects_unknown_glyphs() {
        assert_eq!(
            Grid::from_ascii("..x"),
            Err(PlannerError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                column: 2
            })
        );
    }

    #[test]
    fn out_of_bounds_cells_are_not_traversable() {
        let grid = Grid::filled(2, 2, true);
        assert!(grid.is_traversable(CellCoord::new(1, 1)));
        assert!(!grid.is_traversable(CellCoord::new(2, 0)));
        assert_eq!(grid.get(CellCoord::new(0, 2)), None);
    }

    #[test]
    fn iter_cells_walks_row_major() {
        let grid = Grid::from_ascii("#.\n..").expect("valid art");
        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells[0], (CellCoord::new(0, 0), false));
        assert_eq!(cells[1], (CellCoord::new(0, 1), true));
        assert_eq!(cells[2], (CellCoord::new(1, 0), true));
    }

    #[test]
    fn single_cell_path_has_no_steps() {
        let path = Path::from_cells(vec![CellCoord::new(4, 4)]).expect("non-empty path");
        assert_eq!(path.cell_count(), 1);
        assert_eq!(path.step_count(), 0);
        assert_eq!(path.start(), path.goal());
        assert!(path.is_contiguous());
    }

    #[test]
    fn no_path_is_distinct_from_found() {
        let path = Path::from_cells(vec![CellCoord::new(0, 0)]).expect("non-empty path");
        assert!(SearchOutcome::Found(path).is_found());
        assert!(SearchOutcome::NoPathFound.path().is_none());
        assert!(Path::from_cells(Vec::new()).is_none());
    }
}
