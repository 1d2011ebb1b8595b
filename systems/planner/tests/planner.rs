use maze_path_core::{CellCoord, IntensityGrid, PlannerConfig, PlannerError, SearchOutcome};
use maze_path_system_planner::plan;

const WALL: u8 = 0;
const OPEN: u8 = 255;

/// 5x5 maze with a wall across row 2 leaving a gap at column 4, framed by a
/// two-cell dark border that the default margin crops away.
fn framed_gap_maze() -> IntensityGrid {
    let inner = [
        [OPEN, OPEN, OPEN, OPEN, OPEN],
        [OPEN, OPEN, OPEN, OPEN, OPEN],
        [WALL, WALL, WALL, WALL, OPEN],
        [OPEN, OPEN, OPEN, OPEN, OPEN],
        [OPEN, OPEN, OPEN, OPEN, OPEN],
    ];
    let mut rows = vec![[WALL; 9]; 9];
    for (row, values) in inner.iter().enumerate() {
        rows[row + 2][2..7].copy_from_slice(values);
    }
    IntensityGrid::from_rows(&rows).expect("rectangular")
}

fn config(clearance: u32) -> PlannerConfig {
    PlannerConfig {
        clearance,
        ..PlannerConfig::new(CellCoord::new(0, 0), CellCoord::new(4, 0))
    }
}

#[test]
fn plans_through_gap_without_clearance() {
    let route = plan(&framed_gap_maze(), &config(0)).expect("valid configuration");

    assert!(route.is_solved());
    let path = route.outcome.path().expect("gap is open");
    assert_eq!(path.cell_count(), 13);
    assert!(path.cells().contains(&CellCoord::new(2, 4)));
}

#[test]
fn clearance_blocks_the_gap_but_keeps_the_raw_maze() {
    let route = plan(&framed_gap_maze(), &config(1)).expect("valid configuration");

    assert_eq!(route.outcome, SearchOutcome::NoPathFound);
    assert_eq!((route.maze.rows(), route.maze.columns()), (5, 5));
    assert_eq!(
        route.maze.wall_count(),
        4,
        "the presenter receives the maze before clearance expansion",
    );
    assert_eq!(route.start, CellCoord::new(0, 0));
    assert_eq!(route.goal, CellCoord::new(4, 0));
}

#[test]
fn crop_errors_propagate_unchanged() {
    let config = PlannerConfig {
        margin: 5,
        ..config(0)
    };

    let result = plan(&framed_gap_maze(), &config);

    assert_eq!(
        result,
        Err(PlannerError::InvalidDimensions {
            rows: 9,
            columns: 9,
            margin: 5,
        })
    );
}

#[test]
fn out_of_bounds_goal_is_reported_against_cropped_dimensions() {
    let config = PlannerConfig::new(CellCoord::new(0, 0), CellCoord::new(5, 0));

    let result = plan(&framed_gap_maze(), &config);

    assert_eq!(
        result,
        Err(PlannerError::OutOfBounds {
            cell: CellCoord::new(5, 0),
            rows: 5,
            columns: 5,
        })
    );
}
