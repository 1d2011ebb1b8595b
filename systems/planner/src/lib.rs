#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Runs the binarize, expand and search stages in order.
//!
//! Each stage consumes an immutable view of its predecessor's output and
//! allocates a fresh result. Stage errors are returned unchanged so callers
//! can present them however they like.

use maze_path_core::{IntensityGrid, PlannedRoute, PlannerConfig, PlannerResult};
use maze_path_system_binarizer::GridBinarizer;
use maze_path_system_clearance::ClearanceExpander;
use maze_path_system_path_search::PathSearcher;

/// Plans a clearance-safe route through the provided intensity grid.
///
/// The returned route carries the cropped maze before clearance expansion,
/// since that is the grid a presenter overlays the path on.
#[tracing::instrument(skip_all, fields(start = %config.start, goal = %config.goal))]
pub fn plan(input: &IntensityGrid, config: &PlannerConfig) -> PlannerResult<PlannedRoute> {
    let maze = GridBinarizer::new(config.threshold, config.margin).binarize(input)?;
    let safe = ClearanceExpander::new(config.clearance).expand(&maze);
    let outcome = PathSearcher::new().search(&safe, config.start, config.goal)?;

    match outcome.path() {
        Some(path) => tracing::info!(cells = path.cell_count(), "route planned"),
        None => tracing::info!("no route between start and goal"),
    }

    Ok(PlannedRoute {
        maze,
        start: config.start,
        goal: config.goal,
        outcome,
    })
}
