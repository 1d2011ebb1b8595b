//! Textual and JSON summaries of a planned route.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use maze_path_core::{CellCoord, PlannedRoute};
use serde::Serialize;

use crate::settings::OutputFormat;

/// Message printed when the search exhausts the maze.
pub(crate) const NO_PATH_MESSAGE: &str = "No path found.";

#[derive(Debug, Serialize)]
struct RouteSummary<'a> {
    rows: u32,
    columns: u32,
    start: CellCoord,
    goal: CellCoord,
    path: Option<&'a [CellCoord]>,
}

impl<'a> RouteSummary<'a> {
    fn from_route(route: &'a PlannedRoute) -> Self {
        Self {
            rows: route.maze.rows(),
            columns: route.maze.columns(),
            start: route.start,
            goal: route.goal,
            path: route.outcome.path().map(|path| path.cells()),
        }
    }
}

/// Renders the summary of `route` in the requested format.
pub(crate) fn render(route: &PlannedRoute, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(route)),
        OutputFormat::Json => serde_json::to_string_pretty(&RouteSummary::from_route(route))
            .context("failed to serialise route summary"),
    }
}

fn render_text(route: &PlannedRoute) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "maze: {}x{} cells, {} walls",
        route.maze.rows(),
        route.maze.columns(),
        route.maze.wall_count()
    );
    let _ = writeln!(out, "start: {}", route.start);
    let _ = writeln!(out, "goal: {}", route.goal);
    match route.outcome.path() {
        Some(path) => {
            let _ = writeln!(
                out,
                "path: {} cells, {} steps",
                path.cell_count(),
                path.step_count()
            );
        }
        None => {
            let _ = writeln!(out, "{NO_PATH_MESSAGE}");
        }
    }
    out
}
