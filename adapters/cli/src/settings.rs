//! Command-line arguments and the optional TOML configuration file.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use maze_path_core::{
    CellCoord, PlannerConfig, DEFAULT_CLEARANCE, DEFAULT_MARGIN, DEFAULT_THRESHOLD,
};
use serde::Deserialize;

/// Plans a clearance-safe shortest route through a maze image.
#[derive(Debug, Parser)]
#[command(name = "maze-path", version)]
pub(crate) struct Cli {
    /// Maze image; light pixels are open, dark pixels are walls.
    pub(crate) image: PathBuf,

    /// TOML file providing defaults for the planning parameters.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Intensities strictly above this value are open.
    #[arg(long)]
    pub(crate) threshold: Option<u8>,

    /// Cells cropped from every image edge.
    #[arg(long)]
    pub(crate) margin: Option<u32>,

    /// Radius by which walls are grown before searching.
    #[arg(long)]
    pub(crate) clearance: Option<u32>,

    /// Start cell as ROW,COL in cropped coordinates.
    #[arg(long, value_parser = parse_cell, value_name = "ROW,COL")]
    pub(crate) start: Option<CellCoord>,

    /// Goal cell as ROW,COL in cropped coordinates.
    #[arg(long, value_parser = parse_cell, value_name = "ROW,COL")]
    pub(crate) goal: Option<CellCoord>,

    /// Output format for the route summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

/// Formats supported for the printed route summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human readable lines.
    Text,
    /// Single JSON document.
    Json,
}

/// Planning parameters read from a configuration file. Every field is optional
/// so the file and the command line can each provide part of the setup.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    threshold: Option<u8>,
    margin: Option<u32>,
    clearance: Option<u32>,
    start: Option<CellCoord>,
    goal: Option<CellCoord>,
}

impl FileConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid planner config toml")
    }
}

impl Cli {
    /// Merges command-line flags over the optional config file and defaults.
    pub(crate) fn planner_config(&self) -> Result<PlannerConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    fn merge(&self, file: FileConfig) -> Result<PlannerConfig> {
        let Some(start) = self.start.or(file.start) else {
            bail!("no start cell given; pass --start ROW,COL or set `start` in the config file");
        };
        let Some(goal) = self.goal.or(file.goal) else {
            bail!("no goal cell given; pass --goal ROW,COL or set `goal` in the config file");
        };

        Ok(PlannerConfig {
            threshold: self
                .threshold
                .or(file.threshold)
                .unwrap_or(DEFAULT_THRESHOLD),
            margin: self.margin.or(file.margin).unwrap_or(DEFAULT_MARGIN),
            clearance: self
                .clearance
                .or(file.clearance)
                .unwrap_or(DEFAULT_CLEARANCE),
            start,
            goal,
        })
    }
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (row, column) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{value}'"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid row '{row}': {error}"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid column '{column}': {error}"))?;
    Ok(CellCoord::new(row, column))
}
