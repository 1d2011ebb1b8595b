#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that thresholds an intensity grid into a traversability grid.

use maze_path_core::{
    Grid, IntensityGrid, PlannerError, PlannerResult, DEFAULT_MARGIN, DEFAULT_THRESHOLD,
};

/// Thresholds intensities and crops a fixed margin from every edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBinarizer {
    threshold: u8,
    margin: u32,
}

impl Default for GridBinarizer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MARGIN)
    }
}

impl GridBinarizer {
    /// Creates a binarizer with explicit threshold and margin.
    #[must_use]
    pub const fn new(threshold: u8, margin: u32) -> Self {
        Self { threshold, margin }
    }

    /// Intensity above which a cell is considered passable.
    #[must_use]
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Number of cells cropped from each edge.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Produces the cropped traversability grid.
    ///
    /// Output cell `(r, c)` is passable when `input[r + margin][c + margin]`
    /// is strictly greater than the threshold. Fails with
    /// [`PlannerError::InvalidDimensions`] when twice the margin reaches
    /// either dimension of the input.
    pub fn binarize(&self, input: &IntensityGrid) -> PlannerResult<Grid> {
        let rows = input.rows();
        let columns = input.columns();
        let invalid = || PlannerError::InvalidDimensions {
            rows,
            columns,
            margin: self.margin,
        };

        let crop = self.margin.checked_mul(2).ok_or_else(invalid)?;
        if crop >= rows || crop >= columns {
            return Err(invalid());
        }

        let out_rows = rows - crop;
        let out_columns = columns - crop;
        let margin = self.margin as usize;
        let width = columns as usize;

        let mut cells = Vec::with_capacity(out_rows as usize * out_columns as usize);
        for row in input
            .values()
            .chunks_exact(width)
            .skip(margin)
            .take(out_rows as usize)
        {
            cells.extend(
                row[margin..margin + out_columns as usize]
                    .iter()
                    .map(|&intensity| intensity > self.threshold),
            );
        }

        let grid = Grid::new(out_rows, out_columns, cells)?;
        tracing::debug!(
            rows = out_rows,
            columns = out_columns,
            walls = grid.wall_count(),
            threshold = self.threshold,
            margin = self.margin,
            "binarized intensity grid"
        );
        Ok(grid)
    }
}
