//! Decodes maze images into intensity grids.

use std::path::Path;

use anyhow::{Context, Result};
use maze_path_core::IntensityGrid;

/// Loads the image at `path` and converts it to 8-bit grayscale.
pub(crate) fn load_intensity_grid(path: &Path) -> Result<IntensityGrid> {
    let luma = image::open(path)
        .with_context(|| format!("failed to load maze image {}", path.display()))?
        .into_luma8();
    let (width, height) = luma.dimensions();
    tracing::debug!(width, height, path = %path.display(), "decoded maze image");

    IntensityGrid::new(height, width, luma.into_raw())
        .with_context(|| format!("maze image {} has an invalid pixel buffer", path.display()))
}
