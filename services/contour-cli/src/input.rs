//! Grid input files.

use std::path::Path;

use anyhow::{bail, Context, Result};
use plot_common::{DataType, PlotRect, SampleBuffer};
use raster_contour::SampleGrid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A grid stored as JSON: dimensions, optional plot rectangle and typed samples.
///
/// ```json
/// { "nx": 2, "ny": 2, "data": { "type": "u8", "values": [0, 1, 2, 3] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFile {
    pub nx: usize,
    pub ny: usize,
    #[serde(default)]
    pub rect: Option<PlotRect>,
    pub data: SampleBuffer,
}

impl GridFile {
    pub fn into_grid(self, rect_override: Option<PlotRect>) -> Result<SampleGrid> {
        let rect = rect_override
            .or(self.rect)
            .unwrap_or_else(|| PlotRect::unit_pixels(self.nx, self.ny));
        let grid = SampleGrid::new(self.data, self.nx, self.ny, rect)?;
        Ok(grid)
    }
}

/// Load a JSON grid file.
pub fn load_json_grid(path: &Path, rect: Option<PlotRect>) -> Result<SampleGrid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file {}", path.display()))?;
    let file: GridFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse grid file {}", path.display()))?;

    debug!(
        path = %path.display(),
        nx = file.nx,
        ny = file.ny,
        data_type = %file.data.data_type(),
        "Loaded JSON grid"
    );

    file.into_grid(rect)
        .with_context(|| format!("Invalid grid in {}", path.display()))
}

/// Load a headerless file of native-endian samples.
pub fn load_raw_grid(
    path: &Path,
    data_type: DataType,
    nx: Option<usize>,
    ny: Option<usize>,
    rect: Option<PlotRect>,
) -> Result<SampleGrid> {
    let (Some(nx), Some(ny)) = (nx, ny) else {
        bail!("--nx and --ny are required for raw input");
    };

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read raw grid {}", path.display()))?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        data_type = %data_type,
        "Loaded raw grid"
    );

    let rect = rect.unwrap_or_else(|| PlotRect::unit_pixels(nx, ny));
    SampleGrid::from_bytes(data_type, &bytes, nx, ny, rect)
        .with_context(|| format!("Invalid raw grid in {}", path.display()))
}
