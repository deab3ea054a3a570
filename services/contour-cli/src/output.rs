//! Contour output documents.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use plot_common::{DataType, LineStyle, PlotRect};
use raster_contour::{ContourPlot, Segment};
use serde::Serialize;

/// One level with its resolved stroke and segments.
#[derive(Debug, Clone, Serialize)]
pub struct LevelOutput {
    pub index: usize,
    pub level: f64,
    pub label: String,
    pub style: LineStyle,
    pub segments: Vec<Segment>,
}

/// Everything written for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ContourOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub nx: usize,
    pub ny: usize,
    pub data_type: DataType,
    pub rect: PlotRect,
    pub data_range: Option<(f64, f64)>,
    pub total_segments: usize,
    pub levels: Vec<LevelOutput>,
}

impl ContourOutput {
    /// Collect the computed lines of `plot`, computing them first if needed.
    pub fn from_plot(plot: &mut ContourPlot, name: Option<String>, units: Option<String>) -> Result<Self> {
        plot.calc_contour_lines()
            .context("Failed to calculate contour lines")?;

        let grid = plot.grid().context("No grid loaded")?;
        let lines = plot.contour_lines().context("Contour lines missing after calculation")?;

        let levels = lines
            .iter()
            .enumerate()
            .map(|(index, (level, segments))| LevelOutput {
                index,
                level,
                label: plot.label(index).unwrap_or_else(|| format!("{}", level)),
                style: plot.line_style(index).unwrap_or_default(),
                segments: segments.to_vec(),
            })
            .collect();

        Ok(Self {
            name,
            units,
            nx: grid.nx(),
            ny: grid.ny(),
            data_type: grid.data_type(),
            rect: grid.rect(),
            data_range: plot.data_range(),
            total_segments: lines.total_segments(),
            levels,
        })
    }

    /// Write as JSON to `path`, or stdout when `path` is `None`.
    pub fn write(&self, path: Option<&Path>, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };

        match path {
            Some(path) => std::fs::write(path, json)
                .with_context(|| format!("Failed to write output {}", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json).context("Failed to write to stdout")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_contour::{Color, LevelStyle, SampleGrid};

    fn ramp_plot() -> ContourPlot {
        let grid = SampleGrid::with_unit_pixels(vec![0.0f64, 0.0, 0.0, 1.0, 1.0, 1.0], 3, 2).unwrap();
        ContourPlot::with_grid(grid)
    }

    #[test]
    fn test_from_plot_collects_levels() {
        let mut plot = ramp_plot();
        plot.set_levels(vec![0.5, 2.0]);
        plot.set_style(LevelStyle::solid(Color::rgb(0, 0, 255), 2.0)).unwrap();

        let output = ContourOutput::from_plot(&mut plot, Some("ramp".to_string()), None).unwrap();
        assert_eq!(output.levels.len(), 2);
        assert_eq!(output.levels[0].segments.len(), 4);
        assert!(output.levels[1].segments.is_empty());
        assert_eq!(output.levels[0].style.color, Color::rgb(0, 0, 255));
        assert_eq!(output.levels[0].label, "0.5");
        assert_eq!(output.total_segments, 4);
        assert_eq!(output.data_range, Some((0.0, 1.0)));
    }

    #[test]
    fn test_output_json_shape() {
        let mut plot = ramp_plot();
        plot.set_levels(vec![0.5]);
        let output = ContourOutput::from_plot(&mut plot, None, Some("m".to_string())).unwrap();

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["units"], "m");
        assert_eq!(json["data_type"], "f64");
        assert_eq!(json["levels"][0]["style"]["color"], "#000000");
        assert_eq!(json["levels"][0]["style"]["dash"], "solid");
        assert!(json["levels"][0]["segments"][0]["start"]["x"].is_number());
    }

    #[test]
    fn test_write_to_file() {
        let mut plot = ramp_plot();
        plot.set_levels(vec![0.5]);
        let output = ContourOutput::from_plot(&mut plot, None, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contours.json");
        output.write(Some(&path), true).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["total_segments"], 4);
    }
}
