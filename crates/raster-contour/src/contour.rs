//! Contour line (isoline) extraction over a whole grid.
//!
//! This module scans every cell of a [`SampleGrid`], triangulates it and
//! collects the segments produced for each level. The result is a flat
//! list of unconnected segments per level, ready to be stroked.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::SampleGrid;
use crate::intersect::intersect;
use crate::triangle::cell_triangles;

/// A point in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Options for classifying vertices against a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourOptions {
    /// Skip triangles whose three vertices all lie on the level
    #[serde(default)]
    pub ignore_on_plane: bool,
    /// Values within this distance of a level count as on it (0 = exact)
    #[serde(default)]
    pub on_plane_tolerance: f64,
}

/// Segments for each contour level, indexed like the level list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourLines {
    levels: Vec<f64>,
    lines: Vec<Vec<Segment>>,
}

impl ContourLines {
    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<f64> {
        self.levels.get(index).copied()
    }

    /// Segments traced for level `index`.
    pub fn segments(&self, index: usize) -> Option<&[Segment]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    /// Total number of segments over all levels.
    pub fn total_segments(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Iterate over `(level, segments)` pairs in level order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[Segment])> + '_ {
        self.levels
            .iter()
            .copied()
            .zip(self.lines.iter().map(Vec::as_slice))
    }
}

/// Trace every level through the grid.
///
/// Runs in `O(cells × levels)`. Non-finite levels produce empty segment
/// lists. Triangles containing a NaN or infinite sample are skipped.
pub fn calc_contour_lines(grid: &SampleGrid, levels: &[f64], options: &ContourOptions) -> ContourLines {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new(); levels.len()];
    let tolerance = options.on_plane_tolerance;
    let mut skipped_triangles = 0usize;

    for j in 0..grid.ny() - 1 {
        for i in 0..grid.nx() - 1 {
            for triangle in cell_triangles(grid, i, j) {
                if !triangle.is_valid() {
                    skipped_triangles += 1;
                    continue;
                }

                let (z_min, z_max) = triangle.z_range();
                for (index, &level) in levels.iter().enumerate() {
                    // NaN levels fail both comparisons and are skipped here too
                    if !(level >= z_min - tolerance && level <= z_max + tolerance) {
                        continue;
                    }
                    if let Some(segment) = intersect(&triangle, level, options) {
                        lines[index].push(segment);
                    }
                }
            }
        }
    }

    let contours = ContourLines {
        levels: levels.to_vec(),
        lines,
    };

    debug!(
        nx = grid.nx(),
        ny = grid.ny(),
        num_levels = levels.len(),
        skipped_triangles = skipped_triangles,
        total_segments = contours.total_segments(),
        "Calculated contour lines"
    );

    contours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_peak() {
        let grid = SampleGrid::with_unit_pixels(vec![0.0f64, 0.0, 0.0, 10.0], 2, 2).unwrap();
        let lines = calc_contour_lines(&grid, &[5.0], &ContourOptions::default());

        // both triangles contain the raised corner
        assert_eq!(lines.segments(0).unwrap().len(), 2);
    }

    #[test]
    fn test_level_outside_range_is_empty() {
        let grid = SampleGrid::with_unit_pixels(vec![0.0f64, 1.0, 2.0, 3.0], 2, 2).unwrap();
        let lines = calc_contour_lines(&grid, &[-1.0, 4.0], &ContourOptions::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.total_segments(), 0);
    }

    #[test]
    fn test_nan_level_is_empty() {
        let grid = SampleGrid::with_unit_pixels(vec![0.0f64, 1.0, 2.0, 3.0], 2, 2).unwrap();
        let lines = calc_contour_lines(&grid, &[f64::NAN, 1.5], &ContourOptions::default());
        assert!(lines.segments(0).unwrap().is_empty());
        assert!(!lines.segments(1).unwrap().is_empty());
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((seg.length() - 5.0).abs() < 1e-12);
    }
}
