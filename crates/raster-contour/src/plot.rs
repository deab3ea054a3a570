//! The contour plot: grid, configuration and the cached line set.
//!
//! Contour lines are computed once and reused until something that affects
//! geometry changes (the grid, its rectangle, the levels or the on-plane
//! options). Styling changes keep the cache.

use plot_common::{LineStyle, PlotRect, SampleBuffer};
use tracing::{debug, trace};

use crate::config::{ContourConfig, LevelPolicy};
use crate::contour::{calc_contour_lines, ContourLines, Segment};
use crate::error::{ContourError, Result};
use crate::grid::SampleGrid;
use crate::levels::LevelSet;
use crate::style::LevelStyle;

#[derive(Debug, Clone)]
struct ContourCache {
    lines: ContourLines,
    data_range: Option<(f64, f64)>,
}

/// A grid plus contour settings, with lazily computed contour lines.
#[derive(Debug, Clone, Default)]
pub struct ContourPlot {
    grid: Option<SampleGrid>,
    config: ContourConfig,
    cache: Option<ContourCache>,
}

impl ContourPlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plot over `grid` with default settings.
    pub fn with_grid(grid: SampleGrid) -> Self {
        Self {
            grid: Some(grid),
            ..Self::default()
        }
    }

    /// Plot with a validated configuration.
    pub fn with_config(config: ContourConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            trace!("Contour cache invalidated");
        }
    }

    pub fn grid(&self) -> Option<&SampleGrid> {
        self.grid.as_ref()
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    /// Replace the grid.
    pub fn set_grid(&mut self, grid: SampleGrid) {
        self.grid = Some(grid);
        self.invalidate();
    }

    /// Replace the samples and dimensions, keeping the current rectangle
    /// (unit pixels if there was no grid yet).
    pub fn set_data(&mut self, buffer: impl Into<SampleBuffer>, nx: usize, ny: usize) -> Result<()> {
        let rect = match &self.grid {
            Some(grid) => grid.rect(),
            None => PlotRect::unit_pixels(nx, ny),
        };
        let grid = SampleGrid::new(buffer, nx, ny, rect)?;
        self.set_grid(grid);
        Ok(())
    }

    /// Move the grid to a different plot rectangle.
    pub fn set_rect(&mut self, rect: PlotRect) -> Result<()> {
        let grid = self.grid.take().ok_or(ContourError::NoData)?;
        match grid.clone().with_rect(rect) {
            Ok(moved) => {
                self.grid = Some(moved);
                self.invalidate();
                Ok(())
            }
            Err(err) => {
                self.grid = Some(grid);
                Err(err)
            }
        }
    }

    /// Drop the grid and any cached lines.
    pub fn clear_data(&mut self) {
        self.grid = None;
        self.invalidate();
    }

    /// Replace the whole configuration after validating it.
    ///
    /// The cache is kept when only styling differs.
    pub fn set_config(&mut self, config: ContourConfig) -> Result<()> {
        config.validate()?;
        let geometry_changed = config.levels != self.config.levels
            || config.relative_levels != self.config.relative_levels
            || config.number_of_levels != self.config.number_of_levels
            || config.options() != self.config.options();
        self.config = config;
        if geometry_changed {
            self.invalidate();
        }
        Ok(())
    }

    /// Replace the level styling. Cached lines stay valid.
    pub fn set_style(&mut self, style: LevelStyle) -> Result<()> {
        style.validate()?;
        self.config.style = style;
        Ok(())
    }

    pub fn style(&self) -> &LevelStyle {
        &self.config.style
    }

    /// Use the given levels verbatim.
    pub fn set_levels(&mut self, levels: Vec<f64>) {
        self.config.levels = LevelPolicy::Explicit { values: levels };
        self.invalidate();
    }

    /// Add one level, keeping levels ascending and skipping duplicates.
    ///
    /// A generated policy is first frozen into its current explicit levels.
    /// With relative levels on, `level` is a fraction of the data range like
    /// the rest of the list. Returns `false` if the level was already present.
    pub fn add_level(&mut self, level: f64) -> Result<bool> {
        let mut levels = match &self.config.levels {
            LevelPolicy::Explicit { values } if !values.is_empty() => {
                LevelSet::explicit(values.clone())
            }
            _ => {
                let resolved = self.resolve_levels()?;
                self.freeze_levels(resolved)
            }
        };

        let added = levels.add_level(level);
        self.config.levels = LevelPolicy::Explicit {
            values: levels.into_vec(),
        };
        self.invalidate();
        Ok(added)
    }

    /// Turn absolute levels back into the units of the explicit policy.
    fn freeze_levels(&self, resolved: LevelSet) -> LevelSet {
        if !self.config.relative_levels {
            return resolved;
        }
        match self.data_range() {
            Some((min, max)) if max > min => {
                LevelSet::explicit(resolved.iter().map(|l| (l - min) / (max - min)).collect())
            }
            _ => resolved,
        }
    }

    /// Switch to `count` linear levels over the data range and return them.
    ///
    /// On error the previous level policy is kept.
    pub fn generate_linear(&mut self, count: usize) -> Result<Vec<f64>> {
        self.switch_levels(LevelPolicy::Linear { count })
    }

    /// Switch to `count` logarithmic levels with base `base` and return them.
    ///
    /// On error the previous level policy is kept.
    pub fn generate_log(&mut self, count: usize, base: f64) -> Result<Vec<f64>> {
        self.switch_levels(LevelPolicy::Log { count, base })
    }

    fn switch_levels(&mut self, policy: LevelPolicy) -> Result<Vec<f64>> {
        let previous = std::mem::replace(&mut self.config.levels, policy);
        match self.resolve_levels() {
            Ok(levels) => {
                self.invalidate();
                Ok(levels.into_vec())
            }
            Err(err) => {
                self.config.levels = previous;
                Err(err)
            }
        }
    }

    /// Set how many levels the empty explicit policy falls back to.
    pub fn set_number_of_levels(&mut self, count: usize) {
        self.config.number_of_levels = count;
        self.invalidate();
    }

    pub fn set_relative_levels(&mut self, relative: bool) {
        self.config.relative_levels = relative;
        self.invalidate();
    }

    pub fn set_ignore_on_plane(&mut self, ignore: bool) {
        self.config.ignore_on_plane = ignore;
        self.invalidate();
    }

    pub fn set_on_plane_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ContourError::invalid_config(format!(
                "on_plane_tolerance must be finite and >= 0, got {}",
                tolerance
            )));
        }
        self.config.on_plane_tolerance = tolerance;
        self.invalidate();
        Ok(())
    }

    /// Finite data range of the current grid.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        self.grid.as_ref().and_then(SampleGrid::finite_range)
    }

    /// Levels the current policy resolves to for the current grid.
    pub fn resolve_levels(&self) -> Result<LevelSet> {
        let grid = self.grid.as_ref().ok_or(ContourError::NoData)?;
        self.config.resolve_levels(grid.finite_range())
    }

    /// Levels of the cached line set, or freshly resolved ones when stale.
    pub fn levels(&self) -> Result<Vec<f64>> {
        match &self.cache {
            Some(cache) => Ok(cache.lines.levels().to_vec()),
            None => Ok(self.resolve_levels()?.into_vec()),
        }
    }

    /// True when the next [`calc_contour_lines`](Self::calc_contour_lines)
    /// will recompute.
    pub fn is_stale(&self) -> bool {
        self.cache.is_none()
    }

    /// Contour lines, computed now if stale.
    pub fn calc_contour_lines(&mut self) -> Result<&ContourLines> {
        if self.cache.is_some() {
            trace!("Contour cache hit");
        } else {
            self.cache = Some(self.compute()?);
        }
        self.contour_lines().ok_or(ContourError::NoData)
    }

    /// Recompute regardless of the cache.
    pub fn recompute(&mut self) -> Result<&ContourLines> {
        self.invalidate();
        self.calc_contour_lines()
    }

    fn compute(&self) -> Result<ContourCache> {
        let grid = self.grid.as_ref().ok_or(ContourError::NoData)?;
        let data_range = grid.finite_range();
        let levels = self.config.resolve_levels(data_range)?;

        debug!(
            nx = grid.nx(),
            ny = grid.ny(),
            data_type = %grid.data_type(),
            num_levels = levels.len(),
            "Recomputing contour lines"
        );

        let lines = calc_contour_lines(grid, levels.as_slice(), &self.config.options());
        Ok(ContourCache { lines, data_range })
    }

    /// Cached contour lines, if fresh.
    pub fn contour_lines(&self) -> Option<&ContourLines> {
        self.cache.as_ref().map(|c| &c.lines)
    }

    /// Cached segments for level `index`.
    pub fn segments(&self, index: usize) -> Option<&[Segment]> {
        self.contour_lines()?.segments(index)
    }

    /// Stroke for cached level `index`.
    pub fn line_style(&self, index: usize) -> Option<LineStyle> {
        let cache = self.cache.as_ref()?;
        let level = cache.lines.level(index)?;
        Some(self.config.style.style_for(level, cache.data_range))
    }

    /// Label for cached level `index`.
    pub fn label(&self, index: usize) -> Option<String> {
        let level = self.contour_lines()?.level(index)?;
        Some(self.config.style.label_for(level))
    }
}
