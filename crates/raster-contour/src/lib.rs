//! Contour line extraction for raster data.
//!
//! Implements the CONREC approach: every grid cell is split into two
//! triangles and each triangle is intersected with every contour level,
//! yielding one straight segment per crossing.
//!
//! - [`grid`]: typed sample grids mapped onto a plot rectangle
//! - [`levels`]: explicit, linear and logarithmic level sets
//! - [`triangle`]: cell triangulation and vertex classification
//! - [`intersect`]: triangle/level intersection
//! - [`contour`]: full-grid scan producing per-level segment lists
//! - [`plot`]: cached contour graph that only recomputes when its inputs change
//! - [`config`], [`style`], [`palette`]: configuration and per-level line styling

pub mod config;
pub mod contour;
pub mod error;
pub mod grid;
pub mod intersect;
pub mod levels;
pub mod palette;
pub mod plot;
pub mod style;
pub mod triangle;

pub use config::{ContourConfig, LevelPolicy};
pub use contour::{calc_contour_lines, ContourLines, ContourOptions, Point, Segment};
pub use error::{ContourError, Result};
pub use grid::SampleGrid;
pub use levels::{LevelSet, MAX_GENERATED_LEVELS};
pub use palette::{ColorRange, Palette, RangeFailAction};
pub use plot::ContourPlot;
pub use style::{ContourStyle, LevelStyle, SpecialLevel};

pub use plot_common::{Color, DashPattern, DataType, LineStyle, PlotRect, SampleBuffer};
