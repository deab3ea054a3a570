//! Common types shared across the raster contour crates.

pub mod buffer;
pub mod rect;
pub mod style;

pub use buffer::{BufferError, DataType, SampleBuffer};
pub use rect::{PlotRect, RectParseError};
pub use style::{Color, ColorStop, DashPattern, LineStyle, StyleError};
