//! Plot-space rectangles covered by a raster.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The rectangle in plot coordinates that a raster is drawn into.
///
/// `(x, y)` is the lower-left corner; a raster of `nx × ny` samples divides
/// the rectangle into `nx × ny` equally sized pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PlotRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

impl PlotRect {
    /// Create a new rectangle from its corner and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle whose pixels are exactly one unit wide, so sample `(i, j)`
    /// lands on `(i + 0.5, j + 0.5)`.
    pub fn unit_pixels(nx: usize, ny: usize) -> Self {
        Self::new(0.0, 0.0, nx as f64, ny as f64)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// All four components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Plot x coordinate of the centre of pixel column `i` out of `nx`.
    pub fn column_center(&self, i: usize, nx: usize) -> f64 {
        self.x + (i as f64 + 0.5) * self.width / nx as f64
    }

    /// Plot y coordinate of the centre of pixel row `j` out of `ny`.
    pub fn row_center(&self, j: usize, ny: usize) -> f64 {
        self.y + (j as f64 + 0.5) * self.height / ny as f64
    }

    /// Check whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (min_x, max_x) = ordered(self.x, self.max_x());
        let (min_y, max_y) = ordered(self.y, self.max_y());
        px >= min_x && px <= max_x && py >= min_y && py <= max_y
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl FromStr for PlotRect {
    type Err = RectParseError;

    /// Parse `"x,y,width,height"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(RectParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| RectParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

#[derive(Debug, Error)]
pub enum RectParseError {
    #[error("Invalid rectangle format: {0}. Expected 'x,y,width,height'")]
    InvalidFormat(String),

    #[error("Invalid number in rectangle: {0}")]
    InvalidNumber(String),
}
