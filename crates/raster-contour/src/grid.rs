//! Sample grids: typed raster data placed on a plot rectangle.

use plot_common::{DataType, PlotRect, SampleBuffer};

use crate::error::{ContourError, Result};
use crate::triangle::Vertex;

/// An `nx × ny` raster of samples covering a plot rectangle.
///
/// Samples are row-major: `(i, j)` is column `i` of row `j`. Each sample
/// sits at the centre of its pixel, so an image drawn over the same
/// rectangle lines up with the contours.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    buffer: SampleBuffer,
    nx: usize,
    ny: usize,
    rect: PlotRect,
}

impl SampleGrid {
    /// Create a grid, checking dimensions against the buffer length.
    pub fn new(buffer: impl Into<SampleBuffer>, nx: usize, ny: usize, rect: PlotRect) -> Result<Self> {
        let buffer = buffer.into();

        if nx < 2 || ny < 2 {
            return Err(ContourError::InvalidDimensions { nx, ny });
        }

        let expected = nx
            .checked_mul(ny)
            .ok_or(ContourError::InvalidDimensions { nx, ny })?;
        if buffer.len() != expected {
            return Err(ContourError::LengthMismatch {
                nx,
                ny,
                expected,
                actual: buffer.len(),
            });
        }

        if !rect.is_finite() {
            return Err(ContourError::InvalidRect(rect));
        }

        Ok(Self {
            buffer,
            nx,
            ny,
            rect,
        })
    }

    /// Create a grid whose pixels are one plot unit wide, starting at the origin.
    pub fn with_unit_pixels(buffer: impl Into<SampleBuffer>, nx: usize, ny: usize) -> Result<Self> {
        Self::new(buffer, nx, ny, PlotRect::unit_pixels(nx, ny))
    }

    /// Decode a grid from native-endian raw bytes.
    pub fn from_bytes(
        data_type: DataType,
        bytes: &[u8],
        nx: usize,
        ny: usize,
        rect: PlotRect,
    ) -> Result<Self> {
        let buffer = SampleBuffer::from_bytes(data_type, bytes)?;
        Self::new(buffer, nx, ny, rect)
    }

    /// Same samples placed on a different rectangle.
    pub fn with_rect(mut self, rect: PlotRect) -> Result<Self> {
        if !rect.is_finite() {
            return Err(ContourError::InvalidRect(rect));
        }
        self.rect = rect;
        Ok(self)
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn rect(&self) -> PlotRect {
        self.rect
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn data_type(&self) -> DataType {
        self.buffer.data_type()
    }

    /// Number of cells, `(nx - 1) * (ny - 1)`.
    pub fn cell_count(&self) -> usize {
        (self.nx - 1) * (self.ny - 1)
    }

    /// Sample value at column `i`, row `j`.
    ///
    /// The caller guarantees `i < nx` and `j < ny`.
    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        debug_assert!(
            i < self.nx && j < self.ny,
            "grid index ({}, {}) out of range for {}x{} grid",
            i,
            j,
            self.nx,
            self.ny
        );
        self.buffer.value(j * self.nx + i)
    }

    /// Plot coordinates of sample `(i, j)`.
    #[inline]
    pub fn position(&self, i: usize, j: usize) -> (f64, f64) {
        (
            self.rect.column_center(i, self.nx),
            self.rect.row_center(j, self.ny),
        )
    }

    /// Sample `(i, j)` as a 3-D vertex: plot position plus value.
    #[inline]
    pub fn vertex(&self, i: usize, j: usize) -> Vertex {
        let (x, y) = self.position(i, j);
        Vertex::new(x, y, self.value(i, j))
    }

    /// Minimum and maximum over finite samples.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.buffer.finite_range()
    }
}
