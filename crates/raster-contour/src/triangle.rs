//! Cell triangulation and vertex classification.
//!
//! Each grid cell `(i, j)-(i+1, j)-(i, j+1)-(i+1, j+1)` is split along the
//! `(i, j)–(i+1, j+1)` diagonal. The split is fixed, never chosen per cell.

use crate::contour::Point;
use crate::grid::SampleGrid;

/// A grid sample lifted into 3-D: plot position plus sample value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the plot plane.
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Position of a vertex relative to a contour level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Below,
    OnPlane,
    Above,
    /// NaN or infinite sample
    Invalid,
}

/// Classify a sample value against a level.
///
/// With `tolerance == 0.0` this is an exact comparison, so a vertex is
/// on-plane only when `z == level`.
#[inline]
pub fn classify(z: f64, level: f64, tolerance: f64) -> Side {
    if !z.is_finite() {
        return Side::Invalid;
    }

    let diff = z - level;
    if diff.abs() <= tolerance {
        Side::OnPlane
    } else if diff > 0.0 {
        Side::Above
    } else {
        Side::Below
    }
}

/// Three vertices of one half of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Build a triangle from bare `z` values at arbitrary unit positions.
    pub fn from_values(z: [f64; 3]) -> Self {
        Self::new(
            Vertex::new(0.0, 0.0, z[0]),
            Vertex::new(1.0, 0.0, z[1]),
            Vertex::new(1.0, 1.0, z[2]),
        )
    }

    /// All three values are finite.
    pub fn is_valid(&self) -> bool {
        self.vertices.iter().all(|v| v.z.is_finite())
    }

    /// Smallest and largest vertex value.
    pub fn z_range(&self) -> (f64, f64) {
        let [a, b, c] = self.vertices;
        (a.z.min(b.z).min(c.z), a.z.max(b.z).max(c.z))
    }

    /// Classification of every vertex against `level`.
    pub fn classify(&self, level: f64, tolerance: f64) -> [Side; 3] {
        let [a, b, c] = self.vertices;
        [
            classify(a.z, level, tolerance),
            classify(b.z, level, tolerance),
            classify(c.z, level, tolerance),
        ]
    }
}

/// The two triangles of cell `(i, j)`.
///
/// The first is `[(i, j), (i+1, j), (i+1, j+1)]`, the second
/// `[(i, j), (i+1, j+1), (i, j+1)]`. Requires `i + 1 < nx` and `j + 1 < ny`.
#[inline]
pub fn cell_triangles(grid: &SampleGrid, i: usize, j: usize) -> [Triangle; 2] {
    let v00 = grid.vertex(i, j);
    let v10 = grid.vertex(i + 1, j);
    let v01 = grid.vertex(i, j + 1);
    let v11 = grid.vertex(i + 1, j + 1);

    [Triangle::new(v00, v10, v11), Triangle::new(v00, v11, v01)]
}
