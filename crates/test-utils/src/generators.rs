//! Test data generators for synthetic scalar fields.
//!
//! Every generator returns row-major data (row 0 first) whose contour
//! geometry can be predicted by hand.

/// Creates a grid whose value equals its row index: `value(i, j) = j`.
///
/// Contours of this field are horizontal lines.
///
/// # Example
///
/// ```
/// use test_utils::create_row_ramp_grid;
///
/// let grid = create_row_ramp_grid(3, 2);
/// assert_eq!(grid, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// ```
pub fn create_row_ramp_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for _ in 0..width {
            data.push(row as f64);
        }
    }
    data
}

/// Creates a grid whose value equals its column index: `value(i, j) = i`.
///
/// Contours of this field are vertical lines.
pub fn create_column_ramp_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for col in 0..width {
            data.push(col as f64);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a cone: the distance of each sample from the grid centre.
///
/// Contours are approximately circles around the centre.
pub fn create_cone_grid(width: usize, height: usize) -> Vec<f64> {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            data.push((dx * dx + dy * dy).sqrt());
        }
    }
    data
}

/// Creates a smooth field of overlapping sine waves between roughly 0 and 100.
pub fn create_smooth_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let fx = col as f64 / width.max(1) as f64;
            let fy = row as f64 / height.max(1) as f64;

            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data.push(50.0 + v1 + v2 + v3);
        }
    }
    data
}

/// Creates a strictly positive field spanning several decades, `10^(col / (width - 1) * decades)`.
///
/// Useful for logarithmic level generation.
pub fn create_log_ramp_grid(width: usize, height: usize, decades: f64) -> Vec<f64> {
    let span = (width.max(2) - 1) as f64;
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for col in 0..width {
            data.push(10f64.powf(col as f64 / span * decades));
        }
    }
    data
}

/// Replaces the samples at the given `(col, row)` positions with `value`.
///
/// Out-of-range positions are ignored.
pub fn with_values_at(
    mut data: Vec<f64>,
    width: usize,
    positions: &[(usize, usize)],
    value: f64,
) -> Vec<f64> {
    for &(col, row) in positions {
        let idx = row * width + col;
        if col < width && idx < data.len() {
            data[idx] = value;
        }
    }
    data
}

/// Creates deterministic pseudo-random noise in `[0, amplitude)`.
pub fn create_noise_grid(width: usize, height: usize, amplitude: f64, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f64 / 10_000.0 * amplitude);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ramp() {
        let grid = create_column_ramp_grid(3, 2);
        assert_eq!(grid, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_cone_is_zero_at_center() {
        let grid = create_cone_grid(5, 5);
        assert_eq!(grid[2 * 5 + 2], 0.0);
        assert_eq!(grid[0], 8f64.sqrt());
    }

    #[test]
    fn test_log_ramp_spans_decades() {
        let grid = create_log_ramp_grid(5, 2, 4.0);
        assert!((grid[0] - 1.0).abs() < 1e-12);
        assert!((grid[4] - 10_000.0).abs() < 1e-6);
        assert!(grid.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_with_values_at_ignores_out_of_range() {
        let grid = with_values_at(vec![0.0; 4], 2, &[(1, 1), (5, 0), (0, 9)], f64::NAN);
        assert!(grid[3].is_nan());
        assert_eq!(grid.iter().filter(|v| v.is_nan()).count(), 1);
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = create_noise_grid(8, 8, 5.0, 42);
        let b = create_noise_grid(8, 8, 5.0, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (0.0..5.0).contains(&v)));
    }
}
