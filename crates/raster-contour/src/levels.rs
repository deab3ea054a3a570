//! Contour level sets.
//!
//! Levels are either given explicitly or generated from the finite data
//! range. Generated levels never include the range extremes themselves,
//! so no contour collapses onto the single highest or lowest sample.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ContourError, Result};
use crate::grid::SampleGrid;

/// Upper bound on the number of levels a generator is asked for.
pub const MAX_GENERATED_LEVELS: usize = 10_000;

/// An ordered list of contour levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<f64>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given levels verbatim: no sorting, no deduplication.
    pub fn explicit(levels: Vec<f64>) -> Self {
        Self { levels }
    }

    /// `count` levels evenly spaced strictly inside `range`.
    ///
    /// Level `k` (1-based) is `min + k * (max - min) / (count + 1)`. A flat
    /// or missing range gives an empty set. `count` is clamped to
    /// [`MAX_GENERATED_LEVELS`].
    pub fn linear(range: Option<(f64, f64)>, count: usize) -> Self {
        let Some((min, max)) = range else {
            return Self::new();
        };
        let count = clamp_count(count);
        if count == 0 {
            return Self::new();
        }
        if min == max {
            warn!(value = min, "Flat data range, no linear contour levels generated");
            return Self::new();
        }

        let step = (max - min) / (count as f64 + 1.0);
        let levels = (1..=count).map(|k| min + k as f64 * step).collect();
        Self { levels }
    }

    /// At least `count` levels strictly inside `range`, placed on powers of `base`.
    ///
    /// Levels are `base^(i * step)` for integer `i`. `step` starts at the
    /// smallest power of two covering the whole `log_base` span of the
    /// range and is halved until `count` levels fit, so integer powers of
    /// `base` are always among the levels once the step reaches 1.
    ///
    /// Fails with [`ContourError::InvalidBase`] unless `base` is finite and
    /// greater than 1, and with [`ContourError::InvalidRange`] when the range
    /// minimum is not strictly positive.
    pub fn log(range: Option<(f64, f64)>, count: usize, base: f64) -> Result<Self> {
        if !base.is_finite() || base <= 1.0 {
            return Err(ContourError::InvalidBase(base));
        }
        let Some((min, max)) = range else {
            return Ok(Self::new());
        };
        if min <= 0.0 {
            return Err(ContourError::InvalidRange { min, max });
        }
        let count = clamp_count(count);
        if count == 0 {
            return Ok(Self::new());
        }

        let ln_base = base.ln();
        let lo = min.ln() / ln_base;
        let hi = max.ln() / ln_base;
        let span = hi - lo;
        if !(span > 0.0) {
            warn!(value = min, "Flat data range, no logarithmic contour levels generated");
            return Ok(Self::new());
        }

        let coarsest = span.log2().ceil() as i32;
        // below this step at least count + 1 exponents fit inside the span
        let finest = (span / (count as f64 + 2.0)).log2().floor() as i32 - 1;

        let mut levels = Vec::new();
        let mut step = 1.0;
        for exp in (finest..=coarsest).rev() {
            step = 2f64.powi(exp);
            levels = powers_inside((min, max), base, (lo, hi), step);
            if levels.len() >= count {
                break;
            }
        }

        debug!(
            base,
            step,
            requested = count,
            generated = levels.len(),
            "Generated logarithmic contour levels"
        );
        Ok(Self { levels })
    }

    /// Map fractions of the data range onto absolute levels: `min + r * (max - min)`.
    ///
    /// A missing range gives an empty set.
    pub fn from_relative(fractions: &[f64], range: Option<(f64, f64)>) -> Self {
        let Some((min, max)) = range else {
            return Self::new();
        };
        let span = max - min;
        Self {
            levels: fractions.iter().map(|r| min + r * span).collect(),
        }
    }

    /// Linear levels over the finite range of `grid`.
    pub fn linear_for_grid(grid: &SampleGrid, count: usize) -> Self {
        Self::linear(grid.finite_range(), count)
    }

    /// Logarithmic levels over the finite range of `grid`.
    pub fn log_for_grid(grid: &SampleGrid, count: usize, base: f64) -> Result<Self> {
        Self::log(grid.finite_range(), count, base)
    }

    /// Insert `level` keeping ascending order. Returns `false` if an equal
    /// level is already present.
    ///
    /// Assumes the set is already sorted; a verbatim explicit set may not be,
    /// in which case the level is inserted at the first larger entry.
    pub fn add_level(&mut self, level: f64) -> bool {
        if self.levels.iter().any(|&l| l == level) {
            return false;
        }
        let pos = self
            .levels
            .iter()
            .position(|&l| l > level)
            .unwrap_or(self.levels.len());
        self.levels.insert(pos, level);
        true
    }

    /// Sort ascending and drop exact duplicates. NaN levels are removed.
    pub fn normalize(&mut self) {
        self.levels.retain(|l| !l.is_nan());
        self.levels.sort_by(|a, b| a.total_cmp(b));
        self.levels.dedup();
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.levels
    }
}

impl From<Vec<f64>> for LevelSet {
    fn from(levels: Vec<f64>) -> Self {
        Self::explicit(levels)
    }
}

fn clamp_count(count: usize) -> usize {
    if count > MAX_GENERATED_LEVELS {
        warn!(
            requested = count,
            max = MAX_GENERATED_LEVELS,
            "Too many contour levels requested, clamping"
        );
        MAX_GENERATED_LEVELS
    } else {
        count
    }
}

/// `base^(i * step)` for every integer `i` whose level lies strictly inside `range`.
fn powers_inside(range: (f64, f64), base: f64, exponents: (f64, f64), step: f64) -> Vec<f64> {
    let (min, max) = range;
    let first = (exponents.0 / step).floor();
    let last = (exponents.1 / step).ceil();
    let n = (last - first - 1.0).max(0.0) as usize;

    let mut levels: Vec<f64> = (1..=n)
        .map(|k| base.powf((first + k as f64) * step))
        .filter(|&level| level > min && level < max)
        .collect();
    levels.dedup();
    levels
}
