//! Named color palettes and value-to-color mapping for contour levels.

use plot_common::{Color, ColorStop, StyleError};
use serde::{Deserialize, Serialize};

/// A color palette sampled over `[0, 1]`.
///
/// Built-in palettes serialize by name (`"jet"`); custom palettes as
/// `{"custom": [{"position": 0.0, "color": "#000000"}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Gray,
    InvertedGray,
    Red,
    Green,
    Blue,
    Hot,
    Jet,
    BlueWhiteRed,
    Viridis,
    Custom(Vec<ColorStop>),
}

const GRAY: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 0)),
    ColorStop::new(1.0, Color::rgb(255, 255, 255)),
];

const INVERTED_GRAY: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(255, 255, 255)),
    ColorStop::new(1.0, Color::rgb(0, 0, 0)),
];

const RED: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 0)),
    ColorStop::new(1.0, Color::rgb(255, 0, 0)),
];

const GREEN: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 0)),
    ColorStop::new(1.0, Color::rgb(0, 255, 0)),
];

const BLUE: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 0)),
    ColorStop::new(1.0, Color::rgb(0, 0, 255)),
];

const HOT: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 0)),
    ColorStop::new(0.375, Color::rgb(255, 0, 0)),
    ColorStop::new(0.75, Color::rgb(255, 255, 0)),
    ColorStop::new(1.0, Color::rgb(255, 255, 255)),
];

const JET: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 143)),
    ColorStop::new(0.125, Color::rgb(0, 0, 255)),
    ColorStop::new(0.375, Color::rgb(0, 255, 255)),
    ColorStop::new(0.625, Color::rgb(255, 255, 0)),
    ColorStop::new(0.875, Color::rgb(255, 0, 0)),
    ColorStop::new(1.0, Color::rgb(128, 0, 0)),
];

const BLUE_WHITE_RED: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(0, 0, 255)),
    ColorStop::new(0.5, Color::rgb(255, 255, 255)),
    ColorStop::new(1.0, Color::rgb(255, 0, 0)),
];

const VIRIDIS: &[ColorStop] = &[
    ColorStop::new(0.0, Color::rgb(68, 1, 84)),
    ColorStop::new(0.25, Color::rgb(59, 82, 139)),
    ColorStop::new(0.5, Color::rgb(33, 145, 140)),
    ColorStop::new(0.75, Color::rgb(94, 201, 98)),
    ColorStop::new(1.0, Color::rgb(253, 231, 37)),
];

impl Palette {
    /// Color stops, ascending by position.
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Palette::Gray => GRAY,
            Palette::InvertedGray => INVERTED_GRAY,
            Palette::Red => RED,
            Palette::Green => GREEN,
            Palette::Blue => BLUE,
            Palette::Hot => HOT,
            Palette::Jet => JET,
            Palette::BlueWhiteRed => BLUE_WHITE_RED,
            Palette::Viridis => VIRIDIS,
            Palette::Custom(stops) => stops.as_slice(),
        }
    }

    /// First color of the palette.
    pub fn first_color(&self) -> Color {
        self.stops().first().map(|s| s.color).unwrap_or_default()
    }

    /// Last color of the palette.
    pub fn last_color(&self) -> Color {
        self.stops().last().map(|s| s.color).unwrap_or_default()
    }

    /// Color at position `t`, clamped to `[0, 1]`, linearly interpolated
    /// between the bracketing stops.
    pub fn color_at(&self, t: f64) -> Color {
        let stops = self.stops();
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Color::default();
        };

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in stops.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if t <= high.position {
                let span = high.position - low.position;
                if span <= 0.0 {
                    return high.color;
                }
                return low.color.lerp(&high.color, (t - low.position) / span);
            }
        }

        last.color
    }

    /// A custom palette needs at least two stops in strictly ascending
    /// order inside `[0, 1]`.
    pub fn validate(&self) -> Result<(), StyleError> {
        let Palette::Custom(stops) = self else {
            return Ok(());
        };

        if stops.len() < 2 {
            return Err(StyleError::ValidationError(
                "Palette must have at least 2 color stops".to_string(),
            ));
        }
        if stops
            .iter()
            .any(|s| !(0.0..=1.0).contains(&s.position))
        {
            return Err(StyleError::ValidationError(
                "Palette stop positions must lie in [0, 1]".to_string(),
            ));
        }
        if stops.windows(2).any(|w| w[1].position <= w[0].position) {
            return Err(StyleError::ValidationError(
                "Palette stops must be in ascending position order".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to paint a value outside the color range with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RangeFailAction {
    /// Nearest end of the palette
    #[default]
    LastPaletteColor,
    /// A fixed color
    GivenColor { color: Color },
    Transparent,
}

/// Value interval mapped onto the palette.
///
/// Bounds left unset follow the finite data range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub below: RangeFailAction,
    #[serde(default)]
    pub above: RangeFailAction,
}

impl ColorRange {
    /// Fixed `[min, max]` range with default out-of-range handling.
    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// The effective range, filling unset bounds from `data_range`.
    pub fn resolve(&self, data_range: Option<(f64, f64)>) -> Option<(f64, f64)> {
        let (data_min, data_max) = match data_range {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };
        Some((self.min.or(data_min)?, self.max.or(data_max)?))
    }

    /// Color for `value` from `palette`.
    ///
    /// With no usable range every value maps to the start of the palette.
    /// A zero-width range maps values equal to it to the start of the palette.
    pub fn map(&self, value: f64, data_range: Option<(f64, f64)>, palette: &Palette) -> Color {
        let Some((min, max)) = self.resolve(data_range) else {
            return palette.first_color();
        };

        if value < min {
            return apply_fail_action(&self.below, palette.first_color());
        }
        if value > max {
            return apply_fail_action(&self.above, palette.last_color());
        }

        let span = max - min;
        let t = if span > 0.0 { (value - min) / span } else { 0.0 };
        palette.color_at(t)
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(StyleError::ValidationError(format!(
                    "Color range bound must be finite, got {}",
                    bound
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(StyleError::ValidationError(format!(
                    "Color range min {} exceeds max {}",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

fn apply_fail_action(action: &RangeFailAction, edge: Color) -> Color {
    match action {
        RangeFailAction::LastPaletteColor => edge,
        RangeFailAction::GivenColor { color } => *color,
        RangeFailAction::Transparent => Color::transparent(),
    }
}
