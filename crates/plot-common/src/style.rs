//! Colors and line styles handed to the renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in style definitions.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// An RGBA color.
///
/// Deserializes from any of `"#RRGGBB"`, `"#RRGGBBAA"`, a named color,
/// `[r, g, b]`, `[r, g, b, a]` or `{ "r": .., "g": .., "b": .., "a": .. }`.
/// Serializes as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `"#RRGGBB"` or `"#RRGGBBAA"` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Look up a basic named color.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "transparent" => Self::transparent(),
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8;

        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Accepted input forms for [`Color`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Text(String),
    Array(Vec<u8>),
    Rgba {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

fn opaque() -> u8 {
    255
}

impl TryFrom<ColorSpec> for Color {
    type Error = StyleError;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Text(s) => {
                if s.starts_with('#') {
                    Color::from_hex(&s).ok_or(StyleError::InvalidColor(s))
                } else {
                    Color::named(&s)
                        .or_else(|| Color::from_hex(&s))
                        .ok_or(StyleError::InvalidColor(s))
                }
            }
            ColorSpec::Array(arr) => match arr.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
                _ => Err(StyleError::InvalidColor(format!(
                    "expected 3 or 4 components, got {}",
                    arr.len()
                ))),
            },
            ColorSpec::Rgba { r, g, b, a } => Ok(Color::new(r, g, b, a)),
        }
    }
}

/// A color at a normalized position in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`
    pub position: f64,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Dash pattern of a stroked line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashPattern {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl DashPattern {
    /// Alternating on/off lengths in units of the line width. Empty for solid lines.
    pub fn intervals(&self) -> &'static [f32] {
        match self {
            DashPattern::Solid => &[],
            DashPattern::Dash => &[4.0, 2.0],
            DashPattern::Dot => &[1.0, 2.0],
            DashPattern::DashDot => &[4.0, 2.0, 1.0, 2.0],
            DashPattern::DashDotDot => &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0],
        }
    }
}

/// Stroke parameters for one set of contour segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    #[serde(default)]
    pub dash: DashPattern,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: DashPattern::Solid,
        }
    }
}

impl LineStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(StyleError::ValidationError(format!(
                "line width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }
}
