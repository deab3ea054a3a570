//! Per-level line styling and contour style documents.

use std::path::Path;

use plot_common::{Color, DashPattern, LineStyle, StyleError};
use serde::{Deserialize, Serialize};

use crate::config::ContourConfig;
use crate::error::Result;
use crate::palette::{ColorRange, Palette};

/// Relative tolerance used to match a level against a special level.
const SPECIAL_LEVEL_TOLERANCE: f64 = 1e-9;

/// Overrides for one specific contour level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialLevel {
    /// The level value (in data units)
    pub level: f64,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub dash: Option<DashPattern>,
    /// Custom label text
    #[serde(default)]
    pub label: Option<String>,
}

impl SpecialLevel {
    pub fn new(level: f64) -> Self {
        Self {
            level,
            color: None,
            width: None,
            dash: None,
            label: None,
        }
    }

    pub fn matches(&self, level: f64) -> bool {
        let scale = self.level.abs().max(level.abs()).max(1.0);
        (self.level - level).abs() <= SPECIAL_LEVEL_TOLERANCE * scale
    }
}

/// How each level's segments are stroked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStyle {
    /// Base stroke for every level
    #[serde(default)]
    pub line: LineStyle,

    /// Take each level's color from `palette` instead of `line.color`
    #[serde(default)]
    pub color_from_palette: bool,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub color_range: ColorRange,

    #[serde(default)]
    pub special_levels: Vec<SpecialLevel>,
}

impl LevelStyle {
    /// Solid lines of one color and width.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            line: LineStyle {
                color,
                width,
                dash: DashPattern::Solid,
            },
            ..Self::default()
        }
    }

    /// Palette-colored lines over the given color range.
    pub fn from_palette(palette: Palette, color_range: ColorRange) -> Self {
        Self {
            color_from_palette: true,
            palette,
            color_range,
            ..Self::default()
        }
    }

    fn special(&self, level: f64) -> Option<&SpecialLevel> {
        self.special_levels.iter().find(|s| s.matches(level))
    }

    /// Resolved stroke for `level`. `data_range` fills an automatic color range.
    ///
    /// A matching special level overrides the palette color.
    pub fn style_for(&self, level: f64, data_range: Option<(f64, f64)>) -> LineStyle {
        let mut style = self.line;

        if self.color_from_palette {
            style.color = self.color_range.map(level, data_range, &self.palette);
        }

        if let Some(special) = self.special(level) {
            if let Some(color) = special.color {
                style.color = color;
            }
            if let Some(width) = special.width {
                style.width = width;
            }
            if let Some(dash) = special.dash {
                style.dash = dash;
            }
        }

        style
    }

    /// Label text for `level`: the special level's label, or the value itself.
    pub fn label_for(&self, level: f64) -> String {
        self.special(level)
            .and_then(|s| s.label.clone())
            .unwrap_or_else(|| format!("{}", level))
    }

    pub fn validate(&self) -> std::result::Result<(), StyleError> {
        self.line.validate()?;
        self.palette.validate()?;
        self.color_range.validate()?;

        for special in &self.special_levels {
            if !special.level.is_finite() {
                return Err(StyleError::ValidationError(format!(
                    "Special level must be finite, got {}",
                    special.level
                )));
            }
            if let Some(width) = special.width {
                if !width.is_finite() || width <= 0.0 {
                    return Err(StyleError::ValidationError(format!(
                        "Special level {} has invalid line width {}",
                        special.level, width
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A named contour style document, as stored in JSON or YAML style files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourStyle {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub contour: ContourConfig,
}

impl ContourStyle {
    /// Parse and validate a JSON style.
    pub fn from_json(json: &str) -> Result<Self> {
        let style: Self = serde_json::from_str(json)?;
        style.contour.validate()?;
        Ok(style)
    }

    /// Parse and validate a YAML style.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let style: Self = serde_yaml::from_str(yaml)?;
        style.contour.validate()?;
        Ok(style)
    }

    /// Load a style file. `.yaml` and `.yml` are read as YAML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
