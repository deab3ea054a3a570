//! Contour configuration: level policy, on-plane handling and styling.

use serde::{Deserialize, Serialize};

use crate::contour::ContourOptions;
use crate::error::{ContourError, Result};
use crate::levels::{LevelSet, MAX_GENERATED_LEVELS};
use crate::style::LevelStyle;

/// Default number of generated levels when no explicit levels are given.
pub const DEFAULT_NUMBER_OF_LEVELS: usize = 3;

/// Default base for logarithmic level spacing.
pub const DEFAULT_LOG_BASE: f64 = 2.0;

/// How contour levels are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LevelPolicy {
    /// Levels as given. An empty list falls back to
    /// [`ContourConfig::number_of_levels`] linear levels.
    Explicit {
        #[serde(default)]
        values: Vec<f64>,
    },
    /// `count` evenly spaced levels strictly inside the data range.
    Linear { count: usize },
    /// At least `count` levels on powers of `base`, see [`LevelSet::log`].
    Log {
        count: usize,
        #[serde(default = "default_log_base")]
        base: f64,
    },
}

fn default_log_base() -> f64 {
    DEFAULT_LOG_BASE
}

fn default_number_of_levels() -> usize {
    DEFAULT_NUMBER_OF_LEVELS
}

impl Default for LevelPolicy {
    fn default() -> Self {
        LevelPolicy::Explicit { values: Vec::new() }
    }
}

impl LevelPolicy {
    pub fn explicit(values: Vec<f64>) -> Self {
        LevelPolicy::Explicit { values }
    }
}

/// Everything that controls which segments are produced and how they are stroked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    #[serde(default)]
    pub levels: LevelPolicy,

    /// Treat explicit levels as fractions of the data range
    #[serde(default)]
    pub relative_levels: bool,

    /// Only used when the explicit level list is empty
    #[serde(default = "default_number_of_levels")]
    pub number_of_levels: usize,

    #[serde(default)]
    pub ignore_on_plane: bool,

    #[serde(default)]
    pub on_plane_tolerance: f64,

    #[serde(default)]
    pub style: LevelStyle,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: LevelPolicy::default(),
            relative_levels: false,
            number_of_levels: DEFAULT_NUMBER_OF_LEVELS,
            ignore_on_plane: false,
            on_plane_tolerance: 0.0,
            style: LevelStyle::default(),
        }
    }
}

impl ContourConfig {
    /// Create config from environment variables.
    ///
    /// `CONTOUR_LEVELS` is a comma-separated list of explicit levels.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("CONTOUR_LEVELS") {
            let values: std::result::Result<Vec<f64>, _> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect();
            if let Ok(values) = values {
                config.levels = LevelPolicy::Explicit { values };
            }
        }

        if let Some(val) = lookup("CONTOUR_NUMBER_OF_LEVELS") {
            if let Ok(count) = val.parse() {
                config.number_of_levels = count;
            }
        }

        if let Some(val) = lookup("CONTOUR_RELATIVE_LEVELS") {
            config.relative_levels = val.to_lowercase() == "true" || val == "1";
        }

        if let Some(val) = lookup("CONTOUR_IGNORE_ON_PLANE") {
            config.ignore_on_plane = val.to_lowercase() == "true" || val == "1";
        }

        if let Some(val) = lookup("CONTOUR_ON_PLANE_TOLERANCE") {
            if let Ok(tolerance) = val.parse() {
                config.on_plane_tolerance = tolerance;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.on_plane_tolerance.is_finite() || self.on_plane_tolerance < 0.0 {
            return Err(ContourError::invalid_config(format!(
                "on_plane_tolerance must be finite and >= 0, got {}",
                self.on_plane_tolerance
            )));
        }

        if let LevelPolicy::Log { base, .. } = self.levels {
            if !base.is_finite() || base <= 1.0 {
                return Err(ContourError::InvalidBase(base));
            }
        }

        let count = match self.levels {
            LevelPolicy::Linear { count } | LevelPolicy::Log { count, .. } => count,
            LevelPolicy::Explicit { .. } => self.number_of_levels,
        };
        if count > MAX_GENERATED_LEVELS {
            return Err(ContourError::invalid_config(format!(
                "at most {} generated levels allowed, got {}",
                MAX_GENERATED_LEVELS, count
            )));
        }

        self.style.validate()?;
        Ok(())
    }

    /// Options passed to the triangle intersector.
    pub fn options(&self) -> ContourOptions {
        ContourOptions {
            ignore_on_plane: self.ignore_on_plane,
            on_plane_tolerance: self.on_plane_tolerance,
        }
    }

    /// Concrete levels for data spanning `data_range`.
    pub fn resolve_levels(&self, data_range: Option<(f64, f64)>) -> Result<LevelSet> {
        match &self.levels {
            LevelPolicy::Explicit { values } if values.is_empty() => {
                Ok(LevelSet::linear(data_range, self.number_of_levels))
            }
            LevelPolicy::Explicit { values } if self.relative_levels => {
                Ok(LevelSet::from_relative(values, data_range))
            }
            LevelPolicy::Explicit { values } => Ok(LevelSet::explicit(values.clone())),
            LevelPolicy::Linear { count } => Ok(LevelSet::linear(data_range, *count)),
            LevelPolicy::Log { count, base } => LevelSet::log(data_range, *count, *base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ContourConfig::default();
        assert_eq!(config.number_of_levels, 3);
        assert!(!config.ignore_on_plane);
        assert_eq!(config.on_plane_tolerance, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_explicit_falls_back_to_linear() {
        let config = ContourConfig::default();
        let levels = config.resolve_levels(Some((0.0, 10.0))).unwrap();
        assert_eq!(levels.as_slice(), &[2.5, 5.0, 7.5]);
    }

    #[test]
    fn test_relative_levels() {
        let config = ContourConfig {
            levels: LevelPolicy::explicit(vec![0.5, 0.9]),
            relative_levels: true,
            ..ContourConfig::default()
        };
        let levels = config.resolve_levels(Some((10.0, 20.0))).unwrap();
        assert_eq!(levels.as_slice(), &[15.0, 19.0]);
    }

    #[test]
    fn test_log_policy_error_propagates() {
        let config = ContourConfig {
            levels: LevelPolicy::Log { count: 3, base: 10.0 },
            ..ContourConfig::default()
        };
        assert!(matches!(
            config.resolve_levels(Some((-1.0, 10.0))),
            Err(ContourError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_tolerance() {
        let config = ContourConfig {
            on_plane_tolerance: -0.1,
            ..ContourConfig::default()
        };
        assert!(matches!(config.validate(), Err(ContourError::InvalidConfig(_))));

        let config = ContourConfig {
            on_plane_tolerance: f64::INFINITY,
            ..ContourConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_base() {
        let config = ContourConfig {
            levels: LevelPolicy::Log { count: 2, base: 0.5 },
            ..ContourConfig::default()
        };
        assert!(matches!(config.validate(), Err(ContourError::InvalidBase(_))));
    }

    #[test]
    fn test_validate_level_count_limit() {
        let config = ContourConfig {
            levels: LevelPolicy::Linear { count: usize::MAX },
            ..ContourConfig::default()
        };
        assert!(matches!(config.validate(), Err(ContourError::InvalidConfig(_))));

        let config = ContourConfig {
            number_of_levels: MAX_GENERATED_LEVELS + 1,
            ..ContourConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ContourConfig {
            levels: LevelPolicy::Log { count: MAX_GENERATED_LEVELS, base: 2.0 },
            ..ContourConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_level_policy_serde() {
        let policy: LevelPolicy = serde_json::from_str(r#"{"mode": "log", "count": 4}"#).unwrap();
        assert_eq!(policy, LevelPolicy::Log { count: 4, base: 2.0 });

        let policy: LevelPolicy = serde_json::from_str(r#"{"mode": "explicit", "values": [1, 2]}"#).unwrap();
        assert_eq!(policy, LevelPolicy::explicit(vec![1.0, 2.0]));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("CONTOUR_LEVELS", "1.5, 2.5,4"),
            ("CONTOUR_IGNORE_ON_PLANE", "true"),
            ("CONTOUR_ON_PLANE_TOLERANCE", "1e-6"),
            ("CONTOUR_NUMBER_OF_LEVELS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = ContourConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.levels, LevelPolicy::explicit(vec![1.5, 2.5, 4.0]));
        assert!(config.ignore_on_plane);
        assert_eq!(config.on_plane_tolerance, 1e-6);
        assert_eq!(config.number_of_levels, 3);
    }
}
