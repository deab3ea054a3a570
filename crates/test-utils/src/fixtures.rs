//! Common test fixtures for contour tests.
//!
//! Style documents in JSON and YAML, grid files as the CLI reads them,
//! and a helper for writing any of them to a temporary file.

use std::io::Write;

use tempfile::NamedTempFile;

/// Contour style documents.
pub mod styles {
    /// Explicit levels with a plain black line.
    pub const EXPLICIT_JSON: &str = r##"{
  "name": "explicit",
  "title": "Explicit levels",
  "units": "m",
  "contour": {
    "levels": { "mode": "explicit", "values": [1.0, 2.0, 3.0] },
    "style": { "line": { "color": "#000000", "width": 1.0 } }
  }
}"##;

    /// Linear levels colored from a palette, with a highlighted zero line.
    pub const PALETTE_JSON: &str = r##"{
  "name": "temperature_anomaly",
  "description": "Palette-colored anomaly contours",
  "units": "K",
  "contour": {
    "levels": { "mode": "linear", "count": 5 },
    "ignore_on_plane": true,
    "style": {
      "line": { "color": "gray", "width": 1.0, "dash": "dash" },
      "color_from_palette": true,
      "palette": "blue_white_red",
      "color_range": {
        "min": -10.0,
        "max": 10.0,
        "below": { "action": "given_color", "color": "#0000FF80" },
        "above": { "action": "transparent" }
      },
      "special_levels": [
        { "level": 0.0, "color": "black", "width": 2.5, "dash": "solid", "label": "zero" }
      ]
    }
  }
}"##;

    /// Logarithmic levels in YAML.
    pub const LOG_YAML: &str = r##"name: precipitation
units: mm
contour:
  levels:
    mode: log
    count: 3
    base: 10.0
  on_plane_tolerance: 1.0e-9
  style:
    line:
      color: "#1E90FF"
      width: 1.5
      dash: dot
"##;

    /// Relative levels: fractions of the data range.
    pub const RELATIVE_YAML: &str = r##"name: relative
contour:
  levels:
    mode: explicit
    values: [0.25, 0.5, 0.75]
  relative_levels: true
"##;

    /// Fails validation: negative on-plane tolerance.
    pub const INVALID_TOLERANCE_JSON: &str = r##"{
  "name": "broken",
  "contour": { "on_plane_tolerance": -1.0 }
}"##;

    /// Fails parsing: unknown level mode.
    pub const UNKNOWN_MODE_JSON: &str = r##"{
  "name": "broken",
  "contour": { "levels": { "mode": "cubic", "count": 3 } }
}"##;
}

/// Grid files in the format read by the command-line tool.
pub mod grids {
    /// 3x3 `f32` grid whose value equals its row index.
    pub const ROW_RAMP_JSON: &str = r#"{
  "nx": 3,
  "ny": 3,
  "rect": { "x": 0.0, "y": 0.0, "width": 3.0, "height": 3.0 },
  "data": { "type": "f32", "values": [0, 0, 0, 1, 1, 1, 2, 2, 2] }
}"#;

    /// 2x2 `u8` grid with the default rectangle.
    pub const TINY_U8_JSON: &str = r#"{
  "nx": 2,
  "ny": 2,
  "data": { "type": "u8", "values": [0, 10, 20, 30] }
}"#;

    /// Buffer length does not match the dimensions.
    pub const MISMATCHED_JSON: &str = r#"{
  "nx": 3,
  "ny": 3,
  "data": { "type": "i16", "values": [1, 2, 3, 4] }
}"#;
}

/// Write `content` to a temporary file with the given extension.
///
/// The file is removed when the returned handle is dropped.
pub fn write_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}
