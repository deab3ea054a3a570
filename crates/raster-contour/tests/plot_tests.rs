//! Tests for the cached contour plot.

use raster_contour::{
    Color, ContourConfig, ContourError, ContourPlot, LevelPolicy, LevelStyle, PlotRect,
    SampleGrid,
};
use test_utils::{
    assert_levels_approx_eq, create_constant_grid, create_log_ramp_grid, create_row_ramp_grid,
    create_smooth_field,
};

fn row_ramp_plot(nx: usize, ny: usize) -> ContourPlot {
    let grid = SampleGrid::with_unit_pixels(create_row_ramp_grid(nx, ny), nx, ny).unwrap();
    ContourPlot::with_grid(grid)
}

// ============================================================================
// Caching
// ============================================================================

#[test]
fn test_recomputation_is_idempotent() {
    let grid = SampleGrid::with_unit_pixels(create_smooth_field(32, 24), 32, 24).unwrap();
    let mut plot = ContourPlot::with_grid(grid);
    plot.generate_linear(6).unwrap();

    let first = plot.calc_contour_lines().unwrap().clone();
    let second = plot.calc_contour_lines().unwrap().clone();
    let forced = plot.recompute().unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(first, forced);
    assert!(first.total_segments() > 0);
}

#[test]
fn test_default_plot_uses_three_levels() {
    let mut plot = row_ramp_plot(3, 5);
    let lines = plot.calc_contour_lines().unwrap();
    assert_eq!(lines.levels(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_changing_dimensions_invalidates_cache() {
    let mut plot = row_ramp_plot(3, 3);
    plot.set_levels(vec![0.5]);
    assert_eq!(plot.calc_contour_lines().unwrap().total_segments(), 4);

    plot.set_data(create_row_ramp_grid(5, 3), 5, 3).unwrap();
    assert!(plot.is_stale());
    assert_eq!(plot.calc_contour_lines().unwrap().total_segments(), 8);
}

#[test]
fn test_changing_buffer_invalidates_cache() {
    let mut plot = row_ramp_plot(3, 3);
    plot.set_levels(vec![0.5]);
    plot.calc_contour_lines().unwrap();

    plot.set_data(create_constant_grid(3, 3, 9.0), 3, 3).unwrap();
    assert_eq!(plot.calc_contour_lines().unwrap().total_segments(), 0);
}

#[test]
fn test_set_data_keeps_rect() {
    let mut plot = row_ramp_plot(3, 3);
    let rect = PlotRect::new(-5.0, -5.0, 10.0, 10.0);
    plot.set_rect(rect).unwrap();
    plot.set_data(vec![1u8; 9], 3, 3).unwrap();
    assert_eq!(plot.grid().unwrap().rect(), rect);
}

#[test]
fn test_set_data_rejects_bad_dimensions() {
    let mut plot = row_ramp_plot(3, 3);
    let err = plot.set_data(vec![0.0f64; 8], 3, 3).unwrap_err();
    assert!(matches!(err, ContourError::LengthMismatch { .. }));
    // previous grid still in place
    assert_eq!(plot.grid().unwrap().nx(), 3);
}

#[test]
fn test_moving_rect_moves_segments() {
    let mut plot = row_ramp_plot(2, 2);
    plot.set_levels(vec![0.5]);
    let before = plot.calc_contour_lines().unwrap().segments(0).unwrap()[0];

    plot.set_rect(PlotRect::new(100.0, 0.0, 2.0, 2.0)).unwrap();
    assert!(plot.is_stale());
    let after = plot.calc_contour_lines().unwrap().segments(0).unwrap()[0];
    assert_eq!(after.start.x - before.start.x, 100.0);
}

#[test]
fn test_on_plane_options_invalidate_cache() {
    let grid = SampleGrid::with_unit_pixels(create_constant_grid(3, 3, 1.0), 3, 3).unwrap();
    let mut plot = ContourPlot::with_grid(grid);
    plot.set_levels(vec![1.0]);
    assert_eq!(plot.calc_contour_lines().unwrap().total_segments(), 8);

    plot.set_ignore_on_plane(true);
    assert!(plot.is_stale());
    assert_eq!(plot.calc_contour_lines().unwrap().total_segments(), 0);

    assert!(plot.set_on_plane_tolerance(-1.0).is_err());
    assert!(!plot.is_stale());
}

#[test]
fn test_set_config_keeps_cache_for_style_only_changes() {
    let mut plot = row_ramp_plot(3, 3);
    plot.calc_contour_lines().unwrap();

    let mut config = plot.config().clone();
    config.style = LevelStyle::solid(Color::rgb(200, 0, 0), 3.0);
    plot.set_config(config.clone()).unwrap();
    assert!(!plot.is_stale());

    config.levels = LevelPolicy::explicit(vec![0.25]);
    plot.set_config(config).unwrap();
    assert!(plot.is_stale());
}

#[test]
fn test_set_config_rejects_invalid() {
    let mut plot = row_ramp_plot(3, 3);
    let config = ContourConfig {
        on_plane_tolerance: f64::NAN,
        ..ContourConfig::default()
    };
    assert!(plot.set_config(config).is_err());
    assert_eq!(plot.config().on_plane_tolerance, 0.0);
}

// ============================================================================
// Level mutators
// ============================================================================

#[test]
fn test_generate_linear_returns_levels() {
    let mut plot = row_ramp_plot(2, 11);
    let levels = plot.generate_linear(4).unwrap();
    assert_levels_approx_eq!(levels, [2.0, 4.0, 6.0, 8.0], 1e-12);
    assert_eq!(plot.levels().unwrap(), levels);
}

#[test]
fn test_generate_log_over_positive_data() {
    let grid = SampleGrid::with_unit_pixels(create_log_ramp_grid(4, 2, 3.0), 4, 2).unwrap();
    let mut plot = ContourPlot::with_grid(grid);

    let levels = plot.generate_log(2, 10.0).unwrap();
    assert_levels_approx_eq!(levels, [10.0, 100.0], 1e-9);

    let lines = plot.calc_contour_lines().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.total_segments() > 0);
}

#[test]
fn test_generate_log_without_data_is_no_data() {
    let mut plot = ContourPlot::new();
    assert!(matches!(plot.generate_log(3, 2.0), Err(ContourError::NoData)));
}

#[test]
fn test_add_level_invalidates_and_sorts() {
    let mut plot = row_ramp_plot(3, 3);
    plot.set_levels(vec![0.5, 1.5]);
    plot.calc_contour_lines().unwrap();

    assert!(plot.add_level(1.0).unwrap());
    assert!(plot.is_stale());
    assert_eq!(plot.calc_contour_lines().unwrap().levels(), &[0.5, 1.0, 1.5]);
}

#[test]
fn test_add_level_to_relative_levels_stays_relative() {
    let mut plot = row_ramp_plot(2, 5);
    plot.set_relative_levels(true);
    plot.set_levels(vec![0.5]);
    assert!(plot.add_level(0.25).unwrap());

    assert_eq!(plot.config().levels, LevelPolicy::explicit(vec![0.25, 0.5]));
    assert_eq!(plot.levels().unwrap(), vec![1.0, 2.0]);
}

// ============================================================================
// Styling accessors
// ============================================================================

#[test]
fn test_line_style_and_label_per_level() {
    let mut plot = row_ramp_plot(2, 3);
    plot.set_levels(vec![0.5, 1.5]);
    plot.calc_contour_lines().unwrap();

    plot.set_style(LevelStyle::solid(Color::rgb(0, 128, 0), 2.0)).unwrap();
    let style = plot.line_style(1).unwrap();
    assert_eq!(style.color, Color::rgb(0, 128, 0));
    assert_eq!(style.width, 2.0);
    assert_eq!(plot.label(0).as_deref(), Some("0.5"));
    assert!(plot.line_style(2).is_none());
}

#[test]
fn test_accessors_empty_when_stale() {
    let plot = row_ramp_plot(2, 3);
    assert!(plot.contour_lines().is_none());
    assert!(plot.segments(0).is_none());
    assert!(plot.line_style(0).is_none());
}
