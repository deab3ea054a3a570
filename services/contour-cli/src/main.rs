//! Contour line extraction from the command line.
//!
//! Reads a grid (JSON or raw native-endian samples), applies a contour
//! style file and level flags, and writes the per-level segment lists with
//! their resolved line styles as JSON.

mod input;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use plot_common::{DataType, PlotRect};
use raster_contour::{ContourConfig, ContourPlot, ContourStyle, LevelPolicy};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use output::ContourOutput;

#[derive(Parser, Debug)]
#[command(name = "contour-cli")]
#[command(about = "Extract contour lines from a raster grid")]
struct Args {
    /// Grid file (JSON unless --data-type is given)
    #[arg(short, long)]
    input: PathBuf,

    /// Read the input as raw native-endian samples of this type
    #[arg(long)]
    data_type: Option<DataType>,

    /// Grid width for raw input
    #[arg(long)]
    nx: Option<usize>,

    /// Grid height for raw input
    #[arg(long)]
    ny: Option<usize>,

    /// Contour style file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long, env = "CONTOUR_STYLE")]
    style: Option<PathBuf>,

    /// Explicit levels, comma-separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with_all = ["linear", "log"])]
    levels: Vec<f64>,

    /// Generate this many linear levels
    #[arg(long, conflicts_with = "log")]
    linear: Option<usize>,

    /// Generate this many logarithmic levels
    #[arg(long)]
    log: Option<usize>,

    /// Base for logarithmic levels
    #[arg(long, default_value = "2.0")]
    base: f64,

    /// Treat explicit levels as fractions of the data range
    #[arg(long)]
    relative: bool,

    /// Plot rectangle as "x,y,width,height"
    #[arg(long, allow_hyphen_values = true)]
    rect: Option<PlotRect>,

    /// Skip triangles lying entirely on a level
    #[arg(long)]
    ignore_on_plane: bool,

    /// Values within this distance of a level count as on it
    #[arg(long)]
    tolerance: Option<f64>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    run(&args)
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the contour output
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let style = match &args.style {
        Some(path) => Some(
            ContourStyle::from_file(path)
                .with_context(|| format!("Failed to load style {}", path.display()))?,
        ),
        None => None,
    };

    let base_config = match &style {
        Some(style) => style.contour.clone(),
        None => ContourConfig::from_env(),
    };
    let config = build_config(args, base_config)?;

    let grid = match args.data_type {
        Some(data_type) => input::load_raw_grid(&args.input, data_type, args.nx, args.ny, args.rect)?,
        None => input::load_json_grid(&args.input, args.rect)?,
    };

    info!(
        input = %args.input.display(),
        nx = grid.nx(),
        ny = grid.ny(),
        data_type = %grid.data_type(),
        "Contouring grid"
    );

    let mut plot = ContourPlot::with_config(config)?;
    plot.set_grid(grid);

    let (name, units) = match style {
        Some(style) => (Some(style.name), style.units),
        None => (None, None),
    };
    let output = ContourOutput::from_plot(&mut plot, name, units)?;

    info!(
        levels = output.levels.len(),
        total_segments = output.total_segments,
        "Contour lines calculated"
    );

    output.write(args.output.as_deref(), args.pretty)
}

/// Apply command-line overrides on top of a style or environment config.
fn build_config(args: &Args, mut config: ContourConfig) -> Result<ContourConfig> {
    if !args.levels.is_empty() {
        config.levels = LevelPolicy::explicit(args.levels.clone());
    } else if let Some(count) = args.linear {
        config.levels = LevelPolicy::Linear { count };
    } else if let Some(count) = args.log {
        config.levels = LevelPolicy::Log {
            count,
            base: args.base,
        };
    }

    if args.relative {
        if !matches!(config.levels, LevelPolicy::Explicit { .. }) {
            bail!("--relative only applies to explicit levels");
        }
        config.relative_levels = true;
    }
    if args.ignore_on_plane {
        config.ignore_on_plane = true;
    }
    if let Some(tolerance) = args.tolerance {
        config.on_plane_tolerance = tolerance;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_contour::ContourError;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["contour-cli", "--input", "grid.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_levels_flag() {
        let args = parse(&["--levels", "-1.5,0,2.5"]);
        let config = build_config(&args, ContourConfig::default()).unwrap();
        assert_eq!(config.levels, LevelPolicy::explicit(vec![-1.5, 0.0, 2.5]));
    }

    #[test]
    fn test_log_flag_with_base() {
        let args = parse(&["--log", "4", "--base", "10"]);
        let config = build_config(&args, ContourConfig::default()).unwrap();
        assert_eq!(config.levels, LevelPolicy::Log { count: 4, base: 10.0 });
    }

    #[test]
    fn test_invalid_log_base_is_rejected() {
        let args = parse(&["--log", "4", "--base", "1"]);
        let err = build_config(&args, ContourConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContourError>(),
            Some(ContourError::InvalidBase(_))
        ));
    }

    #[test]
    fn test_oversized_level_count_is_rejected() {
        let args = parse(&["--linear", "18446744073709551615"]);
        let err = build_config(&args, ContourConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContourError>(),
            Some(ContourError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_conflicting_level_flags() {
        let result = Args::try_parse_from([
            "contour-cli", "--input", "g.json", "--levels", "1", "--linear", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_style_config() {
        let args = parse(&["--linear", "5", "--ignore-on-plane", "--tolerance", "0.001"]);
        let base = ContourConfig {
            levels: LevelPolicy::explicit(vec![1.0]),
            ..ContourConfig::default()
        };
        let config = build_config(&args, base).unwrap();
        assert_eq!(config.levels, LevelPolicy::Linear { count: 5 });
        assert!(config.ignore_on_plane);
        assert_eq!(config.on_plane_tolerance, 0.001);
    }

    #[test]
    fn test_relative_requires_explicit_levels() {
        let args = parse(&["--linear", "5", "--relative"]);
        assert!(build_config(&args, ContourConfig::default()).is_err());

        let args = parse(&["--levels", "0.25,0.75", "--relative"]);
        assert!(build_config(&args, ContourConfig::default()).unwrap().relative_levels);
    }

    #[test]
    fn test_rect_and_data_type_flags() {
        let args = parse(&["--rect", "-1,-1,2,2", "--data-type", "uint16", "--nx", "4", "--ny", "3"]);
        assert_eq!(args.rect, Some(PlotRect::new(-1.0, -1.0, 2.0, 2.0)));
        assert_eq!(args.data_type, Some(DataType::U16));
    }
}
