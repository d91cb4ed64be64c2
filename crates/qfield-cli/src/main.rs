//! qfield - draw the ring of integers of a quadratic number field Q(√d)
//! as a lattice in the plane.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use qfield_core::{load_config, save_config, Color, Lattice, LatticeConfig, LineStyle, QuadraticField, Viewport};
use qfield_render::{render_to_file, RenderSettings};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "qfield",
    version,
    about = "Plot the ring of integers of a quadratic number field",
    after_help = r#"
Examples:
  qfield render -5                          # writes lattice_d-5.svg
  qfield render -3 --circles -o eis.png     # Eisenstein integers with circles
  qfield render 2 --connect dashed --ylim -3,3
  qfield info -7
  qfield points -1 --xlim -2,2 --ylim -2,2

Environment Variables:
  QFIELD_DEBUG=1               Enable debug logging
  QFIELD_LOG_LEVEL=debug       Set log level (error, warn, info, debug, trace)
  QFIELD_CONFIG=<path>         Path to a JSON plot configuration
"#
)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true, env = "QFIELD_DEBUG")]
    debug: bool,

    /// Set log level
    #[arg(long, value_enum, global = true, env = "QFIELD_LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// Plot configuration file (JSON)
    #[arg(long, global = true, env = "QFIELD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the lattice to an SVG or PNG file
    Render {
        /// Square-free integer d
        #[arg(allow_negative_numbers = true)]
        d: i64,

        /// Output file; the extension selects the format
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How neighbouring points are connected: solid, dashed or none
        #[arg(long)]
        connect: Option<LineStyle>,

        /// Draw a translucent circle around every lattice point
        #[arg(long)]
        circles: bool,

        /// Circle colour, a name or #rrggbb
        #[arg(long)]
        circle_color: Option<Color>,

        /// Circle opacity in 0..1
        #[arg(long)]
        circle_alpha: Option<f64>,

        /// Circle radius in data units
        #[arg(long)]
        radius: Option<f64>,

        /// Canvas width in pixels
        #[arg(long, default_value = "1000")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "1000")]
        height: u32,

        #[command(flatten)]
        window: Window,

        /// Leave out the 0, ω and 1 + ω annotations
        #[arg(long)]
        no_labels: bool,

        /// Skip all text (title, ticks, annotations)
        #[arg(long)]
        no_text: bool,

        /// Also write the effective plot configuration to this JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    /// Show ω and its position for Q(√d)
    Info {
        #[arg(allow_negative_numbers = true)]
        d: i64,
    },

    /// Print the lattice points inside the window as JSON
    Points {
        #[arg(allow_negative_numbers = true)]
        d: i64,

        #[command(flatten)]
        window: Window,
    },
}

#[derive(Args, Default)]
struct Window {
    /// Horizontal limits as min,max
    #[arg(long, value_parser = parse_limits, allow_hyphen_values = true)]
    xlim: Option<(f64, f64)>,

    /// Vertical limits as min,max
    #[arg(long, value_parser = parse_limits, allow_hyphen_values = true)]
    ylim: Option<(f64, f64)>,
}

impl Window {
    fn apply(&self, viewport: Viewport) -> Result<Viewport> {
        let (x_min, x_max) = self.xlim.unwrap_or((viewport.x_min, viewport.x_max));
        let (y_min, y_max) = self.ylim.unwrap_or((viewport.y_min, viewport.y_max));
        Viewport::new(x_min, x_max, y_min, y_max).context("invalid plot limits")
    }
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn parse_limits(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(',')
        .ok_or_else(|| format!("expected min,max but got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad limit '{}': {e}", v.trim()))
    };
    let (lo, hi) = (parse(lo)?, parse(hi)?);
    if lo >= hi {
        return Err(format!("min must be below max in '{s}'"));
    }
    Ok((lo, hi))
}

fn default_output(d: i64) -> PathBuf {
    PathBuf::from(format!("lattice_d{d}.svg"))
}

fn base_config(path: Option<&Path>) -> Result<LatticeConfig> {
    match path {
        Some(path) => {
            debug!("loading plot configuration from {}", path.display());
            load_config(path).with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(LatticeConfig::default()),
    }
}

#[derive(Serialize)]
struct FieldInfo {
    d: i64,
    d_mod_4: i64,
    imaginary: bool,
    omega_tex: String,
    omega: String,
    omega_position: [f64; 2],
    covolume: f64,
}

impl FieldInfo {
    fn new(field: &QuadraticField) -> Self {
        let position = field.omega().position();
        Self {
            d: field.d(),
            d_mod_4: field.d_mod_4(),
            imaginary: field.is_imaginary(),
            omega_tex: field.omega_tex(),
            omega: field.omega_text(),
            omega_position: [position.x, position.y],
            covolume: Lattice::new(field).covolume(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        cli.log_level.into()
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_level(log_level)
        .init();

    let config = base_config(cli.config.as_deref())?;
    execute_command(cli.command, config)
}

fn execute_command(command: Commands, mut config: LatticeConfig) -> Result<()> {
    match command {
        Commands::Render {
            d,
            output,
            connect,
            circles,
            circle_color,
            circle_alpha,
            radius,
            width,
            height,
            window,
            no_labels,
            no_text,
            save_config: config_out,
        } => {
            let field = QuadraticField::new(d).context("cannot plot this field")?;
            if let Some(style) = connect {
                config.connect_dots = style;
            }
            config.plot_circles |= circles;
            if let Some(color) = circle_color {
                config.circle_color = color;
            }
            if let Some(alpha) = circle_alpha {
                config.circle_alpha = alpha;
            }
            if let Some(radius) = radius {
                config.radius = radius;
            }
            config.show_labels &= !no_labels;
            config.viewport = window.apply(config.viewport)?;
            if let Some(path) = config_out {
                save_config(&path, &config)
                    .with_context(|| format!("failed to save config {}", path.display()))?;
                info!("saved plot configuration to {}", path.display());
            }

            let settings = RenderSettings { width, height, draw_text: !no_text, ..Default::default() };
            let output = output.unwrap_or_else(|| default_output(d));
            let format = render_to_file(&output, &field, &config, &settings)
                .with_context(|| format!("failed to render {}", output.display()))?;
            info!("wrote {} ({})", output.display(), format.extension());
            println!("{}", output.display());
            Ok(())
        }
        Commands::Info { d } => {
            let field = QuadraticField::new(d).context("invalid field")?;
            let info = FieldInfo::new(&field);
            println!("{field}");
            println!("  d mod 4   : {}", info.d_mod_4);
            println!("  ω         : {}", info.omega);
            println!("  ω (TeX)   : {}", info.omega_tex);
            println!("  position  : ({:.6}, {:.6})", info.omega_position[0], info.omega_position[1]);
            println!("  covolume  : {:.6}", info.covolume);
            debug!("{}", serde_json::to_string(&info)?);
            Ok(())
        }
        Commands::Points { d, window } => {
            let field = QuadraticField::new(d).context("invalid field")?;
            let viewport = window.apply(config.viewport)?;
            let points = Lattice::new(&field)
                .points_in(&viewport)
                .context("cannot enumerate this window")?;
            info!("{} lattice points inside the window", points.len());
            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limits() {
        assert_eq!(parse_limits("-3,3"), Ok((-3.0, 3.0)));
        assert_eq!(parse_limits(" -1.5 , 2 "), Ok((-1.5, 2.0)));
        assert!(parse_limits("3").is_err());
        assert!(parse_limits("2,1").is_err());
        assert!(parse_limits("a,1").is_err());
    }

    #[test]
    fn test_window_overrides_viewport() {
        let window = Window { xlim: Some((-2.0, 2.0)), ylim: None };
        let v = window.apply(Viewport::default()).unwrap();
        assert_eq!(v.x_range(), -2.0..2.0);
        assert_eq!(v.y_range(), -5.0..5.0);
    }

    #[test]
    fn test_render_args_parse_negative_d() {
        let cli = Cli::try_parse_from([
            "qfield", "render", "-5", "--connect", "dashed", "--xlim", "-2,2", "--circles",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { d, connect, circles, window, .. } => {
                assert_eq!(d, -5);
                assert_eq!(connect, Some(LineStyle::Dashed));
                assert!(circles);
                assert_eq!(window.xlim, Some((-2.0, 2.0)));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_points_reject_oversized_window() {
        let cli = Cli::try_parse_from([
            "qfield", "points", "-1", "--xlim", "-1e10,1e10", "--ylim", "-1e10,1e10",
        ])
        .unwrap();
        let result = execute_command(cli.command, LatticeConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_render_saves_effective_config() {
        let dir = std::env::temp_dir();
        let image = dir.join(format!("qfield-cli-{}.svg", std::process::id()));
        let saved = dir.join(format!("qfield-cli-{}.json", std::process::id()));
        let cli = Cli::try_parse_from([
            "qfield",
            "render",
            "-7",
            "--no-text",
            "--width",
            "200",
            "--height",
            "200",
            "--radius",
            "0.5",
            "-o",
            image.to_str().unwrap(),
            "--save-config",
            saved.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(cli.command, LatticeConfig::default()).unwrap();
        let loaded = load_config(&saved).unwrap();
        std::fs::remove_file(&image).ok();
        std::fs::remove_file(&saved).ok();
        assert_eq!(loaded.radius, 0.5);
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(default_output(-3), PathBuf::from("lattice_d-3.svg"));
    }

    #[test]
    fn test_field_info() {
        let field = QuadraticField::new(-3).unwrap();
        let info = FieldInfo::new(&field);
        assert_eq!(info.d_mod_4, 1);
        assert!((info.omega_position[0] - 0.5).abs() < 1e-12);
        assert!(info.imaginary);
    }
}
