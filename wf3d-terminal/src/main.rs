/// WF3D Terminal Viewer
///
/// Loads every model file in a directory and shows it as a wireframe.
/// Controls:
///   - W/S: forward/back, A/D: left/right, Space/C: up/down
///   - Q/E: yaw, R/F: pitch, Z/X: roll
///   - =/-: focal length
///   - ESC: quit
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::{debug, info, warn};
use std::fs::File;
use std::path::PathBuf;
use wf3d_core::{load_models, Model, Transform};
use wf3d_terminal::config::{parse_depth_axis, AppConfig, ConfigLoader, LogLevel};
use wf3d_terminal::{render_snapshot, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "wf3d", version, about = "Interactive terminal wireframe viewer")]
struct Cli {
    /// Directory of model files
    models_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, env = "WF3D_CONFIG")]
    config: Option<PathBuf>,

    /// Initial focal length
    #[arg(long)]
    focal: Option<f64>,

    /// Depth axis convention: z (Z forward, Y up) or y (Y forward, Z up)
    #[arg(long, value_parser = parse_depth_axis_arg)]
    depth_axis: Option<wf3d_core::DepthAxis>,

    /// Set log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Add a built-in cube in front of the camera
    #[arg(long)]
    demo: bool,

    /// Print a single frame at the configured viewport size and exit
    #[arg(long)]
    snapshot: bool,
}

fn parse_depth_axis_arg(value: &str) -> Result<wf3d_core::DepthAxis, String> {
    parse_depth_axis(value).ok_or_else(|| format!("unknown depth axis '{value}', expected z or y"))
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(dir) = &cli.models_dir {
        config.models_dir = dir.clone();
    }
    if let Some(focal) = cli.focal {
        config.viewer.focal.initial = focal;
    }
    if let Some(axis) = cli.depth_axis {
        config.viewer.depth_axis = axis;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.filter_level(config.logging.level.into());
    if let Some(path) = &config.logging.file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Cube placed beyond the default focal plane
fn demo_cube(config: &AppConfig) -> Model {
    let mut cube = Model::cube(200.0);
    let forward = config.viewer.depth_axis.forward();
    cube.transform(&Transform::translation_along(
        forward,
        config.viewer.focal.initial + 400.0,
    ));
    cube
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, &cli);
    init_logging(&config)?;
    debug!("Configuration loaded: {config:?}");

    config
        .viewer
        .validate()
        .context("Invalid viewer configuration")?;

    let mut models = if cli.demo && !config.models_dir.is_dir() {
        Vec::new()
    } else {
        load_models(&config.models_dir).with_context(|| {
            format!("Failed to read model directory: {}", config.models_dir.display())
        })?
    };
    if cli.demo {
        models.push(demo_cube(&config));
    }
    if models.is_empty() {
        warn!("No models loaded from {}", config.models_dir.display());
    }
    info!("Loaded {} models", models.len());

    let (width, height) = (config.terminal.cell_width, config.terminal.cell_height);

    if cli.snapshot {
        let text = render_snapshot(models, &config.viewer, width, height)
            .context("Failed to render snapshot")?;
        print!("{text}");
        return Ok(());
    }

    let mut app = TerminalApp::new(models, &config.viewer, width, height)
        .context("Failed to start terminal viewer")?;
    app.run()?;
    Ok(())
}
