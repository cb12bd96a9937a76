//! Configuration for the terminal viewer
//!
//! Sources, highest precedence first:
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables (`WF3D_*`)
//! 3. A TOML configuration file
//! 4. Built-in defaults

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info, warn};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use wf3d_core::{DepthAxis, ViewerConfig};

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for model files at startup
    pub models_dir: PathBuf,
    pub viewer: ViewerConfig,
    pub terminal: TerminalConfig,
    pub logging: LoggingConfig,
}

/// Pixel size of one character cell
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub cell_width: u32,
    pub cell_height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Log destination while the viewer owns the terminal
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
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

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            viewer: ViewerConfig::default(),
            terminal: TerminalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cell_width: 5,
            cell_height: 10,
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        let mut config = match explicit {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => Self::load_from_search_path()?,
        };
        Self::apply_environment_variables(&mut config);
        Ok(config)
    }

    fn load_from_search_path() -> Result<AppConfig> {
        for path in Self::find_config_files() {
            if path.is_file() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }
        debug!("No configuration file found, using defaults");
        Ok(AppConfig::default())
    }

    /// Potential configuration file paths in order of preference
    fn find_config_files() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = env::var("WF3D_CONFIG") {
            paths.push(PathBuf::from(path));
        }
        if let Ok(current_dir) = env::current_dir() {
            paths.push(current_dir.join("wf3d.toml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("wf3d").join("config.toml"));
        }

        paths
    }

    pub fn load_from_file(path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<AppConfig> {
        Ok(toml::from_str(content)?)
    }

    fn apply_environment_variables(config: &mut AppConfig) {
        Self::apply_overrides(config, |key| env::var(key).ok());
    }

    /// Apply `WF3D_*` overrides read through `lookup`; unparseable values are
    /// reported and ignored.
    pub fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("WF3D_MODELS_DIR") {
            config.models_dir = PathBuf::from(dir);
        }
        if let Some(focal) = lookup("WF3D_FOCAL") {
            match focal.parse() {
                Ok(focal) => config.viewer.focal.initial = focal,
                Err(_) => warn!("Ignoring invalid WF3D_FOCAL: {focal}"),
            }
        }
        if let Some(axis) = lookup("WF3D_DEPTH_AXIS") {
            match parse_depth_axis(&axis) {
                Some(axis) => config.viewer.depth_axis = axis,
                None => warn!("Ignoring invalid WF3D_DEPTH_AXIS: {axis}"),
            }
        }
        if let Some(level) = lookup("WF3D_LOG_LEVEL") {
            match LogLevel::from_str(&level, true) {
                Ok(level) => config.logging.level = level,
                Err(_) => warn!("Ignoring invalid WF3D_LOG_LEVEL: {level}"),
            }
        }
    }
}

pub fn parse_depth_axis(value: &str) -> Option<DepthAxis> {
    match value.to_ascii_lowercase().as_str() {
        "z" => Some(DepthAxis::Z),
        "y" => Some(DepthAxis::Y),
        _ => None,
    }
}
