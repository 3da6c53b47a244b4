//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.serenity/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The `[reader]` values are only *defaults*: once the user changes a setting
//! in the app, the value persisted in storage wins.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::settings::{DEFAULT_ZOOM, Settings, clamp_zoom};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SerenityConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where persisted storage lives. Relative paths resolve against `~/.serenity/`.
    pub data_dir: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReaderConfig {
    pub default_zoom: Option<f64>,
    pub invert_pdf_in_dark_mode: Option<bool>,
    pub floating_toolbars: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_DIR: &str = "storage";
pub const DEFAULT_LOG_FILE: &str = "serenity.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub settings: Settings,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.serenity/`.
pub fn base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".serenity"))
}

/// Returns the path to `~/.serenity/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    base_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.serenity/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SerenityConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SerenityConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SerenityConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SerenityConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SerenityConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SerenityConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Serenity Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "storage"              # Or set SERENITY_DATA_DIR; relative to ~/.serenity/
# log_file = "serenity.log"         # Relative to ~/.serenity/
# log_level = "debug"               # Or set SERENITY_LOG_LEVEL: "error" .. "trace", "off"

# [reader]
# Defaults used until changed from the Settings screen.
# default_zoom = 0.9
# invert_pdf_in_dark_mode = true
# floating_toolbars = true
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI overrides (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SerenityConfig, cli: &CliOverrides) -> ResolvedConfig {
    let base = base_dir().unwrap_or_else(|| PathBuf::from("."));

    // Data dir: CLI → env → config → default
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        let configured = std::env::var("SERENITY_DATA_DIR")
            .ok()
            .or_else(|| config.general.data_dir.clone())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        base.join(configured)
    });

    let log_file = base.join(
        config
            .general
            .log_file
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILE),
    );

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("SERENITY_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .map(|level| parse_log_level(&level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let settings = Settings {
        default_zoom: clamp_zoom(config.reader.default_zoom.unwrap_or(DEFAULT_ZOOM)),
        invert_pdf_in_dark_mode: config
            .reader
            .invert_pdf_in_dark_mode
            .unwrap_or(true),
        floating_toolbars: config.reader.floating_toolbars.unwrap_or(true),
    };

    ResolvedConfig {
        data_dir,
        log_file,
        log_level,
        settings,
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.parse() {
        Ok(filter) => filter,
        Err(_) => {
            warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }
    }
}
