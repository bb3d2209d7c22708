//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tally/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::queue::DEFAULT_SIZE_LIMIT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub history_limit: Option<usize>,
    pub show_connections: Option<bool>,
    pub export_on_exit: Option<bool>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub history_limit: Option<usize>,
    pub show_connections: Option<bool>,
    pub export_on_exit: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub history_limit: usize,
    pub show_connections: bool,
    pub export_on_exit: bool,
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

/// Returns the path to `~/.tally/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tally").join("config.toml"))
}

/// Load config from `~/.tally/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TallyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TallyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TallyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TallyConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TallyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TallyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tally Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# history_limit = 32          # Lines kept in the scrollback (TALLY_HISTORY_LIMIT)
# show_connections = true     # Highlight equal values on consecutive lines (TALLY_SHOW_CONNECTIONS)
# export_on_exit = false      # Print the transcript to stdout when quitting
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TallyConfig, cli: &CliOverrides) -> ResolvedConfig {
    // History limit: CLI → env → config → default
    let history_limit = cli
        .history_limit
        .or_else(|| env_parsed("TALLY_HISTORY_LIMIT"))
        .or(config.general.history_limit)
        .unwrap_or(DEFAULT_SIZE_LIMIT)
        .max(1);

    // Connections: CLI → env → config → on
    let show_connections = cli
        .show_connections
        .or_else(|| env_parsed("TALLY_SHOW_CONNECTIONS"))
        .or(config.general.show_connections)
        .unwrap_or(true);

    let export_on_exit = cli
        .export_on_exit
        .or(config.general.export_on_exit)
        .unwrap_or(false);

    ResolvedConfig {
        history_limit,
        show_connections,
        export_on_exit,
    }
}

/// Reads and parses an environment variable, ignoring (with a warning)
/// values that don't parse.
fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}
