//! Command-line flags and the optional TOML config file.
//!
//! Precedence is flag, then file, then built-in default. A missing config
//! file is normal; an unreadable or malformed one is logged and ignored so a
//! typo never prevents startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_THEME: &str = "catppuccin-mocha";
const DEFAULT_LATENCY_MS: u64 = 300;
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_LOG_FILE: &str = ".branchlens/branchlens.log";

/// branchlens - browse branches, commits, and per-file change explanations
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "branchlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Colour theme: `dark` or `catppuccin-mocha`
    #[arg(long, env = "BRANCHLENS_THEME")]
    pub theme: Option<String>,

    /// Load history data from this TOML file instead of the built-in dataset
    #[arg(long, env = "BRANCHLENS_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Simulated backend latency in milliseconds (0 disables it)
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Path to the config file
    ///
    /// Defaults to $XDG_CONFIG_HOME/branchlens/config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write logs; the terminal is owned by the UI
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

/// Keys accepted in `config.toml`. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub theme: Option<String>,
    pub latency_ms: Option<u64>,
    pub dataset: Option<PathBuf>,
    pub log_filter: Option<String>,
}

/// Errors reading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl FileConfig {
    /// Reads `path`. Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` for unreadable files, `ConfigError::Parse` for bad TOML
    /// or unknown keys.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Io { path: path.to_owned(), source }),
        };
        toml::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }
}

/// Fully resolved settings used by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: String,
    pub latency: Duration,
    pub dataset: Option<PathBuf>,
    pub log_filter: String,
    pub log_file: PathBuf,
}

impl Settings {
    /// Merges flags over file values over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let log_filter = if cli.verbose {
            "debug".to_owned()
        } else {
            file.log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned())
        };
        Self {
            theme: cli.theme.clone().or(file.theme).unwrap_or_else(|| DEFAULT_THEME.to_owned()),
            latency: Duration::from_millis(
                cli.latency_ms.or(file.latency_ms).unwrap_or(DEFAULT_LATENCY_MS),
            ),
            dataset: cli.dataset.clone().or(file.dataset),
            log_filter,
            log_file: cli.log_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// Returns the default config file path.
///
/// Prefers `$XDG_CONFIG_HOME/branchlens/config.toml`; falls back to
/// `~/.config/branchlens/config.toml` when the env var is absent.
pub fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("branchlens").join("config.toml")
}
