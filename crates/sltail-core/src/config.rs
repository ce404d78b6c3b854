//! Configuration types for sltail.
//!
//! [`Config::load`] reads `~/.config/sltail/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests), and
//! [`Config::from_path`] layers one explicit file over them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
skip_marker      = "--- One line skipped ---"
timestamp_format = "%d/%b/%Y:%H:%M:%S %z"
missing_ip       = "-"

[columns]
template  = "details"
timestamp = "tstamp"
ip        = "IP"
payload   = "log_data"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sltail/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Printed in place of a row that could not be rendered.
    #[serde(default = "default_skip_marker")]
    pub skip_marker: String,
    /// `chrono` strftime pattern for the row timestamp, in local time.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Printed when a row has no client address.
    #[serde(default = "default_missing_ip")]
    pub missing_ip: String,
}

fn default_skip_marker() -> String { "--- One line skipped ---".to_string() }
fn default_timestamp_format() -> String { "%d/%b/%Y:%H:%M:%S %z".to_string() }
fn default_missing_ip() -> String { "-".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            skip_marker: default_skip_marker(),
            timestamp_format: default_timestamp_format(),
            missing_ip: default_missing_ip(),
        }
    }
}

/// `[columns]` section of `config.toml`: which row fields feed a log line.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_template_column")]
    pub template: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp: String,
    #[serde(default = "default_ip_column")]
    pub ip: String,
    #[serde(default = "default_payload_column")]
    pub payload: String,
}

fn default_template_column() -> String { "details".to_string() }
fn default_timestamp_column() -> String { "tstamp".to_string() }
fn default_ip_column() -> String { "IP".to_string() }
fn default_payload_column() -> String { "log_data".to_string() }

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            template: default_template_column(),
            timestamp: default_timestamp_column(),
            ip: default_ip_column(),
            payload: default_payload_column(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sltail/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::from_path(&path)
    }

    /// Layer `path` over the built-in defaults. The file must exist.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sltail")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
