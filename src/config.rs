//! Recorder configuration
//!
//! Every option has a default and no option is required. Values come from
//! `Default`, a TOML file, or `LOG_*` environment variables; anything missing
//! or unrecognized silently falls back to its default. Configuration problems
//! are never fatal — only a log directory that cannot be created is.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::Level;
use crate::rotation::RotationStrategy;
use crate::router::{ManagedPaths, RoutingMode};

/// Identity used when the host project's metadata cannot be read.
pub const UNKNOWN_PACKAGE: &str = "unknown-package";

/// Immutable recorder configuration.
///
/// Owned by the writer for its lifetime; there is no process-wide mutable
/// state, so independently configured recorders can coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum severity that is emitted
    #[serde(default = "default_level")]
    pub level: Level,

    /// Base directory for the managed files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// File name for warn/error records in `error_warn` routing
    #[serde(default = "default_error_warn_file")]
    pub error_warn_file: String,

    /// File name for info/debug records in `error_warn` routing
    #[serde(default = "default_info_debug_file")]
    pub info_debug_file: String,

    /// File name for the combined file used by `all` routing
    #[serde(default = "default_combined_file")]
    pub combined_file: String,

    /// Size-rotation trigger in bytes
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Rotation strategy
    #[serde(default)]
    pub rotation: RotationStrategy,

    /// Whether rendered lines are echoed to stdout
    #[serde(default = "default_console")]
    pub console: bool,

    /// Which managed file each severity goes to
    #[serde(default)]
    pub routing: RoutingMode,

    /// Identity label prefixing every rendered line
    #[serde(default = "default_identity")]
    pub identity: String,
}

fn default_level() -> Level {
    Level::Info
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_error_warn_file() -> String {
    "errors.log".to_string()
}

fn default_info_debug_file() -> String {
    "info_debug.log".to_string()
}

fn default_combined_file() -> String {
    "combined.log".to_string()
}

fn default_max_size() -> u64 {
    1024 * 1024 // 1 MiB
}

fn default_console() -> bool {
    true
}

fn default_identity() -> String {
    package_name().unwrap_or_else(|| UNKNOWN_PACKAGE.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: default_log_dir(),
            error_warn_file: default_error_warn_file(),
            info_debug_file: default_info_debug_file(),
            combined_file: default_combined_file(),
            max_size: default_max_size(),
            rotation: RotationStrategy::default(),
            console: default_console(),
            routing: RoutingMode::default(),
            identity: default_identity(),
        }
    }
}

impl Config {
    /// Build a configuration from `LOG_*` environment variables.
    ///
    /// Unset or invalid variables keep their defaults. The console echo stays
    /// enabled unless `LOG_CONSOLE` is exactly `false`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("LOG_LEVEL") {
            config.level = Level::from_name(&value).unwrap_or_else(default_level);
        }
        if let Ok(value) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(value);
        }
        if let Ok(value) = env::var("LOG_FILE_ERROR_WARN") {
            config.error_warn_file = value;
        }
        if let Ok(value) = env::var("LOG_FILE_INFO_DEBUG") {
            config.info_debug_file = value;
        }
        if let Ok(value) = env::var("LOG_FILE_ALL") {
            config.combined_file = value;
        }
        if let Ok(value) = env::var("LOG_MAX_SIZE") {
            config.max_size = value.parse().unwrap_or_else(|_| default_max_size());
        }
        if let Ok(value) = env::var("LOG_ROTATION") {
            config.rotation = RotationStrategy::from_name(&value);
        }
        if let Ok(value) = env::var("LOG_CONSOLE") {
            config.console = value != "false";
        }
        if let Ok(value) = env::var("LOG_COMBINATION") {
            config.routing = RoutingMode::from_name(&value);
        }

        config
    }

    /// Load a configuration from a TOML file.
    ///
    /// A missing or unparsable file yields the defaults; a partial file keeps
    /// defaults for whatever it leaves out.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Resolve the three managed file paths against the log directory.
    pub fn managed_paths(&self) -> ManagedPaths {
        ManagedPaths {
            combined: self.log_dir.join(&self.combined_file),
            error_warn: self.log_dir.join(&self.error_warn_file),
            info_debug: self.log_dir.join(&self.info_debug_file),
        }
    }
}

/// Read the host package name from `Cargo.toml` in the current directory.
fn package_name() -> Option<String> {
    let content = std::fs::read_to_string("Cargo.toml").ok()?;
    let manifest: toml::Value = toml::from_str(&content).ok()?;
    manifest
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
