//! Dashboard configuration.
//!
//! Read once at startup from `$VIRTDASH_CONFIG` or `~/.virtdash/config.yaml`.
//! A missing file means defaults; a malformed one is a startup error.
//!
//! ```yaml
//! poll_interval_ms: 2000
//! virsh_binary: virsh
//! default_uri: qemu:///system
//! log_dir: /var/log/virtdash
//! verbose: false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::logging::virtdash_home;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "VIRTDASH_CONFIG";

/// Shortest accepted refresh interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Longest accepted refresh interval.
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashConfig {
    /// How long to wait for a key before refreshing, in milliseconds
    pub poll_interval_ms: u64,

    /// Path or name of the management CLI
    pub virsh_binary: String,

    /// Connection URI used when `-c` is not given
    pub default_uri: Option<String>,

    /// Log directory (defaults to ~/.virtdash/logs/)
    pub log_dir: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    pub verbose: bool,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            virsh_binary: "virsh".to_string(),
            default_uri: None,
            log_dir: None,
            verbose: false,
        }
    }
}

impl DashConfig {
    /// Load from the default location, falling back to defaults when no
    /// file exists.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_config_path()?,
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults when it does
    /// not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DashError::io("reading config", path, e))?;
        let config = Self::parse(&content).map_err(|e| match e {
            DashError::Parse { message, .. } => DashError::ConfigInvalid {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse and validate YAML content.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| DashError::parse("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(DashError::ConfigValidation {
                message: format!(
                    "poll_interval_ms = {} is outside {}..={}",
                    self.poll_interval_ms, MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS
                ),
            });
        }
        if self.virsh_binary.trim().is_empty() {
            return Err(DashError::ConfigValidation {
                message: "virsh_binary must not be empty".into(),
            });
        }
        Ok(())
    }

    /// The input timeout of the main loop.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// `~/.virtdash/config.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(virtdash_home()?.join("config.yaml"))
}
