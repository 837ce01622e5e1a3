//! Logging infrastructure for virtdash.
//!
//! The dashboard owns the terminal, so nothing is ever written to stdout or
//! stderr while it runs. Structured logs go to a daily-rolling JSON lines
//! file instead, `~/.virtdash/logs/virtdash.log` by default.
//!
//! ## Example
//!
//! ```no_run
//! use virtdash_core::logging;
//!
//! // Initialize logging (call once at startup)
//! let _guard = logging::init_logging(None, false).expect("logging init");
//!
//! tracing::info!("virtdash started");
//! tracing::debug!(kind = "vm", name = "web01", "starting resource");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{DashError, Result};

/// Log file name prefix inside the log directory.
pub const LOG_FILE_NAME: &str = "virtdash.log";

/// Guard that must be held to ensure log flushing on shutdown.
///
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LogGuard {
    /// A guard for a process that runs without a log file.
    pub fn disabled() -> Self {
        Self { _file_guard: None }
    }
}

/// Initialize the virtdash logging system.
///
/// # Arguments
///
/// * `log_dir` - Optional custom log directory. Defaults to `~/.virtdash/logs/`
/// * `verbose` - If true, sets log level to DEBUG. Otherwise uses INFO.
///
/// `RUST_LOG` overrides both.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| DashError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("virtdash={default_level}")));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| DashError::internal(format!("logging already initialized: {e}")))?;

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Initialize minimal console-only logging for testing.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Base directory for virtdash state, `~/.virtdash/`.
pub fn virtdash_home() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| DashError::Internal {
        message: "home directory could not be determined".into(),
    })?;

    Ok(home.join(".virtdash"))
}

/// Get the default log directory path.
///
/// Returns `~/.virtdash/logs/`
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(virtdash_home()?.join("logs"))
}

/// Log a lifecycle action dispatched against a resource.
///
/// # Example
///
/// ```ignore
/// log_resource_event!("vm", "web01", "start");
/// ```
#[macro_export]
macro_rules! log_resource_event {
    ($kind:expr, $name:expr, $event:expr) => {
        tracing::info!(
            target: "virtdash::action",
            kind = $kind,
            name = $name,
            event = $event,
            "resource event"
        )
    };
}
