//! Error types for virtdash operations.
//!
//! Failures split into two camps: anything that happens before the
//! dashboard is drawn is fatal and reported on stderr, anything after is
//! logged and absorbed by the main loop.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ResourceKind;

/// Result type alias using [`DashError`].
pub type Result<T> = std::result::Result<T, DashError>;

/// Error type for all virtdash operations.
#[derive(Debug, Error)]
pub enum DashError {
    // =========================================================================
    // Data Source Errors
    // =========================================================================
    /// The hypervisor connection or management tool is unreachable
    #[error("Data source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// A start/stop action was rejected
    #[error("Failed to {action} {kind} {name}: {message}")]
    ActionFailed {
        action: String,
        kind: ResourceKind,
        name: String,
        message: String,
    },

    /// Tool output could not be understood
    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // TUI Errors
    // =========================================================================
    /// Terminal initialization failed
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    /// Internal error (bug in virtdash)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DashError {
    /// Create a SourceUnavailable error
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Create an ActionFailed error
    pub fn action_failed(
        action: impl Into<String>,
        kind: ResourceKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ActionFailed {
            action: action.into(),
            kind,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the error comes from listing resources.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::Parse { .. })
    }

    /// Returns actionable guidance for the user
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::SourceUnavailable { .. } => {
                Some("Check that libvirtd is running and that the connection URI is correct")
            }
            Self::ConfigInvalid { .. } => Some("Check YAML syntax in ~/.virtdash/config.yaml"),
            Self::ConfigValidation { .. } => {
                Some("poll_interval_ms must be between 100 and 60000 and virsh_binary must be set")
            }
            Self::TerminalInit { .. } => Some("Try running in a different terminal"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_error() {
        let err = DashError::source_unavailable("virsh: command not found");
        assert!(err.to_string().contains("virsh: command not found"));
        assert!(err.is_source_error());
        assert!(err.guidance().is_some());
    }

    #[test]
    fn test_action_failed_message() {
        let err = DashError::action_failed("start", ResourceKind::Vm, "web01", "domain is already active");
        assert_eq!(
            err.to_string(),
            "Failed to start vm web01: domain is already active"
        );
        assert!(!err.is_source_error());
        assert!(err.guidance().is_none());
    }

    #[test]
    fn test_error_classification() {
        assert!(DashError::parse("net-list", "short row").is_source_error());
        assert!(!DashError::internal("bug").is_source_error());
        assert!(
            DashError::ConfigValidation {
                message: "bad".into()
            }
            .guidance()
            .is_some()
        );
    }
}
