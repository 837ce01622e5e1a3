//! # virtdash-core
//!
//! Core types, errors, and utilities for the virtdash dashboard.
//!
//! This crate provides:
//! - [`DashError`] - Error types for all virtdash operations
//! - [`logging`] - Tracing setup writing JSON lines to a log file
//! - [`config`] - YAML configuration with defaults
//! - [`types`] - Resource kinds and listed items
//! - [`status`] - Healthy classification, flag glyphs and sort order

pub mod config;
pub mod error;
pub mod logging;
pub mod status;
pub mod types;

pub use config::DashConfig;
pub use error::{DashError, Result};
pub use logging::{LogGuard, init_logging};
pub use types::{Collection, LifecycleAction, ResourceItem, ResourceKind, VmState};
