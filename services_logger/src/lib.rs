//! # Logger Service
//!
//! This crate installs the process-wide log subscriber.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Services emit `tracing` events with fields; this crate only decides where
//! they go and how much of them survives.
//!
//! - `RUST_LOG` wins over the configured level when set and valid
//! - Output goes to stderr so stdout stays free for results
//! - Installing twice is an error, not a silent replacement

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    #[default]
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    /// The most verbose level this setting lets through
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Colored output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            ansi: false,
        }
    }
}

/// Logger errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a global log subscriber is already installed")]
    AlreadyInitialized,
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise the configured
/// level
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    let builder = || EnvFilter::builder().with_default_directive(config.level.as_filter().into());
    builder()
        .try_from_env()
        .unwrap_or_else(|_| builder().parse_lossy(""))
}

/// Installs the global subscriber
pub fn init(config: &LogConfig) -> Result<(), LoggerError> {
    let filter = build_filter(config);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
