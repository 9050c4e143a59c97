//! Structured Logging
//!
//! Bootstrap for the `tracing` ecosystem used across the workspace. The
//! pipeline emits trace/debug events (signal level updates, frame boundary
//! detections, decode outcomes); this module installs a subscriber to make
//! them visible in harnesses and simulations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use glint_link::logging::{init_logging, LogConfig, LogLevel};
//!
//! init_logging(&LogConfig {
//!     level: LogLevel::Debug,
//!     ..Default::default()
//! });
//!
//! tracing::info!("link ready");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Module filter overriding the plain level
    /// (e.g. `"glint_link=trace,glint_sim=debug"`).
    pub filter: Option<String>,
}

/// Install the global subscriber. Call once at startup; repeated calls are
/// silently ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = if let Some(ref custom) = config.filter {
        EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
    };

    let result = match config.format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty());
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact());
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    // A subscriber may already be installed; that is fine.
    let _ = result;
}
