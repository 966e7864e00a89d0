//! Log file and stderr setup shared by the binaries.
//!
//! Files roll daily under `~/.plugscope/logs` (or `$PLUGSCOPE_LOG_DIR`), one
//! prefix per component: `resolve.log.2024-01-21`. `RUST_LOG` filters
//! everything; stderr additionally has its own level.

use crate::error::{PlugscopeError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_DIR_ENV: &str = "PLUGSCOPE_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub component: String,
    pub dir: PathBuf,
    /// `None` keeps stderr quiet.
    pub stderr: Option<LevelFilter>,
}

impl LogSettings {
    pub fn for_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            dir: log_dir(),
            stderr: Some(LevelFilter::WARN),
        }
    }

    pub fn with_stderr(mut self, level: Option<LevelFilter>) -> Self {
        self.stderr = level;
        self
    }
}

pub fn log_dir() -> PathBuf {
    log_dir_from(std::env::var_os(LOG_DIR_ENV), dirs::home_dir())
}

fn log_dir_from(override_dir: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match override_dir.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".plugscope/logs"),
    }
}

/// Installs the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&settings.dir)?;

    let file_appender = tracing_appender::rolling::daily(&settings.dir, &settings.component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = settings.stderr.map(|level| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(level)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| PlugscopeError::Logging(e.to_string()))?;

    Ok(guard)
}
