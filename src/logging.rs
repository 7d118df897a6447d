//! Logging Setup
//!
//! Console diagnostics on stderr through `tracing-subscriber`, plus an
//! optional file sink. The file is truncated and stamped with a banner line
//! on every start; events are appended after it.

use chrono::{DateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Errors that can occur while installing the subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| default_directive(&config.level));
    let filter = EnvFilter::try_new(&directive).map_err(|e| LoggingError::Filter(e.to_string()))?;

    let file_layer = match &config.file {
        Some(path) => {
            let file = open_log_file(Path::new(path))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|e| LoggingError::Init(e.to_string()))
}

/// Filter directive for a bare level such as `"debug"`
pub fn default_directive(level: &str) -> String {
    format!("vantage={}", level)
}

/// Truncate (or create) the log file and write the start banner
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    writeln!(file, "{}", banner_line(Utc::now()))?;
    file.flush()?;

    Ok(file)
}

pub fn banner_line(started: DateTime<Utc>) -> String {
    format!(
        "=== vantage {} log started {} ===",
        env!("CARGO_PKG_VERSION"),
        started.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_banner_line() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let banner = banner_line(at);
        assert!(banner.starts_with("=== vantage "));
        assert!(banner.ends_with("log started 2024-05-01T09:30:00+00:00 ==="));
    }

    #[test]
    fn test_log_file_truncated_then_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("vantage.log");

        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first run event").unwrap();
        }

        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second run event").unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("=== vantage "));
        assert_eq!(lines[1], "second run event");
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "vantage=debug");
    }
}
