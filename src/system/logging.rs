//! Logging system initialization
//!
//! Sets up tracing according to the `[logging]` section: console or file
//! output, optional daily rotation, text or JSON lines.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, StaticConfig};

const DEFAULT_LOG_FILE_NAME: &str = "url-shortcuts.log";

/// Initialize logging system based on configuration
///
/// `RUST_LOG`, when set, takes precedence over `logging.level`.
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so buffered lines are flushed. Call once; a second global
/// subscriber fails to install.
pub fn init_logging(config: &StaticConfig) -> Result<WorkerGuard> {
    let writer = build_writer(&config.logging)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(writes_to_console(&config.logging));

    let installed = if config.logging.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn writes_to_console(logging: &LoggingConfig) -> bool {
    logging.file.as_ref().is_none_or(|f| f.is_empty())
}

fn build_writer(logging: &LoggingConfig) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let log_file = match logging.file.as_deref() {
        Some(f) if !f.is_empty() => f,
        _ => return Ok(Box::new(std::io::stdout())),
    };

    if logging.enable_rotation {
        let path = std::path::Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(std::path::Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(logging.max_backups as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_console_detection() {
        let mut logging = LoggingConfig::default();
        assert!(writes_to_console(&logging));

        logging.file = Some(String::new());
        assert!(writes_to_console(&logging));

        logging.file = Some("logs/app.log".to_string());
        assert!(!writes_to_console(&logging));
    }

    #[test]
    fn test_plain_file_writer_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plain.log");
        let logging = LoggingConfig {
            file: Some(path.to_str().unwrap().to_string()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = build_writer(&logging).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert!(std::fs::read_to_string(&path).unwrap().contains("hello"));
    }
}
