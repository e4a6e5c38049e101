//! Logging Infrastructure
//!
//! Structured logging setup for development and production. Console output
//! honors `RUST_LOG`; file output rotates daily under the configured log
//! directory with the `order-server` prefix.

use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Log file prefix, rotated files look like `order-server.2025-06-01`
const LOG_FILE_PREFIX: &str = "order-server";

/// How long rotated log files are kept
const LOG_RETENTION_DAYS: i64 = 14;

/// Initialize the logging system (console only)
///
/// Convenience function for console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize logging with optional JSON format and file output
///
/// `RUST_LOG` overrides `level` when set. When `log_dir` is given the
/// output goes to a daily-rotated file instead of stdout.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            if json_format {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(file_appender)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .init();
            }
        }
        None => {
            if json_format {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .init();
            } else {
                tracing_subscriber::fmt().with_env_filter(env_filter).init();
            }
        }
    }

    Ok(())
}

/// Remove rotated log files older than the retention window
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, NaiveDate, TimeZone};

    if !log_dir.exists() {
        return Ok(());
    }

    let cutoff = Local::now() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let prefix = format!("{LOG_FILE_PREFIX}.");

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name.strip_prefix(&prefix) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            continue;
        };
        let Some(file_day) = date
            .and_hms_opt(0, 0, 0)
            .and_then(|dt| Local.from_local_datetime(&dt).single())
        else {
            continue;
        };
        if file_day < cutoff {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}
