// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for digitpad binaries
//!
//! Console output goes to stderr so tool output on stdout stays clean. With
//! the `file-logging` feature and a `log_dir`, events are also written to a
//! timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── digitpad.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::options::LoggingOptions;

/// Keeps background log writers alive; logs flush when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global subscriber
///
/// Fails if the level is not a valid filter directive or a subscriber is
/// already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(options.with_target)
        .with_filter(build_filter(debug_flags, &options.level)?);

    #[cfg(feature = "file-logging")]
    {
        let (file_layer, file_guard, run_folder) = match &options.log_dir {
            Some(base_log_dir) => {
                let run_folder = create_run_folder(base_log_dir)?;
                cleanup_old_logs(base_log_dir, options.retention_days, options.retention_runs)?;

                let appender = tracing_appender::rolling::daily(&run_folder, "digitpad.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(build_filter(debug_flags, &options.level)?);
                (Some(layer), Some(guard), Some(run_folder))
            }
            None => (None, None, None),
        };

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        if let Some(dir) = &run_folder {
            tracing::info!(log_dir = %dir.display(), "File logging enabled");
        }
        Ok(LoggingGuard {
            _file_guard: file_guard,
            log_dir: run_folder,
        })
    }

    #[cfg(not(feature = "file-logging"))]
    {
        Registry::default()
            .with(console_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        if options.log_dir.is_some() {
            tracing::warn!("log_dir ignored: built without the file-logging feature");
        }
        Ok(LoggingGuard { log_dir: None })
    }
}

/// Console logging at `info`, with debug flags applied
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingOptions::default())
}

#[cfg(feature = "file-logging")]
const RUN_PREFIX: &str = "run_";
#[cfg(feature = "file-logging")]
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[cfg(feature = "file-logging")]
fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Remove run folders older than `retention_days`, then the oldest ones
/// beyond `retention_runs`
#[cfg(feature = "file-logging")]
fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    use chrono::{DateTime, NaiveDateTime, Utc};

    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(stamp) = stamp {
            runs.push((path, stamp.and_utc()));
        }
    }

    // newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));

    let days = i64::try_from(retention_days).unwrap_or(i64::MAX);
    let cutoff = chrono::Duration::try_days(days)
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    for (index, (path, stamp)) in runs.iter().enumerate() {
        if index >= retention_runs || *stamp < cutoff {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        let flags = CrateDebugFlags::default();
        assert!(build_filter(&flags, "info").is_ok());
        assert!(build_filter(&flags, "digitpad=verbose").is_err());
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn test_cleanup_keeps_newest_runs() {
        let base = tempfile::tempdir().unwrap();
        let today = chrono::Utc::now().format(RUN_TIMESTAMP_FORMAT).to_string();
        for name in [
            "run_20000101_000000".to_string(),
            format!("run_{}", today),
            "notes".to_string(),
        ] {
            std::fs::create_dir(base.path().join(name)).unwrap();
        }

        cleanup_old_logs(base.path(), 30, 10).unwrap();
        assert!(!base.path().join("run_20000101_000000").exists());
        assert!(base.path().join(format!("run_{}", today)).exists());
        assert!(base.path().join("notes").exists());

        cleanup_old_logs(base.path(), 30, 0).unwrap();
        assert!(!base.path().join(format!("run_{}", today)).exists());
    }
}
