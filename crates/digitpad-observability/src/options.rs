// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging options

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How [`init_logging`](crate::init_logging) sets up output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Level for targets without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Include the event target in console output
    pub with_target: bool,

    /// Base directory for log files; `None` logs to the console only
    pub log_dir: Option<PathBuf>,

    /// Delete run folders older than this many days
    pub retention_days: u64,

    /// Keep at most this many run folders
    pub retention_runs: usize,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
            log_dir: None,
            retention_days: 30,
            retention_runs: 10,
        }
    }
}

impl LoggingOptions {
    /// Console logging at `level`
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }
}
