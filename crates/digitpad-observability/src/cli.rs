// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Supports flags like `--debug-digitpad-runtime` and `--debug-all`, plus the
//! `DIGITPAD_DEBUG` environment variable.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable holding `all` or a comma-separated crate list
pub const DEBUG_ENV_VAR: &str = "DIGITPAD_DEBUG";

/// Crates with debug logging switched on
///
/// # Example
/// ```rust
/// use digitpad_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(["--debug-digitpad-runtime".to_string()]);
/// assert!(flags.is_enabled("digitpad-runtime"));
/// assert_eq!(flags.to_filter_string("info"), "digitpad_runtime=debug,info");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate}` and `--debug-all` out of command-line arguments
    ///
    /// Other arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = Self::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Add the crates named by a `DIGITPAD_DEBUG` value
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.replace('_', "-"));
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(&crate_name.replace('_', "-"))
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` for enabled crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directive string
    ///
    /// Crate names become tracing targets (`digitpad-runtime` →
    /// `digitpad_runtime`); `base_level` applies to everything else.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        self.enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .chain(std::iter::once(base_level.to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Debug flags for the named crates plus `DIGITPAD_DEBUG`
///
/// `crate_names` usually comes from a repeated `--debug <crate>` option; the
/// name `all` enables every known crate.
pub fn parse_debug_flags<I, S>(crate_names: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = CrateDebugFlags::from_args(
        crate_names
            .into_iter()
            .map(|name| format!("--debug-{}", name.as_ref())),
    );
    if let Ok(value) = env::var(DEBUG_ENV_VAR) {
        flags.merge_env_value(&value);
    }
    flags
}

/// Help text describing the debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug all                    Enable debug logging for all crates
  --debug {{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {var}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {var}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        var = DEBUG_ENV_VAR,
    )
}
