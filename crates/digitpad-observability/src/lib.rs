// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # digitpad-observability
//!
//! Logging setup shared by the digitpad binaries. Library crates only emit
//! `tracing` events; this crate installs the subscriber.
//!
//! ## Features
//! - `file-logging`: rolling log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;
pub mod options;

pub use cli::*;
pub use init::*;
pub use options::*;

/// Crates that accept a `--debug-<crate>` flag
pub const KNOWN_CRATES: &[&str] = &[
    "digitpad",
    "digitpad-config",
    "digitpad-vision",
    "digitpad-inference",
    "digitpad-hal",
    "digitpad-runtime",
];
