// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # digitpad HAL
//!
//! Services the classifier core consumes from the board:
//! - **Touch** (`TouchProvider`) - resistive/capacitive controller readout
//! - **Trigger** (`TriggerLine`) - the "classify now" input line
//! - **Display** (`PixelSink`) - per-pixel drawing for visual feedback
//! - **Time** (`TimeProvider`) - monotonic microsecond clock
//!
//! Panels mounted upside down report coordinates from the opposite corner;
//! [`MirroredTouch`] and [`MirroredDisplay`] map between panel and core
//! coordinates (origin top-left).
//!
//! ## Feature Flags
//!
//! - `mock` - scripted fakes for tests and offline replay (`mock` module)

/// Hardware abstraction traits.
pub mod hal;

/// Coordinate mirroring adapters.
pub mod mirror;

/// Scripted service fakes.
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use hal::{Color, PixelSink, ScreenSize, TimeProvider, TouchProvider, TriggerLine};
pub use mirror::{mirror_axis, MirroredDisplay, MirroredTouch};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
