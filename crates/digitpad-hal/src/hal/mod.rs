// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Display output traits.
pub mod display;
/// Timekeeping abstractions (monotonic timers, delays).
pub mod time;
/// Touch controller traits.
pub mod touch;
/// Digital trigger input.
pub mod trigger;

pub use display::{Color, PixelSink};
pub use time::TimeProvider;
pub use touch::TouchProvider;
pub use trigger::TriggerLine;

/// Panel resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    /// Pixels along x
    pub width: usize,
    /// Pixels along y
    pub height: usize,
}

impl ScreenSize {
    /// Size of a `width` × `height` panel
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// True when `(x, y)` addresses a pixel on the panel
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}
