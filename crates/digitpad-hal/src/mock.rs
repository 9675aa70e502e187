// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scripted service fakes for tests and offline replay

use std::cell::Cell;
use std::collections::VecDeque;

use crate::hal::{Color, PixelSink, TimeProvider, TouchProvider, TriggerLine};

/// Touch controller replaying queued samples
#[derive(Debug, Default)]
pub struct ScriptedTouch {
    pending: VecDeque<(usize, usize)>,
}

impl ScriptedTouch {
    /// Controller with no samples queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with `points` queued in order
    pub fn from_points(points: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            pending: points.into_iter().collect(),
        }
    }

    /// Queue one sample
    pub fn push(&mut self, x: usize, y: usize) {
        self.pending.push_back((x, y));
    }

    /// Samples not yet read
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl TouchProvider for ScriptedTouch {
    fn touch_available(&mut self) -> bool {
        !self.pending.is_empty()
    }

    fn read_x(&mut self) -> usize {
        self.pending.front().map(|&(x, _)| x).unwrap_or(0)
    }

    /// Completes the sample; the next read starts on the following one
    fn read_y(&mut self) -> usize {
        self.pending.pop_front().map(|(_, y)| y).unwrap_or(0)
    }
}

/// Trigger line replaying queued levels, then resting at an idle level
#[derive(Debug)]
pub struct ScriptedTrigger {
    levels: VecDeque<bool>,
    idle: bool,
}

impl Default for ScriptedTrigger {
    fn default() -> Self {
        Self {
            levels: VecDeque::new(),
            idle: true,
        }
    }
}

impl ScriptedTrigger {
    /// Line resting high
    pub fn new() -> Self {
        Self::default()
    }

    /// Line replaying `levels` (`true` = high) before resting high
    pub fn from_levels(levels: impl IntoIterator<Item = bool>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
            idle: true,
        }
    }

    /// Queue one level
    pub fn push(&mut self, high: bool) {
        self.levels.push_back(high);
    }

    /// Queue `samples` low readings followed by a release
    pub fn press(&mut self, samples: usize) {
        self.levels.extend(std::iter::repeat(false).take(samples));
        self.levels.push_back(true);
    }

    /// Level reported once the queue is drained
    pub fn set_idle(&mut self, high: bool) {
        self.idle = high;
    }

    /// Levels not yet read
    pub fn pending(&self) -> usize {
        self.levels.len()
    }
}

impl TriggerLine for ScriptedTrigger {
    fn read_trigger_line(&mut self) -> bool {
        self.levels.pop_front().unwrap_or(self.idle)
    }
}

/// Display recording every drawn pixel
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pixels: Vec<(usize, usize, Color)>,
}

impl RecordingDisplay {
    /// Empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels in drawing order
    pub fn pixels(&self) -> &[(usize, usize, Color)] {
        &self.pixels
    }

    /// Number of pixels drawn in `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&(_, _, c)| c == color).count()
    }

    /// True if `(x, y)` was ever drawn in `color`
    pub fn drew(&self, x: usize, y: usize, color: Color) -> bool {
        self.pixels.contains(&(x, y, color))
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.pixels.clear();
    }
}

impl PixelSink for RecordingDisplay {
    fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.pixels.push((x, y, color));
    }
}

/// Clock advanced by hand; delays advance it instead of sleeping
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<u64>,
}

impl ManualClock {
    /// Clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move forward by `us`
    pub fn advance(&self, us: u64) {
        self.now_us.set(self.now_us.get().saturating_add(us));
    }

    /// Jump to an absolute time
    pub fn set(&self, now_us: u64) {
        self.now_us.set(now_us);
    }
}

impl TimeProvider for ManualClock {
    fn get_time_us(&self) -> u64 {
        self.now_us.get()
    }

    fn delay_us(&self, us: u32) {
        self.advance(u64::from(us));
    }
}
