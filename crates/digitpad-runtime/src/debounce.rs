// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Trigger debouncing
//!
//! The trigger line is active low and sampled once per trigger tick. Two
//! consecutive low samples confirm a press; the debouncer fires on the
//! second one only, so holding the line low produces a single pulse.
//!
//! ```text
//!              low            low             low
//! SteadyHigh ──────▶ FirstLow ──────▶ SecondLow ──────▶ ConfirmedLow ─┐
//!     ▲                 │ high           │ high           │ high   ▲  │ low
//!     └─────────────────┴────────────────┴────────────────┘        └──┘
//! ```

use tracing::{debug, trace};

/// Debouncer state after the most recent sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DebounceState {
    /// Line released
    #[default]
    SteadyHigh,
    /// One low sample seen
    FirstLow,
    /// Two consecutive low samples; the press is confirmed this tick
    SecondLow,
    /// Press already reported, line still held low
    ConfirmedLow,
}

impl DebounceState {
    /// State after sampling the line at `high`
    pub fn next(self, high: bool) -> Self {
        if high {
            return DebounceState::SteadyHigh;
        }
        match self {
            DebounceState::SteadyHigh => DebounceState::FirstLow,
            DebounceState::FirstLow => DebounceState::SecondLow,
            DebounceState::SecondLow | DebounceState::ConfirmedLow => DebounceState::ConfirmedLow,
        }
    }
}

/// Four-state trigger debouncer
#[derive(Debug, Clone, Default)]
pub struct TriggerDebouncer {
    state: DebounceState,
}

impl TriggerDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Feed one sample; returns `true` on the tick the press is confirmed
    pub fn sample(&mut self, high: bool) -> bool {
        let previous = self.state;
        self.state = previous.next(high);
        if previous != self.state {
            trace!(from = ?previous, to = ?self.state, "Trigger debounce transition");
        }

        let fired = self.state == DebounceState::SecondLow;
        if fired {
            debug!("Trigger fired");
        }
        fired
    }

    pub fn reset(&mut self) {
        self.state = DebounceState::SteadyHigh;
    }
}
