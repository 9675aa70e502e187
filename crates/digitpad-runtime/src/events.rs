// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pending-work flags
//!
//! Timers (or a [`TickScheduler`](crate::TickScheduler) poll) raise flags;
//! the capture loop drains both at once at the top of each iteration. A
//! flag raised several times before it is drained is serviced once.
//! Raising is lock-free, so the flags can be shared with a timer thread
//! through an `Arc`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Flags taken by one [`PendingEvents::take`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainedEvents {
    pub touch_sample: bool,
    pub trigger_check: bool,
}

impl DrainedEvents {
    pub fn is_empty(&self) -> bool {
        !self.touch_sample && !self.trigger_check
    }
}

#[derive(Debug, Default)]
pub struct PendingEvents {
    touch_sample: AtomicBool,
    trigger_check: AtomicBool,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touch tick elapsed: read the touch controller
    pub fn raise_touch_sample(&self) {
        self.touch_sample.store(true, Ordering::Release);
    }

    /// Trigger tick elapsed: sample the trigger line
    pub fn raise_trigger_check(&self) {
        self.trigger_check.store(true, Ordering::Release);
    }

    /// Clear both flags, returning what was pending
    pub fn take(&self) -> DrainedEvents {
        DrainedEvents {
            touch_sample: self.touch_sample.swap(false, Ordering::AcqRel),
            trigger_check: self.trigger_check.swap(false, Ordering::AcqRel),
        }
    }

    pub fn peek(&self) -> DrainedEvents {
        DrainedEvents {
            touch_sample: self.touch_sample.load(Ordering::Acquire),
            trigger_check: self.trigger_check.load(Ordering::Acquire),
        }
    }
}
