// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Poll-based tick scheduler
//!
//! Two periodic deadlines, one for touch sampling and a slower one for the
//! trigger check. Polling with the current time raises the matching
//! [`PendingEvents`] flag for every deadline that has passed. Periods missed
//! entirely while the loop was busy collapse into a single raise.

use tracing::trace;

use crate::events::PendingEvents;
use digitpad_config::SchedulerConfig;

#[derive(Debug, Clone)]
pub struct TickScheduler {
    touch_interval_us: u64,
    trigger_interval_us: u64,
    next_touch_us: u64,
    next_trigger_us: u64,
}

impl TickScheduler {
    /// First ticks fall one interval after time zero; zero intervals are
    /// treated as 1 µs
    pub fn new(touch_interval_us: u64, trigger_interval_us: u64) -> Self {
        let touch_interval_us = touch_interval_us.max(1);
        let trigger_interval_us = trigger_interval_us.max(1);
        Self {
            touch_interval_us,
            trigger_interval_us,
            next_touch_us: touch_interval_us,
            next_trigger_us: trigger_interval_us,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.touch_interval_us, config.trigger_interval_us)
    }

    pub fn touch_interval_us(&self) -> u64 {
        self.touch_interval_us
    }

    pub fn trigger_interval_us(&self) -> u64 {
        self.trigger_interval_us
    }

    /// Raise the flags of every elapsed deadline
    pub fn poll(&mut self, now_us: u64, events: &PendingEvents) {
        if let Some(missed) = advance(&mut self.next_touch_us, self.touch_interval_us, now_us) {
            events.raise_touch_sample();
            if missed > 0 {
                trace!(missed, "Touch ticks coalesced");
            }
        }
        if let Some(missed) = advance(&mut self.next_trigger_us, self.trigger_interval_us, now_us) {
            events.raise_trigger_check();
            if missed > 0 {
                trace!(missed, "Trigger ticks coalesced");
            }
        }
    }

    /// Time of the earliest pending deadline
    pub fn next_deadline_us(&self) -> u64 {
        self.next_touch_us.min(self.next_trigger_us)
    }

    /// Restart both periods from `now_us`
    pub fn restart(&mut self, now_us: u64) {
        self.next_touch_us = now_us.saturating_add(self.touch_interval_us);
        self.next_trigger_us = now_us.saturating_add(self.trigger_interval_us);
    }
}

/// Move `next` past `now`; `Some(skipped periods)` when at least one elapsed
fn advance(next: &mut u64, interval: u64, now: u64) -> Option<u64> {
    if now < *next {
        return None;
    }
    let elapsed = (now - *next) / interval + 1;
    *next = next.saturating_add(elapsed.saturating_mul(interval));
    Some(elapsed - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DrainedEvents;

    fn poll(scheduler: &mut TickScheduler, events: &PendingEvents, now: u64) -> DrainedEvents {
        scheduler.poll(now, events);
        events.take()
    }

    #[test]
    fn test_ticks_follow_intervals() {
        let events = PendingEvents::new();
        let mut scheduler = TickScheduler::new(5_000, 10_000);

        assert!(poll(&mut scheduler, &events, 0).is_empty());
        assert!(poll(&mut scheduler, &events, 4_999).is_empty());

        let at_5ms = poll(&mut scheduler, &events, 5_000);
        assert!(at_5ms.touch_sample && !at_5ms.trigger_check);

        let at_10ms = poll(&mut scheduler, &events, 10_000);
        assert!(at_10ms.touch_sample && at_10ms.trigger_check);

        assert!(poll(&mut scheduler, &events, 10_001).is_empty());
        assert_eq!(scheduler.next_deadline_us(), 15_000);
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let events = PendingEvents::new();
        let mut scheduler = TickScheduler::new(5_000, 10_000);

        let late = poll(&mut scheduler, &events, 27_000);
        assert!(late.touch_sample && late.trigger_check);
        assert_eq!(scheduler.next_deadline_us(), 30_000);
        assert!(poll(&mut scheduler, &events, 29_999).is_empty());
    }

    #[test]
    fn test_restart() {
        let events = PendingEvents::new();
        let mut scheduler = TickScheduler::from_config(&SchedulerConfig::default());
        scheduler.restart(1_000_000);
        assert!(poll(&mut scheduler, &events, 1_004_999).is_empty());
        assert!(poll(&mut scheduler, &events, 1_005_000).touch_sample);
    }

    #[test]
    fn test_advance() {
        let mut next = 100;
        assert_eq!(advance(&mut next, 100, 99), None);
        assert_eq!(advance(&mut next, 100, 100), Some(0));
        assert_eq!(next, 200);
        assert_eq!(advance(&mut next, 100, 450), Some(2));
        assert_eq!(next, 500);
    }
}
