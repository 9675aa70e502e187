// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Time and delay abstraction
pub trait TimeProvider {
    /// Get current time in microseconds since system boot
    ///
    /// # Returns
    /// Monotonic timestamp in microseconds
    fn get_time_us(&self) -> u64;

    /// Block for the specified number of microseconds
    fn delay_us(&self, us: u32);

    /// Block for the specified number of milliseconds
    fn delay_ms(&self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

impl TimeProvider for std::time::Instant {
    fn get_time_us(&self) -> u64 {
        u64::try_from(self.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    fn delay_us(&self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }
}
