// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Touch controller readout
///
/// Coordinates are in pixels. A sample is read as `read_x` followed by
/// `read_y`, and only after `touch_available` reported new data.
pub trait TouchProvider {
    /// True when the controller has a new sample
    fn touch_available(&mut self) -> bool;

    /// X coordinate of the pending sample
    fn read_x(&mut self) -> usize;

    /// Y coordinate of the pending sample
    fn read_y(&mut self) -> usize;

    /// Read a full sample if one is pending
    ///
    /// # Returns
    /// `Some((x, y))`, or `None` when no new data is available
    fn read_point(&mut self) -> Option<(usize, usize)> {
        if !self.touch_available() {
            return None;
        }
        let x = self.read_x();
        let y = self.read_y();
        Some((x, y))
    }
}

impl<T: TouchProvider + ?Sized> TouchProvider for &mut T {
    fn touch_available(&mut self) -> bool {
        (**self).touch_available()
    }

    fn read_x(&mut self) -> usize {
        (**self).read_x()
    }

    fn read_y(&mut self) -> usize {
        (**self).read_y()
    }
}
