// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Active-low digital input that requests a classification
pub trait TriggerLine {
    /// Sample the line; `true` is high (released)
    fn read_trigger_line(&mut self) -> bool;
}

impl<T: TriggerLine + ?Sized> TriggerLine for &mut T {
    fn read_trigger_line(&mut self) -> bool {
        (**self).read_trigger_line()
    }
}
