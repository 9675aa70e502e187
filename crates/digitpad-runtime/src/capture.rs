// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Touch sample capture

use tracing::{trace, warn};

use digitpad_hal::TouchProvider;
use digitpad_vision::Bitmap;

/// What one capture step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No new sample from the controller
    Idle,
    /// Sample recorded in the bitmap
    Marked { x: usize, y: usize },
    /// Sample outside the bitmap; dropped
    Rejected { x: usize, y: usize },
}

/// Read one pending touch sample into `bitmap`
///
/// Out-of-range samples are dropped with a warning; the bitmap is left
/// untouched.
pub fn capture_sample<T: TouchProvider>(touch: &mut T, bitmap: &mut Bitmap) -> CaptureOutcome {
    let Some((x, y)) = touch.read_point() else {
        return CaptureOutcome::Idle;
    };

    match bitmap.try_mark(x, y) {
        Ok(()) => {
            trace!(x, y, "Touch sample accepted");
            CaptureOutcome::Marked { x, y }
        }
        Err(e) => {
            warn!(x, y, error = %e, "Touch sample rejected");
            CaptureOutcome::Rejected { x, y }
        }
    }
}
