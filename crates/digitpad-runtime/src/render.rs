// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Visual feedback on the display

use digitpad_hal::{Color, PixelSink};
use digitpad_vision::{Bitmap, BoundingBox};

/// Draw every touched pixel in green
pub fn draw_digit<D: PixelSink>(bitmap: &Bitmap, display: &mut D) {
    for (x, y) in bitmap.set_pixels() {
        display.draw_pixel(x, y, Color::Green);
    }
}

/// Outline `bounds` in red
///
/// The top and bottom rows are drawn across the full bitmap width and the
/// left and right columns across the full height, leaving touched pixels
/// untouched.
pub fn draw_boundaries<D: PixelSink>(bitmap: &Bitmap, bounds: &BoundingBox, display: &mut D) {
    if !bounds.is_valid() {
        return;
    }

    for y in edge_pair(bounds.top, bounds.bottom) {
        for x in 0..bitmap.width() {
            if !bitmap.is_set(x, y) {
                display.draw_pixel(x, y, Color::Red);
            }
        }
    }
    for x in edge_pair(bounds.left, bounds.right) {
        for y in 0..bitmap.height() {
            if !bitmap.is_set(x, y) {
                display.draw_pixel(x, y, Color::Red);
            }
        }
    }
}

fn edge_pair(low: usize, high: usize) -> impl Iterator<Item = usize> {
    std::iter::once(low).chain((high != low).then_some(high))
}
