// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Feature downsampling
//!
//! Projects the bounding box onto a [`GRID_SIZE`]² grid. Along each axis the
//! box span is cut into 16 bands of `delta = span / 16.0` pixels; band `i`
//! covers the inclusive pixel range
//!
//! ```text
//! start + floor(i * delta) ..= start + ceil((i + 1) * delta)
//! ```
//!
//! Adjacent bands share their border pixel, so a pixel sitting on a band edge
//! lights both neighbouring cells. The floor/ceil pair is what makes the
//! bands overlap and must stay exactly as written.
//!
//! A zero-span axis (single row or single column drawing) has `delta = 0`,
//! which would make every band collapse onto the same coordinate. Such an
//! axis maps all of its pixels to band 0 instead.

use tracing::trace;

use crate::bitmap::Bitmap;
use crate::bounds::BoundingBox;
use crate::error::{Result, VisionError};
use crate::features::FeatureVector;
use crate::GRID_SIZE;

/// Inclusive pixel ranges of the grid bands along one axis
#[derive(Debug, Clone, Copy)]
struct AxisBands {
    ranges: [(usize, usize); GRID_SIZE],
    active: usize,
}

impl AxisBands {
    fn new(start: usize, end: usize) -> Self {
        let span = end - start;
        let mut ranges = [(start, start); GRID_SIZE];

        if span == 0 {
            return Self { ranges, active: 1 };
        }

        let delta = span as f64 / GRID_SIZE as f64;
        for (i, range) in ranges.iter_mut().enumerate() {
            let low = (i as f64 * delta).floor() as usize;
            let high = ((i + 1) as f64 * delta).ceil() as usize;
            *range = (start + low, start + high);
        }

        Self {
            ranges,
            active: GRID_SIZE,
        }
    }

    /// Bands whose range contains `coord`
    fn bands_containing(&self, coord: usize) -> impl Iterator<Item = usize> + '_ {
        self.ranges[..self.active]
            .iter()
            .enumerate()
            .filter(move |(_, &(low, high))| low <= coord && coord <= high)
            .map(|(band, _)| band)
    }
}

/// Build the feature vector for the drawing inside `bounds`
///
/// `bounds` must be a valid box lying inside the bitmap; an inverted
/// (sentinel) box is reported as [`VisionError::EmptyDrawing`].
pub fn downsample(bitmap: &Bitmap, bounds: &BoundingBox) -> Result<FeatureVector> {
    if !bounds.is_valid() {
        return Err(VisionError::EmptyDrawing);
    }
    if bounds.right >= bitmap.width() || bounds.bottom >= bitmap.height() {
        return Err(VisionError::OutOfBounds {
            x: bounds.right,
            y: bounds.bottom,
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }

    let columns = AxisBands::new(bounds.left, bounds.right);
    let rows = AxisBands::new(bounds.top, bounds.bottom);
    if bounds.is_degenerate() {
        trace!(?bounds, "Degenerate bounding box, collapsing zero-span axis to band 0");
    }

    let mut features = FeatureVector::new();
    for y in bounds.top..=bounds.bottom {
        for x in bounds.left..=bounds.right {
            if !bitmap.is_set(x, y) {
                continue;
            }
            for col in columns.bands_containing(x) {
                for row in rows.bands_containing(y) {
                    features.set(row, col);
                }
            }
        }
    }

    Ok(features)
}
