// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bounding-box extraction
//!
//! One full pass over the bitmap, tracking the minimum and maximum touched
//! coordinate on each axis independently.

use crate::bitmap::Bitmap;
use crate::error::{Result, VisionError};

/// Inclusive rectangle in bitmap coordinates
///
/// A box produced from an empty bitmap is the scan sentinel
/// (`top = H, bottom = 0, left = W, right = 0`), which is inverted and
/// therefore not [valid](BoundingBox::is_valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl BoundingBox {
    pub fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Initial scan state for a `width` × `height` bitmap
    pub fn sentinel(width: usize, height: usize) -> Self {
        Self {
            top: height,
            bottom: 0,
            left: width,
            right: 0,
        }
    }

    /// At least one pixel was enclosed
    pub fn is_valid(&self) -> bool {
        self.top <= self.bottom && self.left <= self.right
    }

    /// `right - left`; zero for a single column
    pub fn width_span(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top`; zero for a single row
    pub fn height_span(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Valid, but zero wide or zero tall
    pub fn is_degenerate(&self) -> bool {
        self.is_valid() && (self.width_span() == 0 || self.height_span() == 0)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    fn include(&mut self, x: usize, y: usize) {
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
        self.left = self.left.min(x);
        self.right = self.right.max(x);
    }
}

/// Scan the whole bitmap; returns the sentinel when nothing is set
pub fn scan_bounds(bitmap: &Bitmap) -> BoundingBox {
    bitmap.set_pixels().fold(
        BoundingBox::sentinel(bitmap.width(), bitmap.height()),
        |mut bounds, (x, y)| {
            bounds.include(x, y);
            bounds
        },
    )
}

/// Like [`scan_bounds`], but an empty bitmap is reported as
/// [`VisionError::EmptyDrawing`] instead of an inverted box
pub fn find_bounds(bitmap: &Bitmap) -> Result<BoundingBox> {
    let bounds = scan_bounds(bitmap);
    if !bounds.is_valid() {
        return Err(VisionError::EmptyDrawing);
    }
    Ok(bounds)
}
