// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bitmap store
//!
//! Fixed-resolution boolean surface that records every screen coordinate the
//! touch service has reported since the last [`Bitmap::reset`]. Cells are kept
//! row-major (`[[y, x]]`) so a full scan walks memory in order.

use ndarray::Array2;

use crate::error::{Result, VisionError};

/// Boolean W×H surface of touched pixels, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    cells: Array2<bool>,
}

impl Bitmap {
    /// Allocate a cleared bitmap of `width` × `height` pixels
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Record a touch at (x, y)
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`. Coordinates coming from the
    /// touch service are expected to be clamped already; use
    /// [`Bitmap::try_mark`] when they are not.
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) {
        self.cells[[y, x]] = true;
    }

    /// Record a touch at (x, y), rejecting out-of-range coordinates
    pub fn try_mark(&mut self, x: usize, y: usize) -> Result<()> {
        self.check(x, y)?;
        self.cells[[y, x]] = true;
        Ok(())
    }

    /// Whether (x, y) has been touched since the last reset
    ///
    /// # Panics
    /// Panics if the coordinate is outside the bitmap.
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.cells[[y, x]]
    }

    /// Checked variant of [`Bitmap::is_set`]
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.cells.get((y, x)).copied()
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&cell| cell)
    }

    /// Number of touched pixels
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Touched pixels as `(x, y)`, scanned row by row
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, &cell)| cell)
            .map(|((y, x), _)| (x, y))
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(VisionError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bitmap_is_empty() {
        let bitmap = Bitmap::new(240, 320);
        assert_eq!(bitmap.width(), 240);
        assert_eq!(bitmap.height(), 320);
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.count_set(), 0);
    }

    #[test]
    fn test_mark_sets_only_that_cell() {
        let mut bitmap = Bitmap::new(24, 32);
        bitmap.mark(5, 17);

        for y in 0..32 {
            for x in 0..24 {
                assert_eq!(bitmap.is_set(x, y), x == 5 && y == 17, "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_mark_every_corner() {
        let mut bitmap = Bitmap::new(240, 320);
        for &(x, y) in &[(0, 0), (239, 0), (0, 319), (239, 319)] {
            bitmap.mark(x, y);
            assert!(bitmap.is_set(x, y));
        }
        assert_eq!(bitmap.count_set(), 4);
    }

    #[test]
    fn test_marking_twice_is_idempotent() {
        let mut bitmap = Bitmap::new(10, 10);
        bitmap.mark(3, 3);
        bitmap.mark(3, 3);
        assert_eq!(bitmap.count_set(), 1);
    }

    #[test]
    fn test_try_mark_rejects_out_of_range() {
        let mut bitmap = Bitmap::new(240, 320);
        let err = bitmap.try_mark(240, 10).unwrap_err();
        assert_eq!(
            err,
            VisionError::OutOfBounds {
                x: 240,
                y: 10,
                width: 240,
                height: 320
            }
        );
        assert!(bitmap.try_mark(10, 320).is_err());
        assert!(bitmap.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_mark_out_of_range_panics() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.mark(4, 0);
    }

    #[test]
    fn test_get_is_checked() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.mark(1, 2);
        assert_eq!(bitmap.get(1, 2), Some(true));
        assert_eq!(bitmap.get(2, 1), Some(false));
        assert_eq!(bitmap.get(4, 0), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut bitmap = Bitmap::new(16, 16);
        bitmap.mark(0, 0);
        bitmap.mark(15, 15);
        bitmap.reset();
        assert!(bitmap.is_empty());
    }

    #[test]
    fn test_set_pixels_reports_xy() {
        let mut bitmap = Bitmap::new(8, 8);
        bitmap.mark(6, 1);
        bitmap.mark(2, 5);
        let pixels: Vec<_> = bitmap.set_pixels().collect();
        assert_eq!(pixels, vec![(6, 1), (2, 5)]);
    }
}
