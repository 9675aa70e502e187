// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Adapters for panels whose origin sits in the bottom-right corner
//!
//! Touch controllers on these boards report `extent - v`; the mirrored value
//! is clamped to `extent - 1` so a raw `0` still lands on the panel. The
//! display side applies the same [`mirror_axis`] mapping, so a mirrored touch
//! sample is echoed at the raw panel position it came from.

use tracing::trace;

use crate::hal::{Color, PixelSink, ScreenSize, TouchProvider};

/// Mirror one raw controller coordinate into `[0, extent)`
///
/// `extent` must be nonzero.
pub fn mirror_axis(raw: usize, extent: usize) -> usize {
    extent.saturating_sub(raw).min(extent.saturating_sub(1))
}

/// Touch provider reporting mirrored coordinates
#[derive(Debug)]
pub struct MirroredTouch<T> {
    inner: T,
    size: ScreenSize,
}

impl<T: TouchProvider> MirroredTouch<T> {
    /// Wrap `inner`, mirroring against a panel of `size`
    pub fn new(inner: T, size: ScreenSize) -> Self {
        Self { inner, size }
    }

    /// Wrapped provider
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Wrapped provider, mutably
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the adapter
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: TouchProvider> TouchProvider for MirroredTouch<T> {
    fn touch_available(&mut self) -> bool {
        self.inner.touch_available()
    }

    fn read_x(&mut self) -> usize {
        let raw = self.inner.read_x();
        let x = mirror_axis(raw, self.size.width);
        trace!(raw, x, "Mirrored touch x");
        x
    }

    fn read_y(&mut self) -> usize {
        let raw = self.inner.read_y();
        let y = mirror_axis(raw, self.size.height);
        trace!(raw, y, "Mirrored touch y");
        y
    }
}

/// Pixel sink drawing at mirrored panel coordinates
#[derive(Debug)]
pub struct MirroredDisplay<D> {
    inner: D,
    size: ScreenSize,
}

impl<D: PixelSink> MirroredDisplay<D> {
    /// Wrap `inner`, mirroring against a panel of `size`
    pub fn new(inner: D, size: ScreenSize) -> Self {
        Self { inner, size }
    }

    /// Wrapped sink
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwrap the adapter
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: PixelSink> PixelSink for MirroredDisplay<D> {
    fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        if !self.size.contains(x, y) {
            return;
        }
        self.inner.draw_pixel(
            mirror_axis(x, self.size.width),
            mirror_axis(y, self.size.height),
            color,
        );
    }
}
