// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Colors used for drawing feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Background
    Black,
    /// Captured strokes
    Green,
    /// Bounding box outline
    Red,
    /// Foreground text
    White,
}

impl Color {
    /// RGB565 value as sent to 16-bit panels
    pub fn rgb565(self) -> u16 {
        match self {
            Color::Black => 0x0000,
            Color::Green => 0x07e0,
            Color::Red => 0xf800,
            Color::White => 0xffff,
        }
    }
}

/// Per-pixel display output
///
/// Drawing is feedback only; implementations ignore pixels they cannot show.
pub trait PixelSink {
    /// Paint one pixel
    fn draw_pixel(&mut self, x: usize, y: usize, color: Color);
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        (**self).draw_pixel(x, y, color)
    }
}
