// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for bitmap and feature operations

/// Errors raised while turning a drawing into features
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisionError {
    /// No pixel is set, so there is no bounding box to work from
    #[error("Nothing to classify: the bitmap has no touched pixels")]
    EmptyDrawing,

    #[error("Out of bounds: ({x}, {y}) is outside the {width}x{height} bitmap")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Length mismatch: expected {expected} cells, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, VisionError>;
