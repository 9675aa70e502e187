// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for weight handling and inference

use crate::weights::Layer;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A per-classification buffer could not be reserved
    #[error("Memory allocation error: {0}")]
    AllocationFailure(String),

    #[error("Weight index out of range: {layer} unit {unit}, input {input}")]
    WeightOutOfRange {
        layer: Layer,
        unit: usize,
        input: usize,
    },

    #[error("Missing weight: {layer} unit {unit}, input {input}")]
    MissingWeight {
        layer: Layer,
        unit: usize,
        input: usize,
    },

    #[error("Weight file line {line}: {message}")]
    WeightParse { line: usize, message: String },

    #[error("Dataset line {line}: {message}")]
    Dataset { line: usize, message: String },

    #[error("Unknown {what}: '{value}'")]
    UnknownVariant { what: &'static str, value: String },

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON weight file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Vision(#[from] digitpad_vision::VisionError),
}

pub type Result<T> = core::result::Result<T, InferenceError>;
