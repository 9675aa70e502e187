// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Errors of a single classification attempt
//!
//! None of these stop the capture loop; the attempt is skipped and the
//! user simply draws again.

use digitpad_config::ConfigError;
use digitpad_inference::InferenceError;
use digitpad_vision::VisionError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Nothing to classify: no touched pixels")]
    EmptyDrawing,

    #[error("Memory allocation error: {0}")]
    AllocationFailure(String),

    #[error("Feature extraction failed: {0}")]
    Vision(VisionError),

    #[error("Inference failed: {0}")]
    Inference(InferenceError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    pub fn is_empty_drawing(&self) -> bool {
        matches!(self, PipelineError::EmptyDrawing)
    }
}

impl From<VisionError> for PipelineError {
    fn from(err: VisionError) -> Self {
        match err {
            VisionError::EmptyDrawing => PipelineError::EmptyDrawing,
            other => PipelineError::Vision(other),
        }
    }
}

impl From<InferenceError> for PipelineError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::AllocationFailure(msg) => PipelineError::AllocationFailure(msg),
            InferenceError::Vision(vision) => vision.into(),
            other => PipelineError::Inference(other),
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Configuration(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, PipelineError>;
