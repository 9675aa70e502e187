// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # digitpad inference
//!
//! Feed-forward classification of 16×16 feature vectors:
//! - **Weights**: hidden and output weight tables, trailing bias column per row
//! - **Network**: forward pass and argmax classification
//! - **Activation**: optional layer nonlinearity (identity by default)
//! - **Format**: MCU text listings, JSON and fixed-point weight files
//! - **Dataset**: Semeion handwritten digit files and accuracy evaluation
//!
//! ```
//! use digitpad_inference::{Activation, Layer, Network, NetworkShape, WeightTables};
//! use digitpad_vision::FeatureVector;
//!
//! let mut weights = WeightTables::zeros(NetworkShape::default());
//! weights.set_bias(Layer::Output, 3, 1.0)?;
//! let network = Network::new(weights, Activation::Identity);
//!
//! let mut features = FeatureVector::new();
//! features.set(4, 4);
//! assert_eq!(network.classify(&features)?, 3);
//! # Ok::<(), digitpad_inference::InferenceError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activation;
pub mod dataset;
pub mod error;
pub mod format;
pub mod network;
pub mod weights;

pub use activation::Activation;
pub use dataset::{evaluate, load_semeion, parse_semeion, DigitTally, Evaluation, Sample};
pub use error::{InferenceError, Result};
pub use format::{load_weights, save_weights, WeightFormat};
pub use network::{argmax, Classification, Network};
pub use weights::{Layer, NetworkShape, WeightTables};

/// Input units: one per feature grid cell
pub const NUM_INPUT_UNITS: usize = digitpad_vision::FEATURE_COUNT;

/// Hidden units in the reference network
pub const NUM_HIDDEN_UNITS: usize = 10;

/// Output units, one per digit
pub const NUM_OUTPUT_UNITS: usize = 10;
