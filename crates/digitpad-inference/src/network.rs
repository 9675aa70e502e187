// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Forward pass
//!
//! Two dense layers. For each receiving unit `i` of a layer with `n`
//! sending units:
//!
//! ```text
//! sum[i] = Σ_j input[j] * w[i][j] + w[i][n]
//! ```
//!
//! Sums accumulate in `f64`. With [`Activation::Identity`] (the reference
//! behaviour) no nonlinearity is applied between or after the layers.

use ndarray::{s, ArrayView1};
use tracing::{debug, trace};

use crate::activation::Activation;
use crate::error::{InferenceError, Result};
use crate::weights::{Layer, NetworkShape, WeightTables};
use digitpad_vision::FeatureVector;

/// Everything produced by one forward pass
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Index of the winning output unit
    pub digit: usize,
    /// Hidden layer values after activation
    pub hidden: Vec<f64>,
    /// Output layer values after activation
    pub scores: Vec<f64>,
}

/// Immutable network: weight tables plus the activation applied per layer
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    weights: WeightTables,
    activation: Activation,
}

impl Network {
    pub fn new(weights: WeightTables, activation: Activation) -> Self {
        Self {
            weights,
            activation,
        }
    }

    pub fn shape(&self) -> NetworkShape {
        self.weights.shape()
    }

    pub fn weights(&self) -> &WeightTables {
        &self.weights
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Run both layers over raw input values
    pub fn forward(&self, inputs: &[f64]) -> Result<Classification> {
        let shape = self.shape();
        if inputs.len() != shape.inputs {
            return Err(InferenceError::ShapeMismatch {
                what: "network inputs",
                expected: shape.inputs,
                actual: inputs.len(),
            });
        }

        let hidden = self.layer(Layer::Hidden, ArrayView1::from(inputs))?;
        let scores = self.layer(Layer::Output, ArrayView1::from(hidden.as_slice()))?;
        let digit = argmax(&scores).ok_or(InferenceError::ShapeMismatch {
            what: "output units",
            expected: 1,
            actual: 0,
        })?;

        trace!(digit, ?scores, "Forward pass complete");
        Ok(Classification {
            digit,
            hidden,
            scores,
        })
    }

    /// Forward pass over a feature vector
    pub fn evaluate(&self, features: &FeatureVector) -> Result<Classification> {
        self.forward(&features.to_inputs())
    }

    /// Winning digit for a feature vector
    pub fn classify(&self, features: &FeatureVector) -> Result<usize> {
        let classification = self.evaluate(features)?;
        debug!(digit = classification.digit, "Classified feature vector");
        Ok(classification.digit)
    }

    fn layer(&self, layer: Layer, inputs: ArrayView1<'_, f64>) -> Result<Vec<f64>> {
        let table = self.weights.table(layer);
        let fan_in = inputs.len();

        let mut sums = Vec::new();
        sums.try_reserve_exact(table.nrows()).map_err(|e| {
            InferenceError::AllocationFailure(format!("{} buffer of {} units: {}", layer, table.nrows(), e))
        })?;

        for row in table.rows() {
            let sum = row.slice(s![..fan_in]).dot(&inputs) + row[fan_in];
            sums.push(self.activation.apply(sum));
        }
        Ok(sums)
    }
}

/// Index of the largest score; ties go to the lowest index
///
/// Returns `None` for an empty slice. A unit only takes over with a strictly
/// greater score, so a NaN never replaces the current best and a leading NaN
/// keeps index 0.
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best = (0, *first);
    for (i, &score) in rest.iter().enumerate() {
        if score > best.1 {
            best = (i + 1, score);
        }
    }
    Some(best.0)
}
