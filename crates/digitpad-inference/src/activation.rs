// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Layer activation functions

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Nonlinearity applied to each unit's weighted sum
///
/// The reference network ships linear (`Identity`). Weights trained with a
/// sigmoid or ReLU network must be run with the matching activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Identity,
    Sigmoid,
    Relu,
}

impl Activation {
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Activation::Identity => value,
            Activation::Sigmoid => 1.0 / (1.0 + (-value).exp()),
            Activation::Relu => value.max(0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activation {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "linear" => Ok(Activation::Identity),
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::Relu),
            other => Err(InferenceError::UnknownVariant {
                what: "activation",
                value: other.to_string(),
            }),
        }
    }
}
