// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network construction from configuration

use tracing::{info, warn};

use crate::error::Result;
use digitpad_config::DigitpadConfig;
use digitpad_inference::{
    load_weights, Activation, Network, NetworkShape, WeightFormat, WeightTables, NUM_INPUT_UNITS,
};

/// Build the network described by `config`
///
/// Without a configured weight file the tables are all zero, which always
/// classifies as digit 0.
pub fn build_network(config: &DigitpadConfig) -> Result<Network> {
    let shape = NetworkShape::new(
        NUM_INPUT_UNITS,
        config.network.hidden_units,
        config.network.output_units,
    );
    let activation: Activation = config.network.activation.parse()?;

    let weights = match &config.weights.path {
        Some(path) => {
            let format: WeightFormat = config.weights.format.parse()?;
            load_weights(path, format, shape)?
        }
        None => {
            warn!("No weight file configured, using all-zero weights");
            WeightTables::zeros(shape)
        }
    };

    info!(
        hidden = shape.hidden,
        outputs = shape.outputs,
        %activation,
        "Network ready"
    );
    Ok(Network::new(weights, activation))
}
