// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight tables
//!
//! Two dense matrices, one per layer. Row `i` holds the incoming weights of
//! unit `i`; its last column is the unit's bias:
//!
//! ```text
//! hidden: NUM_HIDDEN × (NUM_INPUT  + 1)
//! output: NUM_OUTPUT × (NUM_HIDDEN + 1)
//! ```
//!
//! Tables are built once (zeros, rows, or a weight file) and then handed to
//! a [`Network`](crate::Network), which only ever reads them.

use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};
use crate::{NUM_HIDDEN_UNITS, NUM_INPUT_UNITS, NUM_OUTPUT_UNITS};

/// Layer of the network a weight feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Input → hidden (index 0 in weight listings)
    Hidden,
    /// Hidden → output (index 1 in weight listings)
    Output,
}

impl Layer {
    pub fn index(self) -> usize {
        match self {
            Layer::Hidden => 0,
            Layer::Output => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Layer::Hidden),
            1 => Some(Layer::Output),
            _ => None,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Hidden => write!(f, "hidden layer"),
            Layer::Output => write!(f, "output layer"),
        }
    }
}

/// Unit counts per layer (bias units not included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkShape {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl NetworkShape {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// Number of sending units (bias included) for a layer's rows
    pub fn fan_in(&self, layer: Layer) -> usize {
        match layer {
            Layer::Hidden => self.inputs + 1,
            Layer::Output => self.hidden + 1,
        }
    }

    pub fn units(&self, layer: Layer) -> usize {
        match layer {
            Layer::Hidden => self.hidden,
            Layer::Output => self.outputs,
        }
    }
}

impl Default for NetworkShape {
    fn default() -> Self {
        Self::new(NUM_INPUT_UNITS, NUM_HIDDEN_UNITS, NUM_OUTPUT_UNITS)
    }
}

/// Hidden and output weight matrices with trailing bias columns
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTables {
    hidden: Array2<f64>,
    output: Array2<f64>,
}

impl WeightTables {
    /// All-zero tables of the given shape
    pub fn zeros(shape: NetworkShape) -> Self {
        Self {
            hidden: Array2::zeros((shape.hidden, shape.fan_in(Layer::Hidden))),
            output: Array2::zeros((shape.outputs, shape.fan_in(Layer::Output))),
        }
    }

    /// Wrap existing matrices, checking that the output layer's fan-in
    /// matches the hidden layer's width
    pub fn from_arrays(hidden: Array2<f64>, output: Array2<f64>) -> Result<Self> {
        if hidden.nrows() == 0 || hidden.ncols() < 2 {
            return Err(InferenceError::ShapeMismatch {
                what: "hidden layer columns",
                expected: 2,
                actual: hidden.ncols(),
            });
        }
        if output.nrows() == 0 {
            return Err(InferenceError::ShapeMismatch {
                what: "output layer units",
                expected: 1,
                actual: 0,
            });
        }
        if output.ncols() != hidden.nrows() + 1 {
            return Err(InferenceError::ShapeMismatch {
                what: "output layer columns",
                expected: hidden.nrows() + 1,
                actual: output.ncols(),
            });
        }
        Ok(Self { hidden, output })
    }

    /// Build from nested rows; every row of a layer must have the same length
    pub fn from_rows(hidden: &[Vec<f64>], output: &[Vec<f64>]) -> Result<Self> {
        Self::from_arrays(
            rows_to_array(hidden, "hidden layer row")?,
            rows_to_array(output, "output layer row")?,
        )
    }

    pub fn shape(&self) -> NetworkShape {
        NetworkShape {
            inputs: self.hidden.ncols() - 1,
            hidden: self.hidden.nrows(),
            outputs: self.output.nrows(),
        }
    }

    pub fn table(&self, layer: Layer) -> &Array2<f64> {
        match layer {
            Layer::Hidden => &self.hidden,
            Layer::Output => &self.output,
        }
    }

    pub fn hidden(&self) -> &Array2<f64> {
        &self.hidden
    }

    pub fn output(&self) -> &Array2<f64> {
        &self.output
    }

    /// Weight from sending unit `input` into `unit`; `input == fan_in - 1`
    /// addresses the bias
    pub fn weight(&self, layer: Layer, unit: usize, input: usize) -> Option<f64> {
        self.table(layer).get((unit, input)).copied()
    }

    pub fn bias(&self, layer: Layer, unit: usize) -> Option<f64> {
        let table = self.table(layer);
        table.get((unit, table.ncols() - 1)).copied()
    }

    pub fn set_weight(&mut self, layer: Layer, unit: usize, input: usize, value: f64) -> Result<()> {
        let table = match layer {
            Layer::Hidden => &mut self.hidden,
            Layer::Output => &mut self.output,
        };
        let cell = table
            .get_mut((unit, input))
            .ok_or(InferenceError::WeightOutOfRange { layer, unit, input })?;
        *cell = value;
        Ok(())
    }

    pub fn set_bias(&mut self, layer: Layer, unit: usize, value: f64) -> Result<()> {
        let bias_column = self.table(layer).ncols() - 1;
        self.set_weight(layer, unit, bias_column, value)
    }

    /// Rows of a layer as nested vectors
    pub fn to_rows(&self, layer: Layer) -> Vec<Vec<f64>> {
        self.table(layer).rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

fn rows_to_array(rows: &[Vec<f64>], what: &'static str) -> Result<Array2<f64>> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if let Some(bad) = rows.iter().find(|row| row.len() != width) {
        return Err(InferenceError::ShapeMismatch {
            what,
            expected: width,
            actual: bad.len(),
        });
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat).map_err(|_| InferenceError::ShapeMismatch {
        what,
        expected: rows.len() * width,
        actual: rows.iter().map(Vec::len).sum(),
    })
}
