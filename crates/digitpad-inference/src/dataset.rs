// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Semeion handwritten digit data and accuracy evaluation
//!
//! A Semeion line holds 256 pixel values (a 16×16 row-major grid) followed
//! by a 10-column one-hot label, whitespace separated.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{InferenceError, Result};
use crate::network::Network;
use crate::{NUM_INPUT_UNITS, NUM_OUTPUT_UNITS};
use digitpad_vision::FeatureVector;

/// One labelled feature vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub features: FeatureVector,
    pub label: usize,
}

/// Parse Semeion text; blank lines are skipped
pub fn parse_semeion(text: &str) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let values = raw
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| InferenceError::Dataset {
                    line,
                    message: format!("invalid value '{}'", field),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if values.is_empty() {
            continue;
        }
        if values.len() < NUM_INPUT_UNITS + NUM_OUTPUT_UNITS {
            return Err(InferenceError::Dataset {
                line,
                message: format!(
                    "expected {} values, found {}",
                    NUM_INPUT_UNITS + NUM_OUTPUT_UNITS,
                    values.len()
                ),
            });
        }

        let (pixels, labels) = values.split_at(NUM_INPUT_UNITS);
        let cells: Vec<bool> = pixels.iter().map(|&v| v > 0.5).collect();
        let features = FeatureVector::from_cells(&cells)?;
        // Column 0 doubles as the fallback when no other column is hot
        let label = (1..NUM_OUTPUT_UNITS).find(|&digit| labels[digit] > 0.5).unwrap_or(0);

        samples.push(Sample { features, label });
    }
    Ok(samples)
}

/// Read and parse a Semeion data file
pub fn load_semeion(path: &Path) -> Result<Vec<Sample>> {
    let samples = parse_semeion(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), samples = samples.len(), "Loaded dataset");
    Ok(samples)
}

/// Hits and attempts for one digit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitTally {
    pub correct: usize,
    pub total: usize,
}

impl DigitTally {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Classification accuracy over a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub per_digit: [DigitTally; NUM_OUTPUT_UNITS],
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Classify every sample and tally the results per labelled digit
///
/// Labels outside the tally range still count toward the overall totals.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Result<Evaluation> {
    let mut evaluation = Evaluation::default();
    for sample in samples {
        let predicted = network.classify(&sample.features)?;
        let hit = predicted == sample.label;

        evaluation.total += 1;
        if hit {
            evaluation.correct += 1;
        }
        if let Some(tally) = evaluation.per_digit.get_mut(sample.label) {
            tally.total += 1;
            if hit {
                tally.correct += 1;
            }
        }
    }

    debug!(
        total = evaluation.total,
        correct = evaluation.correct,
        "Evaluation complete"
    );
    Ok(evaluation)
}
