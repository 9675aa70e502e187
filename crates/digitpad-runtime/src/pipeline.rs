// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Classification pipeline: bounding box → downsampling → inference

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use digitpad_inference::Network;
use digitpad_vision::{downsample, scan_bounds, Bitmap, BoundingBox, FeatureVector};

/// Result of one successful classification
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub digit: usize,
    pub bounds: BoundingBox,
    pub features: FeatureVector,
    pub scores: Vec<f64>,
}

/// Classify the drawing currently held in `bitmap`
///
/// An empty bitmap yields [`PipelineError::EmptyDrawing`]. The bitmap is
/// only read.
pub fn classify_drawing(bitmap: &Bitmap, network: &Network) -> Result<PipelineOutput> {
    let bounds = scan_bounds(bitmap);
    if !bounds.is_valid() {
        return Err(PipelineError::EmptyDrawing);
    }
    if bounds.is_degenerate() {
        debug!(?bounds, "Drawing is a single row or column");
    }

    let features = downsample(bitmap, &bounds)?;
    let classification = network.evaluate(&features)?;

    info!(
        digit = classification.digit,
        top = bounds.top,
        bottom = bounds.bottom,
        left = bounds.left,
        right = bounds.right,
        cells = features.count_set(),
        "Classified drawing"
    );

    Ok(PipelineOutput {
        digit: classification.digit,
        bounds,
        features,
        scores: classification.scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitpad_inference::{Activation, Layer, NetworkShape, WeightTables};

    fn bias_network(digit: usize) -> Network {
        let mut weights = WeightTables::zeros(NetworkShape::default());
        weights.set_bias(Layer::Output, digit, 1.0).unwrap();
        Network::new(weights, Activation::Identity)
    }

    #[test]
    fn test_single_pixel_drawing() {
        let mut bitmap = Bitmap::new(240, 320);
        bitmap.mark(10, 10);

        let output = classify_drawing(&bitmap, &bias_network(3)).unwrap();
        assert_eq!(output.digit, 3);
        assert_eq!(output.bounds, BoundingBox::new(10, 10, 10, 10));
        assert!(output.features.get(0, 0));
        assert_eq!(output.features.count_set(), 1);
        assert_eq!(output.scores.len(), 10);
        assert_eq!(output.scores[3], 1.0);
    }

    #[test]
    fn test_empty_bitmap() {
        let bitmap = Bitmap::new(240, 320);
        assert!(matches!(
            classify_drawing(&bitmap, &bias_network(3)),
            Err(PipelineError::EmptyDrawing)
        ));
    }

    #[test]
    fn test_input_pixels_drive_hidden_layer() {
        // hidden unit 0 reads feature cell (0, 0); output unit 8 reads hidden unit 0
        let mut weights = WeightTables::zeros(NetworkShape::default());
        weights.set_weight(Layer::Hidden, 0, 0, 1.0).unwrap();
        weights.set_weight(Layer::Output, 8, 0, 1.0).unwrap();
        weights.set_bias(Layer::Output, 1, 0.5).unwrap();
        let network = Network::new(weights, Activation::Identity);

        let mut bitmap = Bitmap::new(240, 320);
        bitmap.mark(100, 100);
        bitmap.mark(150, 200);
        assert_eq!(classify_drawing(&bitmap, &network).unwrap().digit, 8);

        // top-left corner empty: cell (0, 0) stays clear and the bias wins
        let mut bitmap = Bitmap::new(240, 320);
        bitmap.mark(150, 100);
        bitmap.mark(100, 200);
        assert_eq!(classify_drawing(&bitmap, &network).unwrap().digit, 1);
    }
}
