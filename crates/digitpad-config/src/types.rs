// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `digitpad.toml`. Every field has a
//! default, so a partial (or empty) file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Activation names accepted in `network.activation`
pub const ACTIVATIONS: &[&str] = &["identity", "sigmoid", "relu"];

/// Weight file formats accepted in `weights.format`
pub const WEIGHT_FORMATS: &[&str] = &["mcu_text", "json"];

/// Log levels accepted in `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DigitpadConfig {
    pub screen: ScreenConfig,
    pub network: NetworkConfig,
    pub weights: WeightsConfig,
    pub scheduler: SchedulerConfig,
    pub capture: CaptureConfig,
    pub logging: LoggingConfig,
}

/// Touch panel resolution, in core coordinates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 320,
        }
    }
}

/// Network topology; the input layer is always the 256-cell feature grid
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_units: usize,
    pub output_units: usize,
    /// "identity" (linear), "sigmoid" or "relu"
    pub activation: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_units: 10,
            output_units: 10,
            activation: "identity".to_string(),
        }
    }
}

/// Weight file location; no path means all-zero weights
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub path: Option<PathBuf>,
    /// "mcu_text" or "json"
    pub format: String,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: "mcu_text".to_string(),
        }
    }
}

/// Tick periods of the two periodic events
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Touch sampling period
    pub touch_interval_us: u64,
    /// Trigger sampling (and classification) period
    pub trigger_interval_us: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            touch_interval_us: 5_000,
            trigger_interval_us: 10_000,
        }
    }
}

/// Capture loop behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Reset the bitmap once a drawing has been classified
    pub clear_after_classify: bool,
    /// Touch controller reports coordinates from the opposite corner
    pub mirror_touch: bool,
    /// Echo accepted touch samples to the display
    pub render_digit: bool,
    /// Outline the bounding box after classification
    pub render_boundaries: bool,
    /// Log the 16×16 feature grid of every classification
    pub dump_features: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            clear_after_classify: true,
            mirror_touch: true,
            render_digit: true,
            render_boundaries: false,
            dump_features: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let config: DigitpadConfig = toml::from_str("").unwrap();
        assert_eq!(config, DigitpadConfig::default());
        assert_eq!(config.screen.width, 240);
        assert_eq!(config.screen.height, 320);
        assert_eq!(config.network.activation, "identity");
        assert!(config.capture.clear_after_classify);
        assert!(config.weights.path.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: DigitpadConfig = toml::from_str(
            r#"
            [network]
            activation = "sigmoid"

            [weights]
            path = "weights/semeion.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.network.activation, "sigmoid");
        assert_eq!(config.network.hidden_units, 10);
        assert_eq!(config.weights.path, Some(PathBuf::from("weights/semeion.txt")));
        assert_eq!(config.weights.format, "mcu_text");
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(DigitpadConfig::default()).unwrap();
        assert_eq!(json["scheduler"]["touch_interval_us"], 5000);
        assert_eq!(json["capture"]["render_boundaries"], false);
    }
}
