// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every rule is checked and all violations are reported together.

use crate::types::{ACTIVATIONS, LOG_LEVELS, WEIGHT_FORMATS};
use crate::{ConfigError, ConfigResult, DigitpadConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MustBePositive { field: String },
    UnknownOption {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },
    IntervalOrder { touch_us: u64, trigger_us: u64 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MustBePositive { field } => {
                write!(f, "{} must be greater than zero", field)
            }
            Self::UnknownOption {
                field,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "Invalid configuration value for {}: '{}' (expected one of: {})",
                    field,
                    value,
                    allowed.join(", ")
                )
            }
            Self::IntervalOrder {
                touch_us,
                trigger_us,
            } => {
                write!(
                    f,
                    "scheduler.trigger_interval_us ({}) must not be shorter than scheduler.touch_interval_us ({})",
                    trigger_us, touch_us
                )
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &DigitpadConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// All violations, in section order
pub fn collect_errors(config: &DigitpadConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_sizes(config, &mut errors);
    validate_options(config, &mut errors);
    validate_scheduler(config, &mut errors);
    errors
}

fn validate_sizes(config: &DigitpadConfig, errors: &mut Vec<ConfigValidationError>) {
    for (field, value) in [
        ("screen.width", config.screen.width),
        ("screen.height", config.screen.height),
        ("network.hidden_units", config.network.hidden_units),
        ("network.output_units", config.network.output_units),
    ] {
        if value == 0 {
            errors.push(ConfigValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
    }
}

fn validate_options(config: &DigitpadConfig, errors: &mut Vec<ConfigValidationError>) {
    for (field, value, allowed) in [
        ("network.activation", &config.network.activation, ACTIVATIONS),
        ("weights.format", &config.weights.format, WEIGHT_FORMATS),
        ("logging.level", &config.logging.level, LOG_LEVELS),
    ] {
        if !allowed.iter().any(|option| option.eq_ignore_ascii_case(value.trim())) {
            errors.push(ConfigValidationError::UnknownOption {
                field: field.to_string(),
                value: value.clone(),
                allowed,
            });
        }
    }
}

fn validate_scheduler(config: &DigitpadConfig, errors: &mut Vec<ConfigValidationError>) {
    let scheduler = &config.scheduler;
    if scheduler.touch_interval_us == 0 {
        errors.push(ConfigValidationError::MustBePositive {
            field: "scheduler.touch_interval_us".to_string(),
        });
    }
    if scheduler.trigger_interval_us == 0 {
        errors.push(ConfigValidationError::MustBePositive {
            field: "scheduler.trigger_interval_us".to_string(),
        });
    }
    if scheduler.trigger_interval_us < scheduler.touch_interval_us {
        errors.push(ConfigValidationError::IntervalOrder {
            touch_us: scheduler.touch_interval_us,
            trigger_us: scheduler.trigger_interval_us,
        });
    }
}
