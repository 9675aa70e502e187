// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base values, defaults for anything missing)
//! 2. Environment variables (`DIGITPAD_*`)
//! 3. CLI arguments (explicit user overrides)

use crate::validation::validate_config;
use crate::{ConfigError, ConfigResult, DigitpadConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "digitpad.toml";

/// Find the digitpad configuration file
///
/// Search order:
/// 1. `DIGITPAD_CONFIG_PATH` environment variable
/// 2. Current working directory: `./digitpad.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("DIGITPAD_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by DIGITPAD_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet DIGITPAD_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DigitpadConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let config: DigitpadConfig = toml::from_str(&content)?;
    finish(config, cli_args)
}

/// Like [`load_config`] with file discovery, but falls back to built-in
/// defaults when no config file exists
///
/// A `DIGITPAD_CONFIG_PATH` naming a missing file is still an error.
pub fn load_config_or_default(
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DigitpadConfig> {
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) if env::var_os("DIGITPAD_CONFIG_PATH").is_none() => {
            finish(DigitpadConfig::default(), cli_args)
        }
        Err(e) => Err(e),
    }
}

fn finish(
    mut config: DigitpadConfig,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DigitpadConfig> {
    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }
    validate_config(&config)?;
    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DIGITPAD_SCREEN_WIDTH` -> `screen.width`
/// - `DIGITPAD_SCREEN_HEIGHT` -> `screen.height`
/// - `DIGITPAD_WEIGHTS_PATH` -> `weights.path`
/// - `DIGITPAD_ACTIVATION` -> `network.activation`
/// - `DIGITPAD_LOG_LEVEL` -> `logging.level`
/// - `DIGITPAD_CLEAR_AFTER_CLASSIFY` -> `capture.clear_after_classify`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut DigitpadConfig) {
    if let Ok(value) = env::var("DIGITPAD_SCREEN_WIDTH") {
        if let Ok(width) = value.parse::<usize>() {
            config.screen.width = width;
        }
    }
    if let Ok(value) = env::var("DIGITPAD_SCREEN_HEIGHT") {
        if let Ok(height) = value.parse::<usize>() {
            config.screen.height = height;
        }
    }
    if let Ok(value) = env::var("DIGITPAD_WEIGHTS_PATH") {
        config.weights.path = Some(PathBuf::from(value));
    }
    if let Ok(value) = env::var("DIGITPAD_ACTIVATION") {
        config.network.activation = value;
    }
    if let Ok(value) = env::var("DIGITPAD_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("DIGITPAD_CLEAR_AFTER_CLASSIFY") {
        if let Some(clear) = parse_bool(&value) {
            config.capture.clear_after_classify = clear;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"screen_width": "480", "activation": "relu"}`)
pub fn apply_cli_overrides(config: &mut DigitpadConfig, cli_args: &HashMap<String, String>) {
    // Screen
    if let Some(width) = cli_args.get("screen_width").and_then(|v| v.parse().ok()) {
        config.screen.width = width;
    }
    if let Some(height) = cli_args.get("screen_height").and_then(|v| v.parse().ok()) {
        config.screen.height = height;
    }

    // Network
    if let Some(units) = cli_args.get("hidden_units").and_then(|v| v.parse().ok()) {
        config.network.hidden_units = units;
    }
    if let Some(units) = cli_args.get("output_units").and_then(|v| v.parse().ok()) {
        config.network.output_units = units;
    }
    if let Some(value) = cli_args.get("activation") {
        config.network.activation = value.clone();
    }

    // Weights
    if let Some(value) = cli_args.get("weights_path") {
        config.weights.path = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("weights_format") {
        config.weights.format = value.clone();
    }

    // Scheduler
    if let Some(us) = cli_args.get("touch_interval_us").and_then(|v| v.parse().ok()) {
        config.scheduler.touch_interval_us = us;
    }
    if let Some(us) = cli_args.get("trigger_interval_us").and_then(|v| v.parse().ok()) {
        config.scheduler.trigger_interval_us = us;
    }

    // Capture
    let capture = &mut config.capture;
    for (key, field) in [
        ("clear_after_classify", &mut capture.clear_after_classify),
        ("mirror_touch", &mut capture.mirror_touch),
        ("render_digit", &mut capture.render_digit),
        ("render_boundaries", &mut capture.render_boundaries),
        ("dump_features", &mut capture.dump_features),
    ] {
        if let Some(value) = cli_args.get(key).and_then(|v| parse_bool(v)) {
            *field = value;
        }
    }

    // Logging
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: &[&str] = &[
        "DIGITPAD_SCREEN_WIDTH",
        "DIGITPAD_SCREEN_HEIGHT",
        "DIGITPAD_WEIGHTS_PATH",
        "DIGITPAD_ACTIVATION",
        "DIGITPAD_LOG_LEVEL",
        "DIGITPAD_CLEAR_AFTER_CLASSIFY",
    ];

    fn clear_override_vars() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("DIGITPAD_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("DIGITPAD_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();

        env::set_var("DIGITPAD_CONFIG_PATH", dir.path().join("absent.toml"));
        let result = find_config_file();
        env::remove_var("DIGITPAD_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(msg)) if msg.contains("DIGITPAD_CONFIG_PATH")));
    }

    #[test]
    fn test_load_or_default_reports_missing_env_path() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();

        env::set_var("DIGITPAD_CONFIG_PATH", dir.path().join("typo.toml"));
        let result = load_config_or_default(None);
        env::remove_var("DIGITPAD_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(msg)) if msg.contains("typo.toml")));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[screen]").unwrap();
        writeln!(file, "width = 480").unwrap();
        writeln!(file, "[capture]").unwrap();
        writeln!(file, "render_boundaries = true").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.screen.width, 480);
        assert_eq!(config.screen.height, 320);
        assert!(config.capture.render_boundaries);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[network]\nhidden_units = 0\n").unwrap();

        assert!(matches!(
            load_config(Some(&config_path), None),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[screen]\nwidth = \"wide\"\n").unwrap();

        assert!(matches!(
            load_config(Some(&config_path), None),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = DigitpadConfig::default();

        env::set_var("DIGITPAD_SCREEN_WIDTH", "128");
        env::set_var("DIGITPAD_SCREEN_HEIGHT", "not-a-number");
        env::set_var("DIGITPAD_ACTIVATION", "sigmoid");
        env::set_var("DIGITPAD_CLEAR_AFTER_CLASSIFY", "no");

        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.screen.width, 128);
        assert_eq!(config.screen.height, 320);
        assert_eq!(config.network.activation, "sigmoid");
        assert!(!config.capture.clear_after_classify);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = DigitpadConfig::default();
        let cli_args: HashMap<String, String> = [
            ("weights_path", "w.json"),
            ("weights_format", "json"),
            ("trigger_interval_us", "20000"),
            ("render_digit", "false"),
            ("dump_features", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.weights.path, Some(PathBuf::from("w.json")));
        assert_eq!(config.weights.format, "json");
        assert_eq!(config.scheduler.trigger_interval_us, 20_000);
        assert!(!config.capture.render_digit);
        assert!(config.capture.dump_features);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "activation = \"identity\"").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        env::set_var("DIGITPAD_ACTIVATION", "sigmoid");
        env::set_var("DIGITPAD_LOG_LEVEL", "debug");

        let mut cli_args = HashMap::new();
        cli_args.insert("activation".to_string(), "relu".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args));
        clear_override_vars();
        let config = config.unwrap();

        // CLI wins for activation, env wins for log level (no CLI override)
        assert_eq!(config.network.activation, "relu");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
