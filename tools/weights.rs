// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Weight File Converter

Converts trained weight tables between the MCU text listing, JSON and the
fixed-point FPGA memory image.

Usage:
  cargo run --bin digitpad-weights -- weights.txt --to json --output weights.json
  cargo run --bin digitpad-weights -- weights.txt --to fixed-point > weights.mem
*/

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use digitpad::inference::format::{to_fixed_point_listing, to_json, to_mcu_listing};
use digitpad::inference::{
    load_weights, save_weights, NetworkShape, WeightFormat, NUM_HIDDEN_UNITS, NUM_INPUT_UNITS,
    NUM_OUTPUT_UNITS,
};
use digitpad::observability::{init_logging, parse_debug_flags, LoggingOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    McuText,
    Json,
    FixedPoint,
}

/// Convert a weight file to another format
#[derive(Parser, Debug)]
#[command(name = "digitpad-weights", version, author, long_about = None)]
struct Args {
    /// Weight file to read
    input: PathBuf,

    /// Input format (default: guessed from the extension)
    #[arg(long)]
    from: Option<WeightFormat>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Target::Json)]
    to: Target,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hidden units in the weight file
    #[arg(long, default_value_t = NUM_HIDDEN_UNITS)]
    hidden: usize,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Enable debug logging for a crate (repeatable, or "all")
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let debug_flags = parse_debug_flags(&args.debug);
    let _log_guard = init_logging(&debug_flags, &LoggingOptions::with_level(&args.log_level))?;

    let shape = NetworkShape::new(NUM_INPUT_UNITS, args.hidden, NUM_OUTPUT_UNITS);
    let from = args
        .from
        .unwrap_or_else(|| WeightFormat::from_path(&args.input));
    let tables = load_weights(&args.input, from, shape)
        .with_context(|| format!("Failed to load weights from {}", args.input.display()))?;

    match (&args.output, args.to) {
        (Some(path), Target::McuText) => save_weights(&tables, path, WeightFormat::McuText)?,
        (Some(path), Target::Json) => save_weights(&tables, path, WeightFormat::Json)?,
        (Some(path), Target::FixedPoint) => fs::write(path, to_fixed_point_listing(&tables))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        (None, Target::McuText) => print!("{}", to_mcu_listing(&tables)),
        (None, Target::Json) => println!("{}", to_json(&tables)?),
        (None, Target::FixedPoint) => print!("{}", to_fixed_point_listing(&tables)),
    }

    info!(from = from.as_str(), to = ?args.to, "Converted weight tables");
    Ok(())
}
