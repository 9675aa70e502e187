// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Dataset Evaluation Tool

Classifies every sample of a Semeion data file with a weight file and
reports overall and per-digit accuracy.

Usage:
  cargo run --bin digitpad-eval -- semeion.data --weights weights.txt
*/

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use digitpad::inference::{
    evaluate, load_semeion, load_weights, Activation, Evaluation, Network, NetworkShape,
    WeightFormat, NUM_HIDDEN_UNITS, NUM_INPUT_UNITS, NUM_OUTPUT_UNITS,
};
use digitpad::observability::{init_logging, parse_debug_flags, LoggingOptions};

/// Measure classification accuracy on a Semeion data file
#[derive(Parser, Debug)]
#[command(name = "digitpad-eval", version, author, long_about = None)]
struct Args {
    /// Semeion data file (256 pixel values + 10 label columns per line)
    data: PathBuf,

    /// Weight file
    #[arg(short, long)]
    weights: PathBuf,

    /// Weight file format (default: guessed from the extension)
    #[arg(long)]
    format: Option<WeightFormat>,

    /// Hidden units in the weight file
    #[arg(long, default_value_t = NUM_HIDDEN_UNITS)]
    hidden: usize,

    /// Activation applied to the hidden and output layers (identity, sigmoid or relu)
    #[arg(long, default_value_t = Activation::Identity)]
    activation: Activation,

    /// Print the feature grid of every misclassified sample
    #[arg(long, default_value_t = false)]
    show_misses: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable debug logging for a crate (repeatable, or "all")
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,
}

fn print_report(evaluation: &Evaluation) {
    println!("digit  correct  total  accuracy");
    for (digit, tally) in evaluation.per_digit.iter().enumerate() {
        println!(
            "{:>5}  {:>7}  {:>5}  {:>7.2}%",
            digit,
            tally.correct,
            tally.total,
            tally.accuracy() * 100.0
        );
    }
    println!(
        "  all  {:>7}  {:>5}  {:>7.2}%",
        evaluation.correct,
        evaluation.total,
        evaluation.accuracy() * 100.0
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    let debug_flags = parse_debug_flags(&args.debug);
    let _log_guard = init_logging(&debug_flags, &LoggingOptions::with_level(&args.log_level))?;

    let shape = NetworkShape::new(NUM_INPUT_UNITS, args.hidden, NUM_OUTPUT_UNITS);
    let format = args
        .format
        .unwrap_or_else(|| WeightFormat::from_path(&args.weights));
    let weights = load_weights(&args.weights, format, shape)
        .with_context(|| format!("Failed to load weights from {}", args.weights.display()))?;
    let network = Network::new(weights, args.activation);

    let samples = load_semeion(&args.data)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;
    info!(samples = samples.len(), activation = %args.activation, "Evaluating dataset");

    if args.show_misses {
        for (index, sample) in samples.iter().enumerate() {
            let predicted = network.classify(&sample.features)?;
            if predicted != sample.label {
                println!(
                    "sample {}: labelled {}, classified {}\n{}",
                    index, sample.label, predicted, sample.features
                );
            }
        }
    }

    print_report(&evaluate(&network, &samples)?);
    Ok(())
}
