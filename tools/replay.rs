// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Stroke Replay Tool

Drives a full capture session from a text script instead of hardware, using
a manual clock and scripted touch/trigger services.

Script lines:
  x y        queue one touch sample and advance one touch tick
  press      hold the trigger line low
  release    let the trigger line go back high
  tick N     advance N touch ticks
  # ...      comment

Usage:
  cargo run --bin digitpad-replay -- strokes.txt --weights weights.txt --dump
*/

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use digitpad::config::{load_config, load_config_or_default};
use digitpad::hal::mock::{ManualClock, RecordingDisplay, ScriptedTouch, ScriptedTrigger};
use digitpad::hal::{Color, TimeProvider};
use digitpad::observability::{init_logging, parse_debug_flags, LoggingOptions};
use digitpad::runtime::Session;

/// Replay a stroke script through the digit classifier
#[derive(Parser, Debug)]
#[command(name = "digitpad-replay", version, author, long_about = None)]
struct Args {
    /// Stroke script to replay
    script: PathBuf,

    /// Configuration file (default: search for digitpad.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Weight file, overriding the configuration
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Weight file format (mcu_text or json)
    #[arg(long)]
    format: Option<String>,

    /// Activation applied to the hidden and output layers (identity, sigmoid or relu)
    #[arg(long)]
    activation: Option<String>,

    /// Print the 16x16 feature grid of every classification
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Enable debug logging for a crate (repeatable, or "all")
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptCommand {
    Touch { x: usize, y: usize },
    Press,
    Release,
    Tick(u64),
}

fn parse_script(text: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let command = match fields.as_slice() {
            ["press"] => ScriptCommand::Press,
            ["release"] => ScriptCommand::Release,
            ["tick", n] => ScriptCommand::Tick(
                n.parse()
                    .with_context(|| format!("line {}: invalid tick count '{}'", index + 1, n))?,
            ),
            [x, y] => ScriptCommand::Touch {
                x: x.parse()
                    .with_context(|| format!("line {}: invalid x '{}'", index + 1, x))?,
                y: y.parse()
                    .with_context(|| format!("line {}: invalid y '{}'", index + 1, y))?,
            },
            _ => bail!("line {}: unrecognized command '{}'", index + 1, line),
        };
        commands.push(command);
    }
    Ok(commands)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut overrides = HashMap::new();
    if let Some(path) = &args.weights {
        overrides.insert("weights_path".to_string(), path.display().to_string());
    }
    if let Some(format) = &args.format {
        overrides.insert("weights_format".to_string(), format.clone());
    }
    if let Some(activation) = &args.activation {
        overrides.insert("activation".to_string(), activation.clone());
    }
    let config = match &args.config {
        Some(path) => load_config(Some(path.as_path()), Some(&overrides)),
        None => load_config_or_default(Some(&overrides)),
    }
    .context("Failed to load configuration")?;

    let debug_flags = parse_debug_flags(&args.debug);
    let _log_guard = init_logging(&debug_flags, &LoggingOptions::with_level(&config.logging.level))?;

    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let commands = parse_script(&text)?;
    info!(script = %args.script.display(), commands = commands.len(), "Replaying stroke script");

    let mut replay = Replay {
        session: Session::from_config(&config)?,
        clock: ManualClock::new(),
        touch: ScriptedTouch::new(),
        trigger: ScriptedTrigger::new(),
        display: RecordingDisplay::new(),
        tick_us: config.scheduler.touch_interval_us,
        dump: args.dump,
        classifications: 0,
    };
    for command in commands {
        replay.apply(command);
    }

    if replay.touch.pending() > 0 {
        warn!(pending = replay.touch.pending(), "Script ended with unread touch samples");
    }
    info!(
        classifications = replay.classifications,
        green_pixels = replay.display.count(Color::Green),
        "Replay finished"
    );
    Ok(())
}

struct Replay {
    session: Session,
    clock: ManualClock,
    touch: ScriptedTouch,
    trigger: ScriptedTrigger,
    display: RecordingDisplay,
    tick_us: u64,
    dump: bool,
    classifications: usize,
}

impl Replay {
    fn apply(&mut self, command: ScriptCommand) {
        match command {
            ScriptCommand::Touch { x, y } => {
                self.touch.push(x, y);
                self.advance(1);
            }
            ScriptCommand::Press => self.trigger.set_idle(false),
            ScriptCommand::Release => self.trigger.set_idle(true),
            ScriptCommand::Tick(n) => self.advance(n),
        }
    }

    fn advance(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.clock.advance(self.tick_us);
            let now_us = self.clock.get_time_us();
            let result = self.session.step(
                &self.clock,
                &mut self.touch,
                &mut self.trigger,
                &mut self.display,
            );
            match result {
                Some(Ok(output)) => {
                    self.classifications += 1;
                    println!("t={}us digit={}", now_us, output.digit);
                    if self.dump {
                        println!("{}", output.features);
                    }
                }
                Some(Err(e)) => println!("t={}us skipped: {}", now_us, e),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let commands = parse_script("# stroke\n10 20\n\npress # hold\ntick 3\nrelease\n").unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Touch { x: 10, y: 20 },
                ScriptCommand::Press,
                ScriptCommand::Tick(3),
                ScriptCommand::Release,
            ]
        );
    }

    #[test]
    fn test_press_fires_once() {
        let config = digitpad::config::DigitpadConfig::default();
        let mut replay = Replay {
            session: Session::new(&config, digitpad::runtime::build_network(&config).unwrap()),
            clock: ManualClock::new(),
            touch: ScriptedTouch::new(),
            trigger: ScriptedTrigger::new(),
            display: RecordingDisplay::new(),
            tick_us: config.scheduler.touch_interval_us,
            dump: false,
            classifications: 0,
        };
        let script = "100 100\n101 101\npress\ntick 10\nrelease\ntick 4\n";
        for command in parse_script(script).unwrap() {
            replay.apply(command);
        }
        assert_eq!(replay.classifications, 1);
        assert!(replay.session.bitmap().is_empty());
    }

    #[test]
    fn test_bad_line_is_reported() {
        let err = parse_script("10 20\nswipe left\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_script("10 -5\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
